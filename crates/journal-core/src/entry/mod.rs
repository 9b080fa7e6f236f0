//! Journal entry service.
//!
//! Orchestrates entry CRUD against an [`EntryStore`](crate::store::EntryStore)
//! and on-demand analysis through a
//! [`ChatCompletion`](crate::llm::ChatCompletion) endpoint.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      EntryService                        │
//! │  ┌───────────────────────────┐  ┌──────────────────────┐ │
//! │  │ create/list/get/update/   │  │       analyze        │ │
//! │  │ delete/delete_all         │  │ (prompt + schema)    │ │
//! │  └───────────────────────────┘  └──────────────────────┘ │
//! │               │                            │             │
//! │          EntryStore                 ChatCompletion       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use journal_core::entry::EntryService;
//!
//! let service = EntryService::new(store, llm, &llm_config);
//! let entry = service.create(NewEntry { work, struggle, intention }).await?;
//! let analysis = service.analyze(&entry.id).await?;
//! ```

mod analysis;
mod service;

pub use analysis::*;
pub use service::*;
