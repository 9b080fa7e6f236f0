//! Shared types for journal-core.

use chrono::{DateTime, SubsecRound, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Entry Types
// ─────────────────────────────────────────────────────────────────────────────

/// A stored journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub work: String,
    pub struggle: String,
    pub intention: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Merge a partial update into this entry.
    ///
    /// Only the text fields are touched; identity and timestamps are owned
    /// by the service.
    pub fn apply(&mut self, patch: EntryPatch) {
        if let Some(work) = patch.work {
            self.work = work;
        }
        if let Some(struggle) = patch.struggle {
            self.struggle = struggle;
        }
        if let Some(intention) = patch.intention {
            self.intention = intention;
        }
    }

    /// Combined text sent to the model for analysis.
    pub fn analysis_text(&self) -> String {
        format!(
            "Work: {}\n\nStruggle: {}\n\nIntention: {}",
            self.work, self.struggle, self.intention
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Types
// ─────────────────────────────────────────────────────────────────────────────

/// Input for creating a new entry. Missing fields default to empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    #[serde(default)]
    pub work: String,
    #[serde(default)]
    pub struggle: String,
    #[serde(default)]
    pub intention: String,
}

/// Partial update for an existing entry.
///
/// Unknown keys (including `id`, `created_at`, `updated_at`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(default)]
    pub work: Option<String>,
    #[serde(default)]
    pub struggle: Option<String>,
    #[serde(default)]
    pub intention: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis Types
// ─────────────────────────────────────────────────────────────────────────────

/// Overall tone of an entry as judged by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// Structured analysis of a single entry. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(rename = "AnalysisResponse")]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Two sentence summary of key learnings and challenges
    pub summary: String,
    /// One to three key topics
    pub topics: Vec<String>,
    #[serde(deserialize_with = "bool_or_string")]
    #[schemars(with = "bool")]
    pub struggle_detected: bool,
}

/// Smallest and largest number of topics an analysis may carry.
pub const TOPICS_MIN: usize = 1;
pub const TOPICS_MAX: usize = 3;

/// Models sometimes answer `"true"`/`"false"` instead of a JSON bool.
fn bool_or_string<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolLike {
        Bool(bool),
        Text(String),
    }

    match BoolLike::deserialize(deserializer)? {
        BoolLike::Bool(b) => Ok(b),
        BoolLike::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected \"true\" or \"false\", got {:?}",
                other
            ))),
        },
    }
}

/// Current UTC time at the precision the store keeps (milliseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> Entry {
        let now = timestamp_now();
        Entry {
            id: "entry-1".to_string(),
            work: "Built a parser".to_string(),
            struggle: "Lifetimes".to_string(),
            intention: "Read the nomicon".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut entry = sample_entry();
        entry.apply(EntryPatch {
            struggle: Some("Borrow checker".to_string()),
            ..Default::default()
        });

        assert_eq!(entry.work, "Built a parser");
        assert_eq!(entry.struggle, "Borrow checker");
        assert_eq!(entry.intention, "Read the nomicon");
    }

    #[test]
    fn test_patch_ignores_identity_fields() {
        let patch: EntryPatch = serde_json::from_str(
            r#"{"id": "other", "created_at": "2020-01-01T00:00:00Z", "work": "new"}"#,
        )
        .unwrap();
        assert_eq!(patch.work.as_deref(), Some("new"));
        assert!(patch.struggle.is_none());
    }

    #[test]
    fn test_new_entry_defaults_missing_fields() {
        let new: NewEntry = serde_json::from_str(r#"{"work": "X"}"#).unwrap();
        assert_eq!(new.work, "X");
        assert_eq!(new.struggle, "");
        assert_eq!(new.intention, "");
    }

    #[test]
    fn test_analysis_text_format() {
        let entry = sample_entry();
        assert_eq!(
            entry.analysis_text(),
            "Work: Built a parser\n\nStruggle: Lifetimes\n\nIntention: Read the nomicon"
        );
    }

    #[test]
    fn test_struggle_detected_accepts_string_or_bool() {
        let json = r#"{"sentiment":"neutral","summary":"s","topics":["a"],"struggle_detected":"true"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.struggle_detected);

        let json = r#"{"sentiment":"positive","summary":"s","topics":["a"],"struggle_detected":false}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(!result.struggle_detected);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_struggle_detected_rejects_other_text() {
        let json = r#"{"sentiment":"neutral","summary":"s","topics":["a"],"struggle_detected":"maybe"}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_unknown_sentiment_rejected() {
        let json = r#"{"sentiment":"ecstatic","summary":"s","topics":["a"],"struggle_detected":true}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_sentiment_as_str_matches_wire_name() {
        for sentiment in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
            let wire = serde_json::to_value(sentiment).unwrap();
            assert_eq!(wire, sentiment.as_str());
        }
    }

    #[test]
    fn test_timestamp_now_is_millisecond_precision() {
        let now = timestamp_now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
