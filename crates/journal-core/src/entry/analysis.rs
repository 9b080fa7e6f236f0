//! Prompt and response contract for entry analysis.

use schemars::schema_for;

use crate::error::{Error, Result};
use crate::llm::{ChatMessage, ChatRequest, JsonSchemaFormat, LlmConfig, ResponseFormat};
use crate::types::{AnalysisResult, Entry, TOPICS_MAX, TOPICS_MIN};

/// Name of the structured-output schema sent to the model.
pub const ANALYSIS_SCHEMA_NAME: &str = "AnalysisResponse";

/// Fixed system instruction for entry analysis.
pub const ANALYSIS_SYSTEM_PROMPT: &str = concat!(
    "You are an experienced learning coach analyzing student learning journals. ",
    "Analyze this journal entry and provide a response following this JSON format: ",
    r#"{"sentiment": "positive" | "negative" | "neutral", "#,
    r#""summary": "2 sentence summary", "#,
    r#""topics": ["topic1", "topic2"], "#,
    r#""struggle_detected": "true" | "false"} "#,
    "Rules: Ensure the summary captures key learnings and/or challenges. ",
    "Limit topics to 1-3 key topics. Be objective. ",
    "Do not make assumptions beyond what is written."
);

/// JSON schema the model output must satisfy.
pub fn analysis_schema() -> Result<serde_json::Value> {
    let mut schema = serde_json::to_value(schema_for!(AnalysisResult))?;
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
    }
    Ok(schema)
}

/// User message carrying the entry text.
pub fn analysis_user_message(entry: &Entry) -> String {
    format!("Journal Entry:\n{}", entry.analysis_text())
}

/// Build the full chat request for analysing `entry`.
pub fn build_analysis_request(entry: &Entry, config: &LlmConfig) -> Result<ChatRequest> {
    Ok(ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
            ChatMessage::user(analysis_user_message(entry)),
        ],
        response_format: Some(ResponseFormat::JsonSchema {
            json_schema: JsonSchemaFormat {
                name: ANALYSIS_SCHEMA_NAME.to_string(),
                schema: analysis_schema()?,
                strict: true,
            },
        }),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    })
}

/// Parse model output into an [`AnalysisResult`].
///
/// Empty or whitespace-only content is `EmptyResponse`; anything that does
/// not match the schema (including a topic count outside 1..=3) is
/// `MalformedAnalysis`.
pub fn parse_analysis(content: Option<&str>) -> Result<AnalysisResult> {
    let content = match content.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return Err(Error::EmptyResponse),
    };

    let result: AnalysisResult =
        serde_json::from_str(content).map_err(|e| Error::MalformedAnalysis(e.to_string()))?;

    let topics = result.topics.len();
    if !(TOPICS_MIN..=TOPICS_MAX).contains(&topics) {
        return Err(Error::MalformedAnalysis(format!(
            "expected {}-{} topics, got {}",
            TOPICS_MIN, TOPICS_MAX, topics
        )));
    }

    Ok(result)
}
