/// Common structures shared by both extraction variants
use serde::Serialize;

/// Canonical five-field record written to the output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRecord {
    pub folder: String,
    pub subject: String,
    pub sender: String,
    pub received: String,
    pub content: String,
}

/// Written in place of the record list when extraction fails outright
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// What an extractor hands to the output writer.
///
/// Serialized untagged: either a plain JSON array of records or a
/// `{"error": ...}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractionOutcome {
    Records(Vec<EmailRecord>),
    Failed(ErrorResult),
}

impl ExtractionOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        ExtractionOutcome::Failed(ErrorResult::new(message))
    }

    pub fn records(&self) -> &[EmailRecord] {
        match self {
            ExtractionOutcome::Records(records) => records,
            ExtractionOutcome::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ExtractionOutcome::Failed(_))
    }
}

/// Truncate to at most `limit` characters (not bytes)
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
