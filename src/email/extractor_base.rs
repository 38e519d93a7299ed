use thiserror::Error;

use super::common::ExtractionOutcome;

/// Failures raised while talking to the mail client automation
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("{0}")]
    DependencyMissing(String),

    #[error("{0}")]
    Invocation(String),

    #[error("Field access failed: {0}")]
    Field(String),
}

/// Contract shared by both extraction variants: produce the records of the
/// last `days` days across Inbox and Sent Items.
///
/// Implementations never return an error to the caller: failures of the
/// automation itself are folded into `ExtractionOutcome::Failed`.
pub trait MailExtractor {
    fn extract(&self, days: u32) -> ExtractionOutcome;

    /// Name of this extractor (for logging)
    fn extractor_name(&self) -> &str;
}
