pub mod common;
pub mod extractor_base;

// Re-export commonly used items
pub use common::{truncate_chars, EmailRecord, ErrorResult, ExtractionOutcome};
pub use extractor_base::{AutomationError, MailExtractor};
