/// Outlook for Windows extraction through the COM object model
pub mod extractor;
pub mod model;
pub mod session;

pub use extractor::ObjectModelExtractor;
pub use model::{AutomationConnector, AutomationMessage, AutomationNamespace, DefaultFolder};
pub use session::OutlookConnector;
