use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::email::AutomationError;

/// Well-known Outlook folders read by the object model extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultFolder {
    Inbox,
    SentItems,
}

impl DefaultFolder {
    /// Scan order
    pub const ALL: [DefaultFolder; 2] = [DefaultFolder::Inbox, DefaultFolder::SentItems];

    /// `OlDefaultFolders` identifier
    pub fn id(&self) -> i32 {
        match self {
            DefaultFolder::Inbox => 6,
            DefaultFolder::SentItems => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DefaultFolder::Inbox => "Inbox",
            DefaultFolder::SentItems => "Sent Items",
        }
    }
}

/// Opens a session on the mail client's automation namespace
pub trait AutomationConnector {
    type Namespace: AutomationNamespace;

    fn connect(&self) -> Result<Self::Namespace, AutomationError>;
}

/// Item iterator over one folder; each item may fail on its own
pub type MessageIter<'a, M> = Box<dyn Iterator<Item = Result<M, AutomationError>> + 'a>;

pub trait AutomationNamespace {
    type Message: AutomationMessage;

    /// All items of `folder`, sorted by received time, newest first
    fn items_newest_first(
        &self,
        folder: DefaultFolder,
    ) -> Result<MessageIter<'_, Self::Message>, AutomationError>;
}

/// Field accessors of a single mail item. Any of them may fail, e.g. while
/// the item is still being synchronized.
pub trait AutomationMessage {
    fn received_time(&self) -> Result<NaiveDateTime, AutomationError>;
    fn subject(&self) -> Result<String, AutomationError>;
    fn sender_name(&self) -> Result<String, AutomationError>;
    fn body(&self) -> Result<String, AutomationError>;
}

/// Convert an OLE Automation date (days since 1899-12-30) to a local timestamp
pub fn from_ole_automation_date(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (value * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::try_milliseconds(millis)?)
}
