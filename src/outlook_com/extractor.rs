use chrono::{Duration, Local, NaiveDateTime};
use log::{debug, error, info, warn};

use super::model::{AutomationConnector, AutomationMessage, AutomationNamespace, DefaultFolder};
use crate::email::{truncate_chars, AutomationError, EmailRecord, ExtractionOutcome, MailExtractor};

/// Maximum number of characters kept from a message body
pub const BODY_LIMIT: usize = 1000;

/// Sender recorded for Sent Items
pub const SENT_PLACEHOLDER: &str = "Me";

const RECEIVED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Extracts mail from Outlook for Windows through its object model.
///
/// Folders are walked newest first and the walk stops at the first message
/// older than the cutoff. A message whose fields cannot be read is skipped
/// entirely.
pub struct ObjectModelExtractor<C: AutomationConnector> {
    connector: C,
    clock: fn() -> NaiveDateTime,
}

impl<C: AutomationConnector> ObjectModelExtractor<C> {
    pub fn new(connector: C) -> Self {
        ObjectModelExtractor {
            connector,
            clock: local_now,
        }
    }

    /// Replace the source of "now" used to compute the cutoff
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    fn collect(&self, days: u32) -> Result<Vec<EmailRecord>, AutomationError> {
        let namespace = self.connector.connect()?;
        // A window reaching past the representable range keeps every message
        let now = (self.clock)();
        let cutoff = Duration::try_days(i64::from(days))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(NaiveDateTime::MIN);
        debug!("Cutoff: {}", cutoff.format(RECEIVED_FORMAT));

        let mut records = Vec::new();
        for folder in DefaultFolder::ALL {
            let before = records.len();
            for item in namespace.items_newest_first(folder)? {
                let message = match item {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("Skipping unreadable item in {}: {}", folder.label(), e);
                        continue;
                    }
                };

                match read_message(&message, folder, cutoff) {
                    Ok(Some(record)) => records.push(record),
                    Ok(None) => {
                        debug!("Reached cutoff in {}", folder.label());
                        break;
                    }
                    Err(e) => warn!("Skipping message in {}: {}", folder.label(), e),
                }
            }
            info!("{}: {} message(s) extracted", folder.label(), records.len() - before);
        }

        Ok(records)
    }
}

/// `None` once the message is older than `cutoff`
fn read_message<M: AutomationMessage>(
    message: &M,
    folder: DefaultFolder,
    cutoff: NaiveDateTime,
) -> Result<Option<EmailRecord>, AutomationError> {
    let received = message.received_time()?;
    if received < cutoff {
        return Ok(None);
    }

    let sender = match folder {
        DefaultFolder::Inbox => message.sender_name()?,
        DefaultFolder::SentItems => SENT_PLACEHOLDER.to_string(),
    };

    Ok(Some(EmailRecord {
        folder: folder.label().to_string(),
        subject: message.subject()?,
        sender,
        received: received.format(RECEIVED_FORMAT).to_string(),
        content: truncate_chars(&message.body()?, BODY_LIMIT),
    }))
}

impl<C: AutomationConnector> MailExtractor for ObjectModelExtractor<C> {
    fn extract(&self, days: u32) -> ExtractionOutcome {
        match self.collect(days) {
            Ok(records) => ExtractionOutcome::Records(records),
            Err(e) => {
                error!("COM extraction failed: {}", e);
                ExtractionOutcome::failed(e.to_string())
            }
        }
    }

    fn extractor_name(&self) -> &str {
        "Outlook for Windows (COM)"
    }
}
