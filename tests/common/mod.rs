// Test doubles for the two automation collaborators
#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::collections::HashMap;

use outlook_syncer::applescript::script::{FIELD_SEPARATOR, RECORD_SEPARATOR};
use outlook_syncer::applescript::ScriptBridge;
use outlook_syncer::email::AutomationError;
use outlook_syncer::outlook_com::model::MessageIter;
use outlook_syncer::outlook_com::{AutomationConnector, AutomationMessage, AutomationNamespace, DefaultFolder};

/// Bridge returning a fixed payload (or failure) and recording the scripts it received
pub struct CannedBridge {
    result: Result<String, String>,
    pub scripts: RefCell<Vec<String>>,
}

impl CannedBridge {
    pub fn payload(payload: impl Into<String>) -> Self {
        CannedBridge {
            result: Ok(payload.into()),
            scripts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        CannedBridge {
            result: Err(message.into()),
            scripts: RefCell::new(Vec::new()),
        }
    }
}

impl ScriptBridge for CannedBridge {
    fn run(&self, script: &str) -> Result<String, AutomationError> {
        self.scripts.borrow_mut().push(script.to_string());
        self.result.clone().map_err(AutomationError::Invocation)
    }
}

/// One delimited record as the AppleScript would emit it
pub fn delimited(fields: &[&str]) -> String {
    let mut line = fields.join(&FIELD_SEPARATOR.to_string());
    line.push(RECORD_SEPARATOR);
    line
}

pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 6)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn hours_ago(hours: i64) -> NaiveDateTime {
    fixed_now() - Duration::hours(hours)
}

/// A mail item; `None` fields fail when read
#[derive(Debug, Clone)]
pub struct MockMessage {
    pub received: Option<NaiveDateTime>,
    pub subject: Option<String>,
    pub sender: Option<String>,
    pub body: Option<String>,
}

impl MockMessage {
    pub fn new(received: NaiveDateTime, subject: &str) -> Self {
        MockMessage {
            received: Some(received),
            subject: Some(subject.to_string()),
            sender: Some("Alice Martin".to_string()),
            body: Some(format!("Body of {}", subject)),
        }
    }
}

fn field<T: Clone>(value: &Option<T>, name: &str) -> Result<T, AutomationError> {
    value
        .clone()
        .ok_or_else(|| AutomationError::Field(format!("{} unavailable", name)))
}

impl AutomationMessage for MockMessage {
    fn received_time(&self) -> Result<NaiveDateTime, AutomationError> {
        field(&self.received, "ReceivedTime")
    }

    fn subject(&self) -> Result<String, AutomationError> {
        field(&self.subject, "Subject")
    }

    fn sender_name(&self) -> Result<String, AutomationError> {
        field(&self.sender, "SenderName")
    }

    fn body(&self) -> Result<String, AutomationError> {
        field(&self.body, "Body")
    }
}

pub struct MockNamespace {
    folders: HashMap<DefaultFolder, Vec<MockMessage>>,
}

impl AutomationNamespace for MockNamespace {
    type Message = MockMessage;

    fn items_newest_first(&self, folder: DefaultFolder) -> Result<MessageIter<'_, MockMessage>, AutomationError> {
        let items = self.folders.get(&folder).cloned().unwrap_or_default();
        Ok(Box::new(items.into_iter().map(Ok)))
    }
}

/// Connector serving fixed folder contents, or failing to connect
pub struct MockConnector {
    folders: HashMap<DefaultFolder, Vec<MockMessage>>,
    missing_dependency: Option<String>,
}

impl MockConnector {
    pub fn new() -> Self {
        MockConnector {
            folders: HashMap::new(),
            missing_dependency: None,
        }
    }

    pub fn with_folder(mut self, folder: DefaultFolder, messages: Vec<MockMessage>) -> Self {
        self.folders.insert(folder, messages);
        self
    }

    pub fn missing_dependency(message: &str) -> Self {
        MockConnector {
            folders: HashMap::new(),
            missing_dependency: Some(message.to_string()),
        }
    }
}

impl AutomationConnector for MockConnector {
    type Namespace = MockNamespace;

    fn connect(&self) -> Result<MockNamespace, AutomationError> {
        if let Some(message) = &self.missing_dependency {
            return Err(AutomationError::DependencyMissing(message.clone()));
        }
        Ok(MockNamespace {
            folders: self.folders.clone(),
        })
    }
}
