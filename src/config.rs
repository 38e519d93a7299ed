use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Prefix of the environment variables read by [`Config::new`]
pub const ENV_PREFIX: &str = "OUTLOOK_SYNCER";

/// Name of the JSON file written next to the executable
pub const OUTPUT_FILE_NAME: &str = "daily_emails.json";

const DEFAULT_DAYS: i64 = 1;
const DEFAULT_SCRIPT_TIMEOUT_SECS: i64 = 300;
const DEFAULT_SCAN_CAP: i64 = 100;

const DEFAULT_INBOX_TOKENS: &[&str] = &[
    "Inbox",
    "Posteingang",
    "Boîte de réception",
    "Bandeja de entrada",
    "Posta in arrivo",
];

const DEFAULT_SENT_TOKENS: &[&str] = &[
    "Sent",
    "Gesendet",
    "Éléments envoyés",
    "Elementos enviados",
    "Posta inviata",
];

/// Canonical class of a mailbox folder, whatever its localized name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderClass {
    Inbox,
    SentItems,
}

impl FolderClass {
    pub fn label(&self) -> &'static str {
        match self {
            FolderClass::Inbox => "Inbox",
            FolderClass::SentItems => "Sent Items",
        }
    }
}

/// `{locale_token → canonical_folder_class}` table used to pick folders.
///
/// A folder matches when its name contains a token (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTokens {
    entries: Vec<(String, FolderClass)>,
}

impl FolderTokens {
    pub fn new(inbox: Vec<String>, sent: Vec<String>) -> Self {
        let entries = inbox
            .into_iter()
            .map(|token| (token, FolderClass::Inbox))
            .chain(sent.into_iter().map(|token| (token, FolderClass::SentItems)))
            .filter(|(token, _)| !token.is_empty())
            .collect();
        FolderTokens { entries }
    }

    /// Build from two comma-separated lists, e.g. "Inbox,Posteingang"
    pub fn from_lists(inbox: &str, sent: &str) -> Self {
        Self::new(split_list(inbox), split_list(sent))
    }

    pub fn entries(&self) -> &[(String, FolderClass)] {
        &self.entries
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(token, _)| token.as_str())
    }

    pub fn classify(&self, folder_name: &str) -> Option<FolderClass> {
        self.entries
            .iter()
            .find(|(token, _)| folder_name.contains(token.as_str()))
            .map(|(_, class)| *class)
    }
}

impl Default for FolderTokens {
    fn default() -> Self {
        Self::new(
            DEFAULT_INBOX_TOKENS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_SENT_TOKENS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    days: u32,
    output_path: Option<String>,
    script_timeout_secs: u64,
    scan_cap: usize,
    inbox_tokens: String,
    sent_tokens: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub days: u32,
    pub output_path: PathBuf,
    pub script_timeout: Duration,
    pub scan_cap: usize,
    pub folder_tokens: FolderTokens,
}

impl Config {
    /// Load defaults overridden by `OUTLOOK_SYNCER_*` environment variables
    pub fn new() -> Result<Self> {
        Self::from_environment(::config::Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_environment(environment: ::config::Environment) -> Result<Self> {
        let raw: RawSettings = ::config::Config::builder()
            .set_default("days", DEFAULT_DAYS)?
            .set_default("script_timeout_secs", DEFAULT_SCRIPT_TIMEOUT_SECS)?
            .set_default("scan_cap", DEFAULT_SCAN_CAP)?
            .set_default("inbox_tokens", DEFAULT_INBOX_TOKENS.join(","))?
            .set_default("sent_tokens", DEFAULT_SENT_TOKENS.join(","))?
            .add_source(environment)
            .build()
            .context("Unable to load configuration")?
            .try_deserialize()
            .context("Invalid configuration values")?;

        let output_path = match raw.output_path.filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_output_path()?,
        };

        let folder_tokens = FolderTokens::from_lists(&raw.inbox_tokens, &raw.sent_tokens);
        if folder_tokens.entries().is_empty() {
            anyhow::bail!(
                "No folder tokens configured: set {}_INBOX_TOKENS or {}_SENT_TOKENS",
                ENV_PREFIX,
                ENV_PREFIX
            );
        }

        Ok(Config {
            days: raw.days,
            output_path,
            script_timeout: Duration::from_secs(raw.script_timeout_secs),
            scan_cap: raw.scan_cap,
            folder_tokens,
        })
    }
}

/// `daily_emails.json` in the directory holding the running executable
pub fn default_output_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Unable to locate the running executable")?;
    let dir = exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(dir.join(OUTPUT_FILE_NAME))
}
