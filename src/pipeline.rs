use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

use crate::applescript::{OsaScriptRunner, ScriptingBridgeExtractor};
use crate::config::{Config, FolderClass, FolderTokens};
use crate::email::{EmailRecord, ExtractionOutcome, MailExtractor};
use crate::output_writer::write_output;
use crate::outlook_com::{ObjectModelExtractor, OutlookConnector};
use crate::platform::Platform;

/// Extraction strategy picked once at startup
pub enum Extractor {
    ScriptingBridge(ScriptingBridgeExtractor<OsaScriptRunner>),
    ObjectModel(ObjectModelExtractor<OutlookConnector>),
}

impl Extractor {
    /// `None` when the platform has no supported automation
    pub fn for_platform(platform: &Platform, config: &Config) -> Option<Self> {
        match platform {
            Platform::ScriptingBridge => Some(Extractor::ScriptingBridge(ScriptingBridgeExtractor::new(
                OsaScriptRunner::new(config.script_timeout),
                config.folder_tokens.clone(),
                config.scan_cap,
            ))),
            Platform::ObjectModel => Some(Extractor::ObjectModel(ObjectModelExtractor::new(OutlookConnector))),
            Platform::Unsupported(_) => None,
        }
    }
}

impl MailExtractor for Extractor {
    fn extract(&self, days: u32) -> ExtractionOutcome {
        match self {
            Extractor::ScriptingBridge(extractor) => extractor.extract(days),
            Extractor::ObjectModel(extractor) => extractor.extract(days),
        }
    }

    fn extractor_name(&self) -> &str {
        match self {
            Extractor::ScriptingBridge(extractor) => extractor.extractor_name(),
            Extractor::ObjectModel(extractor) => extractor.extractor_name(),
        }
    }
}

/// Extract, summarize, write. One pass, no retries.
pub struct Pipeline {
    days: u32,
    output_path: PathBuf,
    folder_tokens: FolderTokens,
}

impl Pipeline {
    pub fn new(days: u32, output_path: impl Into<PathBuf>, folder_tokens: FolderTokens) -> Self {
        Pipeline {
            days,
            output_path: output_path.into(),
            folder_tokens,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.days, config.output_path.clone(), config.folder_tokens.clone())
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Only a failure to write the output file is returned as an error
    pub fn run<E: MailExtractor + ?Sized>(&self, extractor: &E) -> Result<ExtractionOutcome> {
        println!("📬 Using {} automation...", extractor.extractor_name());
        info!("Extracting the last {} day(s) of mail", self.days);

        let outcome = extractor.extract(self.days);
        match &outcome {
            ExtractionOutcome::Records(records) => self.print_summary(records),
            ExtractionOutcome::Failed(failure) => println!("⚠️  Extraction failed: {}", failure.error),
        }

        write_output(&outcome, &self.output_path)?;
        println!("✅ Done! Results saved to {}", self.output_path.display());

        Ok(outcome)
    }

    fn print_summary(&self, records: &[EmailRecord]) {
        let (mut inbox, mut sent, mut other) = (0usize, 0usize, 0usize);
        for record in records {
            match self.folder_tokens.classify(&record.folder) {
                Some(FolderClass::Inbox) => inbox += 1,
                Some(FolderClass::SentItems) => sent += 1,
                None => other += 1,
            }
        }

        println!(
            "📊 {} message(s): {} {} | {} {}",
            records.len(),
            FolderClass::Inbox.label(),
            inbox,
            FolderClass::SentItems.label(),
            sent
        );
        if other > 0 {
            println!("   {} message(s) from folders outside the token table", other);
        }
    }
}

/// Detect → extract → write. Returns `None` without writing anything when
/// the platform is unsupported.
pub fn run_for_platform(platform: &Platform, config: &Config) -> Result<Option<ExtractionOutcome>> {
    println!("🔍 Detecting OS: {}", platform);

    match Extractor::for_platform(platform, config) {
        Some(extractor) => Pipeline::from_config(config).run(&extractor).map(Some),
        None => {
            if let Platform::Unsupported(os) = platform {
                println!("❌ Platform {} not supported for direct Outlook access.", os);
            }
            Ok(None)
        }
    }
}
