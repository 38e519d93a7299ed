use log::{debug, error, info};

use super::bridge::ScriptBridge;
use super::parser::parse_payload;
use super::script::render_script;
use crate::config::FolderTokens;
use crate::email::{ExtractionOutcome, MailExtractor};

/// Extracts mail from Outlook for Mac through a scripting bridge.
///
/// Scans at most `scan_cap` messages of every folder matching the token
/// table. Missing fields come back as empty strings, the message is kept.
pub struct ScriptingBridgeExtractor<B: ScriptBridge> {
    bridge: B,
    folder_tokens: FolderTokens,
    scan_cap: usize,
}

impl<B: ScriptBridge> ScriptingBridgeExtractor<B> {
    pub fn new(bridge: B, folder_tokens: FolderTokens, scan_cap: usize) -> Self {
        ScriptingBridgeExtractor {
            bridge,
            folder_tokens,
            scan_cap,
        }
    }

    pub fn script(&self) -> String {
        render_script(&self.folder_tokens, self.scan_cap)
    }
}

impl<B: ScriptBridge> MailExtractor for ScriptingBridgeExtractor<B> {
    fn extract(&self, days: u32) -> ExtractionOutcome {
        // The scan is bounded by count only, the day window is not applied here
        debug!(
            "Day window of {} day(s) ignored, scanning up to {} message(s) per folder",
            days, self.scan_cap
        );

        match self.bridge.run(&self.script()) {
            Ok(payload) => {
                let records = parse_payload(&payload);
                info!("{} message(s) extracted via AppleScript", records.len());
                ExtractionOutcome::Records(records)
            }
            Err(e) => {
                error!("AppleScript extraction failed: {}", e);
                ExtractionOutcome::failed(e.to_string())
            }
        }
    }

    fn extractor_name(&self) -> &str {
        "Outlook for Mac (AppleScript)"
    }
}
