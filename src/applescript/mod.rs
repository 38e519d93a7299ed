/// Outlook for Mac extraction through `osascript`
pub mod bridge;
pub mod extractor;
pub mod parser;
pub mod script;

pub use bridge::{OsaScriptRunner, ScriptBridge};
pub use extractor::ScriptingBridgeExtractor;
