// Library exports for outlook-syncer
// This allows tests and the binary to use the modules

pub mod config;
pub mod email;
pub mod output_writer;
pub mod pipeline;
pub mod platform;

// Outlook for Mac (AppleScript) extraction
pub mod applescript;

// Outlook for Windows (COM) extraction
pub mod outlook_com;
