use std::fmt;

/// Extraction strategy chosen from the operating system identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// macOS: Outlook driven through `osascript`
    ScriptingBridge,
    /// Windows: Outlook driven through its COM object model
    ObjectModel,
    Unsupported(String),
}

impl Platform {
    /// Select a strategy for an identifier as reported by `std::env::consts::OS`
    pub fn detect(os: &str) -> Self {
        match os {
            "macos" => Platform::ScriptingBridge,
            "windows" => Platform::ObjectModel,
            other => Platform::Unsupported(other.to_string()),
        }
    }

    pub fn current() -> Self {
        Self::detect(std::env::consts::OS)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::ScriptingBridge => write!(f, "macOS (AppleScript automation)"),
            Platform::ObjectModel => write!(f, "Windows (COM automation)"),
            Platform::Unsupported(os) => write!(f, "{} (unsupported)", os),
        }
    }
}
