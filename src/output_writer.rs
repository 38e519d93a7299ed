use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::email::ExtractionOutcome;

/// Pretty JSON with a two-space indent; non-ASCII text is kept as-is
pub fn to_json(outcome: &ExtractionOutcome) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    outcome
        .serialize(&mut serializer)
        .context("Unable to serialize extraction result")?;
    String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
}

/// Replace the content of `path` with the serialized outcome
pub fn write_output(outcome: &ExtractionOutcome, path: &Path) -> Result<()> {
    let json = to_json(outcome)?;
    fs::write(path, json.as_bytes())
        .with_context(|| format!("Unable to write {}", path.display()))?;
    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}
