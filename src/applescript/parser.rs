use log::debug;

use super::script::{CONTENT_LIMIT, FIELD_SEPARATOR, RECORD_SEPARATOR};
use crate::email::{truncate_chars, EmailRecord};

const FIELD_COUNT: usize = 5;

/// Rebuild records from the delimited payload written by the script.
///
/// Blank fragments are discarded and records with fewer than five fields
/// are dropped.
pub fn parse_payload(payload: &str) -> Vec<EmailRecord> {
    payload
        .split(RECORD_SEPARATOR)
        .filter(|chunk| !chunk.trim().is_empty())
        .filter_map(parse_record)
        .collect()
}

fn parse_record(chunk: &str) -> Option<EmailRecord> {
    let fields: Vec<&str> = chunk.split(FIELD_SEPARATOR).collect();
    if fields.len() < FIELD_COUNT {
        debug!(
            "Dropping malformed record ({} of {} fields): {:?}",
            fields.len(),
            FIELD_COUNT,
            truncate_chars(chunk, 80)
        );
        return None;
    }

    Some(EmailRecord {
        folder: fields[0].to_string(),
        subject: fields[1].to_string(),
        sender: fields[2].to_string(),
        received: fields[3].to_string(),
        content: truncate_chars(fields[4], CONTENT_LIMIT),
    })
}
