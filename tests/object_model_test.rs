mod common;

use common::{fixed_now, hours_ago, MockConnector, MockMessage};
use outlook_syncer::email::{ExtractionOutcome, MailExtractor};
use outlook_syncer::outlook_com::extractor::{BODY_LIMIT, SENT_PLACEHOLDER};
use outlook_syncer::outlook_com::{DefaultFolder, ObjectModelExtractor};

fn extract(connector: MockConnector, days: u32) -> ExtractionOutcome {
    ObjectModelExtractor::new(connector)
        .with_clock(fixed_now)
        .extract(days)
}

fn subjects(outcome: &ExtractionOutcome) -> Vec<&str> {
    outcome.records().iter().map(|r| r.subject.as_str()).collect()
}

#[test]
fn test_stops_at_first_message_older_than_cutoff() {
    let connector = MockConnector::new().with_folder(
        DefaultFolder::Inbox,
        vec![
            MockMessage::new(hours_ago(1), "m1"),
            MockMessage::new(hours_ago(5), "m2"),
            MockMessage::new(hours_ago(30), "m3 too old"),
            // Would qualify, but the walk already stopped
            MockMessage::new(hours_ago(2), "m4 after cutoff"),
        ],
    );

    let outcome = extract(connector, 1);
    assert_eq!(subjects(&outcome), vec!["m1", "m2"]);
}

#[test]
fn test_message_exactly_at_cutoff_is_included() {
    let connector = MockConnector::new().with_folder(
        DefaultFolder::Inbox,
        vec![
            MockMessage::new(hours_ago(24), "boundary"),
            MockMessage::new(hours_ago(25), "older"),
        ],
    );

    let outcome = extract(connector, 1);
    assert_eq!(subjects(&outcome), vec!["boundary"]);
}

#[test]
fn test_day_window_widens_cutoff() {
    let connector = MockConnector::new().with_folder(
        DefaultFolder::Inbox,
        vec![
            MockMessage::new(hours_ago(10), "today"),
            MockMessage::new(hours_ago(50), "two days ago"),
            MockMessage::new(hours_ago(80), "older"),
        ],
    );

    let outcome = extract(connector, 3);
    assert_eq!(subjects(&outcome), vec!["today", "two days ago"]);
}

#[test]
fn test_huge_day_window_keeps_every_message() {
    let connector = MockConnector::new().with_folder(
        DefaultFolder::Inbox,
        vec![
            MockMessage::new(hours_ago(1), "recent"),
            MockMessage::new(hours_ago(24 * 365 * 200), "two centuries old"),
        ],
    );

    let outcome = extract(connector, u32::MAX);
    assert_eq!(subjects(&outcome), vec!["recent", "two centuries old"]);
}

#[test]
fn test_record_fields_and_folder_order() {
    let mut sent = MockMessage::new(hours_ago(3), "Re: planning");
    sent.sender = None;

    let connector = MockConnector::new()
        .with_folder(DefaultFolder::SentItems, vec![sent])
        .with_folder(DefaultFolder::Inbox, vec![MockMessage::new(hours_ago(2), "planning")]);

    let outcome = extract(connector, 1);
    let records = outcome.records();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].folder, "Inbox");
    assert_eq!(records[0].sender, "Alice Martin");
    assert_eq!(records[0].received, "2025-01-06 10:00:00");
    assert_eq!(records[0].content, "Body of planning");

    // Sent items never read the sender field
    assert_eq!(records[1].folder, "Sent Items");
    assert_eq!(records[1].sender, SENT_PLACEHOLDER);
    assert_eq!(records[1].received, "2025-01-06 09:00:00");
}

#[test]
fn test_failing_message_is_skipped_entirely() {
    let mut no_subject = MockMessage::new(hours_ago(2), "unused");
    no_subject.subject = None;
    let mut syncing = MockMessage::new(hours_ago(3), "still syncing");
    syncing.received = None;

    let connector = MockConnector::new().with_folder(
        DefaultFolder::Inbox,
        vec![
            MockMessage::new(hours_ago(1), "first"),
            no_subject,
            syncing,
            MockMessage::new(hours_ago(4), "last"),
        ],
    );

    let outcome = extract(connector, 1);
    assert_eq!(subjects(&outcome), vec!["first", "last"]);
}

#[test]
fn test_body_truncated_to_1000_characters() {
    let mut long = MockMessage::new(hours_ago(1), "long");
    long.body = Some("ü".repeat(1500));
    let mut short = MockMessage::new(hours_ago(2), "short");
    short.body = Some("Short body".to_string());

    let connector = MockConnector::new().with_folder(DefaultFolder::Inbox, vec![long, short]);

    let outcome = extract(connector, 1);
    let records = outcome.records();
    assert_eq!(records[0].content.chars().count(), BODY_LIMIT);
    assert_eq!(records[1].content, "Short body");
}

#[test]
fn test_empty_folders() {
    let outcome = extract(MockConnector::new(), 1);
    assert_eq!(outcome, ExtractionOutcome::Records(Vec::new()));
}

#[test]
fn test_missing_dependency_becomes_error_result() {
    let outcome = extract(MockConnector::missing_dependency("Outlook not installed"), 1);
    assert_eq!(outcome, ExtractionOutcome::failed("Outlook not installed"));
}

#[cfg(not(windows))]
#[test]
fn test_com_connector_unavailable_outside_windows() {
    use outlook_syncer::outlook_com::session::MISSING_DEPENDENCY_MESSAGE;
    use outlook_syncer::outlook_com::OutlookConnector;

    let outcome = ObjectModelExtractor::new(OutlookConnector).extract(1);
    assert_eq!(outcome, ExtractionOutcome::failed(MISSING_DEPENDENCY_MESSAGE));
}
