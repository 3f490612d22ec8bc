use chrono::{Local, TimeZone};

use crate::models::{CallLogEntry, CallType, RawCallDate, RawCallRecord, RawCallType};
use crate::log_debug;

use super::classifier::format_timestamp;

const ENABLE_LOGS: bool = true;

/// Converts the device call log into display entries, dropping record types
/// the app has no tab for.
pub fn entries_from_records(records: Vec<RawCallRecord>) -> Vec<CallLogEntry> {
    let total = records.len();
    let entries: Vec<CallLogEntry> = records.into_iter().filter_map(entry_from_record).collect();

    if entries.len() != total {
        log_debug!(
            "Dropped {} call log records with unsupported types",
            total - entries.len()
        );
    }

    entries
}

fn entry_from_record(record: RawCallRecord) -> Option<CallLogEntry> {
    let call_type = match record.call_type {
        RawCallType::Incoming => CallType::Incoming,
        RawCallType::Outgoing => CallType::Outgoing,
        RawCallType::Missed => CallType::Missed,
        RawCallType::Other => return None,
    };

    Some(
        CallLogEntry::new(record.number, call_type, render_date(&record.date))
            .with_name(record.name)
            .with_duration(record.duration),
    )
}

fn render_date(date: &RawCallDate) -> String {
    match date {
        RawCallDate::Millis(ms) => match Local.timestamp_millis_opt(*ms).single() {
            Some(at) => format_timestamp(&at),
            None => ms.to_string(),
        },
        RawCallDate::Text(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(call_type: RawCallType, number: &str, duration: Option<u64>) -> RawCallRecord {
        RawCallRecord {
            call_type,
            name: None,
            number: number.into(),
            date: RawCallDate::Text("yesterday".into()),
            duration,
        }
    }

    #[test]
    fn unsupported_types_are_dropped() {
        let entries = entries_from_records(vec![
            record(RawCallType::Incoming, "1", None),
            record(RawCallType::Other, "2", None),
            record(RawCallType::Missed, "3", None),
        ]);

        let numbers: Vec<_> = entries.iter().map(|e| e.phone_number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "3"]);
    }

    #[test]
    fn duration_is_kept_for_outgoing_only() {
        let entries = entries_from_records(vec![
            record(RawCallType::Outgoing, "1", Some(90)),
            record(RawCallType::Incoming, "2", Some(90)),
        ]);

        assert_eq!(entries[0].duration_seconds, Some(90));
        assert_eq!(entries[1].duration_seconds, None);
    }

    #[test]
    fn millisecond_dates_are_formatted_locally() {
        let ms = 1_700_000_000_000;
        let expected = format_timestamp(&Local.timestamp_millis_opt(ms).unwrap());

        let mut raw = record(RawCallType::Missed, "1", None);
        raw.date = RawCallDate::Millis(ms);
        raw.name = Some("  ".into());

        let entries = entries_from_records(vec![raw]);
        assert_eq!(entries[0].timestamp, expected);
        assert_eq!(entries[0].name, None);
    }
}
