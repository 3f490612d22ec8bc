use serde::Serialize;

use crate::models::{CallLogEntry, CallType};

use super::classifier::{ClassificationResult, DurationUpdate};

/// The three-way split of the log the UI shows as tabs.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartitionedView {
    pub incoming: Vec<CallLogEntry>,
    pub outgoing: Vec<CallLogEntry>,
    pub missed: Vec<CallLogEntry>,
}

impl PartitionedView {
    pub fn total(&self) -> usize {
        self.incoming.len() + self.outgoing.len() + self.missed.len()
    }
}

/// In-memory call log. A full refresh from the device replaces everything;
/// live call-state events are appended on top until the next refresh.
#[derive(Debug, Clone, Default)]
pub struct CallLogStore {
    entries: Vec<CallLogEntry>,
}

impl CallLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CallLogEntry] {
        &self.entries
    }

    pub fn replace(&mut self, entries: Vec<CallLogEntry>) {
        self.entries = entries;
    }

    /// Appends the classified entries, then patches the call that just ended.
    /// Returns true when a duration landed on an existing outgoing entry.
    pub fn apply(&mut self, result: ClassificationResult) -> bool {
        self.entries.extend(result.entries);
        match result.duration_update {
            Some(update) => self.apply_duration(&update),
            None => false,
        }
    }

    /// Patches the entry the call was logged under. Without an entry id (a
    /// placed call never seen off-hook) it falls back to the newest outgoing
    /// entry for the number that has no duration yet.
    pub fn apply_duration(&mut self, update: &DurationUpdate) -> bool {
        let target = self.entries.iter_mut().rev().find(|entry| {
            entry.call_type == CallType::Outgoing
                && entry.duration_seconds.is_none()
                && match &update.entry_id {
                    Some(id) => entry.id == *id,
                    None => entry.phone_number == update.phone_number,
                }
        });

        match target {
            Some(entry) => {
                entry.duration_seconds = Some(update.duration_seconds);
                true
            }
            None => false,
        }
    }

    pub fn view(&self) -> PartitionedView {
        let mut view = PartitionedView::default();
        for entry in &self.entries {
            let bucket = match entry.call_type {
                CallType::Incoming => &mut view.incoming,
                CallType::Outgoing => &mut view.outgoing,
                CallType::Missed => &mut view.missed,
            };
            bucket.push(entry.clone());
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: &str, call_type: CallType) -> CallLogEntry {
        CallLogEntry::new(number, call_type, "1/1/2024, 9:00:00 AM".into())
    }

    fn numbers(entries: &[CallLogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.phone_number.as_str()).collect()
    }

    #[test]
    fn view_keeps_source_order_within_each_type() {
        let mut store = CallLogStore::new();
        store.replace(vec![
            entry("1", CallType::Incoming),
            entry("2", CallType::Missed),
            entry("3", CallType::Outgoing),
            entry("4", CallType::Incoming),
            entry("5", CallType::Missed),
            entry("6", CallType::Incoming),
        ]);

        let view = store.view();
        assert_eq!(numbers(&view.incoming), vec!["1", "4", "6"]);
        assert_eq!(numbers(&view.outgoing), vec!["3"]);
        assert_eq!(numbers(&view.missed), vec!["2", "5"]);
        assert_eq!(view.total(), store.len());
    }

    #[test]
    fn replace_discards_live_entries() {
        let mut store = CallLogStore::new();
        store.apply(ClassificationResult {
            entries: vec![entry("live", CallType::Missed)],
            duration_update: None,
        });

        store.replace(vec![entry("device", CallType::Incoming)]);
        assert_eq!(numbers(store.entries()), vec!["device"]);
    }

    #[test]
    fn duration_goes_to_newest_unmatched_outgoing_for_that_number() {
        let mut store = CallLogStore::new();
        store.replace(vec![
            entry("5551234", CallType::Outgoing),
            entry("5559999", CallType::Outgoing),
            entry("5551234", CallType::Outgoing),
            entry("5551234", CallType::Missed),
        ]);

        let patched = store.apply_duration(&DurationUpdate {
            phone_number: "5551234".into(),
            entry_id: None,
            duration_seconds: 30,
        });
        assert!(patched);
        let durations: Vec<_> = store.entries().iter().map(|e| e.duration_seconds).collect();
        assert_eq!(durations, vec![None, None, Some(30), None]);

        store.apply_duration(&DurationUpdate {
            phone_number: "5551234".into(),
            entry_id: None,
            duration_seconds: 12,
        });
        let durations: Vec<_> = store.entries().iter().map(|e| e.duration_seconds).collect();
        assert_eq!(durations, vec![Some(12), None, Some(30), None]);
    }

    #[test]
    fn number_prefixes_do_not_match() {
        let mut store = CallLogStore::new();
        store.replace(vec![entry("15551234", CallType::Outgoing)]);

        let patched = store.apply_duration(&DurationUpdate {
            phone_number: "5551234".into(),
            entry_id: None,
            duration_seconds: 5,
        });
        assert!(!patched);
        assert_eq!(store.entries()[0].duration_seconds, None);
    }

    #[test]
    fn apply_appends_then_patches() {
        let mut store = CallLogStore::new();
        store.apply(ClassificationResult {
            entries: vec![entry("5551234", CallType::Outgoing)],
            duration_update: None,
        });

        let patched = store.apply(ClassificationResult {
            entries: vec![entry("5551234", CallType::Missed)],
            duration_update: Some(DurationUpdate {
                phone_number: "5551234".into(),
                entry_id: None,
                duration_seconds: 125,
            }),
        });

        assert!(patched);
        let view = store.view();
        assert_eq!(view.outgoing[0].duration_seconds, Some(125));
        assert_eq!(view.missed.len(), 1);
    }

    #[test]
    fn entry_id_patches_only_that_entry() {
        let mut store = CallLogStore::new();
        let older = entry("5551234", CallType::Outgoing);
        let newer = entry("5551234", CallType::Outgoing);
        let target = older.id.clone();
        store.replace(vec![older, newer]);

        let patched = store.apply_duration(&DurationUpdate {
            phone_number: "5551234".into(),
            entry_id: Some(target),
            duration_seconds: 9,
        });
        assert!(patched);
        let durations: Vec<_> = store.entries().iter().map(|e| e.duration_seconds).collect();
        assert_eq!(durations, vec![Some(9), None]);

        let stale = store.apply_duration(&DurationUpdate {
            phone_number: "5551234".into(),
            entry_id: Some("gone".into()),
            duration_seconds: 4,
        });
        assert!(!stale);
        assert_eq!(store.entries()[1].duration_seconds, None);
    }

    #[test]
    fn answered_incoming_leaves_older_outgoing_untouched() {
        use crate::calls::classifier::{CallClassifier, ClassifierPolicy, RingingPolicy};
        use crate::models::{CallStateEvent, PhoneState};
        use chrono::{Duration, Local, TimeZone};

        let at = |secs: i64| Local.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs);
        let mut store = CallLogStore::new();
        store.replace(vec![entry("5551234", CallType::Outgoing)]);
        let mut classifier = CallClassifier::new(ClassifierPolicy {
            ringing: RingingPolicy::OnIdle,
            idle_logs_missed: false,
        });

        for (state, secs) in [
            (PhoneState::Ringing, 0),
            (PhoneState::ActiveOffHook, 2),
            (PhoneState::Idle, 300),
        ] {
            let result = classifier.classify(&CallStateEvent::new(state, "5551234"), at(secs));
            store.apply(result);
        }

        let view = store.view();
        assert_eq!(view.outgoing.len(), 1);
        assert_eq!(view.outgoing[0].duration_seconds, None);
        assert_eq!(numbers(&view.incoming), vec!["5551234"]);
    }
}
