use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::{CallLogEntry, CallStateEvent, CallType, PhoneState};
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

/// What to do with a ringing phone before we know how the call ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RingingPolicy {
    /// Log a missed call as soon as the phone rings.
    Immediate,
    /// Hold the ring until the line goes idle; an answered ring becomes an
    /// incoming call instead.
    OnIdle,
}

impl Default for RingingPolicy {
    fn default() -> Self {
        RingingPolicy::Immediate
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierPolicy {
    pub ringing: RingingPolicy,
    /// Every idle transition logs a missed call for the number, even right
    /// after an outgoing call.
    pub idle_logs_missed: bool,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            ringing: RingingPolicy::default(),
            idle_logs_missed: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OngoingCall {
    pub phone_number: String,
    pub started_at: DateTime<Local>,
    pub call_type: CallType,
    /// Entry logged when the line went off-hook. `None` for calls placed from
    /// the app that have not been seen off-hook yet.
    pub entry_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DurationUpdate {
    pub phone_number: String,
    pub entry_id: Option<String>,
    pub duration_seconds: u64,
}

/// Entries produced by a single call-state event, in emission order, plus the
/// duration of the call that just ended (if one was being tracked).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationResult {
    pub entries: Vec<CallLogEntry>,
    pub duration_update: Option<DurationUpdate>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.duration_update.is_none()
    }

    fn push(&mut self, phone_number: &str, call_type: CallType, now: &DateTime<Local>) -> String {
        let entry = CallLogEntry::new(phone_number, call_type, format_timestamp(now));
        let id = entry.id.clone();
        self.entries.push(entry);
        id
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallClassifier {
    policy: ClassifierPolicy,
    ongoing: Option<OngoingCall>,
    pending_ring: Option<String>,
}

impl CallClassifier {
    pub fn new(policy: ClassifierPolicy) -> Self {
        Self {
            policy,
            ongoing: None,
            pending_ring: None,
        }
    }

    pub fn set_policy(&mut self, policy: ClassifierPolicy) {
        self.policy = policy;
    }

    pub fn ongoing(&self) -> Option<&OngoingCall> {
        self.ongoing.as_ref()
    }

    /// Records a call placed from the app so its duration can be measured when
    /// the line goes idle. An off-hook already seen for the same number keeps
    /// its earlier start time; returns false in that case.
    pub fn start_ongoing(&mut self, phone_number: impl Into<String>, now: DateTime<Local>) -> bool {
        let phone_number = phone_number.into();
        if self
            .ongoing
            .as_ref()
            .is_some_and(|call| call.phone_number == phone_number)
        {
            return false;
        }

        self.ongoing = Some(OngoingCall {
            phone_number,
            started_at: now,
            call_type: CallType::Outgoing,
            entry_id: None,
        });
        true
    }

    pub fn classify(&mut self, event: &CallStateEvent, now: DateTime<Local>) -> ClassificationResult {
        let mut result = ClassificationResult::default();
        let number = event.phone_number.as_str();

        match event.state {
            PhoneState::Ringing => match self.policy.ringing {
                RingingPolicy::Immediate => {
                    result.push(number, CallType::Missed, &now);
                }
                RingingPolicy::OnIdle => self.pending_ring = Some(number.to_string()),
            },
            PhoneState::ActiveOffHook => {
                let answered = self.pending_ring.take().is_some();
                let call_type = if answered {
                    CallType::Incoming
                } else {
                    CallType::Outgoing
                };
                let entry_id = result.push(number, call_type, &now);
                self.ongoing = Some(OngoingCall {
                    phone_number: number.to_string(),
                    started_at: now,
                    call_type,
                    entry_id: Some(entry_id),
                });
            }
            PhoneState::Idle => {
                let ongoing = self.ongoing.take();
                let unanswered = self.pending_ring.take().is_some() && ongoing.is_none();

                if self.policy.idle_logs_missed || unanswered {
                    result.push(number, CallType::Missed, &now);
                }

                if let Some(call) = ongoing {
                    let duration_seconds = elapsed_seconds(&call.started_at, &now);
                    log_info!(
                        "Call with {} ended after {}",
                        call.phone_number,
                        format_duration(duration_seconds)
                    );
                    // Durations are only shown on outgoing entries.
                    if call.call_type == CallType::Outgoing {
                        result.duration_update = Some(DurationUpdate {
                            phone_number: call.phone_number,
                            entry_id: call.entry_id,
                            duration_seconds,
                        });
                    }
                }
            }
            PhoneState::Unknown => {
                log_debug!("Ignoring unrecognized call state for {}", number);
            }
        }

        result
    }
}

fn elapsed_seconds(started_at: &DateTime<Local>, now: &DateTime<Local>) -> u64 {
    u64::try_from((*now - *started_at).num_seconds()).unwrap_or(0)
}

pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
