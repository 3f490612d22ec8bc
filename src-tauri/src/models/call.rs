use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
}

/// One row of the call log as the app displays it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallLogEntry {
    pub id: String,
    pub phone_number: String,
    pub name: Option<String>,
    pub call_type: CallType,
    pub timestamp: String,
    /// Only ever set on outgoing entries.
    pub duration_seconds: Option<u64>,
}

impl CallLogEntry {
    pub fn new(phone_number: impl Into<String>, call_type: CallType, timestamp: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            phone_number: phone_number.into(),
            name: None,
            call_type,
            timestamp,
            duration_seconds: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn with_duration(mut self, duration_seconds: Option<u64>) -> Self {
        if self.call_type == CallType::Outgoing {
            self.duration_seconds = duration_seconds;
        }
        self
    }
}

/// Record type as reported by the device call log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawCallType {
    Incoming,
    Outgoing,
    Missed,
    /// Rejected, blocked, voicemail and whatever else the platform reports.
    #[serde(other)]
    Other,
}

/// `date` arrives as epoch milliseconds on Android, but some hosts hand back
/// an already formatted string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawCallDate {
    Millis(i64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawCallRecord {
    #[serde(rename = "type")]
    pub call_type: RawCallType,
    #[serde(default)]
    pub name: Option<String>,
    pub number: String,
    pub date: RawCallDate,
    #[serde(default)]
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhoneState {
    Ringing,
    #[serde(rename = "OFFHOOK")]
    ActiveOffHook,
    Idle,
    #[serde(other)]
    Unknown,
}

/// Payload of the `call-state` event raised by the call trap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallStateEvent {
    pub state: PhoneState,
    #[serde(default)]
    pub phone_number: String,
}

impl CallStateEvent {
    pub fn new(state: PhoneState, phone_number: impl Into<String>) -> Self {
        Self {
            state,
            phone_number: phone_number.into(),
        }
    }
}
