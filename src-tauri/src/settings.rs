use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::calls::classifier::{ClassifierPolicy, RingingPolicy};
use crate::view::Tab;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CallSettings {
    pub ringing_policy: RingingPolicy,
    pub idle_logs_missed: bool,
    pub bypass_native_dialer: bool,
    /// Re-read the whole device log after every call-state event.
    pub refresh_on_call_state: bool,
    pub initial_tab: Tab,
}

impl Default for CallSettings {
    fn default() -> Self {
        Self {
            ringing_policy: RingingPolicy::Immediate,
            idle_logs_missed: true,
            bypass_native_dialer: true,
            refresh_on_call_state: true,
            initial_tab: Tab::Incoming,
        }
    }
}

impl CallSettings {
    pub fn classifier_policy(&self) -> ClassifierPolicy {
        ClassifierPolicy {
            ringing: self.ringing_policy,
            idle_logs_missed: self.idle_logs_missed,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserSettings {
    calls: CallSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring malformed settings at {}: {}",
                    path.display(),
                    err
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn calls(&self) -> CallSettings {
        self.read().calls.clone()
    }

    pub fn update_calls(&self, settings: CallSettings) -> Result<()> {
        let mut guard = self.write();
        guard.calls = settings;
        self.persist(&guard)
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
