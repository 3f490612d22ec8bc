use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::contact::ContactField;
use crate::models::{Contact, ContactQuery, RawCallRecord};

use super::{CallLogSource, ContactsSource, DeviceError, Dialer};

/// Scriptable device for tests. Records every dial and contacts query.
#[derive(Default)]
pub struct FakeDevice {
    pub logs: Mutex<Option<Vec<RawCallRecord>>>,
    pub contacts: Option<Vec<Contact>>,
    pub dial_fails: bool,
    pub dialed: Mutex<Vec<(String, bool)>>,
    pub queries: Mutex<Vec<ContactQuery>>,
}

impl FakeDevice {
    pub fn with_logs(logs: Vec<RawCallRecord>) -> Self {
        Self {
            logs: Mutex::new(Some(logs)),
            contacts: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn set_logs(&self, logs: Option<Vec<RawCallRecord>>) {
        *self.logs.lock().unwrap() = logs;
    }

    pub fn dialed(&self) -> Vec<(String, bool)> {
        self.dialed.lock().unwrap().clone()
    }
}

pub fn contact(name: &str, numbers: &[&str]) -> Contact {
    Contact {
        display_name: Some(name.to_string()),
        phone_numbers: Some(
            numbers
                .iter()
                .map(|n| ContactField {
                    value: n.to_string(),
                })
                .collect(),
        ),
    }
}

#[async_trait]
impl CallLogSource for FakeDevice {
    async fn get_call_log(&self) -> Result<Vec<RawCallRecord>, DeviceError> {
        self.logs.lock().unwrap().clone().ok_or(DeviceError::Plugin {
            capability: "Call log",
            message: "permission denied".into(),
        })
    }
}

#[async_trait]
impl Dialer for FakeDevice {
    async fn call_number(&self, phone_number: &str, bypass: bool) -> Result<(), DeviceError> {
        self.dialed
            .lock()
            .unwrap()
            .push((phone_number.to_string(), bypass));
        if self.dial_fails {
            return Err(DeviceError::Plugin {
                capability: "Dialer",
                message: "no SIM".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContactsSource for FakeDevice {
    async fn find(&self, query: &ContactQuery) -> Result<Vec<Contact>, DeviceError> {
        self.queries.lock().unwrap().push(query.clone());
        self.contacts.clone().ok_or(DeviceError::Plugin {
            capability: "Contacts",
            message: "permission denied".into(),
        })
    }
}
