use async_trait::async_trait;

use crate::models::{Contact, ContactQuery, RawCallRecord};

use super::{CallLogSource, ContactsSource, DeviceError, Dialer};

/// Stand-in on desktop builds, where there is no telephony stack.
pub struct UnsupportedDevice;

#[async_trait]
impl CallLogSource for UnsupportedDevice {
    async fn get_call_log(&self) -> Result<Vec<RawCallRecord>, DeviceError> {
        Err(DeviceError::Unsupported("Call log"))
    }
}

#[async_trait]
impl Dialer for UnsupportedDevice {
    async fn call_number(&self, _phone_number: &str, _bypass: bool) -> Result<(), DeviceError> {
        Err(DeviceError::Unsupported("Dialer"))
    }
}

#[async_trait]
impl ContactsSource for UnsupportedDevice {
    async fn find(&self, _query: &ContactQuery) -> Result<Vec<Contact>, DeviceError> {
        Err(DeviceError::Unsupported("Contacts"))
    }
}
