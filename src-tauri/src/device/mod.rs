//! Device capabilities the app leans on: reading the call log, placing calls
//! and looking up contacts. The native side lives in the host plugin; this
//! module only describes what we ask of it.

mod mobile;
mod unsupported;

#[cfg(test)]
pub(crate) mod testing;

pub use mobile::init;
use unsupported::UnsupportedDevice;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Contact, ContactQuery, RawCallRecord};

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("{0} is only available on mobile")]
    Unsupported(&'static str),
    #[error("{capability} failed: {message}")]
    Plugin {
        capability: &'static str,
        message: String,
    },
}

#[async_trait]
pub trait CallLogSource: Send + Sync {
    async fn get_call_log(&self) -> Result<Vec<RawCallRecord>, DeviceError>;
}

#[async_trait]
pub trait Dialer: Send + Sync {
    async fn call_number(
        &self,
        phone_number: &str,
        bypass_native_dialer: bool,
    ) -> Result<(), DeviceError>;
}

#[async_trait]
pub trait ContactsSource: Send + Sync {
    async fn find(&self, query: &ContactQuery) -> Result<Vec<Contact>, DeviceError>;
}

/// The capability set handed to the controller.
#[derive(Clone)]
pub struct Device {
    pub call_log: Arc<dyn CallLogSource>,
    pub dialer: Arc<dyn Dialer>,
    pub contacts: Arc<dyn ContactsSource>,
}

impl Device {
    pub fn new<T>(capabilities: T) -> Self
    where
        T: CallLogSource + Dialer + ContactsSource + 'static,
    {
        let capabilities = Arc::new(capabilities);
        Self {
            call_log: capabilities.clone(),
            dialer: capabilities.clone(),
            contacts: capabilities,
        }
    }

    pub fn unsupported() -> Self {
        Self::new(UnsupportedDevice)
    }
}
