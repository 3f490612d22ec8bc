use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::device::{ContactsSource, DeviceError, Dialer};
use crate::models::ContactQuery;
use crate::view::ViewSink;
use crate::{log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Error)]
pub enum PlaceCallError {
    #[error("Please enter a phone number")]
    EmptyNumber,
    #[error("Error initiating the call to {phone_number}: {source}")]
    Dial {
        phone_number: String,
        #[source]
        source: DeviceError,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ContactLookup {
    Found { name: String },
    NoMatch,
    Failed,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub phone_number: String,
    pub lookup: ContactLookup,
}

impl ContactDetails {
    pub fn display_name(&self) -> &str {
        match &self.lookup {
            ContactLookup::Found { name } => name,
            ContactLookup::NoMatch | ContactLookup::Failed => "Unknown",
        }
    }

    pub fn message(&self) -> String {
        match self.lookup {
            ContactLookup::Failed => {
                format!("Contact not found. Phone Number: {}", self.phone_number)
            }
            _ => format!(
                "Calling: {}\nPhone Number: {}",
                self.display_name(),
                self.phone_number
            ),
        }
    }
}

pub struct CallInitiator {
    dialer: Arc<dyn Dialer>,
    contacts: Arc<dyn ContactsSource>,
}

impl CallInitiator {
    pub fn new(dialer: Arc<dyn Dialer>, contacts: Arc<dyn ContactsSource>) -> Self {
        Self { dialer, contacts }
    }

    /// Shows who is being called, then hands the number to the dialer. The
    /// dialer runs whether or not the contact lookup worked.
    pub async fn place_call(
        &self,
        input: &str,
        bypass_native_dialer: bool,
        sink: &dyn ViewSink,
    ) -> Result<ContactDetails, PlaceCallError> {
        let phone_number = input.trim();
        if phone_number.is_empty() {
            return Err(PlaceCallError::EmptyNumber);
        }

        let details = self.lookup_contact(phone_number).await;
        sink.show_contact_details(&details.message());

        match self
            .dialer
            .call_number(phone_number, bypass_native_dialer)
            .await
        {
            Ok(()) => {
                log_info!("Call initiated successfully to {}", phone_number);
                Ok(details)
            }
            Err(source) => {
                log_error!("Error initiating the call: {}", source);
                Err(PlaceCallError::Dial {
                    phone_number: phone_number.to_string(),
                    source,
                })
            }
        }
    }

    /// First contact with a number containing `phone_number` wins.
    pub async fn lookup_contact(&self, phone_number: &str) -> ContactDetails {
        let lookup = match self.contacts.find(&ContactQuery::by_number(phone_number)).await {
            Ok(contacts) => match contacts.iter().find(|c| c.has_number(phone_number)) {
                Some(contact) => match contact.display_name.as_deref() {
                    Some(name) if !name.trim().is_empty() => ContactLookup::Found {
                        name: name.to_string(),
                    },
                    _ => ContactLookup::NoMatch,
                },
                None => ContactLookup::NoMatch,
            },
            Err(err) => {
                log_warn!("Error fetching contacts: {}", err);
                ContactLookup::Failed
            }
        };

        ContactDetails {
            phone_number: phone_number.to_string(),
            lookup,
        }
    }
}
