use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tokio::sync::Mutex;

use crate::device::Device;
use crate::models::CallStateEvent;
use crate::settings::CallSettings;
use crate::view::{render, RenderedView, Tab, TabError, TabState, ViewSink};
use crate::{log_debug, log_info};

use super::classifier::{CallClassifier, OngoingCall};
use super::device_log::entries_from_records;
use super::initiator::{CallInitiator, ContactDetails, PlaceCallError};
use super::store::CallLogStore;

const ENABLE_LOGS: bool = true;

struct CallLogState {
    classifier: CallClassifier,
    store: CallLogStore,
    tabs: TabState,
    settings: CallSettings,
}

/// Owns the call log screen: classifier, store and tab state behind one lock,
/// plus the device capabilities it pulls data from. Cheap to clone.
#[derive(Clone)]
pub struct CallLogController {
    state: Arc<Mutex<CallLogState>>,
    contact_details: Arc<StdMutex<Option<String>>>,
    device: Device,
    sink: Arc<dyn ViewSink>,
}

impl CallLogController {
    pub fn new(device: Device, sink: Arc<dyn ViewSink>, settings: CallSettings) -> Self {
        let state = CallLogState {
            classifier: CallClassifier::new(settings.classifier_policy()),
            store: CallLogStore::new(),
            tabs: TabState::new(settings.initial_tab),
            settings,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            contact_details: Arc::new(StdMutex::new(None)),
            device,
            sink,
        }
    }

    pub async fn snapshot(&self) -> RenderedView {
        let state = self.state.lock().await;
        render(&state.store.view(), &state.tabs, self.details().as_deref())
    }

    /// Full refresh: replaces everything with the device call log and redraws.
    pub async fn load_call_logs(&self) -> Result<RenderedView> {
        let records = self
            .device
            .call_log
            .get_call_log()
            .await
            .context("Failed to fetch call logs")?;
        let entries = entries_from_records(records);

        let mut state = self.state.lock().await;
        state.store.replace(entries);
        log_info!("Loaded {} call log entries", state.store.len());
        Ok(self.publish(&state))
    }

    pub async fn handle_call_state(&self, event: CallStateEvent) -> Result<()> {
        self.handle_call_state_at(event, Local::now()).await
    }

    /// Applies the live classification right away, then (if enabled) replaces
    /// it with a fresh device log. A failed refresh leaves the live entries in
    /// place.
    pub async fn handle_call_state_at(
        &self,
        event: CallStateEvent,
        now: DateTime<Local>,
    ) -> Result<()> {
        let refresh = {
            let mut state = self.state.lock().await;
            let result = state.classifier.classify(&event, now);
            if !result.is_empty() {
                let patched = state.store.apply(result);
                log_debug!(
                    "Applied {:?} for {} (duration patched: {})",
                    event.state,
                    event.phone_number,
                    patched
                );
                self.publish(&state);
            }
            state.settings.refresh_on_call_state
        };

        if refresh {
            self.load_call_logs().await?;
        }
        Ok(())
    }

    pub async fn place_call(&self, phone_number: &str) -> Result<ContactDetails, PlaceCallError> {
        let bypass = self.state.lock().await.settings.bypass_native_dialer;
        let initiator = CallInitiator::new(self.device.dialer.clone(), self.device.contacts.clone());
        let sink = DetailsSink {
            inner: self.sink.as_ref(),
            slot: &self.contact_details,
        };

        let details = initiator.place_call(phone_number, bypass, &sink).await?;

        let mut state = self.state.lock().await;
        if !state
            .classifier
            .start_ongoing(details.phone_number.clone(), Local::now())
        {
            log_debug!("{} already off-hook, keeping its start time", details.phone_number);
        }
        Ok(details)
    }

    pub async fn ongoing_call(&self) -> Option<OngoingCall> {
        self.state.lock().await.classifier.ongoing().cloned()
    }

    pub async fn show_tab(&self, name: &str) -> Result<Tab, TabError> {
        let mut state = self.state.lock().await;
        let tab = state.tabs.show_tab(name)?;
        self.publish(&state);
        Ok(tab)
    }

    pub async fn apply_settings(&self, settings: CallSettings) {
        let mut state = self.state.lock().await;
        state.classifier.set_policy(settings.classifier_policy());
        state.settings = settings;
    }

    fn details(&self) -> Option<String> {
        self.contact_details
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn publish(&self, state: &CallLogState) -> RenderedView {
        let view = render(&state.store.view(), &state.tabs, self.details().as_deref());
        self.sink.show_view(&view);
        view
    }
}

/// Keeps the last contact banner so later redraws still carry it.
struct DetailsSink<'a> {
    inner: &'a dyn ViewSink,
    slot: &'a StdMutex<Option<String>>,
}

impl ViewSink for DetailsSink<'_> {
    fn show_view(&self, view: &RenderedView) {
        self.inner.show_view(view);
    }

    fn show_contact_details(&self, details: &str) {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(details.to_string());
        self.inner.show_contact_details(details);
    }
}
