use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

use super::Device;

pub const PLUGIN_NAME: &str = "calltrap";

/// Registers the native device plugin and stores the resulting [`Device`] in
/// app state. Desktop builds get [`Device::unsupported`].
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .setup(|app, _api| {
            #[cfg(target_os = "android")]
            let device = {
                let handle = _api.register_android_plugin(android::PLUGIN_ID, android::CLASS_NAME)?;
                android::forward_call_state(app.clone(), &handle)?;
                Device::new(android::AndroidDevice(handle))
            };

            #[cfg(not(target_os = "android"))]
            let device = Device::unsupported();

            app.manage(device);
            Ok(())
        })
        .build()
}

#[cfg(target_os = "android")]
mod android {
    use async_trait::async_trait;
    use serde::{de::DeserializeOwned, Deserialize, Serialize};
    use tauri::ipc::{Channel, InvokeResponseBody};
    use tauri::{plugin::PluginHandle, AppHandle, Emitter, Runtime};

    use crate::bridge::CALL_STATE_EVENT;
    use crate::device::{CallLogSource, ContactsSource, DeviceError, Dialer};
    use crate::models::{CallStateEvent, Contact, ContactQuery, RawCallRecord};

    pub const PLUGIN_ID: &str = "app.calltrap.device";
    pub const CLASS_NAME: &str = "DevicePlugin";

    pub struct AndroidDevice<R: Runtime>(pub PluginHandle<R>);

    #[derive(Deserialize)]
    struct CallLogResponse {
        logs: Vec<RawCallRecord>,
    }

    #[derive(Deserialize)]
    struct ContactsResponse {
        contacts: Vec<Contact>,
    }

    #[derive(Serialize)]
    struct OnCallRequest {
        handler: Channel,
    }

    /// Hands the native call trap a channel and re-emits every message as the
    /// app-level call-state event the bridge listens for.
    pub fn forward_call_state<R: Runtime>(
        app: AppHandle<R>,
        handle: &PluginHandle<R>,
    ) -> Result<(), DeviceError> {
        let handler = Channel::new(move |body| {
            let call_state: CallStateEvent = match body {
                InvokeResponseBody::Json(json) => serde_json::from_str(&json)?,
                InvokeResponseBody::Raw(bytes) => serde_json::from_slice(&bytes)?,
            };
            app.emit(CALL_STATE_EVENT, call_state)
        });

        handle
            .run_mobile_plugin::<serde_json::Value>("onCall", OnCallRequest { handler })
            .map_err(|err| DeviceError::Plugin {
                capability: "Call state",
                message: err.to_string(),
            })?;
        Ok(())
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct CallNumberRequest<'a> {
        number: &'a str,
        bypass_native_dialer: bool,
    }

    impl<R: Runtime> AndroidDevice<R> {
        fn run<T: DeserializeOwned>(
            &self,
            capability: &'static str,
            command: &str,
            payload: impl Serialize,
        ) -> Result<T, DeviceError> {
            self.0
                .run_mobile_plugin(command, payload)
                .map_err(|err| DeviceError::Plugin {
                    capability,
                    message: err.to_string(),
                })
        }
    }

    #[async_trait]
    impl<R: Runtime> CallLogSource for AndroidDevice<R> {
        async fn get_call_log(&self) -> Result<Vec<RawCallRecord>, DeviceError> {
            let response: CallLogResponse = self.run("Call log", "getCallLog", ())?;
            Ok(response.logs)
        }
    }

    #[async_trait]
    impl<R: Runtime> Dialer for AndroidDevice<R> {
        async fn call_number(
            &self,
            phone_number: &str,
            bypass_native_dialer: bool,
        ) -> Result<(), DeviceError> {
            let request = CallNumberRequest {
                number: phone_number,
                bypass_native_dialer,
            };
            self.run::<serde_json::Value>("Dialer", "callNumber", request)?;
            Ok(())
        }
    }

    #[async_trait]
    impl<R: Runtime> ContactsSource for AndroidDevice<R> {
        async fn find(&self, query: &ContactQuery) -> Result<Vec<Contact>, DeviceError> {
            let response: ContactsResponse = self.run("Contacts", "findContacts", query)?;
            Ok(response.contacts)
        }
    }
}
