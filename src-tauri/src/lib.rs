mod bridge;
mod calls;
mod device;
mod models;
mod settings;
mod utils;
mod view;

use std::sync::Arc;

use calls::{
    commands::{get_call_log_view, place_call, refresh_call_logs, show_tab},
    CallLogController,
};
use device::Device;
use settings::{CallSettings, SettingsStore};
use tauri::{Manager, RunEvent, State};

pub(crate) struct AppState {
    pub(crate) calls: CallLogController,
    pub(crate) settings: SettingsStore,
}

#[tauri::command]
async fn get_call_settings(state: State<'_, AppState>) -> Result<CallSettings, String> {
    Ok(state.settings.calls())
}

#[tauri::command]
async fn set_call_settings(
    settings: CallSettings,
    state: State<'_, AppState>,
) -> Result<(), String> {
    state
        .settings
        .update_calls(settings.clone())
        .map_err(|e| e.to_string())?;
    state.calls.apply_settings(settings).await;
    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("CallTrap starting up...");

    let app = tauri::Builder::default()
        .plugin(device::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_store = SettingsStore::new(app_data_dir.join("settings.json"))?;

                let device = app
                    .try_state::<Device>()
                    .map(|device| device.inner().clone())
                    .unwrap_or_else(Device::unsupported);

                let controller = CallLogController::new(
                    device,
                    Arc::new(app.handle().clone()),
                    settings_store.calls(),
                );

                bridge::listen_for_call_events(app.handle(), controller.clone());

                app.manage(AppState {
                    calls: controller,
                    settings: settings_store,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_call_log_view,
            refresh_call_logs,
            place_call,
            show_tab,
            get_call_settings,
            set_call_settings,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let RunEvent::Ready = event {
            let controller = app_handle.state::<AppState>().calls.clone();
            bridge::on_ready(controller);
        }
    });
}
