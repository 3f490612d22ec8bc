use tauri::State;

use crate::{
    calls::{CallLogController, ContactDetails},
    view::{RenderedView, Tab},
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> CallLogController {
    state.calls.clone()
}

#[tauri::command]
pub async fn get_call_log_view(state: State<'_, AppState>) -> Result<RenderedView, String> {
    let controller = controller_from_state(&state);
    Ok(controller.snapshot().await)
}

#[tauri::command]
pub async fn refresh_call_logs(state: State<'_, AppState>) -> Result<RenderedView, String> {
    let controller = controller_from_state(&state);
    controller
        .load_call_logs()
        .await
        .map_err(|e| format!("{e:#}"))
}

#[tauri::command]
pub async fn place_call(
    state: State<'_, AppState>,
    phone_number: String,
) -> Result<ContactDetails, String> {
    let controller = controller_from_state(&state);
    controller
        .place_call(&phone_number)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn show_tab(state: State<'_, AppState>, tab_name: String) -> Result<Tab, String> {
    let controller = controller_from_state(&state);
    controller
        .show_tab(&tab_name)
        .await
        .map_err(|e| e.to_string())
}
