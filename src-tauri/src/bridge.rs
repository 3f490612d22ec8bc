//! Wires device lifecycle and call-state events into the call log controller.

use anyhow::{Context, Result};
use tauri::async_runtime::JoinHandle;
use tauri::{AppHandle, EventId, Listener, Runtime};
use tokio::sync::mpsc;

use crate::calls::CallLogController;
use crate::models::CallStateEvent;
use crate::{log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Raised on every phone state change. On android the device plugin re-emits
/// what the native call trap sends over its `onCall` channel.
pub const CALL_STATE_EVENT: &str = "call-state";

pub fn parse_call_state(payload: &str) -> Result<CallStateEvent> {
    serde_json::from_str(payload).with_context(|| format!("malformed call-state payload: {payload}"))
}

fn debug_payloads() -> bool {
    std::env::var("CALLTRAP_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Single consumer for call-state events. The controller sees them in the
/// order they were sent; the task ends once every sender is dropped.
pub fn spawn_call_state_worker(
    controller: CallLogController,
) -> (mpsc::UnboundedSender<CallStateEvent>, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::unbounded_channel::<CallStateEvent>();

    let worker = tauri::async_runtime::spawn(async move {
        while let Some(call_state) = receiver.recv().await {
            if let Err(err) = controller.handle_call_state(call_state).await {
                log_error!("{:#}", err);
            }
        }
        log_info!("Call state worker stopped");
    });

    (sender, worker)
}

/// Subscribes once for the lifetime of the app.
pub fn listen_for_call_events<R: Runtime>(
    app: &AppHandle<R>,
    controller: CallLogController,
) -> EventId {
    let verbose = debug_payloads();
    let (sender, _worker) = spawn_call_state_worker(controller);

    app.listen(CALL_STATE_EVENT, move |event| {
        if verbose {
            log_info!("Call state: {}", event.payload());
        }

        let call_state = match parse_call_state(event.payload()) {
            Ok(call_state) => call_state,
            Err(err) => {
                log_warn!("{:#}", err);
                return;
            }
        };

        if sender.send(call_state).is_err() {
            log_error!("Call state worker is gone, dropping event");
        }
    })
}

/// Initial full fetch once the app is up.
pub fn on_ready(controller: CallLogController) {
    tauri::async_runtime::spawn(async move {
        match controller.load_call_logs().await {
            Ok(view) => log_info!(
                "Call log ready: {} incoming, {} outgoing, {} missed",
                view.incoming.len(),
                view.outgoing.len(),
                view.missed.len()
            ),
            Err(err) => log_error!("{:#}", err),
        }
    });
}
