pub mod renderer;
pub mod tabs;

pub use renderer::{render, RenderedView};
pub use tabs::{Tab, TabError, TabState};

use tauri::{AppHandle, Emitter, Runtime};

pub const CALL_LOG_RENDERED_EVENT: &str = "call-log-rendered";
pub const CONTACT_DETAILS_EVENT: &str = "contact-details";

/// Where rendered output goes. The app pushes it to the webview; tests record it.
pub trait ViewSink: Send + Sync {
    fn show_view(&self, view: &RenderedView);
    fn show_contact_details(&self, details: &str);
}

impl<R: Runtime> ViewSink for AppHandle<R> {
    fn show_view(&self, view: &RenderedView) {
        if let Err(err) = self.emit(CALL_LOG_RENDERED_EVENT, view) {
            log::error!("Failed to emit {CALL_LOG_RENDERED_EVENT}: {err}");
        }
    }

    fn show_contact_details(&self, details: &str) {
        if let Err(err) = self.emit(CONTACT_DETAILS_EVENT, details) {
            log::error!("Failed to emit {CONTACT_DETAILS_EVENT}: {err}");
        }
    }
}
