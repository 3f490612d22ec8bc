use serde::Serialize;

use crate::calls::classifier::format_duration;
use crate::calls::store::PartitionedView;
use crate::models::{CallLogEntry, CallType};

use super::tabs::{PanelVisibility, Tab, TabState};

const UNKNOWN_NAME: &str = "Unknown";
const NO_DURATION: &str = "N/A";

/// Everything the webview needs to redraw the call log screen.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedView {
    pub incoming: Vec<String>,
    pub outgoing: Vec<String>,
    pub missed: Vec<String>,
    pub visible_tab: Tab,
    pub panels: [PanelVisibility; 3],
    pub contact_details: Option<String>,
}

pub fn render(
    view: &PartitionedView,
    tabs: &TabState,
    contact_details: Option<&str>,
) -> RenderedView {
    RenderedView {
        incoming: render_lines(&view.incoming),
        outgoing: render_lines(&view.outgoing),
        missed: render_lines(&view.missed),
        visible_tab: tabs.visible(),
        panels: tabs.panels(),
        contact_details: contact_details.map(str::to_string),
    }
}

fn render_lines(entries: &[CallLogEntry]) -> Vec<String> {
    entries.iter().map(render_line).collect()
}

pub fn render_line(entry: &CallLogEntry) -> String {
    let name = entry.name.as_deref().unwrap_or(UNKNOWN_NAME);
    let base = format!("{} - {} - {}", name, entry.phone_number, entry.timestamp);

    match entry.call_type {
        CallType::Outgoing => {
            let duration = entry
                .duration_seconds
                .map(format_duration)
                .unwrap_or_else(|| NO_DURATION.to_string());
            format!("{base} - Duration: {duration}")
        }
        CallType::Incoming | CallType::Missed => base,
    }
}
