use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    Incoming,
    Outgoing,
    Missed,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Incoming, Tab::Outgoing, Tab::Missed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Incoming => "incoming",
            Tab::Outgoing => "outgoing",
            Tab::Missed => "missed",
        }
    }
}

impl Default for Tab {
    fn default() -> Self {
        Tab::Incoming
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown tab '{0}'")]
pub struct TabError(pub String);

impl FromStr for Tab {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| TabError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PanelVisibility {
    pub tab: Tab,
    pub visible: bool,
}

/// Exactly one of the three panels is shown at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabState {
    visible: Tab,
}

impl TabState {
    pub fn new(initial: Tab) -> Self {
        Self { visible: initial }
    }

    pub fn visible(&self) -> Tab {
        self.visible
    }

    /// Unknown names leave the current tab in place.
    pub fn show_tab(&mut self, name: &str) -> Result<Tab, TabError> {
        let tab = name.parse::<Tab>()?;
        self.visible = tab;
        Ok(tab)
    }

    pub fn panels(&self) -> [PanelVisibility; 3] {
        Tab::ALL.map(|tab| PanelVisibility {
            tab,
            visible: tab == self.visible,
        })
    }
}
