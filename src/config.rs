//! Sidebar configuration snapshot

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SidebarError};

/// Display names for the synthetic identities the engine injects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLabels {
    /// Name of the default (no container) context
    pub default: String,
    /// Name of the private browsing context
    pub private: String,
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self {
            default: "Default".to_string(),
            private: "Private Browsing".to_string(),
        }
    }
}

/// Read-only configuration handed to the engine at initialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keep tabs cycling in sidebar order (consumed by the tab-order keeper)
    pub cycle_tabs_in_order: bool,

    pub labels: DefaultLabels,

    /// Options this crate does not interpret, kept for other collaborators
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    /// Parse a config from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SidebarError::Config(e.to_string()))
    }

    /// Load a config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(SidebarError::IoError)?;
        Self::from_json(&content)
    }

    /// Whether the tab-order keeper should be enabled
    pub fn tab_order_keeping(&self) -> bool {
        self.cycle_tabs_in_order
    }

    /// Look up an option this crate does not interpret
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
