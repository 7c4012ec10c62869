//! Serializable view of the rendered sidebar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::host::ContainerIdentity;

/// One standalone entry as rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub color_code: String,
}

impl From<&ContainerIdentity> for EntrySnapshot {
    fn from(identity: &ContainerIdentity) -> Self {
        Self {
            id: identity.id.clone(),
            name: identity.name.clone(),
            icon: identity.icon.clone(),
            color: identity.color.clone(),
            color_code: identity.color_code.clone(),
        }
    }
}

/// The sidebar's containers list at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarSnapshot {
    pub window_id: i64,
    pub incognito: bool,
    /// Standalone entries in render order
    pub entries: Vec<EntrySnapshot>,
    /// Ids folded into the temporary containers group
    pub temporary: Vec<String>,
    pub taken_at: DateTime<Utc>,
}

impl SidebarSnapshot {
    /// Ids of the standalone entries in render order
    pub fn entry_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}
