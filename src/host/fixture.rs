//! Scripted host state for replaying notification sequences

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::memory::MemoryHost;
use super::types::{ContainerIdentity, IdentityEvent, WindowContext};
use crate::error::{Result, SidebarError};

/// One step of a scripted sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixtureStep {
    Created { identity: ContainerIdentity },
    Updated { identity: ContainerIdentity },
    Removed { id: String },
    /// Retag a container as temporary without notifying the sidebar
    TagTemporary { id: String },
    /// Retag a container as permanent without notifying the sidebar
    UntagTemporary { id: String },
}

impl FixtureStep {
    /// The notification this step delivers, if any
    pub fn event(&self) -> Option<IdentityEvent> {
        match self {
            FixtureStep::Created { identity } => Some(IdentityEvent::Created {
                identity: identity.clone(),
            }),
            FixtureStep::Updated { identity } => Some(IdentityEvent::Updated {
                identity: identity.clone(),
            }),
            FixtureStep::Removed { id } => Some(IdentityEvent::Removed { id: id.clone() }),
            FixtureStep::TagTemporary { .. } | FixtureStep::UntagTemporary { .. } => None,
        }
    }
}

/// Host state at startup plus the notifications that follow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub window: WindowContext,
    /// Bulk query result
    pub identities: Vec<ContainerIdentity>,
    /// Ids tagged temporary at startup
    pub temporary: Vec<String>,
    /// Ids whose classification always fails
    pub fail_classification: Vec<String>,
    /// Session storage handed to the engine
    pub session: Option<Value>,
    pub events: Vec<FixtureStep>,
}

impl Fixture {
    /// Parse a fixture from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SidebarError::Fixture(e.to_string()))
    }

    /// Load a fixture from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(SidebarError::IoError)?;
        serde_json::from_str(&content)
            .map_err(|e| SidebarError::Fixture(format!("{}: {}", path.display(), e)))
    }

    /// Build the in-memory host described by the fixture's startup state
    pub fn host(&self) -> MemoryHost {
        let host = MemoryHost::new(self.identities.clone()).with_temporary(self.temporary.clone());
        for id in &self.fail_classification {
            host.fail_classification(id);
        }
        host
    }
}
