//! Records exchanged with the host browser

use serde::{Deserialize, Serialize};

use crate::config::DefaultLabels;
use crate::error::{Result, SidebarError};
use crate::session::TEMPORARY_CONTAINER_KEY;

/// Cookie store id of the default (no container) context
pub const DEFAULT_CONTEXT_ID: &str = "firefox-default";
/// Cookie store id of the private browsing context
pub const PRIVATE_CONTEXT_ID: &str = "firefox-private";

const BRIEFCASE_ICON_URL: &str = "resource://usercontext-content/briefcase.svg";

/// A contextual identity as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerIdentity {
    /// Opaque identity id (the host's cookie store id)
    #[serde(rename = "cookieStoreId")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub color_code: String,
}

impl ContainerIdentity {
    /// Build an identity with the briefcase icon and white color
    fn synthetic(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon_url: BRIEFCASE_ICON_URL.to_string(),
            icon: "briefcase".to_string(),
            color: "white".to_string(),
            color_code: "#ffffff".to_string(),
        }
    }

    /// The context tabs live in when they belong to no container
    pub fn default_context(labels: &DefaultLabels) -> Self {
        Self::synthetic(DEFAULT_CONTEXT_ID, &labels.default)
    }

    /// The single context shown in a private window
    pub fn private_context(labels: &DefaultLabels) -> Self {
        Self::synthetic(PRIVATE_CONTEXT_ID, &labels.private)
    }

    /// Reject records the engine cannot key on
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SidebarError::InvalidIdentity(format!(
                "identity '{}' has an empty id",
                self.name
            )));
        }
        // The temporary group keeps its scratch record under this key.
        if self.id == TEMPORARY_CONTAINER_KEY {
            return Err(SidebarError::InvalidIdentity(format!(
                "identity id '{}' is reserved",
                self.id
            )));
        }
        Ok(())
    }
}

/// The browser window the sidebar is bound to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowContext {
    pub id: i64,
    #[serde(default)]
    pub incognito: bool,
}

/// A notification from the host identity-change stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdentityEvent {
    Created { identity: ContainerIdentity },
    Updated { identity: ContainerIdentity },
    Removed { id: String },
}

impl IdentityEvent {
    /// The identity id the event is about
    pub fn id(&self) -> &str {
        match self {
            IdentityEvent::Created { identity } | IdentityEvent::Updated { identity } => {
                &identity.id
            }
            IdentityEvent::Removed { id } => id,
        }
    }

    /// Check the payload before it reaches the engine
    pub fn validate(&self) -> Result<()> {
        match self {
            IdentityEvent::Created { identity } | IdentityEvent::Updated { identity } => {
                identity.validate()
            }
            IdentityEvent::Removed { id } if id.trim().is_empty() => Err(
                SidebarError::InvalidIdentity("removal for an empty id".to_string()),
            ),
            IdentityEvent::Removed { .. } => Ok(()),
        }
    }
}
