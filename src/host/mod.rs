//! Host browser boundary
//!
//! The engine never talks to the browser directly. It is handed an
//! [`IdentityHost`] for the one-time bulk query and a [`TemporaryClassifier`]
//! for the temporary-container tagging authority.

mod fixture;
mod memory;
mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use fixture::{Fixture, FixtureStep};
pub use memory::MemoryHost;
pub use types::{
    ContainerIdentity, IdentityEvent, WindowContext, DEFAULT_CONTEXT_ID, PRIVATE_CONTEXT_ID,
};

/// Source of the full identity list
#[async_trait]
pub trait IdentityHost: Send + Sync {
    /// Every identity the host currently knows about
    async fn query_all(&self) -> Result<Vec<ContainerIdentity>>;
}

/// Authority deciding whether a container is temporary
///
/// Implementations must not cache: the answer can change at any time
/// independently of the identity's attributes.
#[async_trait]
pub trait TemporaryClassifier: Send + Sync {
    async fn is_temporary(&self, id: &str) -> Result<bool>;
}

/// The host-side collaborators an engine instance is wired to
#[derive(Clone)]
pub struct HostBindings {
    pub host: Arc<dyn IdentityHost>,
    pub classifier: Arc<dyn TemporaryClassifier>,
}

impl HostBindings {
    pub fn new(host: Arc<dyn IdentityHost>, classifier: Arc<dyn TemporaryClassifier>) -> Self {
        Self { host, classifier }
    }

    /// Bind both roles to one in-memory host
    pub fn memory(host: MemoryHost) -> Self {
        let host = Arc::new(host);
        Self {
            host: host.clone(),
            classifier: host,
        }
    }
}
