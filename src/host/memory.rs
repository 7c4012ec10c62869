//! In-memory host used by the CLI replay mode and by tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::types::ContainerIdentity;
use super::{IdentityHost, TemporaryClassifier};
use crate::error::{Result, SidebarError};

#[derive(Debug, Default)]
struct HostState {
    identities: Vec<ContainerIdentity>,
    temporary: HashSet<String>,
    failing: HashSet<String>,
    classify_calls: usize,
}

/// A host whose identities and temporary tags live in memory
///
/// Clones share state, so a test can keep a handle to retag containers while
/// the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    state: Arc<Mutex<HostState>>,
}

impl MemoryHost {
    /// Create a host that reports the given identities
    pub fn new(identities: Vec<ContainerIdentity>) -> Self {
        let host = Self::default();
        host.lock().identities = identities;
        host
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Builder form of [`MemoryHost::tag_temporary`]
    pub fn with_temporary<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut state = self.lock();
            state.temporary.extend(ids.into_iter().map(Into::into));
        }
        self
    }

    /// Mark a container as temporary
    pub fn tag_temporary(&self, id: &str) {
        self.lock().temporary.insert(id.to_string());
    }

    /// Mark a container as permanent
    pub fn untag_temporary(&self, id: &str) {
        self.lock().temporary.remove(id);
    }

    /// Make every classification query for `id` fail
    pub fn fail_classification(&self, id: &str) {
        self.lock().failing.insert(id.to_string());
    }

    /// Let classification queries for `id` succeed again
    pub fn heal_classification(&self, id: &str) {
        self.lock().failing.remove(id);
    }

    /// Add or replace an identity in the bulk query result
    pub fn upsert(&self, identity: ContainerIdentity) {
        let mut state = self.lock();
        match state.identities.iter_mut().find(|i| i.id == identity.id) {
            Some(existing) => *existing = identity,
            None => state.identities.push(identity),
        }
    }

    /// Drop an identity from the bulk query result
    pub fn remove(&self, id: &str) {
        self.lock().identities.retain(|i| i.id != id);
    }

    /// Number of classification queries answered so far
    pub fn classify_calls(&self) -> usize {
        self.lock().classify_calls
    }
}

#[async_trait]
impl IdentityHost for MemoryHost {
    async fn query_all(&self) -> Result<Vec<ContainerIdentity>> {
        Ok(self.lock().identities.clone())
    }
}

#[async_trait]
impl TemporaryClassifier for MemoryHost {
    async fn is_temporary(&self, id: &str) -> Result<bool> {
        let mut state = self.lock();
        state.classify_calls += 1;
        if state.failing.contains(id) {
            return Err(SidebarError::Classifier {
                id: id.to_string(),
                reason: "temporary containers authority unavailable".to_string(),
            });
        }
        Ok(state.temporary.contains(id))
    }
}
