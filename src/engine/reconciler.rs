//! Container reconciliation
//!
//! [`Reconciler`] owns the index of standalone entries and the temporary
//! group, and is the only thing that mutates either. Creation, update and
//! the initial sync all go through one reclassification step, so there is a
//! single place deciding where an identity's element lives.
//!
//! Handlers take `&mut self`: a notification cannot start while another one
//! is suspended on the classifier, which is what keeps the index and the
//! group mutually exclusive without locks.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::snapshot::{EntrySnapshot, SidebarSnapshot};
use crate::config::Config;
use crate::container::{ContainerEntry, DisplayField, TemporaryAggregate};
use crate::error::{Result, SidebarError};
use crate::host::{
    ContainerIdentity, HostBindings, IdentityEvent, WindowContext, DEFAULT_CONTEXT_ID,
};
use crate::render::{ElementList, RenderTarget, CONTAINER_ID_ATTR};
use crate::session::{SessionStorage, TEMPORARY_CONTAINER_KEY};

/// What a handler did to the render tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A new standalone entry was rendered
    Mounted,
    /// The id joined the temporary group without an entry of its own
    Aggregated,
    /// The standalone entry was patched in place
    Refreshed(Vec<DisplayField>),
    /// A standalone entry became temporary and moved into the group
    Demoted,
    /// A group member became permanent and got its own entry
    Promoted,
    /// Still temporary, nothing to render
    Unchanged,
    /// The id's element was detached from the tree
    Removed,
    /// Removal of an id that is not rendered anywhere
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Absent,
    Standalone,
    Temporary,
}

/// The reconciliation engine for one sidebar window
pub struct Reconciler<R: RenderTarget = ElementList> {
    window: WindowContext,
    config: Config,
    storage: SessionStorage,
    bindings: HostBindings,
    tree: R,
    index: HashMap<String, ContainerEntry>,
    aggregate: TemporaryAggregate,
}

impl<R: RenderTarget> Reconciler<R> {
    /// Mount the temporary group, then render every identity the host knows
    ///
    /// The default context (or the private context in a private window) is
    /// never temporary and is rendered without asking the classifier. A
    /// classification failure for one host identity is logged and skipped so
    /// the rest of the sidebar still renders; a failed bulk query is returned.
    pub async fn initialize(
        bindings: HostBindings,
        mut tree: R,
        window: WindowContext,
        config: Config,
        storage: SessionStorage,
    ) -> Result<Self> {
        let aggregate =
            TemporaryAggregate::mount(&mut tree, storage.record(TEMPORARY_CONTAINER_KEY));

        if config.tab_order_keeping() {
            debug!(window = window.id, "tab order keeping enabled");
        }

        let mut reconciler = Self {
            window,
            config,
            storage,
            bindings,
            tree,
            index: HashMap::new(),
            aggregate,
        };

        let identities = reconciler.initial_identities().await?;
        let context = reconciler.synthetic_context();
        reconciler.mount_entry(context);

        let mut failed = 0;
        for identity in identities {
            let id = identity.id.clone();
            if let Err(e) = reconciler.on_created(identity).await {
                warn!(id = %id, error = %e, "skipping container during initial sync");
                failed += 1;
            }
        }

        info!(
            window = window.id,
            incognito = window.incognito,
            entries = reconciler.index.len(),
            temporary = reconciler.aggregate.len(),
            failed,
            "sidebar containers rendered"
        );
        Ok(reconciler)
    }

    /// Host identities to classify, excluding the synthetic context
    async fn initial_identities(&self) -> Result<Vec<ContainerIdentity>> {
        let queried = self.bindings.host.query_all().await?;

        // Private windows do not support containers.
        if self.window.incognito {
            debug!(discarded = queried.len(), "private window, showing private context only");
            return Ok(Vec::new());
        }

        Ok(queried
            .into_iter()
            .filter(|i| i.id != DEFAULT_CONTEXT_ID)
            .collect())
    }

    fn synthetic_context(&self) -> ContainerIdentity {
        if self.window.incognito {
            ContainerIdentity::private_context(&self.config.labels)
        } else {
            ContainerIdentity::default_context(&self.config.labels)
        }
    }

    fn location(&self, id: &str) -> Location {
        if self.index.contains_key(id) {
            Location::Standalone
        } else if self.aggregate.has_member(id) {
            Location::Temporary
        } else {
            Location::Absent
        }
    }

    fn mount_entry(&mut self, identity: ContainerIdentity) {
        let scratch = self.storage.record(&identity.id);
        let id = identity.id.clone();
        let entry =
            ContainerEntry::mount(&mut self.tree, identity, scratch, self.aggregate.element());
        self.index.insert(id, entry);
    }

    fn unmount_entry(&mut self, id: &str) -> bool {
        match self.index.remove(id) {
            Some(mut entry) => {
                entry.destroy(&mut self.tree);
                true
            }
            None => false,
        }
    }

    /// Move `identity` to wherever its current classification says it belongs
    async fn reconcile(&mut self, identity: ContainerIdentity) -> Result<Transition> {
        let temporary = self.bindings.classifier.is_temporary(&identity.id).await?;
        let id = identity.id.clone();

        let transition = match (self.location(&id), temporary) {
            (Location::Absent, false) => {
                self.mount_entry(identity);
                Transition::Mounted
            }
            (Location::Absent, true) => {
                self.aggregate.attach(&mut self.tree, &id);
                Transition::Aggregated
            }
            (Location::Standalone, false) => match self.index.get_mut(&id) {
                Some(entry) => Transition::Refreshed(entry.refresh(&mut self.tree, identity)),
                None => Transition::Unchanged,
            },
            (Location::Standalone, true) => {
                self.unmount_entry(&id);
                self.aggregate.attach(&mut self.tree, &id);
                Transition::Demoted
            }
            (Location::Temporary, true) => Transition::Unchanged,
            (Location::Temporary, false) => {
                self.aggregate.detach(&mut self.tree, &id);
                self.mount_entry(identity);
                Transition::Promoted
            }
        };

        debug!(id = %id, temporary, ?transition, "container reconciled");
        Ok(transition)
    }

    /// Render a newly created identity
    ///
    /// A create for an id that is already rendered is treated as an update:
    /// the last write wins and the element is patched in place.
    pub async fn on_created(&mut self, identity: ContainerIdentity) -> Result<Transition> {
        identity.validate()?;
        self.reconcile(identity).await
    }

    /// Re-classify and re-render an updated identity
    ///
    /// An update for an id never seen before renders it as if created.
    pub async fn on_updated(&mut self, identity: ContainerIdentity) -> Result<Transition> {
        identity.validate()?;
        self.reconcile(identity).await
    }

    /// Drop whatever represents `id` in the render tree
    ///
    /// This only detaches elements; the container itself is owned by the host.
    pub fn on_removed(&mut self, id: &str) -> Transition {
        let detached = self.aggregate.detach(&mut self.tree, id);
        let unmounted = self.unmount_entry(id);

        if detached || unmounted {
            debug!(id = %id, "container removed");
            Transition::Removed
        } else {
            debug!(id = %id, "removal for a container that is not rendered");
            Transition::Ignored
        }
    }

    /// Dispatch one host notification
    pub async fn handle(&mut self, event: IdentityEvent) -> Result<Transition> {
        event.validate()?;
        match event {
            IdentityEvent::Created { identity } => self.on_created(identity).await,
            IdentityEvent::Updated { identity } => self.on_updated(identity).await,
            IdentityEvent::Removed { id } => Ok(self.on_removed(&id)),
        }
    }

    pub fn window(&self) -> WindowContext {
        self.window
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    pub fn tree(&self) -> &R {
        &self.tree
    }

    /// Standalone entry for `id`, if it has one
    pub fn entry(&self, id: &str) -> Option<&ContainerEntry> {
        self.index.get(id)
    }

    pub fn aggregate(&self) -> &TemporaryAggregate {
        &self.aggregate
    }

    pub fn is_standalone(&self, id: &str) -> bool {
        self.location(id) == Location::Standalone
    }

    pub fn is_temporary_member(&self, id: &str) -> bool {
        self.location(id) == Location::Temporary
    }

    /// Number of identities represented, standalone or grouped
    pub fn len(&self) -> usize {
        self.index.len() + self.aggregate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify that every known id is rendered exactly once and that the
    /// temporary group is the last element
    pub fn check_invariant(&self) -> Result<()> {
        let violation = |msg: String| -> Result<()> { Err(SidebarError::InvariantViolation(msg)) };
        let group = self.aggregate.element();
        let children = self.tree.children();

        if children.last() != Some(&group) {
            return violation("temporary containers group is not the last element".to_string());
        }
        if children.iter().filter(|child| **child == group).count() != 1 {
            return violation("temporary containers group is rendered more than once".to_string());
        }

        for id in self.aggregate.members() {
            if self.index.contains_key(id) {
                return violation(format!(
                    "'{}' is both a standalone entry and a temporary member",
                    id
                ));
            }
        }

        let mut rendered: HashMap<String, usize> = HashMap::new();
        for child in children.iter().filter(|child| **child != group) {
            let Some(id) = self.tree.attribute(*child, CONTAINER_ID_ATTR) else {
                return violation(format!("element {} has no container id", child));
            };
            *rendered.entry(id).or_default() += 1;
        }

        for (id, count) in &rendered {
            if *count > 1 {
                return violation(format!("'{}' is rendered {} times", id, count));
            }
            if !self.index.contains_key(id) {
                return violation(format!("stray element for untracked container '{}'", id));
            }
        }

        for (id, entry) in &self.index {
            if !self.tree.contains(entry.element()) {
                return violation(format!("entry for '{}' is not attached", id));
            }
        }

        Ok(())
    }

    /// Current sidebar contents in render order
    pub fn snapshot(&self) -> SidebarSnapshot {
        let by_element: HashMap<_, _> = self
            .index
            .values()
            .map(|entry| (entry.element(), entry))
            .collect();

        let entries = self
            .tree
            .children()
            .into_iter()
            .filter_map(|child| by_element.get(&child))
            .map(|entry| EntrySnapshot::from(entry.identity()))
            .collect();

        SidebarSnapshot {
            window_id: self.window.id,
            incognito: self.window.incognito,
            entries,
            temporary: self.aggregate.members().map(str::to_string).collect(),
            taken_at: chrono::Utc::now(),
        }
    }
}
