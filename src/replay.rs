//! Drive an engine through a scripted fixture

use tracing::debug;

use crate::config::Config;
use crate::engine::{self, ActorOutcome, EventSender, DEFAULT_CHANNEL_CAPACITY};
use crate::error::{Result, SidebarError};
use crate::host::{Fixture, FixtureStep, HostBindings, MemoryHost};
use crate::output::ReplayReport;
use crate::render::{ElementList, RenderTarget};
use crate::session::SessionStorage;

/// Initialize an engine from the fixture's startup state and feed it every
/// scripted step through the event loop
///
/// Tag changes wait for earlier notifications to be handled first, so the
/// classifier answers each notification with the state the script intends.
pub async fn replay(fixture: &Fixture, config: Config) -> Result<ActorOutcome<ElementList>> {
    let host = fixture.host();
    let storage = match &fixture.session {
        Some(value) => SessionStorage::from_value(value.clone())?,
        None => SessionStorage::new(),
    };

    let (sender, handle) = engine::start(
        HostBindings::memory(host.clone()),
        ElementList::new(),
        fixture.window,
        config,
        storage,
        DEFAULT_CHANNEL_CAPACITY,
    );

    let fed = feed(fixture, &host, &sender).await;
    drop(sender);

    // A failed initial sync closes the queue; report that error, not the send.
    let outcome = handle
        .await
        .map_err(|e| SidebarError::Host(format!("reconciliation task failed: {}", e)))??;
    fed?;
    Ok(outcome)
}

async fn feed(fixture: &Fixture, host: &MemoryHost, sender: &EventSender) -> Result<()> {
    // The bulk query must see the startup state, not scripted changes.
    sender.flush().await?;

    for (index, step) in fixture.events.iter().enumerate() {
        debug!(step = index, ?step, "replaying");
        match step {
            FixtureStep::Created { identity } | FixtureStep::Updated { identity } => {
                host.upsert(identity.clone());
            }
            FixtureStep::Removed { id } => host.remove(id),
            FixtureStep::TagTemporary { id } => {
                sender.flush().await?;
                host.tag_temporary(id);
            }
            FixtureStep::UntagTemporary { id } => {
                sender.flush().await?;
                host.untag_temporary(id);
            }
        }
        if let Some(event) = step.event() {
            sender.send(event).await?;
        }
    }
    Ok(())
}

impl<R: RenderTarget> From<&ActorOutcome<R>> for ReplayReport {
    fn from(outcome: &ActorOutcome<R>) -> Self {
        Self {
            snapshot: outcome.reconciler.snapshot(),
            processed: outcome.processed,
            failed: outcome.failed,
            violation: outcome
                .reconciler
                .check_invariant()
                .err()
                .map(|e| e.to_string()),
        }
    }
}
