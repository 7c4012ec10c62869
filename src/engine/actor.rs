//! Single-consumer event loop around a [`Reconciler`]
//!
//! Host notifications are queued on a channel and handled strictly one at a
//! time. A notification that fails is logged and dropped; the loop keeps
//! going with the next one.
//!
//! [`start`] hands out the sender before the initial sync runs, so the host
//! can forward notifications while the bulk query is still pending. They
//! are handled once the sync completes.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::reconciler::Reconciler;
use crate::config::Config;
use crate::error::{Result, SidebarError};
use crate::host::{ContainerIdentity, HostBindings, IdentityEvent, WindowContext};
use crate::render::RenderTarget;
use crate::session::SessionStorage;

/// Queue depth used by callers that have no preference
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

enum Envelope {
    Event(IdentityEvent),
    Flush(oneshot::Sender<()>),
}

/// Producer side of the actor's queue
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<Envelope>,
}

impl EventSender {
    /// Queue a host notification
    pub async fn send(&self, event: IdentityEvent) -> Result<()> {
        self.tx
            .send(Envelope::Event(event))
            .await
            .map_err(|_| SidebarError::ChannelClosed)
    }

    pub async fn created(&self, identity: ContainerIdentity) -> Result<()> {
        self.send(IdentityEvent::Created { identity }).await
    }

    pub async fn updated(&self, identity: ContainerIdentity) -> Result<()> {
        self.send(IdentityEvent::Updated { identity }).await
    }

    pub async fn removed(&self, id: impl Into<String>) -> Result<()> {
        self.send(IdentityEvent::Removed { id: id.into() }).await
    }

    /// Wait until every notification queued before this call was handled
    pub async fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(Envelope::Flush(done_tx))
            .await
            .map_err(|_| SidebarError::ChannelClosed)?;
        done_rx.await.map_err(|_| SidebarError::ChannelClosed)
    }
}

/// What the event loop hands back once every sender is dropped
pub struct ActorOutcome<R: RenderTarget> {
    pub reconciler: Reconciler<R>,
    /// Notifications handled successfully
    pub processed: usize,
    /// Notifications whose handler returned an error
    pub failed: usize,
}

/// Open the event queue, then initialize an engine and run its event loop
///
/// Notifications sent before initialization finishes wait in the queue. If
/// the initial sync fails, the task returns the error and the queue closes.
pub fn start<R>(
    bindings: HostBindings,
    tree: R,
    window: WindowContext,
    config: Config,
    storage: SessionStorage,
    capacity: usize,
) -> (EventSender, JoinHandle<Result<ActorOutcome<R>>>)
where
    R: RenderTarget + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let handle = tokio::spawn(async move {
        let reconciler = Reconciler::initialize(bindings, tree, window, config, storage).await?;
        Ok::<_, SidebarError>(run(reconciler, rx).await)
    });
    (EventSender { tx }, handle)
}

/// Run the event loop for an already initialized engine
pub fn spawn<R>(
    reconciler: Reconciler<R>,
    capacity: usize,
) -> (EventSender, JoinHandle<ActorOutcome<R>>)
where
    R: RenderTarget + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let handle = tokio::spawn(run(reconciler, rx));
    (EventSender { tx }, handle)
}

async fn run<R: RenderTarget>(
    mut reconciler: Reconciler<R>,
    mut rx: mpsc::Receiver<Envelope>,
) -> ActorOutcome<R> {
    let mut processed = 0;
    let mut failed = 0;

    while let Some(envelope) = rx.recv().await {
        match envelope {
            Envelope::Event(event) => {
                let id = event.id().to_string();
                match reconciler.handle(event).await {
                    Ok(transition) => {
                        processed += 1;
                        debug!(id = %id, ?transition, "notification handled");
                    }
                    Err(e) => {
                        failed += 1;
                        warn!(id = %id, error = %e, "dropping notification");
                    }
                }
            }
            Envelope::Flush(done) => {
                // The flusher may have given up waiting.
                let _ = done.send(());
            }
        }
    }

    debug!(processed, failed, "event channel closed");
    ActorOutcome {
        reconciler,
        processed,
        failed,
    }
}
