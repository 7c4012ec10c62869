//! Reconciliation engine

pub mod actor;
pub mod reconciler;
pub mod snapshot;

pub use actor::{spawn, start, ActorOutcome, EventSender, DEFAULT_CHANNEL_CAPACITY};
pub use reconciler::{Reconciler, Transition};
pub use snapshot::{EntrySnapshot, SidebarSnapshot};
