//! container-tabs - container reconciliation for a tabs sidebar
//!
//! Mirrors the host browser's contextual identities into a rendered list,
//! folding temporary containers into a single group that always stays last.
//! Host notifications are handled one at a time by a [`Reconciler`], usually
//! running behind the event loop started by [`engine::start`].
//!
//! # Example
//!
//! ```no_run
//! use container_tabs::{Config, ElementList, HostBindings, MemoryHost, Reconciler, SessionStorage, WindowContext};
//!
//! # async fn demo() -> container_tabs::Result<()> {
//! let host = MemoryHost::default();
//! let mut sidebar = Reconciler::initialize(
//!     HostBindings::memory(host),
//!     ElementList::new(),
//!     WindowContext { id: 1, incognito: false },
//!     Config::default(),
//!     SessionStorage::new(),
//! )
//! .await?;
//! sidebar.on_removed("firefox-container-3");
//! sidebar.check_invariant()?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod host;
pub mod output;
pub mod render;
pub mod replay;
pub mod session;

pub use config::{Config, DefaultLabels};
pub use container::{ContainerEntry, DisplayField, TemporaryAggregate};
pub use engine::{EventSender, Reconciler, SidebarSnapshot, Transition};
pub use error::{Result, SidebarError};
pub use host::{
    ContainerIdentity, Fixture, HostBindings, IdentityEvent, IdentityHost, MemoryHost,
    TemporaryClassifier, WindowContext,
};
pub use output::{format_output, format_report, OutputFormat, ReplayReport};
pub use render::{ElementList, RenderTarget};
pub use replay::replay;
pub use session::{ScratchRecord, SessionStorage};
