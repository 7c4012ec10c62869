//! Renderable container units
//!
//! A permanent container renders as its own [`ContainerEntry`]; every
//! temporary container is folded into the single [`TemporaryAggregate`].

mod entry;
mod temporary;

pub use entry::{ContainerEntry, DisplayField};
pub use temporary::{TemporaryAggregate, COUNT_ATTR, HIDDEN_ATTR};
