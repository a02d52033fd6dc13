//! Service layer wiring anchor persistence, permalink resolution, and
//! menu-link refresh on top of the pure core.

mod fragment;
mod menu;
mod policy;
mod resolve;
mod store;

pub use fragment::existing_fragment;
pub use menu::{MenuItem, MenuLinkService};
pub use policy::AnchorPolicy;
pub use resolve::{PermalinkResolver, StaticResolver};
pub use store::{AnchorStore, MemoryAnchorStore, SaveOutcome};

use thiserror::Error;

/// Identifier of a link-bearing entity (menu item, widget instance).
pub type EntityId = u64;

/// Errors raised by the service layer.
#[derive(Debug, Error)]
pub enum OpsError {
    #[error("failed to persist anchor for item {id}: {message}")]
    Store { id: EntityId, message: String },
    #[error("no permalink registered for target '{0}'")]
    UnknownTarget(String),
}
