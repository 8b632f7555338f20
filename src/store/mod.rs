//! Per-entity state containers.
//!
//! Each container holds one paginated collection, moves it through
//! `Idle → Loading → Loaded | Error`, and publishes snapshots to
//! subscribers. Mutations either invalidate cache tags (and listeners
//! refetch) or patch the collection in place.

pub mod collection;
mod container;
mod invalidation;
pub mod mvi;
mod notifications;
mod portfolio;

pub use collection::{CollectionIntent, CollectionReducer, CollectionState, FetchStatus};
pub use container::{EntityContainer, MutationStrategy};
pub use invalidation::InvalidationBus;
pub use notifications::NotificationCenter;
pub use portfolio::{Collaborators, Portfolio};
