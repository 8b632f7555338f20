//! Intent/reducer primitives behind every container.
//!
//! ```text
//! fetch / mutation ──→ Intent ──→ Reducer ──→ State ──→ watch subscribers
//! ```
//!
//! Reducers are pure; containers own the only mutable copy of the state
//! and replace it wholesale after each intent.

/// A published snapshot: cloned out to subscribers, compared to detect
/// changes, and defaulted for a container that has not fetched yet.
pub trait StoreState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// An event applied to a state: a fetch lifecycle step or a local patch.
pub trait Intent: Send + 'static {}

/// `(State, Intent) -> State`, with no side effects.
pub trait Reducer {
    type State: StoreState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
