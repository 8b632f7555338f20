//! Paginated collection state and its reducer.

mod intent;
mod reducer;
mod state;

pub use intent::CollectionIntent;
pub use reducer::CollectionReducer;
pub use state::{CollectionState, FetchStatus};
