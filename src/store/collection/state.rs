use crate::api::{Entity, Pagination};
use crate::store::mvi::StoreState;

/// Fetch lifecycle of a collection.
///
/// `Idle → Loading → Loaded | Error`, and back to `Loading` on every new
/// fetch. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    /// Items of the last successful fetch, plus local patches since.
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub status: FetchStatus,
    /// Message of the last failed fetch.
    pub error: Option<String>,
    /// Generation of the newest fetch issued; older results are dropped.
    pub generation: u64,
}

impl<T> CollectionState<T> {
    /// Results only land while loading and only for the newest fetch.
    pub fn awaits(&self, generation: u64) -> bool {
        self.status == FetchStatus::Loading && self.generation == generation
    }
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            status: FetchStatus::Idle,
            error: None,
            generation: 0,
        }
    }
}

impl<T: Entity> StoreState for CollectionState<T> {}

impl<T: Entity> CollectionState<T> {
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }
}
