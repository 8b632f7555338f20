use crate::api::Pagination;
use crate::store::mvi::Intent;

#[derive(Debug, Clone)]
pub enum CollectionIntent<T> {
    /// A fetch was issued. Items stay untouched until it resolves.
    FetchStarted { generation: u64 },
    FetchSucceeded {
        generation: u64,
        items: Vec<T>,
        pagination: Pagination,
    },
    /// `message` is `None` for failures the user is not told about.
    FetchFailed {
        generation: u64,
        message: Option<String>,
    },
    /// A single new record; placed according to the current page.
    ItemAppended(T),
    /// A record changed in place (matched by id).
    ItemReplaced(T),
    ItemRemoved { id: String },
}

impl<T: Send + 'static> Intent for CollectionIntent<T> {}
