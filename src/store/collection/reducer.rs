use std::marker::PhantomData;

use crate::api::{Entity, Pagination};
use crate::store::collection::intent::CollectionIntent;
use crate::store::collection::state::{CollectionState, FetchStatus};
use crate::store::mvi::Reducer;

pub struct CollectionReducer<T>(PhantomData<fn() -> T>);

impl<T: Entity> Reducer for CollectionReducer<T> {
    type State = CollectionState<T>;
    type Intent = CollectionIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CollectionIntent::FetchStarted { generation } => CollectionState {
                status: FetchStatus::Loading,
                error: None,
                generation,
                ..state
            },
            CollectionIntent::FetchSucceeded {
                generation,
                items,
                pagination,
            } => {
                if !state.awaits(generation) {
                    return state;
                }
                CollectionState {
                    items,
                    pagination,
                    status: FetchStatus::Loaded,
                    error: None,
                    generation,
                }
            }
            CollectionIntent::FetchFailed {
                generation,
                message,
            } => {
                if !state.awaits(generation) {
                    return state;
                }
                // Stale rows are never shown next to an error.
                let pagination =
                    Pagination::new(state.pagination.page, state.pagination.page_size, 0);
                CollectionState {
                    items: Vec::new(),
                    pagination,
                    status: FetchStatus::Error,
                    error: message,
                    generation,
                }
            }
            CollectionIntent::ItemAppended(item) => {
                let mut state = state;
                if state.pagination.accepts_appended() {
                    state.items.push(item);
                }
                state.pagination.record_added();
                state
            }
            CollectionIntent::ItemReplaced(item) => {
                let mut state = state;
                if let Some(slot) = state.items.iter_mut().find(|i| i.id() == item.id()) {
                    *slot = item;
                }
                state
            }
            CollectionIntent::ItemRemoved { id } => {
                let mut state = state;
                state.items.retain(|i| i.id() != id);
                state.pagination.record_removed();
                state
            }
        }
    }
}
