//! Per-entity state container.
//!
//! A container owns one collection snapshot, drives its fetch lifecycle
//! through [`CollectionReducer`], and publishes every new snapshot on a
//! `watch` channel. Handles are cheap to clone and share state.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{
    ItemResponse, ListParams, ListResponse, MessageResponse, Mutable, Pagination,
    RequestDescriptor, Resource,
};
use crate::http::{ApiClient, ApiError};
use crate::notify::{NotificationSink, UserNotice};
use crate::store::collection::{CollectionIntent, CollectionReducer, CollectionState, FetchStatus};
use crate::store::invalidation::InvalidationBus;
use crate::store::mvi::Reducer;

/// Page size recorded for lists fetched without paging: everything is on
/// page one.
const UNPAGED_PAGE_SIZE: u32 = u32::MAX;

/// How a container reflects its own successful mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStrategy {
    /// Publish the invalidated cache tags and let listeners refetch.
    #[default]
    Refetch,
    /// Patch the in-memory collection directly. Other tags the mutation
    /// invalidates are still published.
    Optimistic,
}

pub struct EntityContainer<R: Resource> {
    inner: Arc<Inner<R>>,
}

struct Inner<R: Resource> {
    client: ApiClient,
    notifier: Arc<dyn NotificationSink>,
    bus: InvalidationBus,
    strategy: MutationStrategy,
    state: watch::Sender<CollectionState<R::Item>>,
    last_params: Mutex<Option<ListParams<R::Filter>>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for EntityContainer<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> EntityContainer<R> {
    pub fn new(
        client: ApiClient,
        notifier: Arc<dyn NotificationSink>,
        bus: InvalidationBus,
        strategy: MutationStrategy,
    ) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self {
            inner: Arc::new(Inner {
                client,
                notifier,
                bus,
                strategy,
                state,
                last_params: Mutex::new(None),
                _resource: PhantomData,
            }),
        }
    }

    pub fn strategy(&self) -> MutationStrategy {
        self.inner.strategy
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> CollectionState<R::Item> {
        self.inner.state.borrow().clone()
    }

    pub fn status(&self) -> FetchStatus {
        self.inner.state.borrow().status
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<R::Item>> {
        self.inner.state.subscribe()
    }

    /// Parameters of the most recently issued fetch.
    pub fn last_params(&self) -> Option<ListParams<R::Filter>> {
        self.inner.last_params.lock().clone()
    }

    /// Starts a list fetch.
    ///
    /// The status is `Loading` as soon as this returns, before the future
    /// is polled. The future resolves to whether this fetch's result was
    /// applied (false on failure or when a newer fetch superseded it).
    pub fn fetch(
        &self,
        params: ListParams<R::Filter>,
    ) -> impl Future<Output = bool> + Send + 'static {
        // Stamped under the snapshot's write lock: a concurrent fetch can
        // never publish an older generation over a newer one.
        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            generation = state.generation + 1;
            *self.inner.last_params.lock() = Some(params.clone());
            let current = std::mem::take(state);
            *state = CollectionReducer::<R::Item>::reduce(
                current,
                CollectionIntent::FetchStarted { generation },
            );
        });

        let container = self.clone();
        async move { container.complete_fetch(generation, params).await }
    }

    /// Reissues the last fetch; `None` if nothing was fetched yet.
    pub fn refetch(&self) -> Option<impl Future<Output = bool> + Send + 'static> {
        let params = self.last_params()?;
        Some(self.fetch(params))
    }

    async fn complete_fetch(self, generation: u64, params: ListParams<R::Filter>) -> bool {
        let descriptor = R::list(&params);
        let result = self
            .inner
            .client
            .send_json::<ListResponse<R::Item>>(&descriptor)
            .await;

        let (intent, failure) = match result {
            Ok(response) => {
                let pagination = response.meta_data.unwrap_or_else(|| {
                    Pagination::new(
                        params.page.unwrap_or(1),
                        params.page_size.unwrap_or(UNPAGED_PAGE_SIZE),
                        response.data.len() as u64,
                    )
                });
                tracing::debug!(
                    entity = R::LABEL,
                    generation,
                    items = response.data.len(),
                    total = pagination.total_items,
                    "Fetch succeeded"
                );
                let intent = CollectionIntent::FetchSucceeded {
                    generation,
                    items: response.data,
                    pagination,
                };
                (intent, None)
            }
            Err(e) => {
                let intent = CollectionIntent::FetchFailed {
                    generation,
                    message: e.user_message(),
                };
                (intent, Some(e))
            }
        };

        if !self.settle(generation, intent) {
            tracing::debug!(
                entity = R::LABEL,
                generation,
                "Discarding result of superseded fetch"
            );
            return false;
        }
        match failure {
            Some(e) => {
                self.report_failure("load", &e);
                false
            }
            None => true,
        }
    }

    /// Applies a fetch result if the snapshot still awaits `generation`.
    /// Subscribers are only woken when it does.
    fn settle(&self, generation: u64, intent: CollectionIntent<R::Item>) -> bool {
        self.inner.state.send_if_modified(|state| {
            if !state.awaits(generation) {
                return false;
            }
            let current = std::mem::take(state);
            *state = CollectionReducer::<R::Item>::reduce(current, intent);
            true
        })
    }

    /// Loads one record through the detail endpoint. The collection is
    /// not touched.
    pub async fn find(&self, id: &str) -> Option<R::Item> {
        self.load::<ItemResponse<R::Item>>("load", &R::get(id))
            .await
            .map(|response| response.data)
    }

    /// Sends a read-only request on behalf of this container, reporting
    /// failures the same way fetches do.
    pub(crate) async fn load<T: DeserializeOwned>(
        &self,
        action: &str,
        descriptor: &RequestDescriptor,
    ) -> Option<T> {
        match self.inner.client.send_json::<T>(descriptor).await {
            Ok(value) => Some(value),
            Err(e) => {
                self.report_failure(action, &e);
                None
            }
        }
    }

    /// Adds a single new record using the pagination append policy: the
    /// record is only shown when it lands on the page currently held,
    /// the running total always grows.
    pub fn append(&self, item: R::Item) {
        self.dispatch(CollectionIntent::ItemAppended(item));
    }

    pub(crate) fn dispatch(&self, intent: CollectionIntent<R::Item>) {
        self.inner.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = CollectionReducer::<R::Item>::reduce(current, intent);
        });
    }

    /// One user-visible notification per surfaced failure.
    pub(crate) fn report_failure(&self, action: &str, err: &ApiError) {
        let Some(message) = err.user_message() else {
            tracing::debug!(entity = R::LABEL, action, "Failure already handled by session guard");
            return;
        };
        tracing::warn!(
            entity = R::LABEL,
            action,
            status = err.status().unwrap_or(0),
            error = %err,
            "Request failed"
        );
        self.inner.notifier.notify(UserNotice::error(message));
    }

    /// Sends a mutation. On success publishes invalidations according to
    /// the strategy and, if given, a success notice (the server message
    /// wins over `success`).
    pub(crate) async fn mutate(
        &self,
        action: &str,
        descriptor: RequestDescriptor,
        success: Option<String>,
    ) -> Option<Value> {
        match self.inner.client.send(&descriptor).await {
            Ok(body) => {
                let tags: Vec<_> = match self.inner.strategy {
                    MutationStrategy::Refetch => descriptor.invalidates.clone(),
                    MutationStrategy::Optimistic => descriptor
                        .invalidates
                        .iter()
                        .copied()
                        .filter(|tag| *tag != R::TAG)
                        .collect(),
                };
                self.inner.bus.invalidate(&tags);

                if let Some(default_message) = success {
                    let message = serde_json::from_value::<MessageResponse>(body.clone())
                        .ok()
                        .and_then(|b| b.message)
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or(default_message);
                    self.inner.notifier.notify(UserNotice::success(message));
                }
                tracing::debug!(entity = R::LABEL, action, "Mutation succeeded");
                Some(body)
            }
            Err(e) => {
                self.report_failure(action, &e);
                None
            }
        }
    }

    /// Refetches whenever this container's cache tag is invalidated.
    ///
    /// The task ends once every handle to this container is dropped and
    /// another tag arrives, or when the bus closes.
    pub fn watch_invalidations(&self) -> JoinHandle<()> {
        let mut receiver = self.inner.bus.subscribe();
        let weak: Weak<Inner<R>> = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            loop {
                let should_refetch = match receiver.recv().await {
                    Ok(tag) => tag == R::TAG,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(entity = R::LABEL, skipped, "Invalidation listener lagged");
                        true
                    }
                    Err(RecvError::Closed) => break,
                };

                let Some(inner) = weak.upgrade() else {
                    break;
                };
                if !should_refetch {
                    continue;
                }

                let container = EntityContainer { inner };
                if let Some(refetch) = container.refetch() {
                    tracing::debug!(entity = R::LABEL, "Refetching after invalidation");
                    drop(container);
                    refetch.await;
                }
            }
        })
    }
}

impl<R: Mutable> EntityContainer<R> {
    pub async fn create(&self, item: &R::Item) -> bool {
        let descriptor = match R::create(item) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                self.report_failure("create", &e);
                return false;
            }
        };
        let success = format!("{} created successfully", R::LABEL);
        let Some(body) = self.mutate("create", descriptor, Some(success)).await else {
            return false;
        };

        if self.inner.strategy == MutationStrategy::Optimistic {
            match serde_json::from_value::<ItemResponse<R::Item>>(body) {
                Ok(response) => self.append(response.data),
                Err(e) => {
                    // Without the stored record (and its id) only a refetch is correct.
                    tracing::debug!(entity = R::LABEL, error = %e, "Create returned no record; refetching");
                    self.inner.bus.invalidate(&[R::TAG]);
                }
            }
        }
        true
    }

    pub async fn update(&self, item: &R::Item) -> bool {
        let descriptor = match R::update(item) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                self.report_failure("update", &e);
                return false;
            }
        };
        let success = format!("{} updated successfully", R::LABEL);
        let Some(body) = self.mutate("update", descriptor, Some(success)).await else {
            return false;
        };

        if self.inner.strategy == MutationStrategy::Optimistic {
            let updated = serde_json::from_value::<ItemResponse<R::Item>>(body)
                .map(|response| response.data)
                .unwrap_or_else(|_| item.clone());
            self.dispatch(CollectionIntent::ItemReplaced(updated));
        }
        true
    }

    pub async fn delete(&self, id: &str) -> bool {
        let success = format!("{} deleted successfully", R::LABEL);
        if self
            .mutate("delete", R::delete(id), Some(success))
            .await
            .is_none()
        {
            return false;
        }

        if self.inner.strategy == MutationStrategy::Optimistic {
            self.dispatch(CollectionIntent::ItemRemoved { id: id.to_string() });
        }
        true
    }
}
