use std::future::Future;
use std::sync::Arc;

use crate::api::notifications::{Notification, NotificationApi, NotificationFilter};
use crate::api::ListParams;
use crate::http::ApiClient;
use crate::notify::NotificationSink;
use crate::store::collection::{CollectionIntent, CollectionState};
use crate::store::container::{EntityContainer, MutationStrategy};
use crate::store::invalidation::InvalidationBus;

/// The user's notification inbox.
///
/// Read markers and deletions patch the collection in place; the server
/// is not asked for the list again.
#[derive(Clone)]
pub struct NotificationCenter {
    container: EntityContainer<NotificationApi>,
}

impl NotificationCenter {
    pub fn new(client: ApiClient, notifier: Arc<dyn NotificationSink>, bus: InvalidationBus) -> Self {
        Self {
            container: EntityContainer::new(client, notifier, bus, MutationStrategy::Optimistic),
        }
    }

    pub fn container(&self) -> &EntityContainer<NotificationApi> {
        &self.container
    }

    pub fn fetch(
        &self,
        params: ListParams<NotificationFilter>,
    ) -> impl Future<Output = bool> + Send + 'static {
        self.container.fetch(params)
    }

    pub fn snapshot(&self) -> CollectionState<Notification> {
        self.container.snapshot()
    }

    /// Unread notifications among those loaded.
    pub fn unread_count(&self) -> usize {
        self.container
            .snapshot()
            .items
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    pub async fn mark_read(&self, id: &str) -> bool {
        if self
            .container
            .mutate("mark_read", NotificationApi::mark_read(id), None)
            .await
            .is_none()
        {
            return false;
        }
        if let Some(mut notification) = self.container.snapshot().find(id).cloned() {
            notification.read = true;
            self.container
                .dispatch(CollectionIntent::ItemReplaced(notification));
        }
        true
    }

    pub async fn mark_all_read(&self) -> bool {
        if self
            .container
            .mutate("mark_all_read", NotificationApi::mark_all_read(), None)
            .await
            .is_none()
        {
            return false;
        }
        let unread: Vec<Notification> = self
            .container
            .snapshot()
            .items
            .into_iter()
            .filter(|n| !n.read)
            .collect();
        for mut notification in unread {
            notification.read = true;
            self.container
                .dispatch(CollectionIntent::ItemReplaced(notification));
        }
        true
    }

    pub async fn delete(&self, id: &str) -> bool {
        if self
            .container
            .mutate(
                "delete",
                NotificationApi::delete(id),
                Some("Notification deleted".to_string()),
            )
            .await
            .is_none()
        {
            return false;
        }
        self.container.dispatch(CollectionIntent::ItemRemoved { id: id.to_string() });
        true
    }

    /// A notification pushed by the server while the inbox is open.
    pub fn push(&self, notification: Notification) {
        tracing::debug!(id = %notification.id, "Notification received");
        self.container.append(notification);
    }
}
