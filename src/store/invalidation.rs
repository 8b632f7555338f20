//! Cache-tag invalidation bus.
//!
//! Mutations publish the tags they invalidate; every container listening
//! for one of those tags refetches its last parameters.

use tokio::sync::broadcast;

use crate::api::CacheTag;

const BUS_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct InvalidationBus {
    sender: broadcast::Sender<CacheTag>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    pub fn invalidate(&self, tags: &[CacheTag]) {
        for tag in tags {
            tracing::debug!(tag = %tag, "Invalidating cache tag");
            // Nobody listening means nothing to refetch.
            let _ = self.sender.send(*tag);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheTag> {
        self.sender.subscribe()
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}
