//! User notifications. Read-only except for read markers and deletion.

use serde::{Deserialize, Serialize};

use super::{path_param, CacheTag, Entity, ListFilter, QueryParams, RequestDescriptor, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Entity for Notification {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub unread_only: bool,
}

impl ListFilter for NotificationFilter {
    fn apply(&self, query: QueryParams) -> QueryParams {
        // Only sent when narrowing; `read=false` would otherwise hide read items.
        query.with("read", self.unread_only.then_some(false))
    }
}

pub struct NotificationApi;

impl Resource for NotificationApi {
    type Item = Notification;
    type Filter = NotificationFilter;

    const SEGMENT: &'static str = "notification";
    const LABEL: &'static str = "Notification";
    const TAG: CacheTag = CacheTag::Notifications;
}

impl NotificationApi {
    pub fn mark_read(id: &str) -> RequestDescriptor {
        RequestDescriptor::patch(format!("/notification/read/{}", path_param(id)))
    }

    pub fn mark_all_read() -> RequestDescriptor {
        RequestDescriptor::patch("/notification/read-all")
    }

    pub fn delete(id: &str) -> RequestDescriptor {
        RequestDescriptor::delete(format!("/notification/delete/{}", path_param(id)))
    }
}
