//! Per-entity API definitions.
//!
//! Every function here is a pure mapping from call parameters to a
//! [`RequestDescriptor`]; nothing in this module touches the network.
//!
//! Generic endpoints follow one layout:
//!
//! ```text
//! GET    /{segment}/list?…
//! GET    /{segment}/get/{id}
//! POST   /{segment}/create
//! PATCH  /{segment}/update/{id}
//! DELETE /{segment}/delete/{id}
//! ```

pub mod courses;
mod descriptor;
pub mod evidence;
pub mod learners;
pub mod notifications;
mod query;
pub mod resources;
mod response;
pub mod sampling_plans;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use descriptor::{
    path_param, CacheTag, FilePart, MultipartBody, RequestBody, RequestDescriptor,
};
pub use query::{QueryParams, QueryValue};
pub use response::{ItemResponse, ListResponse, MessageResponse, Pagination, DEFAULT_PAGE_SIZE};

use crate::http::ApiError;

/// A backend record held in a collection.
pub trait Entity:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn id(&self) -> &str;
}

/// Entity-specific list filters (search text, parent ids, status…).
pub trait ListFilter: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    fn apply(&self, query: QueryParams) -> QueryParams;
}

impl ListFilter for () {
    fn apply(&self, query: QueryParams) -> QueryParams {
        query
    }
}

/// Parameters of a list fetch. Unset paging is left to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams<F> {
    pub filter: F,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl<F: Default> ListParams<F> {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            filter: F::default(),
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}

impl<F> ListParams<F> {
    pub fn filtered(filter: F) -> Self {
        Self {
            filter,
            page: None,
            page_size: None,
        }
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

/// A readable backend collection.
pub trait Resource: Send + Sync + 'static {
    type Item: Entity;
    type Filter: ListFilter;

    /// Path segment, e.g. `course`.
    const SEGMENT: &'static str;
    /// Human label used in notifications, e.g. `Course`.
    const LABEL: &'static str;
    const TAG: CacheTag;

    fn list(params: &ListParams<Self::Filter>) -> RequestDescriptor {
        let query = QueryParams::new()
            .with("page", params.page)
            .with("limit", params.page_size);
        RequestDescriptor::get(format!("/{}/list", Self::SEGMENT))
            .with_query(params.filter.apply(query))
            .provides(Self::TAG)
    }

    fn get(id: &str) -> RequestDescriptor {
        RequestDescriptor::get(format!("/{}/get/{}", Self::SEGMENT, path_param(id)))
    }
}

/// A collection the client may create, update and delete records in.
pub trait Mutable: Resource {
    /// Lists to refetch after any successful mutation.
    fn invalidated() -> Vec<CacheTag> {
        vec![Self::TAG]
    }

    fn create(item: &Self::Item) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::post(format!("/{}/create", Self::SEGMENT))
            .json(item)
            .map(|d| d.invalidates(&Self::invalidated()))
    }

    fn update(item: &Self::Item) -> Result<RequestDescriptor, ApiError> {
        RequestDescriptor::patch(format!(
            "/{}/update/{}",
            Self::SEGMENT,
            path_param(item.id())
        ))
        .json(item)
        .map(|d| d.invalidates(&Self::invalidated()))
    }

    fn delete(id: &str) -> RequestDescriptor {
        RequestDescriptor::delete(format!("/{}/delete/{}", Self::SEGMENT, path_param(id)))
            .invalidates(&Self::invalidated())
    }
}
