//! Learning resources attached to courses (documents, links).

use serde::{Deserialize, Serialize};

use super::{CacheTag, Entity, FilePart, ListFilter, Mutable, MultipartBody, QueryParams, RequestDescriptor, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
}

impl Entity for LearningResource {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub search: Option<String>,
    pub course_id: Option<String>,
}

impl ListFilter for ResourceFilter {
    fn apply(&self, query: QueryParams) -> QueryParams {
        query
            .with("search", self.search.as_deref())
            .with("course_id", self.course_id.as_deref())
    }
}

pub struct ResourceApi;

impl Resource for ResourceApi {
    type Item = LearningResource;
    type Filter = ResourceFilter;

    const SEGMENT: &'static str = "resource";
    const LABEL: &'static str = "Resource";
    const TAG: CacheTag = CacheTag::Resources;
}

impl Mutable for ResourceApi {}

impl ResourceApi {
    pub fn upload(course_id: Option<&str>, name: &str, file: FilePart) -> RequestDescriptor {
        let mut file = file;
        file.field = "file".to_string();
        let body = MultipartBody::new()
            .text("name", name)
            .text("course_id", course_id.unwrap_or_default())
            .file(file);

        RequestDescriptor::post("/resource/upload")
            .multipart(body)
            .invalidates(&[CacheTag::Resources])
    }
}
