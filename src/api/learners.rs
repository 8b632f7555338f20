use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{path_param, CacheTag, Entity, ListFilter, Mutable, QueryParams, RequestDescriptor, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learner {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub course_ids: Vec<String>,
    #[serde(default)]
    pub progress: Option<f32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Learner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Learner {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearnerFilter {
    pub search: Option<String>,
    pub course_id: Option<String>,
    pub status: Option<String>,
}

impl ListFilter for LearnerFilter {
    fn apply(&self, query: QueryParams) -> QueryParams {
        query
            .with("search", self.search.as_deref())
            .with("course_id", self.course_id.as_deref())
            .with("status", self.status.as_deref())
    }
}

pub struct LearnerApi;

impl Resource for LearnerApi {
    type Item = Learner;
    type Filter = LearnerFilter;

    const SEGMENT: &'static str = "learner";
    const LABEL: &'static str = "Learner";
    const TAG: CacheTag = CacheTag::Learners;
}

impl Mutable for LearnerApi {}

impl LearnerApi {
    pub fn assign_course(learner_id: &str, course_id: &str) -> RequestDescriptor {
        RequestDescriptor::post(format!("/learner/{}/courses", path_param(learner_id)))
            .json_value(json!({ "course_id": course_id }))
            .invalidates(&[CacheTag::Learners, CacheTag::Courses])
    }

    pub fn unassign_course(learner_id: &str, course_id: &str) -> RequestDescriptor {
        RequestDescriptor::delete(format!(
            "/learner/{}/courses/{}",
            path_param(learner_id),
            path_param(course_id)
        ))
        .invalidates(&[CacheTag::Learners, CacheTag::Courses])
    }
}
