//! Courses: the qualification frameworks learners are enrolled on.

use serde::{Deserialize, Serialize};

use super::{path_param, CacheTag, Entity, ListFilter, Mutable, QueryParams, RequestDescriptor, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub units: Vec<CourseUnit>,
}

/// A unit of a course that evidence is mapped against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseUnit {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub reference: String,
    pub title: String,
}

impl Entity for Course {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
}

impl ListFilter for CourseFilter {
    fn apply(&self, query: QueryParams) -> QueryParams {
        query
            .with("search", self.search.as_deref())
            .with("level", self.level.as_deref())
            .with("status", self.status.as_deref())
    }
}

pub struct CourseApi;

impl Resource for CourseApi {
    type Item = Course;
    type Filter = CourseFilter;

    const SEGMENT: &'static str = "course";
    const LABEL: &'static str = "Course";
    const TAG: CacheTag = CacheTag::Courses;
}

impl Mutable for CourseApi {
    // Learner rows show course names.
    fn invalidated() -> Vec<CacheTag> {
        vec![CacheTag::Courses, CacheTag::Learners]
    }
}

impl CourseApi {
    pub fn units(course_id: &str) -> RequestDescriptor {
        RequestDescriptor::get(format!("/course/units/{}", path_param(course_id)))
    }
}
