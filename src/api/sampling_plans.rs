//! Internal quality assurance sampling plans.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{path_param, CacheTag, Entity, ListFilter, Mutable, QueryParams, RequestDescriptor, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingPlan {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub course_id: String,
    #[serde(default)]
    pub assessor_id: Option<String>,
    #[serde(default)]
    pub iqa_id: Option<String>,
    #[serde(default)]
    pub sample_type: Option<String>,
    #[serde(default)]
    pub planned_date: Option<String>,
    #[serde(default)]
    pub learner_ids: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Entity for SamplingPlan {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplingPlanFilter {
    pub course_id: Option<String>,
    pub search: Option<String>,
}

impl ListFilter for SamplingPlanFilter {
    fn apply(&self, query: QueryParams) -> QueryParams {
        query
            .with("course_id", self.course_id.as_deref())
            .with("search", self.search.as_deref())
    }
}

pub struct SamplingPlanApi;

impl Resource for SamplingPlanApi {
    type Item = SamplingPlan;
    type Filter = SamplingPlanFilter;

    const SEGMENT: &'static str = "sampling-plan";
    const LABEL: &'static str = "Sampling plan";
    const TAG: CacheTag = CacheTag::SamplingPlans;
}

impl Mutable for SamplingPlanApi {}

impl SamplingPlanApi {
    pub fn add_learners(plan_id: &str, learner_ids: &[String]) -> RequestDescriptor {
        RequestDescriptor::post(format!("/sampling-plan/{}/learners", path_param(plan_id)))
            .json_value(json!({ "learner_ids": learner_ids }))
            .invalidates(&[CacheTag::SamplingPlans])
    }
}
