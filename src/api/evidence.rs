//! Evidence: files and statements learners submit against course units.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{
    path_param, CacheTag, Entity, FilePart, ListFilter, Mutable, MultipartBody, QueryParams,
    RequestDescriptor, Resource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub learner_id: String,
    #[serde(default)]
    pub unit_refs: Vec<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl Entity for Evidence {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceFilter {
    pub learner_id: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ListFilter for EvidenceFilter {
    fn apply(&self, query: QueryParams) -> QueryParams {
        query
            .with("learner_id", self.learner_id.as_deref())
            .with("search", self.search.as_deref())
            .with("status", self.status.as_deref())
    }
}

/// Outcome an assessor records against a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentOutcome {
    Accepted,
    Referred,
}

impl AssessmentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentOutcome::Accepted => "accepted",
            AssessmentOutcome::Referred => "referred",
        }
    }
}

/// A new piece of evidence with its file.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceUpload {
    pub learner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub unit_refs: Vec<String>,
    pub file: FilePart,
}

pub struct EvidenceApi;

impl Resource for EvidenceApi {
    type Item = Evidence;
    type Filter = EvidenceFilter;

    const SEGMENT: &'static str = "evidence";
    const LABEL: &'static str = "Evidence";
    const TAG: CacheTag = CacheTag::Evidence;
}

impl Mutable for EvidenceApi {
    // Learner progress is derived from their evidence.
    fn invalidated() -> Vec<CacheTag> {
        vec![CacheTag::Evidence, CacheTag::Learners]
    }
}

impl EvidenceApi {
    pub fn upload(upload: &EvidenceUpload) -> RequestDescriptor {
        let mut body = MultipartBody::new()
            .text("learner_id", upload.learner_id.as_str())
            .text("title", upload.title.as_str())
            .text("description", upload.description.clone().unwrap_or_default());
        for unit in &upload.unit_refs {
            body = body.text("unit_refs[]", unit.as_str());
        }
        let mut file = upload.file.clone();
        file.field = "file".to_string();

        RequestDescriptor::post("/evidence/upload")
            .multipart(body.file(file))
            .invalidates(&Self::invalidated())
    }

    pub fn assess(id: &str, outcome: AssessmentOutcome, feedback: Option<&str>) -> RequestDescriptor {
        RequestDescriptor::patch(format!("/evidence/assess/{}", path_param(id)))
            .json_value(json!({
                "status": outcome.as_str(),
                "feedback": feedback,
            }))
            .invalidates(&Self::invalidated())
    }
}
