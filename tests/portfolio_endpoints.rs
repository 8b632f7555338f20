mod common;

use common::mock_backend::MockResponse;
use common::{evidence_json, list_body, wait_for_requests, Harness};
use eportfolio::api::evidence::{AssessmentOutcome, EvidenceUpload};
use eportfolio::api::{FilePart, ListParams};
use serde_json::json;
use std::time::Duration;

fn pdf(name: &str) -> FilePart {
    FilePart {
        field: String::new(),
        file_name: name.to_string(),
        content_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.7".to_vec(),
    }
}

#[tokio::test]
async fn upload_evidence_appends_returned_record() {
    let harness = Harness::start().await;
    harness
        .backend
        .enqueue_response(MockResponse::value(list_body(
            json!([evidence_json("e1", "Observation")]),
            1,
            10,
            1,
        )))
        .await;
    let evidence = &harness.portfolio.evidence;
    assert!(evidence.fetch(ListParams::page(1, 10)).await);

    harness
        .backend
        .enqueue_response(MockResponse::value(json!({
            "data": evidence_json("e2", "Witness statement"),
            "message": "Evidence uploaded",
        })))
        .await;
    let upload = EvidenceUpload {
        learner_id: "l1".to_string(),
        title: "Witness statement".to_string(),
        description: None,
        unit_refs: vec!["U1".to_string(), "U2".to_string()],
        file: pdf("witness.pdf"),
    };
    assert!(harness.portfolio.upload_evidence(&upload).await);

    let state = evidence.snapshot();
    assert!(state.find("e2").is_some());
    assert_eq!(state.pagination.total_items, 2);
    assert_eq!(harness.toaster.history()[0].message, "Evidence uploaded");

    let request = harness.backend.requests_to("/evidence/upload").await.remove(0);
    let body = request.body_text();
    assert!(body.contains("name=\"unit_refs[]\""));
    assert!(body.contains("filename=\"witness.pdf\""));
}

#[tokio::test]
async fn assess_evidence_patches_the_record() {
    let harness = Harness::start().await;
    harness
        .backend
        .enqueue_response(MockResponse::value(list_body(
            json!([evidence_json("e1", "Observation")]),
            1,
            10,
            1,
        )))
        .await;
    let evidence = &harness.portfolio.evidence;
    assert!(evidence.fetch(ListParams::page(1, 10)).await);

    let mut assessed = evidence_json("e1", "Observation");
    assessed["status"] = json!("accepted");
    harness
        .backend
        .enqueue_response(MockResponse::value(json!({ "data": assessed })))
        .await;

    assert!(
        harness
            .portfolio
            .assess_evidence("e1", AssessmentOutcome::Accepted, Some("Well evidenced"))
            .await
    );

    assert_eq!(
        evidence.snapshot().find("e1").unwrap().status.as_deref(),
        Some("accepted")
    );
    let request = harness.backend.requests_to("/evidence/assess").await.remove(0);
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.json()["status"], "accepted");
    assert_eq!(request.json()["feedback"], "Well evidenced");
}

#[tokio::test]
async fn assess_without_record_refetches_evidence() {
    let harness = Harness::start().await;
    harness.portfolio.start();
    harness
        .backend
        .set_fallback(MockResponse::value(list_body(json!([]), 1, 10, 0)))
        .await;
    assert!(harness.portfolio.evidence.fetch(ListParams::page(1, 10)).await);

    harness
        .backend
        .enqueue_for("/evidence/assess", MockResponse::status(204))
        .await;
    assert!(
        harness
            .portfolio
            .assess_evidence("e1", AssessmentOutcome::Referred, None)
            .await
    );

    assert!(
        wait_for_requests(&harness.backend, "/evidence/list", 2, Duration::from_secs(2)).await
    );
}

#[tokio::test]
async fn course_units_are_loaded() {
    let harness = Harness::start().await;
    harness
        .backend
        .enqueue_response(MockResponse::value(json!({
            "data": [
                { "id": "u1", "reference": "U1", "title": "Health and safety" },
                { "id": "u2", "reference": "U2", "title": "Pipework" },
            ]
        })))
        .await;

    let units = harness.portfolio.course_units("c1").await.unwrap();

    assert_eq!(units.len(), 2);
    assert_eq!(units[1].reference, "U2");
    assert_eq!(
        harness.backend.captured_requests().await[0].target(),
        "/course/units/c1"
    );
}

#[tokio::test]
async fn course_units_failure_notifies() {
    let harness = Harness::start().await;
    harness
        .backend
        .enqueue_response(MockResponse::error(404, "Course not found"))
        .await;

    assert!(harness.portfolio.course_units("missing").await.is_none());
    assert_eq!(harness.toaster.errors(), vec!["Course not found".to_string()]);
}

#[tokio::test]
async fn assigning_a_course_refetches_learners_and_courses() {
    let harness = Harness::start().await;
    harness.portfolio.start();
    harness
        .backend
        .set_fallback(MockResponse::value(list_body(json!([]), 1, 10, 0)))
        .await;
    assert!(harness.portfolio.learners.fetch(ListParams::page(1, 10)).await);
    assert!(harness.portfolio.courses.fetch(ListParams::page(1, 10)).await);

    harness
        .backend
        .enqueue_for("/learner/l1/courses", MockResponse::status(204))
        .await;
    assert!(harness.portfolio.assign_course("l1", "c1").await);

    let request = harness.backend.requests_to("/learner/l1/courses").await.remove(0);
    assert_eq!(request.method, "POST");
    assert_eq!(request.json()["course_id"], "c1");
    assert!(
        wait_for_requests(&harness.backend, "/learner/list", 2, Duration::from_secs(2)).await
    );
    assert!(
        wait_for_requests(&harness.backend, "/course/list", 2, Duration::from_secs(2)).await
    );
}

#[tokio::test]
async fn unassigning_a_course_sends_delete() {
    let harness = Harness::start().await;
    harness.backend.enqueue_response(MockResponse::status(204)).await;

    assert!(harness.portfolio.unassign_course("l1", "c1").await);

    let request = harness.backend.captured_requests().await.remove(0);
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/learner/l1/courses/c1");
    assert_eq!(harness.toaster.history()[0].message, "Course removed");
}

#[tokio::test]
async fn resource_upload_sends_form() {
    let harness = Harness::start().await;
    harness.backend.enqueue_response(MockResponse::status(204)).await;

    assert!(
        harness
            .portfolio
            .upload_resource(Some("c1"), "Handbook", pdf("handbook.pdf"))
            .await
    );

    let request = harness.backend.captured_requests().await.remove(0);
    assert_eq!(request.path, "/resource/upload");
    let body = request.body_text();
    assert!(body.contains("name=\"course_id\""));
    assert!(body.contains("name=\"file\"; filename=\"handbook.pdf\""));
}

#[tokio::test]
async fn sampling_plan_learners_are_added() {
    let harness = Harness::start().await;
    harness
        .backend
        .enqueue_response(MockResponse::error(422, "Learner already sampled"))
        .await;

    let ids = vec!["l1".to_string(), "l2".to_string()];
    assert!(!harness.portfolio.add_plan_learners("p1", &ids).await);

    let request = harness.backend.captured_requests().await.remove(0);
    assert_eq!(request.path, "/sampling-plan/p1/learners");
    assert_eq!(request.json()["learner_ids"], json!(["l1", "l2"]));
    assert_eq!(
        harness.toaster.errors(),
        vec!["Learner already sampled".to_string()]
    );
}
