use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::courses::{CourseApi, CourseUnit};
use crate::api::evidence::{AssessmentOutcome, Evidence, EvidenceApi, EvidenceUpload};
use crate::api::learners::LearnerApi;
use crate::api::resources::ResourceApi;
use crate::api::sampling_plans::SamplingPlanApi;
use crate::api::{CacheTag, FilePart, ItemResponse};
use crate::config::Config;
use crate::http::{ApiClient, ApiError};
use crate::notify::NotificationSink;
use crate::session::{Navigator, ReauthGuard, SessionStorage, TokenProvider};
use crate::store::collection::CollectionIntent;
use crate::store::container::{EntityContainer, MutationStrategy};
use crate::store::invalidation::InvalidationBus;
use crate::store::notifications::NotificationCenter;

/// External collaborators the data layer depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub tokens: Arc<dyn TokenProvider>,
    pub storage: Arc<dyn SessionStorage>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn NotificationSink>,
}

/// Every container of the application, wired to one client and one
/// invalidation bus.
pub struct Portfolio {
    client: ApiClient,
    bus: InvalidationBus,
    default_page_size: u32,
    pub courses: EntityContainer<CourseApi>,
    pub evidence: EntityContainer<EvidenceApi>,
    pub learners: EntityContainer<LearnerApi>,
    pub resources: EntityContainer<ResourceApi>,
    pub sampling_plans: EntityContainer<SamplingPlanApi>,
    pub notifications: NotificationCenter,
    watchers: Mutex<Vec<JoinHandle<()>>>,
}

impl Portfolio {
    pub fn new(config: &Config, collaborators: Collaborators) -> Result<Self, ApiError> {
        let guard = Arc::new(ReauthGuard::new(
            collaborators.storage,
            collaborators.navigator,
            config.session.login_path.clone(),
            config.session.reauth_cooldown(),
        ));
        let client = ApiClient::new(&config.api, collaborators.tokens, guard)?;
        let bus = InvalidationBus::new();
        let notifier = collaborators.notifier;

        let courses = EntityContainer::new(
            client.clone(),
            Arc::clone(&notifier),
            bus.clone(),
            MutationStrategy::Refetch,
        );
        // Uploaded evidence shows up immediately on the learner's page.
        let evidence = EntityContainer::new(
            client.clone(),
            Arc::clone(&notifier),
            bus.clone(),
            MutationStrategy::Optimistic,
        );
        let learners = EntityContainer::new(
            client.clone(),
            Arc::clone(&notifier),
            bus.clone(),
            MutationStrategy::Refetch,
        );
        let resources = EntityContainer::new(
            client.clone(),
            Arc::clone(&notifier),
            bus.clone(),
            MutationStrategy::Refetch,
        );
        let sampling_plans = EntityContainer::new(
            client.clone(),
            Arc::clone(&notifier),
            bus.clone(),
            MutationStrategy::Refetch,
        );
        let notifications = NotificationCenter::new(client.clone(), notifier, bus.clone());

        tracing::info!(
            base_url = %client.base_url(),
            "Data layer initialised"
        );

        Ok(Self {
            client,
            bus,
            default_page_size: config.paging.default_page_size,
            courses,
            evidence,
            learners,
            resources,
            sampling_plans,
            notifications,
            watchers: Mutex::new(Vec::new()),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn bus(&self) -> &InvalidationBus {
        &self.bus
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Spawns the invalidation listeners of every refetching container.
    /// Must run inside a tokio runtime. Idempotent.
    pub fn start(&self) {
        let mut watchers = self.watchers.lock();
        if !watchers.is_empty() {
            return;
        }
        watchers.push(self.courses.watch_invalidations());
        watchers.push(self.evidence.watch_invalidations());
        watchers.push(self.learners.watch_invalidations());
        watchers.push(self.resources.watch_invalidations());
        watchers.push(self.sampling_plans.watch_invalidations());
        watchers.push(self.notifications.container().watch_invalidations());
    }

    /// Uploads a file as evidence and adds it to the evidence list.
    pub async fn upload_evidence(&self, upload: &EvidenceUpload) -> bool {
        let Some(body) = self
            .evidence
            .mutate(
                "upload",
                EvidenceApi::upload(upload),
                Some("Evidence uploaded successfully".to_string()),
            )
            .await
        else {
            return false;
        };
        match serde_json::from_value::<ItemResponse<Evidence>>(body) {
            Ok(response) => self.evidence.append(response.data),
            Err(_) => self.bus.invalidate(&[CacheTag::Evidence]),
        }
        true
    }

    pub async fn assess_evidence(
        &self,
        id: &str,
        outcome: AssessmentOutcome,
        feedback: Option<&str>,
    ) -> bool {
        let Some(body) = self
            .evidence
            .mutate(
                "assess",
                EvidenceApi::assess(id, outcome, feedback),
                Some("Assessment saved".to_string()),
            )
            .await
        else {
            return false;
        };
        match serde_json::from_value::<ItemResponse<Evidence>>(body) {
            Ok(response) => self
                .evidence
                .dispatch(CollectionIntent::ItemReplaced(response.data)),
            Err(_) => self.bus.invalidate(&[CacheTag::Evidence]),
        }
        true
    }

    pub async fn course_units(&self, course_id: &str) -> Option<Vec<CourseUnit>> {
        self.courses
            .load::<ItemResponse<Vec<CourseUnit>>>("load units", &CourseApi::units(course_id))
            .await
            .map(|response| response.data)
    }

    pub async fn assign_course(&self, learner_id: &str, course_id: &str) -> bool {
        self.learners
            .mutate(
                "assign course",
                LearnerApi::assign_course(learner_id, course_id),
                Some("Course assigned".to_string()),
            )
            .await
            .is_some()
    }

    pub async fn unassign_course(&self, learner_id: &str, course_id: &str) -> bool {
        self.learners
            .mutate(
                "unassign course",
                LearnerApi::unassign_course(learner_id, course_id),
                Some("Course removed".to_string()),
            )
            .await
            .is_some()
    }

    pub async fn upload_resource(&self, course_id: Option<&str>, name: &str, file: FilePart) -> bool {
        self.resources
            .mutate(
                "upload",
                ResourceApi::upload(course_id, name, file),
                Some("Resource uploaded successfully".to_string()),
            )
            .await
            .is_some()
    }

    pub async fn add_plan_learners(&self, plan_id: &str, learner_ids: &[String]) -> bool {
        self.sampling_plans
            .mutate(
                "add learners",
                SamplingPlanApi::add_learners(plan_id, learner_ids),
                Some("Learners added to sampling plan".to_string()),
            )
            .await
            .is_some()
    }
}

impl Drop for Portfolio {
    fn drop(&mut self) {
        for watcher in self.watchers.lock().drain(..) {
            watcher.abort();
        }
    }
}
