//! DistillProgressHandler - debounced transcript-to-plan distillation.
//!
//! Triggered after the conversation history changes. The pass is debounced
//! (overlapping windows collapse into one) and guarded by an in-progress
//! flag, and only runs once the mentor has replied — distilling mid-question
//! would summarize a half-exchange.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::adapters::store::sanitize_fields;
use crate::domain::distill::{distill_prompt, parse_distilled, response_schema};
use crate::domain::foundation::{ProjectId, UserId};
use crate::domain::project::MessageRole;
use crate::ports::{
    AiProvider, FieldPatch, GenerationRequest, ProjectStore, RequestMetadata, StoreError,
    StoreValue,
};

/// What a distillation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistillOutcome {
    /// Another pass was already running; this one collapsed into it.
    Skipped,
    /// The transcript does not qualify (no exchange, or the user spoke last).
    NotQualifying,
    /// Gateway or decode failure; nothing merged, next window retries.
    Empty,
    /// This many sections were merged into the plan.
    Merged(usize),
}

/// Distillation errors. Gateway and decode failures are not errors (the
/// distiller is best-effort); only store problems surface.
#[derive(Debug, thiserror::Error)]
pub enum DistillError {
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handler for debounced progress distillation.
pub struct DistillProgressHandler {
    provider: Arc<dyn AiProvider>,
    store: Arc<dyn ProjectStore>,
    debounce: Duration,
    in_progress: AtomicBool,
    generation: AtomicU64,
}

impl DistillProgressHandler {
    pub fn new(
        provider: Arc<dyn AiProvider>,
        store: Arc<dyn ProjectStore>,
        debounce: Duration,
    ) -> Self {
        Self {
            provider,
            store,
            debounce,
            in_progress: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Signals that the transcript changed. Schedules a distillation pass
    /// after the debounce window; a newer signal supersedes the pending one.
    pub fn notify_transcript_change(self: Arc<Self>, project_id: ProjectId, owner: UserId) {
        let scheduled = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::spawn(async move {
            tokio::time::sleep(self.debounce).await;
            if self.generation.load(Ordering::SeqCst) != scheduled {
                // A newer transcript change restarted the window.
                return;
            }
            if let Err(error) = self.distill_now(project_id, owner).await {
                tracing::warn!(%error, "distillation pass failed");
            }
        });
    }

    /// Runs one distillation pass immediately (the debounce already elapsed).
    #[tracing::instrument(skip(self, owner), fields(project_id = %project_id))]
    pub async fn distill_now(
        &self,
        project_id: ProjectId,
        owner: UserId,
    ) -> Result<DistillOutcome, DistillError> {
        // Overlapping passes collapse: the running one already reads the
        // latest persisted transcript.
        if self.in_progress.swap(true, Ordering::SeqCst) {
            return Ok(DistillOutcome::Skipped);
        }

        let outcome = self.distill_guarded(project_id, owner).await;
        self.in_progress.store(false, Ordering::SeqCst);
        outcome
    }

    async fn distill_guarded(
        &self,
        project_id: ProjectId,
        owner: UserId,
    ) -> Result<DistillOutcome, DistillError> {
        let mut project = self
            .store
            .find(&project_id)
            .await?
            .ok_or(DistillError::ProjectNotFound(project_id))?;

        if !project.qualifies_for_distillation() {
            return Ok(DistillOutcome::NotQualifying);
        }

        let request = GenerationRequest::new(RequestMetadata::new(
            project_id,
            owner,
            Uuid::new_v4().to_string(),
        ))
        .with_message(MessageRole::User, distill_prompt(&project));

        let schema = response_schema();
        let distilled = match self.provider.generate_structured(request, &schema).await {
            Ok(value) => match parse_distilled(&value) {
                Ok(distilled) => distilled,
                Err(violation) => {
                    tracing::warn!(%violation, "distillation payload does not honor the schema");
                    return Ok(DistillOutcome::Empty);
                }
            },
            Err(error) => {
                tracing::warn!(%error, "distillation generation failed");
                return Ok(DistillOutcome::Empty);
            }
        };

        if distilled.is_empty() {
            return Ok(DistillOutcome::Empty);
        }

        let merged = distilled.len();
        project.apply_distilled(distilled);

        let plan = serde_json::to_value(&project.plan)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let patch: FieldPatch =
            BTreeMap::from([("plan".to_string(), StoreValue::from_json(plan))]);
        self.store.update(&project_id, sanitize_fields(patch)).await?;

        Ok(DistillOutcome::Merged(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockFailure};
    use crate::adapters::store::InMemoryProjectStore;
    use crate::domain::foundation::Percentage;
    use crate::domain::project::{ChatMessage, PlanSection, Project, SectionProgress};
    use serde_json::json;

    fn talked_project() -> Project {
        let mut project = Project::new(UserId::new("u-1").unwrap(), "Atlas Studio");
        project.record_message(ChatMessage::user("I want to sell pentest packages"));
        project.record_message(ChatMessage::assistant("Who is the buyer?"));
        project
    }

    async fn setup(
        provider: MockAiProvider,
        project: &Project,
    ) -> (Arc<DistillProgressHandler>, Arc<InMemoryProjectStore>) {
        let store = Arc::new(InMemoryProjectStore::new());
        store.save(project).await.unwrap();
        let handler = Arc::new(DistillProgressHandler::new(
            Arc::new(provider),
            store.clone(),
            Duration::from_millis(1500),
        ));
        (handler, store)
    }

    #[tokio::test]
    async fn merges_returned_sections_and_keeps_the_rest() {
        let mut project = talked_project();
        project.plan.insert(
            PlanSection::Legal,
            SectionProgress::new("SASU notes", Percentage::new(50)),
        );

        let provider = MockAiProvider::new().with_json_reply(json!({
            "idea_validation": {"content": "### Concept\n- pentest packs", "completion": 55},
            "market_study": {"content": "### Market\n- SMBs", "completion": 30},
        }));
        let (handler, store) = setup(provider, &project).await;

        let outcome = handler
            .distill_now(project.id, project.owner.clone())
            .await
            .unwrap();
        assert_eq!(outcome, DistillOutcome::Merged(2));

        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(
            stored.plan[&PlanSection::IdeaValidation].completion,
            Percentage::new(55)
        );
        // Section not returned this round is untouched.
        assert_eq!(stored.plan[&PlanSection::Legal].content, "SASU notes");
        assert_eq!(stored.plan.len(), 3);
    }

    #[tokio::test]
    async fn gateway_failure_merges_nothing() {
        let mut project = talked_project();
        project.plan.insert(
            PlanSection::Growth,
            SectionProgress::new("channels", Percentage::new(20)),
        );

        let provider = MockAiProvider::new().with_failure(MockFailure::Network {
            message: "offline".to_string(),
        });
        let (handler, store) = setup(provider, &project).await;

        let outcome = handler
            .distill_now(project.id, project.owner.clone())
            .await
            .unwrap();
        assert_eq!(outcome, DistillOutcome::Empty);

        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.plan.len(), 1);
        assert_eq!(stored.plan[&PlanSection::Growth].content, "channels");
    }

    #[tokio::test]
    async fn malformed_payload_merges_nothing() {
        let project = talked_project();
        let provider = MockAiProvider::new().with_json_reply(json!({
            "idea_validation": {"content": "missing completion"},
        }));
        let (handler, _store) = setup(provider, &project).await;

        let outcome = handler
            .distill_now(project.id, project.owner.clone())
            .await
            .unwrap();
        assert_eq!(outcome, DistillOutcome::Empty);
    }

    #[tokio::test]
    async fn transcript_without_mentor_reply_does_not_qualify() {
        let mut project = Project::new(UserId::new("u-1").unwrap(), "Atlas Studio");
        project.record_message(ChatMessage::user("hello"));
        project.record_message(ChatMessage::assistant("hi"));
        project.record_message(ChatMessage::user("one more thing"));

        let (handler, _store) = setup(MockAiProvider::new(), &project).await;
        let outcome = handler
            .distill_now(project.id, project.owner.clone())
            .await
            .unwrap();
        assert_eq!(outcome, DistillOutcome::NotQualifying);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_collapses_rapid_notifications() {
        let provider = MockAiProvider::new().with_json_reply(json!({
            "idea_validation": {"content": "### Concept", "completion": 40},
        }));
        let recorder = provider.clone();
        let project = talked_project();
        let (handler, _store) = setup(provider, &project).await;

        // Three rapid transcript changes within one debounce window.
        handler.clone().notify_transcript_change(project.id, project.owner.clone());
        tokio::time::advance(Duration::from_millis(500)).await;
        handler.clone().notify_transcript_change(project.id, project.owner.clone());
        tokio::time::advance(Duration::from_millis(500)).await;
        handler.clone().notify_transcript_change(project.id, project.owner.clone());

        // Let the last window elapse and the spawned tasks run to completion.
        tokio::time::advance(Duration::from_millis(1600)).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Only the last notification survived to call the gateway.
        assert_eq!(recorder.call_count(), 1);
    }

    #[tokio::test]
    async fn overlapping_passes_collapse() {
        let provider = MockAiProvider::new()
            .with_delay(Duration::from_millis(100))
            .with_json_reply(json!({
                "idea_validation": {"content": "### Concept", "completion": 40},
            }));
        let project = talked_project();
        let (handler, _store) = setup(provider, &project).await;

        let first = {
            let handler = handler.clone();
            let id = project.id;
            let owner = project.owner.clone();
            tokio::spawn(async move { handler.distill_now(id, owner).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = handler
            .distill_now(project.id, project.owner.clone())
            .await
            .unwrap();
        assert_eq!(second, DistillOutcome::Skipped);

        let first = first.await.unwrap().unwrap();
        assert_eq!(first, DistillOutcome::Merged(1));
    }
}
