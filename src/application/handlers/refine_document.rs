//! RefineDocumentHandler - drives refinement turns over generated documents.
//!
//! Keeps one [`RefineSession`] per (project, document kind) and enforces the
//! single-writer discipline: while a turn is in flight for a document, a
//! second request for the same document is rejected immediately instead of
//! queueing, since it would be editing a baseline the user no longer sees.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::adapters::store::sanitize_fields;
use crate::domain::foundation::ProjectId;
use crate::domain::project::{DocumentKind, MessageRole, UserProfile};
use crate::domain::refine::{RefineError, RefineOutcome, RefineReply, RefineSession};
use crate::ports::{
    AiProvider, FieldPatch, GenerationRequest, ProjectStore, RequestMetadata, StoreError,
    StoreValue,
};

type SessionKey = (ProjectId, DocumentKind);

/// Refinement handler errors.
#[derive(Debug, thiserror::Error)]
pub enum RefineHandlerError {
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("document {0:?} has not been forged yet")]
    DocumentNotForged(DocumentKind),

    #[error("a refinement turn is already in flight for this document")]
    TurnInFlight,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<RefineError> for RefineHandlerError {
    fn from(error: RefineError) -> Self {
        match error {
            RefineError::TurnInFlight | RefineError::NoTurnInFlight => {
                RefineHandlerError::TurnInFlight
            }
        }
    }
}

/// Handler for conversational document refinement.
pub struct RefineDocumentHandler {
    provider: Arc<dyn AiProvider>,
    store: Arc<dyn ProjectStore>,
    sessions: Mutex<HashMap<SessionKey, Arc<Mutex<RefineSession>>>>,
}

impl RefineDocumentHandler {
    pub fn new(provider: Arc<dyn AiProvider>, store: Arc<dyn ProjectStore>) -> Self {
        Self {
            provider,
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Runs one refinement turn.
    ///
    /// On success the updated content is a complete replacement of the
    /// document and is persisted before returning. On gateway or decode
    /// failure the outcome is the apology fallback and the stored document
    /// is untouched — a failed turn never discards prior work.
    #[tracing::instrument(skip(self, user, instruction), fields(project_id = %project_id, kind = ?kind))]
    pub async fn handle(
        &self,
        project_id: ProjectId,
        kind: DocumentKind,
        instruction: &str,
        user: &UserProfile,
    ) -> Result<RefineOutcome, RefineHandlerError> {
        let session = self.session_for(project_id, kind).await?;

        // Reject, never queue: a blocked lock means a turn is in flight for
        // this exact document.
        let mut session = session
            .try_lock()
            .map_err(|_| RefineHandlerError::TurnInFlight)?;

        let prompt = session.begin_turn(instruction)?;

        let request = GenerationRequest::new(RequestMetadata::new(
            project_id,
            user.id.clone(),
            Uuid::new_v4().to_string(),
        ))
        .with_message(MessageRole::User, prompt);

        let schema = RefineSession::response_schema();
        let reply = match self.provider.generate_structured(request, &schema).await {
            Ok(value) => match schema.validate(&value) {
                Ok(()) => serde_json::from_value::<RefineReply>(value).ok(),
                Err(violation) => {
                    tracing::warn!(%violation, "refinement reply does not honor the schema");
                    None
                }
            },
            Err(error) => {
                tracing::warn!(%error, "refinement generation failed");
                None
            }
        };

        match reply {
            Some(reply) => {
                let outcome = session.complete_turn(reply)?;
                self.persist_content(project_id, kind, &outcome.updated_content)
                    .await?;
                Ok(outcome)
            }
            None => Ok(session.fail_turn()?),
        }
    }

    /// The live turn history for a document's session, if one is open.
    pub async fn session_turns(
        &self,
        project_id: ProjectId,
        kind: DocumentKind,
    ) -> Option<usize> {
        let sessions = self.sessions.lock().await;
        match sessions.get(&(project_id, kind)) {
            Some(session) => Some(session.lock().await.turns().len()),
            None => None,
        }
    }

    /// Drops the session for a document (e.g. when the editor closes). The
    /// turn history is ephemeral UI context and is discarded with it.
    pub async fn close_session(&self, project_id: ProjectId, kind: DocumentKind) {
        self.sessions.lock().await.remove(&(project_id, kind));
    }

    async fn session_for(
        &self,
        project_id: ProjectId,
        kind: DocumentKind,
    ) -> Result<Arc<Mutex<RefineSession>>, RefineHandlerError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(&(project_id, kind)) {
            return Ok(session.clone());
        }

        // First turn for this document: seed the session from the store.
        let project = self
            .store
            .find(&project_id)
            .await?
            .ok_or(RefineHandlerError::ProjectNotFound(project_id))?;
        let content = project
            .asset(kind)
            .ok_or(RefineHandlerError::DocumentNotForged(kind))?;

        let session = Arc::new(Mutex::new(RefineSession::open(kind, content)));
        sessions.insert((project_id, kind), session.clone());
        Ok(session)
    }

    async fn persist_content(
        &self,
        project_id: ProjectId,
        kind: DocumentKind,
        content: &str,
    ) -> Result<(), StoreError> {
        let mut project = self
            .store
            .find(&project_id)
            .await?
            .ok_or(StoreError::NotFound)?;
        project.set_asset(kind, content);

        let assets = serde_json::to_value(&project.generated_assets)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let patch: FieldPatch = BTreeMap::from([(
            "generated_assets".to_string(),
            StoreValue::from_json(assets),
        )]);
        self.store.update(&project_id, sanitize_fields(patch)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockFailure};
    use crate::adapters::store::InMemoryProjectStore;
    use crate::domain::foundation::UserId;
    use crate::domain::project::Project;
    use crate::domain::refine::REFINEMENT_APOLOGY;
    use serde_json::json;

    const BASELINE: &str = "## Offers\n- Starter pack";

    async fn setup(provider: MockAiProvider) -> (RefineDocumentHandler, Arc<InMemoryProjectStore>, Project, UserProfile)
    {
        let user = UserProfile::new(UserId::new("u-1").unwrap(), "Lina", "France");
        let mut project = Project::new(user.id.clone(), "Atlas Studio");
        project.set_asset(DocumentKind::PricingOffers, BASELINE);

        let store = Arc::new(InMemoryProjectStore::new());
        store.save(&project).await.unwrap();

        let handler = RefineDocumentHandler::new(Arc::new(provider), store.clone());
        (handler, store, project, user)
    }

    #[tokio::test]
    async fn successful_turn_persists_the_replacement() {
        let provider = MockAiProvider::new().with_json_reply(json!({
            "assistant_message": "Added a premium tier.",
            "updated_content": "## Offers\n- Starter pack\n- Premium pack",
        }));
        let (handler, store, project, user) = setup(provider).await;

        let outcome = handler
            .handle(project.id, DocumentKind::PricingOffers, "add premium", &user)
            .await
            .unwrap();

        assert!(!outcome.degraded);
        assert_eq!(outcome.assistant_message, "Added a premium tier.");

        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(
            stored.asset(DocumentKind::PricingOffers),
            Some("## Offers\n- Starter pack\n- Premium pack")
        );
    }

    #[tokio::test]
    async fn unparsable_payload_leaves_content_unchanged() {
        let provider = MockAiProvider::new().with_reply("I cannot answer in JSON today");
        let (handler, store, project, user) = setup(provider).await;

        let outcome = handler
            .handle(project.id, DocumentKind::PricingOffers, "add premium", &user)
            .await
            .unwrap();

        assert!(outcome.degraded);
        assert_eq!(outcome.assistant_message, REFINEMENT_APOLOGY);
        assert_eq!(outcome.updated_content, BASELINE);

        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.asset(DocumentKind::PricingOffers), Some(BASELINE));
    }

    #[tokio::test]
    async fn non_conforming_payload_falls_back_too() {
        // Parses as JSON but misses `updated_content`.
        let provider = MockAiProvider::new()
            .with_json_reply(json!({"assistant_message": "partial"}));
        let (handler, _store, project, user) = setup(provider).await;

        let outcome = handler
            .handle(project.id, DocumentKind::PricingOffers, "add premium", &user)
            .await
            .unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.updated_content, BASELINE);
    }

    #[tokio::test]
    async fn gateway_failure_falls_back() {
        let provider = MockAiProvider::new().with_failure(MockFailure::Timeout { timeout_secs: 120 });
        let (handler, _store, project, user) = setup(provider).await;

        let outcome = handler
            .handle(project.id, DocumentKind::PricingOffers, "add premium", &user)
            .await
            .unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.updated_content, BASELINE);
    }

    #[tokio::test]
    async fn rapid_double_submission_is_rejected_not_interleaved() {
        use std::time::Duration;

        // The first call holds the session lock for 200ms inside the
        // provider; the second call must be rejected immediately.
        let provider = MockAiProvider::new()
            .with_delay(Duration::from_millis(200))
            .with_json_reply(json!({
                "assistant_message": "First turn applied.",
                "updated_content": "## Offers v2",
            }))
            .with_json_reply(json!({
                "assistant_message": "Second turn applied.",
                "updated_content": "## Offers v3",
            }));
        let (handler, store, project, user) = setup(provider).await;
        let handler = Arc::new(handler);

        let first = {
            let handler = handler.clone();
            let user = user.clone();
            let id = project.id;
            tokio::spawn(async move {
                handler
                    .handle(id, DocumentKind::PricingOffers, "turn one", &user)
                    .await
            })
        };

        // Give the first call time to take the lock.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = handler
            .handle(project.id, DocumentKind::PricingOffers, "turn two", &user)
            .await;
        assert!(matches!(second, Err(RefineHandlerError::TurnInFlight)));

        let first = first.await.unwrap().unwrap();
        assert!(!first.degraded);

        // Exactly one coherent turn was applied.
        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.asset(DocumentKind::PricingOffers), Some("## Offers v2"));
    }

    #[tokio::test]
    async fn turns_accumulate_across_calls() {
        let provider = MockAiProvider::new()
            .with_json_reply(json!({
                "assistant_message": "v2 done",
                "updated_content": "## Offers v2",
            }))
            .with_json_reply(json!({
                "assistant_message": "v3 done",
                "updated_content": "## Offers v3",
            }));
        let (handler, _store, project, user) = setup(provider).await;

        handler
            .handle(project.id, DocumentKind::PricingOffers, "one", &user)
            .await
            .unwrap();
        handler
            .handle(project.id, DocumentKind::PricingOffers, "two", &user)
            .await
            .unwrap();

        assert_eq!(
            handler
                .session_turns(project.id, DocumentKind::PricingOffers)
                .await,
            Some(4)
        );

        handler
            .close_session(project.id, DocumentKind::PricingOffers)
            .await;
        assert_eq!(
            handler
                .session_turns(project.id, DocumentKind::PricingOffers)
                .await,
            None
        );
    }

    #[tokio::test]
    async fn refining_an_unforged_document_fails() {
        let provider = MockAiProvider::new();
        let (handler, _store, project, user) = setup(provider).await;

        let result = handler
            .handle(project.id, DocumentKind::TechSpec, "improve it", &user)
            .await;
        assert!(matches!(
            result,
            Err(RefineHandlerError::DocumentNotForged(DocumentKind::TechSpec))
        ));
    }

    #[tokio::test]
    async fn second_turn_prompt_carries_the_first_exchange() {
        let provider = MockAiProvider::new()
            .with_json_reply(json!({
                "assistant_message": "Noted.",
                "updated_content": "## Offers v2",
            }))
            .with_json_reply(json!({
                "assistant_message": "Done.",
                "updated_content": "## Offers v3",
            }));
        let recorder = provider.clone();
        let (handler, _store, project, user) = setup(provider).await;

        handler
            .handle(project.id, DocumentKind::PricingOffers, "first ask", &user)
            .await
            .unwrap();
        handler
            .handle(project.id, DocumentKind::PricingOffers, "second ask", &user)
            .await
            .unwrap();

        let calls = recorder.calls();
        let second_prompt = &calls[1].request.messages[0].content;
        assert!(second_prompt.contains("USER: first ask"));
        assert!(second_prompt.contains("ASSISTANT: Noted."));
        assert!(second_prompt.contains("## Offers v2"));
    }
}
