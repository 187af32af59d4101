//! MentorHandler - opens and drives mentor conversation sessions.
//!
//! The session object is explicit and caller-owned: the handler creates it,
//! hands it back, and takes it by reference on every turn. Nothing is kept
//! in module-level state, so two projects (or two windows on one project)
//! cannot share a conversation by accident.

use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::adapters::store::sanitize_fields;
use crate::domain::foundation::ProjectId;
use crate::domain::mentor::{MentorSession, SESSION_BOOTSTRAP};
use crate::domain::project::{ChatMessage, MessageRole, Project, UserProfile};
use crate::ports::{
    AiProvider, FieldPatch, GenerationError, GenerationRequest, ProjectStore, RequestMetadata,
    StoreError, StoreValue,
};

/// Mentor conversations stay creative.
const MENTOR_TEMPERATURE: f32 = 0.7;

/// Mentor handler errors.
#[derive(Debug, thiserror::Error)]
pub enum MentorError {
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handler for the mentor conversation.
pub struct MentorHandler {
    provider: Arc<dyn AiProvider>,
    store: Arc<dyn ProjectStore>,
}

impl MentorHandler {
    pub fn new(provider: Arc<dyn AiProvider>, store: Arc<dyn ProjectStore>) -> Self {
        Self { provider, store }
    }

    /// Opens a session for a project and elicits the mentor's greeting.
    ///
    /// The greeting is recorded on the session and appended to the project's
    /// persisted history; the bootstrap message is plumbing and is not.
    #[tracing::instrument(skip(self, user), fields(project_id = %project_id))]
    pub async fn open_session(
        &self,
        project_id: ProjectId,
        user: &UserProfile,
    ) -> Result<(MentorSession, String), MentorError> {
        let mut project = self
            .store
            .find(&project_id)
            .await?
            .ok_or(MentorError::ProjectNotFound(project_id))?;

        let mut session = MentorSession::open(&project, user);

        let request = GenerationRequest::new(RequestMetadata::new(
            project_id,
            user.id.clone(),
            Uuid::new_v4().to_string(),
        ))
        .with_system_instruction(session.system_instruction())
        .with_message(MessageRole::User, SESSION_BOOTSTRAP)
        .with_temperature(MENTOR_TEMPERATURE);

        let greeting = self.provider.generate(request).await?.content;

        let message = ChatMessage::assistant(greeting.clone());
        session.record(message.clone());
        project.record_message(message);
        self.persist_history(&project).await?;

        Ok((session, greeting))
    }

    /// Sends a user message through the session and returns the mentor's
    /// reply. Both messages land on the session and the persisted history.
    #[tracing::instrument(skip(self, session, user, text), fields(project_id = %project_id))]
    pub async fn send_message(
        &self,
        session: &mut MentorSession,
        project_id: ProjectId,
        user: &UserProfile,
        text: &str,
    ) -> Result<String, MentorError> {
        let mut project = self
            .store
            .find(&project_id)
            .await?
            .ok_or(MentorError::ProjectNotFound(project_id))?;

        let mut request = GenerationRequest::new(RequestMetadata::new(
            project_id,
            user.id.clone(),
            Uuid::new_v4().to_string(),
        ))
        .with_system_instruction(session.system_instruction())
        .with_temperature(MENTOR_TEMPERATURE);

        for message in session.history() {
            request = request.with_message(message.role, message.text.clone());
        }
        request = request.with_message(MessageRole::User, text);

        let reply = self.provider.generate(request).await?.content;

        let user_message = ChatMessage::user(text);
        let assistant_message = ChatMessage::assistant(reply.clone());
        session.record(user_message.clone());
        session.record(assistant_message.clone());
        project.record_message(user_message);
        project.record_message(assistant_message);
        self.persist_history(&project).await?;

        Ok(reply)
    }

    async fn persist_history(&self, project: &Project) -> Result<(), StoreError> {
        let history = serde_json::to_value(&project.history)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let patch: FieldPatch =
            BTreeMap::from([("history".to_string(), StoreValue::from_json(history))]);
        self.store.update(&project.id, sanitize_fields(patch)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockFailure};
    use crate::adapters::store::InMemoryProjectStore;
    use crate::domain::foundation::UserId;

    async fn setup(
        provider: MockAiProvider,
    ) -> (MentorHandler, Arc<InMemoryProjectStore>, Project, UserProfile) {
        let user = UserProfile::new(UserId::new("u-1").unwrap(), "Lina", "France");
        let mut project = Project::new(user.id.clone(), "Atlas Studio");
        project.main_goal = Some("a design studio".to_string());

        let store = Arc::new(InMemoryProjectStore::new());
        store.save(&project).await.unwrap();
        (
            MentorHandler::new(Arc::new(provider), store.clone()),
            store,
            project,
            user,
        )
    }

    #[tokio::test]
    async fn open_session_records_and_persists_the_greeting() {
        let provider = MockAiProvider::new().with_reply("Welcome aboard, Lina.");
        let (handler, store, project, user) = setup(provider).await;

        let (session, greeting) = handler.open_session(project.id, &user).await.unwrap();

        assert_eq!(greeting, "Welcome aboard, Lina.");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].role, MessageRole::Assistant);

        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.history.len(), 1);
        assert_eq!(stored.history[0].text, "Welcome aboard, Lina.");
    }

    #[tokio::test]
    async fn open_session_sends_the_personalized_instruction() {
        let provider = MockAiProvider::new().with_reply("Welcome.");
        let recorder = provider.clone();
        let (handler, _store, project, user) = setup(provider).await;

        handler.open_session(project.id, &user).await.unwrap();

        let calls = recorder.calls();
        let instruction = calls[0].request.system_instruction.as_deref().unwrap();
        assert!(instruction.contains("Entrepreneur: Lina"));
        assert!(instruction.contains("\"a design studio\""));
        assert_eq!(calls[0].request.messages[0].content, SESSION_BOOTSTRAP);
    }

    #[tokio::test]
    async fn send_message_threads_the_session_history() {
        let provider = MockAiProvider::new()
            .with_reply("Welcome.")
            .with_reply("Good question. Who pays?");
        let recorder = provider.clone();
        let (handler, store, project, user) = setup(provider).await;

        let (mut session, _) = handler.open_session(project.id, &user).await.unwrap();
        let reply = handler
            .send_message(&mut session, project.id, &user, "Is the niche too small?")
            .await
            .unwrap();

        assert_eq!(reply, "Good question. Who pays?");
        assert_eq!(session.history().len(), 3);

        // The second request carried the greeting plus the new message.
        let second = &recorder.calls()[1].request;
        assert_eq!(second.messages.len(), 2);
        assert_eq!(second.messages[0].role, MessageRole::Assistant);
        assert_eq!(second.messages[1].content, "Is the niche too small?");

        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.history.len(), 3);
    }

    #[tokio::test]
    async fn gateway_failure_propagates_and_persists_nothing() {
        let provider = MockAiProvider::new().with_failure(MockFailure::Unavailable {
            message: "down".to_string(),
        });
        let (handler, store, project, user) = setup(provider).await;

        let result = handler.open_session(project.id, &user).await;
        assert!(matches!(result, Err(MentorError::Generation(_))));

        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert!(stored.history.is_empty());
    }
}
