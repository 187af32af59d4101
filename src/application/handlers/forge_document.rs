//! ForgeDocumentHandler - generates a strategic document from project context.

use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::adapters::store::sanitize_fields;
use crate::domain::classify::Archetype;
use crate::domain::foundation::ProjectId;
use crate::domain::project::{DocumentKind, MessageRole, Project, UserProfile};
use crate::domain::prompt::build_prompt;
use crate::ports::{
    AiProvider, FieldPatch, GenerationRequest, ProjectStore, RequestMetadata, StoreError,
    StoreValue,
};

/// Long-form documents are generated near-deterministically.
const FORGE_TEMPERATURE: f32 = 0.2;

/// Command to forge a document.
#[derive(Debug, Clone)]
pub struct ForgeDocumentCommand {
    /// Project to forge for.
    pub project_id: ProjectId,
    /// Document kind to produce.
    pub kind: DocumentKind,
    /// Explicit archetype override; classifier output is used when absent.
    pub archetype_override: Option<Archetype>,
}

impl ForgeDocumentCommand {
    pub fn new(project_id: ProjectId, kind: DocumentKind) -> Self {
        Self {
            project_id,
            kind,
            archetype_override: None,
        }
    }

    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype_override = Some(archetype);
        self
    }
}

/// Result of a forge pass.
#[derive(Debug, Clone)]
pub struct ForgeOutcome {
    pub kind: DocumentKind,
    /// The document content handed to the consumer.
    pub content: String,
    /// True when the gateway failed and `content` is the retry placeholder.
    /// Degraded content is never persisted.
    pub degraded: bool,
}

/// Forge errors. Gateway failures are NOT errors here: they degrade into a
/// placeholder outcome so the consumer never ends up stuck.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handler for document forging.
pub struct ForgeDocumentHandler {
    provider: Arc<dyn AiProvider>,
    store: Arc<dyn ProjectStore>,
}

impl ForgeDocumentHandler {
    pub fn new(provider: Arc<dyn AiProvider>, store: Arc<dyn ProjectStore>) -> Self {
        Self { provider, store }
    }

    /// Builds the specialized instruction, invokes the gateway in free-text
    /// mode, persists the document on success.
    #[tracing::instrument(skip(self, user), fields(project_id = %cmd.project_id, kind = ?cmd.kind))]
    pub async fn handle(
        &self,
        cmd: ForgeDocumentCommand,
        user: &UserProfile,
    ) -> Result<ForgeOutcome, ForgeError> {
        let mut project = self
            .store
            .find(&cmd.project_id)
            .await?
            .ok_or(ForgeError::ProjectNotFound(cmd.project_id))?;

        let instruction = build_prompt(cmd.kind, &project, user, cmd.archetype_override);

        let request = GenerationRequest::new(RequestMetadata::new(
            project.id,
            user.id.clone(),
            Uuid::new_v4().to_string(),
        ))
        .with_message(MessageRole::User, instruction)
        .with_temperature(FORGE_TEMPERATURE);

        let content = match self.provider.generate(request).await {
            Ok(response) if !response.content.trim().is_empty() => response.content,
            Ok(_) => {
                tracing::warn!(kind = ?cmd.kind, "gateway returned an empty document");
                return Ok(ForgeOutcome {
                    kind: cmd.kind,
                    content: fallback_document(cmd.kind),
                    degraded: true,
                });
            }
            Err(error) => {
                tracing::warn!(kind = ?cmd.kind, %error, "document generation failed");
                return Ok(ForgeOutcome {
                    kind: cmd.kind,
                    content: fallback_document(cmd.kind),
                    degraded: true,
                });
            }
        };

        project.set_asset(cmd.kind, content.clone());
        self.persist_assets(&project).await?;

        Ok(ForgeOutcome {
            kind: cmd.kind,
            content,
            degraded: false,
        })
    }

    async fn persist_assets(&self, project: &Project) -> Result<(), StoreError> {
        let assets = serde_json::to_value(&project.generated_assets)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let patch: FieldPatch = BTreeMap::from([(
            "generated_assets".to_string(),
            StoreValue::from_json(assets),
        )]);
        self.store.update(&project.id, sanitize_fields(patch)).await
    }
}

/// Visible, non-crashing placeholder shown when the forge fails.
fn fallback_document(kind: DocumentKind) -> String {
    format!(
        "## {}\n\n- The forge could not produce this document.\n- Your project data is intact; retry the generation.",
        kind.title()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockFailure};
    use crate::adapters::store::InMemoryProjectStore;
    use crate::domain::foundation::UserId;

    fn fixtures() -> (UserProfile, Project) {
        let user = UserProfile::new(UserId::new("u-1").unwrap(), "Lina", "France");
        let mut project = Project::new(user.id.clone(), "Atlas Studio");
        project.offer = Some("logo design".to_string());
        project.icp = Some("startups".to_string());
        (user, project)
    }

    async fn handler_with(
        provider: MockAiProvider,
        project: &Project,
    ) -> (ForgeDocumentHandler, Arc<InMemoryProjectStore>) {
        let store = Arc::new(InMemoryProjectStore::new());
        store.save(project).await.unwrap();
        (
            ForgeDocumentHandler::new(Arc::new(provider), store.clone()),
            store,
        )
    }

    #[tokio::test]
    async fn forge_persists_the_generated_document() {
        let (user, project) = fixtures();
        let provider = MockAiProvider::new().with_reply("## Offers\n- Starter pack");
        let (handler, store) = handler_with(provider, &project).await;

        let outcome = handler
            .handle(
                ForgeDocumentCommand::new(project.id, DocumentKind::PricingOffers),
                &user,
            )
            .await
            .unwrap();

        assert!(!outcome.degraded);
        assert_eq!(outcome.content, "## Offers\n- Starter pack");

        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(
            stored.asset(DocumentKind::PricingOffers),
            Some("## Offers\n- Starter pack")
        );
    }

    #[tokio::test]
    async fn forge_sends_the_specialized_instruction() {
        let (user, project) = fixtures();
        let provider = MockAiProvider::new().with_reply("## Offers");
        let recorder = provider.clone();
        let (handler, _store) = handler_with(provider, &project).await;

        handler
            .handle(
                ForgeDocumentCommand::new(project.id, DocumentKind::PricingOffers),
                &user,
            )
            .await
            .unwrap();

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        let instruction = &calls[0].request.messages[0].content;
        // "logo design" routes to the design/branding pricing module, and the
        // empty problem field is rendered as an explicit gap.
        assert!(instruction.contains("PRICING PATTERNS - DESIGN/BRANDING"));
        assert!(instruction.contains("- Problem addressed: to be specified"));
        assert_eq!(calls[0].request.temperature, Some(FORGE_TEMPERATURE));
    }

    #[tokio::test]
    async fn gateway_failure_degrades_without_persisting() {
        let (user, project) = fixtures();
        let provider = MockAiProvider::new().with_failure(MockFailure::Unavailable {
            message: "down".to_string(),
        });
        let (handler, store) = handler_with(provider, &project).await;

        let outcome = handler
            .handle(
                ForgeDocumentCommand::new(project.id, DocumentKind::PitchScript),
                &user,
            )
            .await
            .unwrap();

        assert!(outcome.degraded);
        assert!(outcome.content.contains("Pitch Script"));
        assert!(outcome.content.contains("retry"));

        // The placeholder never lands in the store: a retry regenerates.
        let stored = store.find(&project.id).await.unwrap().unwrap();
        assert_eq!(stored.asset(DocumentKind::PitchScript), None);
    }

    #[tokio::test]
    async fn empty_gateway_reply_degrades_too() {
        let (user, project) = fixtures();
        let provider = MockAiProvider::new().with_reply("   ");
        let (handler, _store) = handler_with(provider, &project).await;

        let outcome = handler
            .handle(
                ForgeDocumentCommand::new(project.id, DocumentKind::SowTemplate),
                &user,
            )
            .await
            .unwrap();
        assert!(outcome.degraded);
    }

    #[tokio::test]
    async fn missing_project_is_an_error() {
        let (user, _project) = fixtures();
        let store = Arc::new(InMemoryProjectStore::new());
        let handler = ForgeDocumentHandler::new(Arc::new(MockAiProvider::new()), store);

        let result = handler
            .handle(
                ForgeDocumentCommand::new(ProjectId::new(), DocumentKind::PitchScript),
                &user,
            )
            .await;
        assert!(matches!(result, Err(ForgeError::ProjectNotFound(_))));
    }

    #[tokio::test]
    async fn archetype_override_reaches_the_instruction() {
        let (user, project) = fixtures();
        let provider = MockAiProvider::new().with_reply("## One pager");
        let recorder = provider.clone();
        let (handler, _store) = handler_with(provider, &project).await;

        handler
            .handle(
                ForgeDocumentCommand::new(project.id, DocumentKind::ConceptOnePager)
                    .with_archetype(Archetype::DataAi),
                &user,
            )
            .await
            .unwrap();

        let instruction = &recorder.calls()[0].request.messages[0].content;
        assert!(instruction.contains("DATA/AI ANGLES"));
    }
}
