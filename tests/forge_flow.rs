//! End-to-end flow over the forge: onboard a project, forge a document from
//! classifier-specialized instructions, refine it conversationally, and
//! distill the mentor transcript into the plan — all against the mock
//! gateway and the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use venture_forge::adapters::ai::{MockAiProvider, MockFailure};
use venture_forge::adapters::store::InMemoryProjectStore;
use venture_forge::application::handlers::{
    DistillOutcome, DistillProgressHandler, ForgeDocumentCommand, ForgeDocumentHandler,
    MentorHandler, RefineDocumentHandler,
};
use venture_forge::domain::classify::Archetype;
use venture_forge::domain::foundation::{Percentage, UserId};
use venture_forge::domain::project::{
    ChatMessage, Collaborator, DocumentKind, PlanSection, Project, SectionProgress, UserProfile,
};
use venture_forge::ports::ProjectStore;

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn onboarded_project() -> (Project, UserProfile) {
    let user = UserProfile::new(UserId::new("founder-1").unwrap(), "Lina", "France");
    let mut project = Project::new(user.id.clone(), "Atlas Studio");
    project.country = Some("France".to_string());
    project.currency = Some("EUR".to_string());
    project.offer = Some("logo design and brand identity packages".to_string());
    project.problem = Some(String::new());
    project.icp = Some("early-stage startups".to_string());
    project.main_goal = Some("become the go-to studio for seed-stage brands".to_string());
    project
        .collaborators
        .push(Collaborator::new("Yann").with_role("Art Director"));
    (project, user)
}

#[tokio::test]
async fn forge_then_refine_keeps_one_coherent_document() {
    init_tracing();
    let (project, user) = onboarded_project();
    let store = Arc::new(InMemoryProjectStore::new());
    store.save(&project).await.unwrap();

    // 1. Forge the pricing document.
    let provider = MockAiProvider::new().with_reply("## Offer grid\n- Identity Starter");
    let recorder = provider.clone();
    let forge = ForgeDocumentHandler::new(Arc::new(provider.clone()), store.clone());

    let outcome = forge
        .handle(
            ForgeDocumentCommand::new(project.id, DocumentKind::PricingOffers),
            &user,
        )
        .await
        .unwrap();
    assert!(!outcome.degraded);

    // The instruction was specialized by the classifier: "logo design"
    // matches the design/branding archetype, and the blank problem field is
    // rendered as an explicit gap.
    let instruction = &recorder.calls()[0].request.messages[0].content;
    assert!(instruction.contains("PRICING PATTERNS - DESIGN/BRANDING"));
    assert!(instruction.contains("- Problem addressed: to be specified"));
    assert!(instruction.contains("Yann (Art Director)"));

    // 2. Refine it twice; each turn fully replaces the stored document.
    let refine_provider = MockAiProvider::new()
        .with_json_reply(json!({
            "assistant_message": "Added a premium tier.",
            "updated_content": "## Offer grid\n- Identity Starter\n- Premium Brand System",
        }))
        .with_reply("sorry, plain prose this time");
    let refine = RefineDocumentHandler::new(Arc::new(refine_provider), store.clone());

    let first = refine
        .handle(project.id, DocumentKind::PricingOffers, "add a premium tier", &user)
        .await
        .unwrap();
    assert!(!first.degraded);

    // Second turn gets an unparsable payload: the apology comes back and the
    // document is exactly what the first turn produced.
    let second = refine
        .handle(project.id, DocumentKind::PricingOffers, "now add a gold tier", &user)
        .await
        .unwrap();
    assert!(second.degraded);
    assert_eq!(
        second.updated_content,
        "## Offer grid\n- Identity Starter\n- Premium Brand System"
    );

    let stored = store.find(&project.id).await.unwrap().unwrap();
    assert_eq!(
        stored.asset(DocumentKind::PricingOffers),
        Some("## Offer grid\n- Identity Starter\n- Premium Brand System")
    );
}

#[tokio::test]
async fn mentor_conversation_feeds_the_distiller() {
    init_tracing();
    let (mut project, user) = onboarded_project();
    // Pre-existing progress that this distillation round does not re-derive.
    project.plan.insert(
        PlanSection::Legal,
        SectionProgress::new("SASU incorporation checklist", Percentage::new(45)),
    );
    let store = Arc::new(InMemoryProjectStore::new());
    store.save(&project).await.unwrap();

    // 1. Open the mentor session and exchange one turn.
    let mentor_provider = MockAiProvider::new()
        .with_reply("Welcome, Lina. What problem do seed-stage brands actually pay to solve?")
        .with_reply("Good. Positioning against freelancers is your first moat question.");
    let mentor = MentorHandler::new(Arc::new(mentor_provider), store.clone());

    let (mut session, _greeting) = mentor.open_session(project.id, &user).await.unwrap();
    mentor
        .send_message(
            &mut session,
            project.id,
            &user,
            "They pay to look credible to investors.",
        )
        .await
        .unwrap();

    // 2. Distill: the transcript qualifies (mentor spoke last).
    let distill_provider = MockAiProvider::new().with_json_reply(json!({
        "idea_validation": {
            "content": "### Concept\n- Brand credibility for seed-stage startups",
            "completion": 60,
        },
        "market_study": {
            "content": "### Market\n- Seed-stage startups, investor-facing",
            "completion": 35,
        },
    }));
    let distiller = Arc::new(DistillProgressHandler::new(
        Arc::new(distill_provider),
        store.clone(),
        Duration::from_millis(1500),
    ));

    let outcome = distiller
        .distill_now(project.id, project.owner.clone())
        .await
        .unwrap();
    assert_eq!(outcome, DistillOutcome::Merged(2));

    // 3. Monotonic merge: returned sections replaced, the rest untouched.
    let stored = store.find(&project.id).await.unwrap().unwrap();
    assert_eq!(
        stored.plan[&PlanSection::IdeaValidation].completion,
        Percentage::new(60)
    );
    assert_eq!(
        stored.plan[&PlanSection::Legal].content,
        "SASU incorporation checklist"
    );
    assert_eq!(stored.plan[&PlanSection::Legal].completion, Percentage::new(45));

    // The persisted history carries the whole exchange in causal order.
    assert_eq!(stored.history.len(), 3);
    assert_eq!(
        stored.history[1].text,
        "They pay to look credible to investors."
    );
}

#[tokio::test]
async fn gateway_outage_degrades_every_path_without_losing_state() {
    init_tracing();
    let (mut project, user) = onboarded_project();
    project.set_asset(DocumentKind::PitchScript, "## Pitch v1");
    project.record_message(ChatMessage::user("ready?"));
    project.record_message(ChatMessage::assistant("ready."));
    let store = Arc::new(InMemoryProjectStore::new());
    store.save(&project).await.unwrap();

    let outage = || {
        MockAiProvider::new().with_failure(MockFailure::Unavailable {
            message: "upstream down".to_string(),
        })
    };

    // Forge degrades to a placeholder and persists nothing.
    let forge = ForgeDocumentHandler::new(Arc::new(outage()), store.clone());
    let forged = forge
        .handle(
            ForgeDocumentCommand::new(project.id, DocumentKind::SowTemplate).with_archetype(Archetype::DesignBranding),
            &user,
        )
        .await
        .unwrap();
    assert!(forged.degraded);

    // Refinement falls back to the apology and keeps the document.
    let refine = RefineDocumentHandler::new(Arc::new(outage()), store.clone());
    let refined = refine
        .handle(project.id, DocumentKind::PitchScript, "tighten the hook", &user)
        .await
        .unwrap();
    assert!(refined.degraded);
    assert_eq!(refined.updated_content, "## Pitch v1");

    // Distillation merges nothing.
    let distiller = Arc::new(DistillProgressHandler::new(
        Arc::new(outage()),
        store.clone(),
        Duration::from_millis(1500),
    ));
    let outcome = distiller
        .distill_now(project.id, project.owner.clone())
        .await
        .unwrap();
    assert_eq!(outcome, DistillOutcome::Empty);

    // Nothing was lost anywhere.
    let stored = store.find(&project.id).await.unwrap().unwrap();
    assert_eq!(stored.asset(DocumentKind::PitchScript), Some("## Pitch v1"));
    assert_eq!(stored.asset(DocumentKind::SowTemplate), None);
    assert!(stored.plan.is_empty());
}
