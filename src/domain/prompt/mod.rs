//! Prompt template library.
//!
//! One builder per specialized document kind, each dispatching internally on
//! a classifier tag. Kinds without a specialized builder get a minimal
//! generic instruction naming the kind — building an instruction never
//! fails. Composition is pure string assembly: identical inputs produce a
//! byte-identical instruction.

mod business_model;
mod context;
mod delivery;
mod ethics;
mod legal;
mod one_pager;
mod pitch;
mod pricing;
mod proposal;
mod rules;
mod sow;

pub use context::{or_unspecified, render_context, UNSPECIFIED};
pub use rules::{ANTI_FABRICATION_RULES, FORMAT_CONTRACT};

use crate::domain::classify::{classify_archetype, Archetype};
use crate::domain::project::{DocumentKind, Project, UserProfile};

/// Builds the generation instruction for a document kind.
///
/// Tag resolution: explicit `override_tag`, else the project's stored
/// override, else the classifier. The dispatch is an exhaustive match on the
/// closed [`DocumentKind`] set, so a missing builder is a compile error, and
/// kinds without a specialized template fall through to
/// [`fallback_prompt`].
pub fn build_prompt(
    kind: DocumentKind,
    project: &Project,
    user: &UserProfile,
    override_tag: Option<Archetype>,
) -> String {
    let archetype = override_tag
        .or(project.archetype_override)
        .unwrap_or_else(|| classify_archetype(&project.archetype_fields()));

    match kind {
        DocumentKind::ConceptOnePager => one_pager::build(project, user, archetype),
        DocumentKind::PitchScript => pitch::build(project, user, archetype),
        DocumentKind::PricingOffers => pricing::build(project, user, archetype),
        DocumentKind::BusinessModelSummary => business_model::build(project, user),
        DocumentKind::CommercialProposal => proposal::build(project, user, archetype),
        DocumentKind::SowTemplate => sow::build(project, user, archetype),
        DocumentKind::EthicsCharter => ethics::build(project, user, archetype),
        DocumentKind::DeliveryPlaybook => delivery::build(project, user),
        DocumentKind::FoundersAgreement
        | DocumentKind::ArticlesDraft
        | DocumentKind::ServiceContract => legal::build(kind, project, user),
        DocumentKind::Roadmap12M
        | DocumentKind::GtmStrategy
        | DocumentKind::FinancialForecast
        | DocumentKind::UnitEconomics
        | DocumentKind::CapTable
        | DocumentKind::RaciMatrix
        | DocumentKind::ChangeRequestForm
        | DocumentKind::AcceptanceReport
        | DocumentKind::MinimalPrd
        | DocumentKind::TechSpec
        | DocumentKind::QaPlan
        | DocumentKind::CompanyProfile
        | DocumentKind::BrandKitSummary => fallback_prompt(kind, project, user),
    }
}

/// Minimal generic instruction for kinds without a specialized template.
fn fallback_prompt(kind: DocumentKind, project: &Project, user: &UserProfile) -> String {
    format!(
        "You are a senior business consultant. Write a professional \"{title}\" for the project \"{name}\".\n\
         \n\
         {context}\n\
         \n\
         {rules}\n\
         \n\
         {format}\n\
         - Structure the document yourself with \"## \" sections appropriate for a {title}.",
        title = kind.title(),
        name = project.name,
        context = render_context(project, user),
        rules = ANTI_FABRICATION_RULES,
        format = FORMAT_CONTRACT,
    )
}
