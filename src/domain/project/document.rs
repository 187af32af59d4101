//! The closed set of forgeable document kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every document the forge can produce.
///
/// `generated_assets` keys are drawn exclusively from this set; adding a kind
/// here is the only way to extend the catalog, which keeps the builder
/// dispatch exhaustiveness-checked by the compiler.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    ConceptOnePager,
    PitchScript,
    Roadmap12M,
    GtmStrategy,
    BusinessModelSummary,
    FinancialForecast,
    UnitEconomics,
    FoundersAgreement,
    ArticlesDraft,
    ServiceContract,
    CapTable,
    RaciMatrix,
    EthicsCharter,
    DeliveryPlaybook,
    PricingOffers,
    CommercialProposal,
    SowTemplate,
    ChangeRequestForm,
    AcceptanceReport,
    MinimalPrd,
    TechSpec,
    QaPlan,
    CompanyProfile,
    BrandKitSummary,
}

impl DocumentKind {
    /// Every kind, catalog order.
    pub const ALL: [DocumentKind; 24] = [
        DocumentKind::ConceptOnePager,
        DocumentKind::PitchScript,
        DocumentKind::Roadmap12M,
        DocumentKind::GtmStrategy,
        DocumentKind::BusinessModelSummary,
        DocumentKind::FinancialForecast,
        DocumentKind::UnitEconomics,
        DocumentKind::FoundersAgreement,
        DocumentKind::ArticlesDraft,
        DocumentKind::ServiceContract,
        DocumentKind::CapTable,
        DocumentKind::RaciMatrix,
        DocumentKind::EthicsCharter,
        DocumentKind::DeliveryPlaybook,
        DocumentKind::PricingOffers,
        DocumentKind::CommercialProposal,
        DocumentKind::SowTemplate,
        DocumentKind::ChangeRequestForm,
        DocumentKind::AcceptanceReport,
        DocumentKind::MinimalPrd,
        DocumentKind::TechSpec,
        DocumentKind::QaPlan,
        DocumentKind::CompanyProfile,
        DocumentKind::BrandKitSummary,
    ];

    /// Human-readable title, used in prompts and fallback documents.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::ConceptOnePager => "Concept One-Pager",
            DocumentKind::PitchScript => "Pitch Script",
            DocumentKind::Roadmap12M => "12-Month Roadmap",
            DocumentKind::GtmStrategy => "Go-To-Market Strategy",
            DocumentKind::BusinessModelSummary => "Business Model Summary",
            DocumentKind::FinancialForecast => "Financial Forecast",
            DocumentKind::UnitEconomics => "Unit Economics Analysis",
            DocumentKind::FoundersAgreement => "Founders' Agreement",
            DocumentKind::ArticlesDraft => "Draft Articles of Association",
            DocumentKind::ServiceContract => "Service Contract",
            DocumentKind::CapTable => "Cap Table",
            DocumentKind::RaciMatrix => "RACI Matrix",
            DocumentKind::EthicsCharter => "Ethics Charter",
            DocumentKind::DeliveryPlaybook => "Delivery Playbook",
            DocumentKind::PricingOffers => "Offers & Pricing",
            DocumentKind::CommercialProposal => "Commercial Proposal",
            DocumentKind::SowTemplate => "Statement of Work Template",
            DocumentKind::ChangeRequestForm => "Change Request Form",
            DocumentKind::AcceptanceReport => "Acceptance Report",
            DocumentKind::MinimalPrd => "Minimal PRD",
            DocumentKind::TechSpec => "Technical Specification",
            DocumentKind::QaPlan => "QA Plan",
            DocumentKind::CompanyProfile => "Company Profile",
            DocumentKind::BrandKitSummary => "Brand Kit Summary",
        }
    }

    /// True for the formal legal family, which shares one builder.
    pub fn is_legal(&self) -> bool {
        matches!(
            self,
            DocumentKind::FoundersAgreement
                | DocumentKind::ArticlesDraft
                | DocumentKind::ServiceContract
        )
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
