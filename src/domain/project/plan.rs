//! Business-plan sections and per-section progress.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::Percentage;

/// The fixed, closed set of business-plan sections the mentor walks through.
///
/// Plan map keys are drawn exclusively from this set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlanSection {
    IdeaValidation,
    MarketStudy,
    BusinessModel,
    Legal,
    Financials,
    Growth,
}

impl PlanSection {
    /// All sections in mentor workflow order.
    pub const ALL: [PlanSection; 6] = [
        PlanSection::IdeaValidation,
        PlanSection::MarketStudy,
        PlanSection::BusinessModel,
        PlanSection::Legal,
        PlanSection::Financials,
        PlanSection::Growth,
    ];

    /// Human-readable title, used in prompts and generated documents.
    pub fn title(&self) -> &'static str {
        match self {
            PlanSection::IdeaValidation => "Foundations & Idea",
            PlanSection::MarketStudy => "Market & Audience",
            PlanSection::BusinessModel => "Business Model",
            PlanSection::Legal => "Legal Structure",
            PlanSection::Financials => "Finance & ROI",
            PlanSection::Growth => "Marketing & Expansion",
        }
    }

    /// Stable identifier used as a JSON key in schema-constrained requests.
    pub fn key(&self) -> &'static str {
        match self {
            PlanSection::IdeaValidation => "idea_validation",
            PlanSection::MarketStudy => "market_study",
            PlanSection::BusinessModel => "business_model",
            PlanSection::Legal => "legal",
            PlanSection::Financials => "financials",
            PlanSection::Growth => "growth",
        }
    }

    /// Resolves a schema key back to its section.
    pub fn from_key(key: &str) -> Option<PlanSection> {
        PlanSection::ALL.iter().copied().find(|s| s.key() == key)
    }
}

impl fmt::Display for PlanSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Distilled state of one plan section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionProgress {
    /// Synthesized section content (markdown).
    pub content: String,
    /// Completion estimate, 0-100.
    pub completion: Percentage,
}

impl SectionProgress {
    pub fn new(content: impl Into<String>, completion: Percentage) -> Self {
        Self {
            content: content.into(),
            completion,
        }
    }
}

/// The plan map: section -> distilled progress.
pub type Plan = BTreeMap<PlanSection, SectionProgress>;

/// Merges a distillation result into an existing plan.
///
/// Sections present in `distilled` fully replace their previous values;
/// sections absent from `distilled` are left untouched. The distiller is a
/// best-effort summarizer, so a partial result must never erase progress it
/// did not re-derive.
pub fn merge_distilled(plan: &mut Plan, distilled: BTreeMap<PlanSection, SectionProgress>) {
    for (section, progress) in distilled {
        plan.insert(section, progress);
    }
}
