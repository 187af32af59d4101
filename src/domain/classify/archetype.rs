//! Business archetype classifier.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::engine::{first_match, normalize, Rule};

/// Coarse category describing what kind of business a project is.
///
/// Derived from free-text fields, never persisted as ground truth (a stored
/// value is only ever an explicit user override).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Cybersecurity,
    DataAi,
    MarketingComm,
    DesignBranding,
    TrainingEdtech,
    HrRecruiting,
    ConsultingStrategy,
    DevDelivery,
    Unknown,
}

impl Archetype {
    /// All archetypes, in classifier priority order (Unknown last).
    pub const ALL: [Archetype; 9] = [
        Archetype::Cybersecurity,
        Archetype::DataAi,
        Archetype::MarketingComm,
        Archetype::DesignBranding,
        Archetype::TrainingEdtech,
        Archetype::HrRecruiting,
        Archetype::ConsultingStrategy,
        Archetype::DevDelivery,
        Archetype::Unknown,
    ];

    /// Short label used inside generated instructions.
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Cybersecurity => "CYBERSECURITY",
            Archetype::DataAi => "DATA/AI",
            Archetype::MarketingComm => "MARKETING/COMMUNICATION",
            Archetype::DesignBranding => "DESIGN/BRANDING",
            Archetype::TrainingEdtech => "TRAINING/EDTECH",
            Archetype::HrRecruiting => "HR/RECRUITING",
            Archetype::ConsultingStrategy => "CONSULTING/STRATEGY",
            Archetype::DevDelivery => "ENGINEERING DELIVERY",
            Archetype::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Priority order is load-bearing: security vocabulary wins over data, data
// over marketing, and the broad delivery vocabulary ("dev", "api", "agency")
// is checked last so it cannot shadow the specialized categories.
static RULES: Lazy<Vec<Rule<Archetype>>> = Lazy::new(|| {
    vec![
        Rule::new(
            Archetype::Cybersecurity,
            r"\bpentest\b|\bsoc\b|\bsiem\b|\bvuln|\biso ?27001\b|\baudit\b",
        ),
        Rule::new(
            Archetype::DataAi,
            r"\bdata\b|\bbi\b|\betl\b|\bml\b|\bai\b|\brag\b|\bmodel\b|\bvector\b",
        ),
        Rule::new(
            Archetype::MarketingComm,
            r"\bmarketing\b|\bads\b|\bseo\b|\bsocial\b|\bcommunication\b|\bcampaign\b|\bcampagne\b|\binfluence\b",
        ),
        Rule::new(
            Archetype::DesignBranding,
            r"\bui\b|\bux\b|\bdesign\b|\bfigma\b|\bbranding\b|\bbrand guide",
        ),
        Rule::new(
            Archetype::TrainingEdtech,
            r"\btraining\b|\bformation\b|\bbootcamp\b|\bsyllabus\b|\bcertif|\bedtech\b",
        ),
        Rule::new(
            Archetype::HrRecruiting,
            r"\brecruit|\brecrut|\bstaff|\bmentor\b|\bmatching\b|\bhr\b|\brh\b|\btalent\b",
        ),
        Rule::new(
            Archetype::ConsultingStrategy,
            r"\bstrateg|\bpmo\b|\bprocess\b|\bgovernance\b|\bgouvernance\b|\bconsult|\bconseil\b",
        ),
        Rule::new(
            Archetype::DevDelivery,
            r"\besn\b|\bagency\b|\bagence\b|\bdev\b|\bapplication\b|\bapi\b|\bmaintenance\b|\bdelivery\b|\bsupport\b",
        ),
    ]
});

/// Classifies free-text project fields into a business archetype.
///
/// Deterministic, side-effect free; blank input returns
/// [`Archetype::Unknown`].
pub fn classify_archetype(fields: &[&str]) -> Archetype {
    first_match(&RULES, &normalize(fields), Archetype::Unknown)
}
