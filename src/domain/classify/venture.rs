//! Project-category classifier.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::engine::{first_match, normalize, Rule};

/// Coarse category for what kind of venture the project is, independent of
/// its business domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VentureKind {
    Saas,
    Marketplace,
    InternalTool,
    Impact,
    Agency,
    Unknown,
}

impl VentureKind {
    /// Short label used inside generated instructions.
    pub fn label(&self) -> &'static str {
        match self {
            VentureKind::Saas => "SAAS PRODUCT",
            VentureKind::Marketplace => "MARKETPLACE / MATCHING",
            VentureKind::InternalTool => "INTERNAL TOOL",
            VentureKind::Impact => "IMPACT / NONPROFIT",
            VentureKind::Agency => "SERVICE AGENCY",
            VentureKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for VentureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

static RULES: Lazy<Vec<Rule<VentureKind>>> = Lazy::new(|| {
    vec![
        Rule::new(
            VentureKind::Saas,
            r"\bsaas\b|\bmrr\b|\bsubscription\b|\babonnement\b|\bchurn\b|\bplans?\b|\btier\b",
        ),
        Rule::new(
            VentureKind::Marketplace,
            r"\bmarketplace\b|\bmatching\b|\bmentors?\b|\bfreelances?\b|\bsupply\b.*\bdemand\b",
        ),
        Rule::new(
            VentureKind::InternalTool,
            r"\binternal tool\b|\boutil interne\b|\bprocess\b|\bworkflow\b|\brpa\b|\bcrm\b|\bautomati",
        ),
        Rule::new(
            VentureKind::Impact,
            r"\bngo\b|\bong\b|\bimpact\b|\bgrant\b|\bsubvention\b|\bcommunity\b|\bcommunaut",
        ),
        Rule::new(
            VentureKind::Agency,
            r"\bagency\b|\bagence\b|\besn\b|\bdev\b|\bclient\b|\bsow\b|\btjm\b|\bday rate\b",
        ),
    ]
});

/// Classifies free-text project fields into a venture category.
pub fn classify_venture_kind(fields: &[&str]) -> VentureKind {
    first_match(&RULES, &normalize(fields), VentureKind::Unknown)
}
