//! Revenue-model shape classifier.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::engine::{first_match, normalize, Rule};

/// How the project expects to charge for its offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueModel {
    Saas,
    Retainer,
    TimeAndMaterials,
    FixedScope,
    Hybrid,
    Unknown,
}

impl RevenueModel {
    /// Short label used inside generated instructions.
    pub fn label(&self) -> &'static str {
        match self {
            RevenueModel::Saas => "SAAS SUBSCRIPTION",
            RevenueModel::Retainer => "MONTHLY RETAINER",
            RevenueModel::TimeAndMaterials => "TIME AND MATERIALS",
            RevenueModel::FixedScope => "FIXED-SCOPE PROJECT",
            RevenueModel::Hybrid => "HYBRID BUILD + RUN",
            RevenueModel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RevenueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

static RULES: Lazy<Vec<Rule<RevenueModel>>> = Lazy::new(|| {
    vec![
        Rule::new(
            RevenueModel::Saas,
            r"\bsaas\b|\bsubscription\b|\babonnement\b|\bmrr\b|\bplan\b|\btier\b|\bchurn\b",
        ),
        Rule::new(
            RevenueModel::Retainer,
            r"\bretainer\b|\bmonthly\b|\bmensuel\b|\bsupport\b|\bmaintenance\b|\bops\b",
        ),
        Rule::new(
            RevenueModel::TimeAndMaterials,
            r"\bday rate\b|\btjm\b|\bregie\b|\btime\b|\bmaterial\b|\bper day\b",
        ),
        Rule::new(
            RevenueModel::FixedScope,
            r"\bfixed\b|\bforfait\b|\bproject\b|\bprojet\b|\bdeliverable\b|\blivrable\b",
        ),
        Rule::new(RevenueModel::Hybrid, r"\bhybrid\b|\bbuild\b.*\bmaintain\b"),
    ]
});

/// Classifies free-text pricing and offer fields into a revenue-model shape.
pub fn classify_revenue_model(fields: &[&str]) -> RevenueModel {
    first_match(&RULES, &normalize(fields), RevenueModel::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_unknown() {
        assert_eq!(classify_revenue_model(&[]), RevenueModel::Unknown);
    }

    #[test]
    fn subscription_terms_classify_as_saas() {
        assert_eq!(
            classify_revenue_model(&["three subscription tiers with annual billing"]),
            RevenueModel::Saas
        );
    }

    #[test]
    fn saas_wins_over_retainer_vocabulary() {
        assert_eq!(
            classify_revenue_model(&["MRR from monthly support plans"]),
            RevenueModel::Saas
        );
    }

    #[test]
    fn maintenance_terms_classify_as_retainer() {
        assert_eq!(
            classify_revenue_model(&["ongoing maintenance and ops"]),
            RevenueModel::Retainer
        );
    }

    #[test]
    fn day_rate_terms_classify_as_time_and_materials() {
        assert_eq!(
            classify_revenue_model(&["billed at a day rate"]),
            RevenueModel::TimeAndMaterials
        );
    }

    #[test]
    fn deliverable_terms_classify_as_fixed_scope() {
        assert_eq!(
            classify_revenue_model(&["fixed price per deliverable"]),
            RevenueModel::FixedScope
        );
    }

    #[test]
    fn build_then_maintain_classifies_as_hybrid() {
        assert_eq!(
            classify_revenue_model(&["we build then maintain the platform"]),
            RevenueModel::Hybrid
        );
    }
}
