//! User profile supplied by the upstream identity and onboarding flow.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// The entrepreneur the mentor works with.
///
/// Only the fields prompts actually consume; the onboarding flow owns the
/// rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Delivery capacity in person-days per month, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_capacity: Option<String>,
}

impl UserProfile {
    pub fn new(id: UserId, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            full_name: None,
            email: None,
            country: country.into(),
            currency: None,
            team_capacity: None,
        }
    }

    /// Preferred display name: full name when present, short name otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}
