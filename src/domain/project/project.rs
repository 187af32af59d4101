//! Project aggregate - the unit of work the mentor and forge operate on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::classify::{classify_archetype, Archetype};
use crate::domain::foundation::{ProjectId, UserId};

use super::document::DocumentKind;
use super::message::{ChatMessage, MessageRole};
use super::plan::{merge_distilled, Plan, PlanSection, SectionProgress};

/// A collaborator on the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Collaborator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// The project under mentorship.
///
/// Created at onboarding, mutated by the refinement session and the progress
/// distiller, never deleted. `plan` keys come from the closed
/// [`PlanSection`] set and `generated_assets` keys from the closed
/// [`DocumentKind`] set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner: UserId,
    pub name: String,

    // Free-text descriptive fields collected at onboarding and refined by the
    // mentor. Absent means the entrepreneur has not provided it yet; prompts
    // render absences as explicit "to be specified" markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    /// Ideal customer profile — who pays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differentiation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positioning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    /// Explicit archetype override set by the user; when absent the
    /// classifier derives one on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype_override: Option<Archetype>,

    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub generated_assets: BTreeMap<DocumentKind, String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
}

impl Project {
    /// Creates a fresh project at onboarding.
    pub fn new(owner: UserId, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            owner,
            name: name.into(),
            country: None,
            currency: None,
            description: None,
            main_goal: None,
            offer: None,
            problem: None,
            icp: None,
            value: None,
            differentiation: None,
            revenue_model: None,
            pricing: None,
            constraints: None,
            costs: None,
            proof: None,
            positioning: None,
            services: None,
            stack: None,
            archetype_override: None,
            plan: Plan::new(),
            generated_assets: BTreeMap::new(),
            history: Vec::new(),
            collaborators: Vec::new(),
        }
    }

    /// The free-text fields fed to the archetype classifier, in the order the
    /// classifier expects them.
    pub fn archetype_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.offer.as_deref(),
            self.description.as_deref(),
            self.problem.as_deref(),
            self.icp.as_deref(),
            self.services.as_deref(),
            self.stack.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Fields fed to the revenue-model classifier.
    pub fn revenue_fields(&self) -> Vec<&str> {
        [
            self.revenue_model.as_deref(),
            self.pricing.as_deref(),
            self.offer.as_deref(),
            self.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Fields fed to the venture-kind classifier.
    pub fn venture_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.offer.as_deref(),
            self.problem.as_deref(),
            self.differentiation.as_deref(),
            self.description.as_deref(),
            self.main_goal.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Resolves the archetype: explicit override first, classifier otherwise.
    ///
    /// Recomputed on demand from current text fields so it stays idempotent
    /// and cache-free.
    pub fn resolved_archetype(&self) -> Archetype {
        self.archetype_override
            .unwrap_or_else(|| classify_archetype(&self.archetype_fields()))
    }

    /// Appends a message to the mentor history.
    pub fn record_message(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// The latest generated content for a document kind, if any.
    pub fn asset(&self, kind: DocumentKind) -> Option<&str> {
        self.generated_assets.get(&kind).map(String::as_str)
    }

    /// Stores (or fully replaces) the generated content for a document kind.
    pub fn set_asset(&mut self, kind: DocumentKind, content: impl Into<String>) {
        self.generated_assets.insert(kind, content.into());
    }

    /// Merges a distillation result into the plan; sections the distiller did
    /// not return are left untouched.
    pub fn apply_distilled(&mut self, distilled: BTreeMap<PlanSection, SectionProgress>) {
        merge_distilled(&mut self.plan, distilled);
    }

    /// True when the transcript qualifies for a distillation pass: there is
    /// an actual exchange and the mentor spoke last.
    pub fn qualifies_for_distillation(&self) -> bool {
        self.history.len() >= 2
            && self
                .history
                .last()
                .is_some_and(|m| m.role != MessageRole::User)
    }

    /// Collaborator names joined for prompt rendering, or None when solo.
    pub fn collaborator_roster(&self) -> Option<String> {
        if self.collaborators.is_empty() {
            return None;
        }
        Some(
            self.collaborators
                .iter()
                .map(|c| match &c.role {
                    Some(role) => format!("{} ({})", c.name, role),
                    None => c.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
