//! Project aggregate and its closed vocabularies.

mod document;
mod message;
mod plan;
#[allow(clippy::module_inception)]
mod project;
mod user;

pub use document::DocumentKind;
pub use message::{ChatMessage, MessageRole};
pub use plan::{merge_distilled, Plan, PlanSection, SectionProgress};
pub use project::{Collaborator, Project};
pub use user::UserProfile;
