//! Shared context block rendered into every generation instruction.

use crate::domain::project::{Project, UserProfile};

/// Literal marker rendered for any missing or empty field.
///
/// Missing fields are rendered, not omitted: downstream generation must flag
/// gaps instead of hallucinating them.
pub const UNSPECIFIED: &str = "to be specified";

/// Placeholder substitution rule for optional free-text fields.
pub fn or_unspecified(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => UNSPECIFIED,
    }
}

/// Renders the shared "source of truth" context block.
///
/// Every specialized builder embeds this block so the model always sees the
/// same project facts, gaps included.
pub fn render_context(project: &Project, user: &UserProfile) -> String {
    let collaborators = project
        .collaborator_roster()
        .unwrap_or_else(|| "none (solo founder)".to_string());

    format!(
        "CONTEXT (source of truth):\n\
         - Project: {name}\n\
         - Country / market: {country}\n\
         - Currency: {currency}\n\
         - Offer / services: {offer}\n\
         - Problem addressed: {problem}\n\
         - ICP (who pays): {icp}\n\
         - Value created: {value}\n\
         - Differentiation: {differentiation}\n\
         - Revenue model: {revenue_model}\n\
         - Pricing intent: {pricing}\n\
         - Constraints: {constraints}\n\
         - Internal costs (if known): {costs}\n\
         - Proof / traction: {proof}\n\
         - Positioning: {positioning}\n\
         - Team capacity: {capacity}\n\
         - Collaborators: {collaborators}",
        name = project.name,
        country = or_unspecified(project.country.as_deref()),
        currency = or_unspecified(project.currency.as_deref()),
        offer = or_unspecified(project.offer.as_deref()),
        problem = or_unspecified(project.problem.as_deref()),
        icp = or_unspecified(project.icp.as_deref()),
        value = or_unspecified(project.value.as_deref()),
        differentiation = or_unspecified(project.differentiation.as_deref()),
        revenue_model = or_unspecified(project.revenue_model.as_deref()),
        pricing = or_unspecified(project.pricing.as_deref()),
        constraints = or_unspecified(project.constraints.as_deref()),
        costs = or_unspecified(project.costs.as_deref()),
        proof = or_unspecified(project.proof.as_deref()),
        positioning = or_unspecified(project.positioning.as_deref()),
        capacity = or_unspecified(user.team_capacity.as_deref()),
        collaborators = collaborators,
    )
}
