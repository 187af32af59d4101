//! Progress distiller - re-summarizes the mentor transcript into the plan.
//!
//! Best-effort, eventually consistent: the raw history remains the source of
//! truth, and any failure resolves to an empty result that merges nothing.
//! Sections the model has no signal for may be omitted; omitted sections are
//! left untouched by the merge (see `Project::apply_distilled`).

use std::collections::BTreeMap;

use super::project::{PlanSection, Project, SectionProgress};
use super::schema::{ResponseSchema, SchemaViolation};

/// Builds the distillation instruction: the entire transcript plus the fixed
/// section list.
pub fn distill_prompt(project: &Project) -> String {
    let transcript = project
        .history
        .iter()
        .map(|m| format!("{}: {}", m.role.transcript_tag(), m.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    let sections = PlanSection::ALL
        .iter()
        .map(|s| format!("\"{}\"", s.title()))
        .collect::<Vec<_>>()
        .join(", ");

    let collaborators = project
        .collaborator_roster()
        .unwrap_or_else(|| "none".to_string());

    format!(
        "Analyze this conversation. For each section of the business-plan workflow, produce a \
         rich, strategic, structured synthesis.\n\
         Each section must read like a chapter of a professional business plan.\n\
         Mention the collaborators ({collaborators}) where their roles come up.\n\
         Use clear sub-headings and bullet lists.\n\
         For every section also estimate a completion score from 0 to 100 based on how much of \
         it the conversation actually covers. Omit sections the conversation says nothing about.\n\
         \n\
         Sections: {sections}.\n\
         \n\
         Transcript:\n\
         {transcript}",
        collaborators = collaborators,
        sections = sections,
        transcript = transcript,
    )
}

/// The response shape: one optional `{content, completion}` object per
/// section identifier.
pub fn response_schema() -> ResponseSchema {
    let section_schema = ResponseSchema::object()
        .with_required_property("content", ResponseSchema::string())
        .with_required_property("completion", ResponseSchema::number());

    PlanSection::ALL.iter().fold(
        ResponseSchema::object(),
        |schema, section| schema.with_property(section.key(), section_schema.clone()),
    )
}

/// Converts a validated distillation payload into a partial section map.
///
/// The payload must already conform to [`response_schema`]; this function
/// re-validates as a guard since the value crossed an external boundary.
pub fn parse_distilled(
    value: &serde_json::Value,
) -> Result<BTreeMap<PlanSection, SectionProgress>, SchemaViolation> {
    response_schema().validate(value)?;

    let mut distilled = BTreeMap::new();
    if let Some(map) = value.as_object() {
        for (key, entry) in map {
            // Unknown keys are tolerated at validation; only closed-set
            // sections make it into the plan.
            let Some(section) = PlanSection::from_key(key) else {
                continue;
            };
            if let Ok(progress) = serde_json::from_value::<SectionProgress>(entry.clone()) {
                distilled.insert(section, progress);
            }
        }
    }
    Ok(distilled)
}
