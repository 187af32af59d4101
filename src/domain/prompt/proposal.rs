//! Commercial proposal template builder.

use crate::domain::classify::Archetype;
use crate::domain::project::{Project, UserProfile};

use super::context::{render_context, UNSPECIFIED};
use super::rules::{ANTI_FABRICATION_RULES, FORMAT_CONTRACT};

/// Archetype module: what genuinely changes in a proposal.
fn archetype_module(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::DevDelivery => "\
SPECIALIZATION - ENGINEERING DELIVERY:
- Insist on: scoping (Discovery), delivery (Build), stabilization (Run), maintenance/SLA.
- Include: acceptance criteria, Change Request procedure, bug vs. evolution classification.
- Add: a client-vs-provider RACI matrix and a razor-sharp IN/OUT scope.",
        Archetype::DataAi => "\
SPECIALIZATION - DATA/AI:
- Add a \"Data Readiness Pack\" (source quality audit) before promising dashboards or AI.
- Include: governance (data lineage, access), dataset security, DPA option for personal data.
- Define units: sources, connectors, refresh frequency, volume, number of dashboards/models.",
        Archetype::Cybersecurity => "\
SPECIALIZATION - CYBERSECURITY:
- Include: rules of engagement, strict perimeter, test windows, \"do no harm\" clause.
- Deliverables: executive report + technical report + remediation plan + optional re-test.
- Define: depth (black/grey/white box), covered assets, severity criteria.",
        Archetype::MarketingComm => "\
SPECIALIZATION - MARKETING/COMMUNICATION:
- Separate clearly: agency fees vs. media budget (billed separately).
- Include: KPIs, reporting cadence, test-and-learn process, brand safety.
- Deliverables: editorial calendar, creatives, tracking, landing pages (if included).",
        Archetype::DesignBranding => "\
SPECIALIZATION - DESIGN/BRANDING:
- Include: iteration count, source deliverables (Figma), usage rights, accessibility.
- Deliverables: design system (if included), guidelines, exported assets, dev handoff.",
        Archetype::ConsultingStrategy => "\
SPECIALIZATION - CONSULTING/STRATEGY:
- Insist on: diagnostic -> target -> plan -> steering -> transfer.
- Add: assumptions, limits, decision deliverables (not just slides), committee governance.",
        Archetype::TrainingEdtech => "\
SPECIALIZATION - TRAINING/EDTECH:
- Include: format (cohorts), prerequisites, assessment, materials, capstone project, follow-up.
- Deliverables: materials + replays (if allowed) + certificate (if applicable).",
        Archetype::HrRecruiting => "\
SPECIALIZATION - HR/RECRUITING:
- Include: sourcing/qualification process, deadlines, candidate confidentiality, non-discrimination.
- Model: fee, success fee, subscription, replacement guarantee (if offered).",
        Archetype::Unknown => "\
SPECIALIZATION - UNKNOWN:
- Stay generic, and add a tightly scoped \"Information to confirm\" section.",
    }
}

pub(super) fn build(project: &Project, user: &UserProfile, archetype: Archetype) -> String {
    format!(
        "You are a senior business engineer. Write an institutional Commercial Proposal template.\n\
         TARGET: a strategic prospective client for {name}.\n\
         \n\
         {context}\n\
         - Provider-side signatory: {signatory}\n\
         \n\
         DETECTED ARCHETYPE: {archetype}\n\
         {module}\n\
         \n\
         {rules}\n\
         - No vague claims like \"the only viable solution\" without justification: replace with 3 concrete proofs.\n\
         - The document must fit in roughly 2 to 4 pages (professional density, not a novel).\n\
         \n\
         {format}\n\
         - Include exactly 2 Markdown tables:\n\
         1) Schedule (phases/milestones)\n\
         2) Investment (packs or budget lines)\n\
         \n\
         REQUIRED STRUCTURE:\n\
         \n\
         ## COVER PAGE\n\
         ### Title\n\
         - \"Commercial Proposal - {name}\"\n\
         ### Metadata\n\
         - Reference: {unspecified}\n\
         - Date: {unspecified}\n\
         - Client: {unspecified}\n\
         - Issuer: {signatory}\n\
         \n\
         ## UNDERSTANDING YOUR STAKES\n\
         ### Findings\n\
         - Restate the pain in business language\n\
         ### Impacts\n\
         - Time, money, risks, image (no inventing: use \"{unspecified}\" where needed)\n\
         ### Objective\n\
         - What the client concretely wants to obtain\n\
         \n\
         ## STRATEGIC SOLUTION\n\
         ### Approach\n\
         - 3 to 6 bullets: method + why it works\n\
         ### Scope\n\
         - IN: 5-10 bullets\n\
         - OUT: 5 bullets (anti scope creep)\n\
         ### Deliverables\n\
         - 6-12 concrete, verifiable deliverables\n\
         ### Assumptions & prerequisites\n\
         - Access, contacts, data, validations, equipment, etc.\n\
         \n\
         ## DEPLOYMENT SCHEDULE\n\
         ### Phases & milestones\n\
         - Markdown table: Phase | Duration | Deliverables | Acceptance criterion\n\
         ### Project governance\n\
         - Rituals (kickoff, weekly, demo, acceptance)\n\
         - Simplified RACI (client vs. provider)\n\
         \n\
         ## INVESTMENT AND TERMS\n\
         ### Price structure\n\
         - Packs or lines (per model) + what each includes\n\
         ### Investment table\n\
         - Markdown table: Item/Pack | Included | Price | Payment terms\n\
         ### Commercial terms\n\
         - Deposit: {unspecified}\n\
         - Payment: milestones / monthly\n\
         - Validations: client response deadlines\n\
         - Change Request: mandatory for out-of-scope work\n\
         \n\
         ## RISKS & CONTROLS\n\
         ### Risks\n\
         - 5 risks max (scope, data, access, deadlines, dependencies)\n\
         ### Counters\n\
         - 1 pragmatic counter per risk\n\
         \n\
         ## WHY US\n\
         ### Differentiation\n\
         - 5 bullets: proof, process, assets, quality\n\
         ### References / proof\n\
         - Portfolio / cases / demos: {unspecified}\n\
         \n\
         ## NEXT STEPS\n\
         - 1) Scope validation (date)\n\
         - 2) Kickoff (date)\n\
         - 3) Launch (date)\n\
         - CTA: propose 2 call slots (30-45 min)\n\
         \n\
         ## SIGNATURES\n\
         - For the client: name / role / date / signature\n\
         - For {name}: {signatory} / date / signature",
        name = project.name,
        context = render_context(project, user),
        signatory = user.display_name(),
        archetype = archetype.label(),
        module = archetype_module(archetype),
        rules = ANTI_FABRICATION_RULES,
        format = FORMAT_CONTRACT,
        unspecified = UNSPECIFIED,
    )
}
