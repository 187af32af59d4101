//! Statement of Work template builder.

use crate::domain::classify::Archetype;
use crate::domain::project::{Project, UserProfile};

use super::context::{or_unspecified, render_context, UNSPECIFIED};
use super::rules::{ANTI_FABRICATION_RULES, FORMAT_CONTRACT};

/// Archetype module: deliverables, acceptance criteria and typical exclusions.
fn archetype_module(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::DevDelivery => "\
SPECIFICS - ENGINEERING DELIVERY:
- Include: environments (dev/stage/prod), CI/CD (if planned), repository, documentation, handover.
- Acceptance criteria: minimum tests (unit/integration/e2e), code review, demo, acceptance report.
- Exclusions: unlimited support, \"small free tweaks\", scope changes without a Change Request.
- Add: Change Request procedure + bug vs. evolution classification.",
        Archetype::DataAi => "\
SPECIFICS - DATA/AI:
- Include: data sources, connectors, transformations, dashboards/models, monitoring.
- Criteria: quality (error rate), refresh latency, reproducibility, data lineage, access.
- Exclusions: fixing source data outside our control, AI promises without data readiness.
- Add: a \"Data Readiness\" phase + dataset availability conditions.",
        Archetype::Cybersecurity => "\
SPECIFICS - CYBERSECURITY:
- Include: rules of engagement, perimeter (assets), windows, depth (black/grey/white box).
- Deliverables: executive report + technical report + evidence + remediation plan + optional re-test.
- Criteria: perimeter coverage, severity classification, actionable recommendations.
- Exclusions: out-of-perimeter actions, destructive exploitation, publication without consent.",
        Archetype::MarketingComm => "\
SPECIFICS - MARKETING/COMMUNICATION:
- Include: tracking setup, creative planning, content volume, channels, reporting.
- Criteria: deliverables shipped on time + defined KPIs (no outcome guarantee unless contracted).
- Exclusions: media budget (billed separately), missing account access, late validations.",
        Archetype::DesignBranding => "\
SPECIFICS - DESIGN/BRANDING:
- Include: Figma deliverables, design system (if planned), iteration count, handoff.
- Criteria: mockup validation, accessibility checklist, exported assets.
- Exclusions: unlimited iterations, scope redesign without a Change Request, dev integration if not included.",
        Archetype::ConsultingStrategy => "\
SPECIFICS - CONSULTING/STRATEGY:
- Include: workshops, decision deliverables, roadmap, governance, transfer.
- Criteria: deliverables validated in committee + decisions recorded.
- Exclusions: operational execution if not included, insufficient client availability.",
        Archetype::TrainingEdtech => "\
SPECIFICS - TRAINING/EDTECH:
- Include: program, duration, materials, assessments, attendance, capstone project.
- Criteria: sessions held, materials delivered, assessments completed, certificate if planned.
- Exclusions: job guarantees, unlimited coaching beyond the package.",
        Archetype::HrRecruiting => "\
SPECIFICS - HR/RECRUITING:
- Include: role perimeter, qualification process, shortlist, deadlines, confidentiality.
- Criteria: number of submitted profiles, deadline, client feedback, validation stage.
- Exclusions: absolute hiring guarantee, deadlines void without client feedback.",
        Archetype::Unknown => "\
SPECIFICS - UNKNOWN:
- Add an \"Information to confirm\" section (10 points max) before freezing scope or price.",
    }
}

pub(super) fn build(project: &Project, user: &UserProfile, archetype: Archetype) -> String {
    format!(
        "You are a rigorous project manager. Write a contractual \"Statement of Work\" (SOW), ready for signature.\n\
         STYLE: precise, surgical, zero ambiguity.\n\
         \n\
         PROJECT: {name}\n\
         COUNTRY: {country}\n\
         CURRENCY: {currency}\n\
         CLIENT: {unspecified}\n\
         PROVIDER: {provider}\n\
         \n\
         {context}\n\
         \n\
         DETECTED ARCHETYPE: {archetype}\n\
         {module}\n\
         \n\
         {rules}\n\
         - Nothing narrative: contractual content only.\n\
         - Include 2 mandatory Markdown tables:\n\
         (1) \"Phases & Deliverables\" table\n\
         (2) \"RACI\" table (client / provider)\n\
         \n\
         {format}\n\
         - No sections outside the structure.\n\
         \n\
         REQUIRED STRUCTURE:\n\
         \n\
         ## DOCUMENT IDENTIFICATION\n\
         ### Parties\n\
         - Client: {unspecified}\n\
         - Provider: {provider}\n\
         ### Reference & dates\n\
         - Reference: {unspecified}\n\
         - Effective date: {unspecified}\n\
         - Duration: {unspecified}\n\
         \n\
         ## MISSION OBJECTIVE\n\
         - Describe the measurable objective and expected outcome.\n\
         \n\
         ## MISSION SCOPE\n\
         ### Deliverables (exhaustive)\n\
         - List concrete, verifiable deliverables.\n\
         ### Quality requirements\n\
         - Tests / validation / standards (per archetype).\n\
         ### Service limits\n\
         - Hours, channels, volumes, iteration counts, etc.\n\
         \n\
         ## CRITICAL EXCLUSIONS (ANTI SCOPE CREEP)\n\
         - Strict list of what is not included.\n\
         - State explicitly: \"Anything not listed in the scope is out of scope and subject to a Change Request.\"\n\
         \n\
         ## DEPLOYMENT PLAN (PHASES & MILESTONES)\n\
         ### Phases & Deliverables table (mandatory)\n\
         - Markdown table: Phase | Duration | Deliverables | Acceptance criteria | Dependencies\n\
         ### Project governance\n\
         - Kickoff, weekly, demo, acceptance, official communication channel.\n\
         \n\
         ## ACCEPTANCE CRITERIA\n\
         ### General rules\n\
         - How a phase is accepted (report, email validation, max response delay).\n\
         ### Per-deliverable criteria\n\
         - 6-12 concrete criteria (e.g. \"tests passing\", \"documentation delivered\", \"demo validated\").\n\
         \n\
         ## SHARED RESPONSIBILITIES\n\
         ### Client responsibilities\n\
         - Access, data, contacts, validations, equipment, environments.\n\
         ### Provider responsibilities\n\
         - Execution, quality, reporting, security, confidentiality.\n\
         \n\
         ## RACI TABLE (mandatory)\n\
         - Markdown table: Activity | Client | Provider | Comment\n\
         \n\
         ## CHANGE MANAGEMENT (CHANGE REQUEST)\n\
         - Procedure: request -> estimate -> validation -> execution.\n\
         - Cost/delay impact, and bug vs. evolution classification where applicable.\n\
         \n\
         ## RISKS & DEPENDENCIES\n\
         - 5 risks max + mitigation measures.\n\
         - 5 dependencies max + impact.\n\
         \n\
         ## COMMERCIAL TERMS (if applicable)\n\
         - Price: {unspecified}\n\
         - Payment: deposit / milestones / monthly\n\
         - Late payments: penalties ({unspecified} per policy)\n\
         - Suspension: conditions\n\
         \n\
         ## CONFIDENTIALITY & INTELLECTUAL PROPERTY\n\
         - Confidentiality (NDA if applicable).\n\
         - IP: deliverables, sources, licenses, usage rights.\n\
         \n\
         ## SIGNATURES\n\
         - Client: name / role / date / signature\n\
         - Provider: {provider} / date / signature",
        name = project.name,
        country = or_unspecified(project.country.as_deref()),
        currency = or_unspecified(project.currency.as_deref()),
        provider = user.display_name(),
        context = render_context(project, user),
        archetype = archetype.label(),
        module = archetype_module(archetype),
        rules = ANTI_FABRICATION_RULES,
        format = FORMAT_CONTRACT,
        unspecified = UNSPECIFIED,
    )
}
