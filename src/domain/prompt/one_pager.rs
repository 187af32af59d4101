//! Concept one-pager builder.

use crate::domain::classify::Archetype;
use crate::domain::project::{Project, UserProfile};

use super::context::{or_unspecified, render_context};
use super::rules::{ANTI_FABRICATION_RULES, FORMAT_CONTRACT};

/// Archetype module: angles woven into the one-pager sections.
fn archetype_module(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::DevDelivery => "\
ENGINEERING-DELIVERY ANGLES (integrate into the sections):
- Market fracture: delays, quality debt, hidden costs, missing delivery discipline.
- Thesis: margin through packaging (Discovery/Build/Maintain), recurring revenue via retainer/SLA, standardization.
- Moat: delivery playbooks, QA gates, reusable components, execution speed, portfolio proof.
- Architecture: process + stack + governance + security by default.",
        Archetype::DataAi => "\
DATA/AI ANGLES:
- Fracture: decisions without reliable data, silos, slow reporting, cost of errors.
- Thesis: ROI gains (time, error reduction, performance), recurring revenue via data ops/monitoring, AI upsell.
- Moat: data governance, robust pipelines, quality and lineage, domain expertise, security.
- Architecture: ingestion -> transformation -> BI/AI -> monitoring -> adoption.",
        Archetype::Cybersecurity => "\
CYBERSECURITY ANGLES:
- Fracture: rising risk, low maturity, client and partner requirements, costly incidents.
- Thesis: recurring revenue (SOC, audits, GRC), value = risk reduction + compliance.
- Moat: methodology, rules of engagement, tooling, credibility, evidence process, confidentiality.
- Architecture: prevention -> detection -> response -> improvement (SOPs/runbooks).",
        Archetype::MarketingComm => "\
MARKETING/COMMUNICATION ANGLES:
- Fracture: exploding CAC, unstable tracking, generic content, weak conversion.
- Thesis: performance (ROAS, qualified leads), recurrence (retainer), differentiation via data and brand safety.
- Moat: creative + data framework, test-and-learn process, asset ownership, vertical expertise.
- Architecture: strategy -> creation -> distribution -> measurement -> iteration.",
        Archetype::DesignBranding => "\
DESIGN/BRANDING ANGLES:
- Fracture: neglected user experience, inconsistent brand, weak conversion.
- Thesis: measurable impact (conversion, adoption, reduced support), recurrence via design ops.
- Moat: design system, UX quality, accessibility, methodology, prototyping speed.
- Architecture: research -> design system -> delivery -> UX QA.",
        Archetype::ConsultingStrategy => "\
CONSULTING/STRATEGY ANGLES:
- Fracture: slow organizations, unmastered processes, decisions without governance.
- Thesis: value = lower costs and delays + better execution, recurrence via PMO/ops.
- Moat: frameworks, governance, alignment capability, decisions that get applied.
- Architecture: diagnostic -> target design -> plan -> steering -> transfer.",
        Archetype::TrainingEdtech => "\
TRAINING/EDTECH ANGLES:
- Fracture: skills gap, theoretical training, weak employability.
- Thesis: revenue from cohorts + B2B, recurrence via content subscriptions + coaching.
- Moat: project-based pedagogy, proprietary content, assessment, community, partnerships.
- Architecture: curriculum -> projects -> assessment -> certification/portfolio.",
        Archetype::HrRecruiting => "\
HR/RECRUITING ANGLES:
- Fracture: talent shortage, slow hiring, poor matching, churn.
- Thesis: fees + subscriptions, value = reduced time-to-hire + matching quality.
- Moat: network, process, scoring, compliance, candidate experience.
- Architecture: sourcing -> qualification -> matching -> follow-up.",
        Archetype::Unknown => "\
UNKNOWN-ARCHETYPE ANGLES:
- Stay generic and place targeted \"to be specified\" markers (audience, offer, model, differentiation, proof).",
    }
}

pub(super) fn build(project: &Project, user: &UserProfile, archetype: Archetype) -> String {
    format!(
        "You are a senior strategy partner. Write an institutional \"Concept One-Pager\" at executive-summary grade.\n\
         \n\
         PROJECT: {name}\n\
         COUNTRY: {country}\n\
         VISION: {vision}\n\
         \n\
         {context}\n\
         \n\
         {rules}\n\
         - One-pager objective: roughly 450-650 words, incisive, no embellishment.\n\
         \n\
         {format}\n\
         - Each section: 4 to 6 bullets max. Each sub-section: 2 to 4 bullets max.\n\
         \n\
         DETECTED ARCHETYPE: {archetype}\n\
         {module}\n\
         \n\
         REQUIRED STRUCTURE:\n\
         \n\
         ## STRATEGIC RATIONALE\n\
         ### Market fracture in {country}\n\
         ### Why now\n\
         ### What happens if nothing is done\n\
         \n\
         ## INVESTMENT THESIS\n\
         ### Profitability levers (unit economics)\n\
         ### Barriers to entry\n\
         ### Defensible competitive advantage\n\
         \n\
         ## SOLUTION ARCHITECTURE\n\
         ### How the solution works\n\
         ### What concretely changes for the client (before/after)\n\
         ### Major risks & counters (3 max)\n\
         \n\
         ## OPERATIONAL ROADMAP\n\
         ### Milestone 1 (Month 3): core infrastructure\n\
         ### Milestone 2 (Month 6): acquisition / delivery\n\
         ### Milestone 3 (Month 12): break-even & scale\n\
         ### Points to clarify (if any)",
        name = project.name,
        country = or_unspecified(project.country.as_deref()),
        vision = or_unspecified(project.main_goal.as_deref()),
        context = render_context(project, user),
        rules = ANTI_FABRICATION_RULES,
        format = FORMAT_CONTRACT,
        archetype = archetype.label(),
        module = archetype_module(archetype),
    )
}
