//! Offers & pricing architecture builder.
//!
//! The only builder that dispatches on two classifiers: the business
//! archetype decides what to package, the revenue-model shape decides how to
//! charge for it.

use crate::domain::classify::{classify_revenue_model, Archetype, RevenueModel};
use crate::domain::project::{Project, UserProfile};

use super::context::{or_unspecified, render_context};
use super::rules::{ANTI_FABRICATION_RULES, FORMAT_CONTRACT};

/// Archetype module: what to package and how to price it.
fn archetype_module(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::DevDelivery => "\
PRICING PATTERNS - ENGINEERING DELIVERY:
- Recommended packs: Discovery (scoping) / Build (delivery) / Maintain (support).
- Units: fixed price per deliverable + day-rate option for out-of-scope changes.
- Add-ons: SLA, monitoring, security, performance, hosting, 24/7 support.
- Safeguards: mandatory Change Request, acceptance sign-off, liability limits.",
        Archetype::DataAi => "\
PRICING PATTERNS - DATA/AI:
- Structure: implementation (pipeline setup) + \"Data Ops\" subscription (monitoring/quality).
- Units: connectors, sources, dashboards, models, data volume, refresh frequency.
- Add-ons: MLOps/monitoring, governance, data catalog, training, SLA.
- Risks: data scope drift, source quality; plan a \"Data Readiness Pack\".",
        Archetype::Cybersecurity => "\
PRICING PATTERNS - CYBERSECURITY:
- Structure: audit/pentest (one-off) + SOC/monitoring (recurring) + GRC (recurring).
- Units: perimeter (assets), test windows, depth (black/grey/white box), reports.
- Add-ons: re-test, vulnerability management, runbooks, awareness training.
- Safeguards: rules of engagement, strict perimeter, reinforced confidentiality.",
        Archetype::MarketingComm => "\
PRICING PATTERNS - MARKETING/COMMUNICATION:
- Structure: setup (strategy + tracking) + retainer (execution) + media budget (billed separately).
- Units: channels, creative volume, reporting cadence, landing pages, automation.
- Add-ons: shoots, influencer work, brand safety, CRO, emailing.
- Safeguards: best-efforts obligation, defined KPIs, account access requirements.",
        Archetype::DesignBranding => "\
PRICING PATTERNS - DESIGN/BRANDING:
- Structure: UX/brand audit (one-off) + redesign/design system (project) + design ops (monthly).
- Units: screens, journeys, components, iteration count, source deliverables.
- Add-ons: accessibility, user testing, guidelines, marketing templates.",
        Archetype::ConsultingStrategy => "\
PRICING PATTERNS - CONSULTING/STRATEGY:
- Structure: diagnostic (one-off) + target plan (one-off) + steering (monthly/PMO).
- Units: workshops, deliverables, organization size, complexity, committee cadence.
- Add-ons: training, coaching, implementation, KPIs/OKRs.",
        Archetype::TrainingEdtech => "\
PRICING PATTERNS - TRAINING/EDTECH:
- Structure: cohorts (per learner) + B2B (per team) + content subscription (monthly).
- Units: hours, level, projects, mentoring, assessments/certifications.
- Add-ons: placement, hackathons, premium materials, LMS.",
        Archetype::HrRecruiting => "\
PRICING PATTERNS - HR/RECRUITING:
- Structure: placement fees + sourcing/matching subscription + success fee.
- Units: seniority, scarcity, deadline, hiring volume.
- Add-ons: onboarding, assessment, background checks.",
        Archetype::Unknown => "\
PRICING PATTERNS - UNKNOWN:
- Propose 2 architectures: (A) project fixed price + options, (B) monthly retainer.
- Require the minimum variables (costs, capacity, target, value created).",
    }
}

pub(super) fn build(project: &Project, user: &UserProfile, archetype: Archetype) -> String {
    let revenue_model = classify_revenue_model(&project.revenue_fields());
    build_with_revenue_model(project, user, archetype, revenue_model)
}

fn build_with_revenue_model(
    project: &Project,
    user: &UserProfile,
    archetype: Archetype,
    revenue_model: RevenueModel,
) -> String {
    format!(
        "You are a revenue-strategy engineer (B2B/B2C pricing) specialized in offer packaging.\n\
         Your mission: produce a directly sellable Offers & Pricing architecture.\n\
         \n\
         PROJECT: {name}\n\
         COUNTRY: {country}\n\
         CURRENCY: {currency}\n\
         ARCHETYPE: {archetype}\n\
         REVENUE MODEL: {revenue_model}\n\
         \n\
         {context}\n\
         \n\
         {rules}\n\
         - Never invent \"market prices\" or country statistics if not provided.\n\
         - All figures in the requested currency, as MIN / LIKELY / MAX ranges.\n\
         - Add a section \"Assumptions & variables to confirm\" (max 10 points).\n\
         \n\
         {module}\n\
         \n\
         {format}\n\
         - Include at least 2 comparative Markdown tables:\n\
         1) Packs table (Starter/Flagship/Premium): features + limits + price\n\
         2) Add-ons table: item + price + trigger (when it applies)\n\
         \n\
         REQUIRED STRUCTURE:\n\
         \n\
         ## ANCHORING STRATEGY\n\
         ### Positioning & promise\n\
         - Anchor against the cost of the problem (losses, risks, time, image)\n\
         - \"Why this is an investment\": 3 quantifiable arguments (estimates allowed)\n\
         ### Price policy (rules)\n\
         - Discounts (if allowed), conditions, late penalties, deposit\n\
         \n\
         ## ASSUMPTIONS & VARIABLES TO CONFIRM\n\
         - 7 to 10 bullets: costs, volume, scope, deadlines, service level, etc.\n\
         \n\
         ## STARTER PACK (entry level)\n\
         ### Who it is for\n\
         ### Included\n\
         ### Limits (anti scope creep)\n\
         ### Price (MIN/LIKELY/MAX) + unit (per project / month / day / user)\n\
         \n\
         ## FLAGSHIP PACK (the 80/20 offer)\n\
         ### Who it is for\n\
         ### Included\n\
         ### Limits\n\
         ### Price (MIN/LIKELY/MAX) + unit\n\
         ### Expected ROI (phrased honestly)\n\
         \n\
         ## PREMIUM PACK (enterprise)\n\
         ### Who it is for\n\
         ### Included (VIP, SLA, governance, security, reporting)\n\
         ### Limits / prerequisites\n\
         ### Price (MIN/LIKELY/MAX) + unit\n\
         \n\
         ## PACK COMPARISON TABLE\n\
         - Clear Markdown table (features as rows, packs as columns)\n\
         \n\
         ## ADD-ONS (upsells)\n\
         - At least 8 relevant add-ons for this archetype\n\
         - Give price + trigger + value\n\
         \n\
         ## COMMERCIAL TERMS\n\
         - Payment: deposit / milestones / monthly\n\
         - Price revision (simple indexation)\n\
         - Commitment duration (if retainer/saas)\n\
         - Change Request clause (if project-based)\n\
         \n\
         ## MARGIN MECHANICS (simple and honest)\n\
         - Estimate delivery cost (hours/days) + target margin\n\
         - Calculation: Price = Cost / (1 - margin), with one worked example\n\
         - Give 3 scenarios (small/medium/large client)\n\
         \n\
         ## OBJECTIONS & ANSWERS (sales battlecard)\n\
         - 6 typical objections + short, factual, protective answers\n\
         \n\
         CONSTRAINT: the result must be applicable in \"{country}\" in currency \"{currency}\", without inventing a \"market\" if none was provided.",
        name = project.name,
        country = or_unspecified(project.country.as_deref()),
        currency = or_unspecified(project.currency.as_deref()),
        archetype = archetype.label(),
        revenue_model = revenue_model.label(),
        context = render_context(project, user),
        rules = ANTI_FABRICATION_RULES,
        module = archetype_module(archetype),
        format = FORMAT_CONTRACT,
    )
}
