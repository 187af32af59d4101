//! Business model viability summary builder.
//!
//! Dispatches on the venture-kind classifier rather than the business
//! archetype: a SaaS and an agency in the same domain monetize differently.

use crate::domain::classify::{classify_venture_kind, VentureKind};
use crate::domain::project::{Project, UserProfile};

use super::context::render_context;
use super::rules::{ANTI_FABRICATION_RULES, FORMAT_CONTRACT};

/// Venture-kind module: what changes in the economics analysis.
fn venture_module(kind: VentureKind) -> &'static str {
    match kind {
        VentureKind::Agency => "\
AGENCY ADJUSTMENTS:
- Insist on: target day rate, gross margin, capacity (person-days), scope creep, unpaid invoices.
- Propose 3 offers: Discovery (scoping), Build (delivery), Maintain (support/retainer).
- Add recommended clauses (acceptance, change request, payment, optional SLA).",
        VentureKind::Saas => "\
B2B SAAS ADJUSTMENTS:
- Insist on: MRR, churn, ARPA, gross margin, CAC payback.
- Propose 3 pricing tiers + limits (seats, usage, features).
- Add the retention loop (activation -> usage -> value -> renewal).",
        VentureKind::Marketplace => "\
MARKETPLACE / MATCHING ADJUSTMENTS:
- Insist on: liquidity (match rate), wedge strategy (niche), chicken-and-egg.
- Revenue: take rate, premium subscription, listing fees, services.
- Risks: fraud, disintermediation, supply quality.",
        VentureKind::InternalTool => "\
INTERNAL TOOL ADJUSTMENTS:
- Replace \"revenue\" with ROI: time saved, errors reduced, risks reduced.
- Include: change management, adoption, 30/90/180-day KPIs.
- Compare build vs. buy (total cost of ownership).",
        VentureKind::Impact => "\
IMPACT / NONPROFIT ADJUSTMENTS:
- Include: theory of change, impact measurement, funder dependency.
- Hybrid revenue: grants, partnerships, services, sponsorship.
- Governance & transparency: reporting, compliance, reputation.",
        VentureKind::Unknown => "\
UNKNOWN-KIND ADJUSTMENTS:
- Stay on the minimal structure.
- Ask questions to classify the project (agency vs. SaaS vs. marketplace vs. internal vs. impact).",
    }
}

pub(super) fn build(project: &Project, user: &UserProfile) -> String {
    let kind = classify_venture_kind(&project.venture_fields());

    format!(
        "You are an expert in lean business design and economic modeling.\n\
         Analyze the viability of \"{name}\" in an analytical, cold, profitability-first style.\n\
         \n\
         {context}\n\
         \n\
         {rules}\n\
         - If information is missing, write \"to be specified\" and propose 3 questions.\n\
         \n\
         {format}\n\
         \n\
         DETECTED VENTURE KIND: {kind}\n\
         {module}\n\
         \n\
         MINIMAL STRUCTURE (common):\n\
         ## 0. Assumptions & missing data\n\
         - Assumptions (max 7)\n\
         - Missing data + questions\n\
         \n\
         ## 1. Revenue (how money comes in)\n\
         - Offers/prices (max 3)\n\
         - Recurring vs. one-off\n\
         - Upsells & options\n\
         \n\
         ## 2. Costs & burn (how we survive)\n\
         - Fixed vs. variable\n\
         - Monthly burn MIN/LIKELY/MAX\n\
         - Break-even (order of magnitude)\n\
         \n\
         ## 3. Acquisition / GTM (how we sell)\n\
         - 3 priority channels + why\n\
         - CAC MIN/LIKELY/MAX\n\
         - Sales cycle + minimal pipeline\n\
         \n\
         ## 4. Defensible advantage (moat)\n\
         - What is durable\n\
         - What is copyable + protection\n\
         \n\
         ## 5. Verdict\n\
         - Score /100 + justification\n\
         - Top 5 risks + mitigations",
        name = project.name,
        context = render_context(project, user),
        rules = ANTI_FABRICATION_RULES,
        format = FORMAT_CONTRACT,
        kind = kind.label(),
        module = venture_module(kind),
    )
}
