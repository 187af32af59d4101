//! Two-minute oral pitch script builder.

use crate::domain::classify::Archetype;
use crate::domain::project::{Project, UserProfile};

use super::context::{or_unspecified, render_context};
use super::rules::ANTI_FABRICATION_RULES;

/// Archetype module: the pitch angle for each business category.
fn archetype_module(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::DevDelivery => "\
PITCH ANGLE - ENGINEERING DELIVERY:
- Pain: late projects, bugs, technical debt, hidden costs.
- Promise: disciplined delivery, measured quality, reduced time-to-value.
- Cash mechanics: packages (Discovery/Build/Maintain), retainer, SLA.
- Scalable: component reuse + playbooks + industrialization.",
        Archetype::DataAi => "\
PITCH ANGLE - DATA/AI:
- Pain: blind decisions, slow reporting, dirty data.
- Promise: reliable pipelines + dashboards + useful AI (not gadgets).
- Cash: implementation + data ops/monitoring subscription + model upsell.
- Scalable: pipeline templates + connectors + governance methodology.",
        Archetype::Cybersecurity => "\
PITCH ANGLE - CYBERSECURITY:
- Pain: exploding risk, expensive incidents, low maturity.
- Promise: prevention/detection/response with process + evidence + confidentiality.
- Cash: audits, pentests, managed SOC, recurring GRC.
- Scalable: runbooks + tooling + maturity-tiered packaged offers.",
        Archetype::MarketingComm => "\
PITCH ANGLE - MARKETING/COMMUNICATION:
- Pain: high CAC, content that does not convert, fragile tracking.
- Promise: measured performance + creative that sells + brand safety.
- Cash: retainer + campaigns + production + performance bonus (where applicable).
- Scalable: test-and-learn system + creative templates + data.",
        Archetype::DesignBranding => "\
PITCH ANGLE - DESIGN/BRANDING:
- Pain: mediocre UX, weak adoption, inconsistent brand.
- Promise: design system + conversion- and adoption-oriented UX.
- Cash: UX audit, redesign, recurring design ops.
- Scalable: reusable design system + research-to-delivery process.",
        Archetype::ConsultingStrategy => "\
PITCH ANGLE - CONSULTING/STRATEGY:
- Pain: slow organization, fuzzy decisions, chaotic execution.
- Promise: diagnostic -> plan -> steering -> transfer, no fluff.
- Cash: scoped missions + recurring PMO.
- Scalable: frameworks + assets + playbooks + verticalization.",
        Archetype::TrainingEdtech => "\
PITCH ANGLE - TRAINING/EDTECH:
- Pain: theoretical training, weak employability.
- Promise: project-based track + portfolio + coaching.
- Cash: cohorts + B2B + content subscriptions.
- Scalable: modular content + platforms + mentors.",
        Archetype::HrRecruiting => "\
PITCH ANGLE - HR/RECRUITING:
- Pain: long time-to-hire, bad matching, churn.
- Promise: strict qualification + smart matching + follow-up.
- Cash: fees + company subscriptions.
- Scalable: scoring + process + network.",
        Archetype::Unknown => "\
PITCH ANGLE - UNKNOWN:
- Stay generic and insert \"to be specified\" where needed.",
    }
}

pub(super) fn build(project: &Project, user: &UserProfile, archetype: Archetype) -> String {
    format!(
        "You are an expert in strategic narration and executive pitching.\n\
         Write a 2-minute ORAL pitch script (roughly 260 to 320 words), timed, fluid to say out loud. No needless jargon.\n\
         \n\
         PROJECT: {name}\n\
         FOUNDER: {founder}\n\
         COUNTRY: {country}\n\
         VISION: {vision}\n\
         \n\
         {context}\n\
         \n\
         DETECTED ARCHETYPE: {archetype}\n\
         {module}\n\
         \n\
         {rules}\n\
         - Use \"to be specified\" at most 3 times in the script.\n\
         - No unrealistic promises (\"infinitely scalable\"); prefer \"scalable through standardization\".\n\
         \n\
         FORMAT INSTRUCTIONS:\n\
         - Use the \"## \" section titles exactly as listed below.\n\
         - Under each timecode, write 2 to 5 sentences max.\n\
         - Add tone annotations in brackets: [Pause], [Smile], [Slow down], [Speed up], [Emphasize].\n\
         - End with a clear CTA: \"I want X from you\" (e.g. intro, meeting, partnership, pilot budget).\n\
         \n\
         REQUIRED STRUCTURE:\n\
         ## 00:00 - THE HOOK\n\
         ## 00:30 - THE CONTRAST (before vs. after)\n\
         ## 01:00 - THE VALUE MECHANICS\n\
         ## 01:45 - THE CALL TO ACTION\n\
         \n\
         MANDATORY BONUS (one line each):\n\
         ### Ultra-short variant (20 seconds)",
        name = project.name,
        founder = user.display_name(),
        country = or_unspecified(project.country.as_deref()),
        vision = or_unspecified(project.main_goal.as_deref()),
        context = render_context(project, user),
        archetype = archetype.label(),
        module = archetype_module(archetype),
        rules = ANTI_FABRICATION_RULES,
    )
}
