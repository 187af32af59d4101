//! Ethics charter builder.

use crate::domain::classify::Archetype;
use crate::domain::project::{Project, UserProfile};

use super::context::{or_unspecified, render_context};
use super::rules::FORMAT_CONTRACT;

/// Archetype module: the clauses each kind of organization must carry.
fn archetype_module(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::DevDelivery => "\
SPECIFIC MODULE - ENGINEERING DELIVERY:
Add explicit clauses on:
- Intellectual property: code, licenses, reusable components, open source.
- Project confidentiality: repositories, access, environments, secrets.
- Delivery quality: definition of done, minimum tests, mandatory code review, traceability.
- Scope and change control: no undocumented change, written validation, cost/delay impact.
- Baseline security: secrets handling, least privilege.",
        Archetype::DataAi => "\
SPECIFIC MODULE - DATA/AI:
Add explicit clauses on:
- Data governance: minimization, purpose, retention, anonymization/pseudonymization.
- Prohibitions: sensitive data in public AI tools, unauthorized training on client data.
- Bias & fairness: bias tests, human validation, proportionate explainability.
- Traceability: sources, data lineage, dataset/model versioning.
- Security: dataset access, encryption at rest and in transit, environment separation.",
        Archetype::Cybersecurity => "\
SPECIFIC MODULE - CYBERSECURITY:
Add explicit clauses on:
- \"Do no harm\": rules of engagement, written authorizations, strict perimeter.
- Chain of evidence: action logging, secure evidence storage.
- Responsible disclosure: deadlines, coordination, no public exposure.
- Temporary access management: rotation, revocation, nominative accounts.
- Conflicts of interest: no auditing of systems we administer without safeguards.",
        Archetype::MarketingComm => "\
SPECIFIC MODULE - MARKETING/COMMUNICATION:
Add explicit clauses on:
- Advertising truth: no manipulation, no fake reviews, no dark patterns.
- Data & tracking: consent, transparency, minimization, audience respect.
- Brand safety: sensitive content, hate speech, disinformation — zero tolerance.
- Intellectual property: rights for visuals, music, content, stock libraries.
- Influencer relations: partnership transparency, mandatory disclosures.",
        Archetype::DesignBranding => "\
SPECIFIC MODULE - DESIGN/BRANDING:
Add explicit clauses on:
- Originality: no plagiarism, no \"copy of a competitor\".
- Licenses: fonts, icons, assets, source deliverables and usage rights.
- Accessibility: contrast, readability, inclusivity.
- Confidentiality: prototypes, NDAs, portfolio publication subject to consent.",
        Archetype::ConsultingStrategy => "\
SPECIFIC MODULE - CONSULTING/STRATEGY:
Add explicit clauses on:
- Independence & objectivity: no recommendations biased by hidden commissions.
- Transparency of assumptions: limits, uncertainties, data used.
- Confidentiality and need-to-know.
- Anti-conflict of interest: systematic declaration.",
        Archetype::TrainingEdtech => "\
SPECIFIC MODULE - TRAINING/EDTECH:
Add explicit clauses on:
- Pedagogical fairness: no unrealistic promises (\"guaranteed job\").
- Assessment: transparent criteria, anti-cheating, learner data respect.
- Content: license compliance, no piracy, cited sources.
- Minor safety where applicable + trainer/learner conduct.",
        Archetype::HrRecruiting => "\
SPECIFIC MODULE - HR/RECRUITING:
Add explicit clauses on:
- Non-discrimination: professional criteria only, bias audits.
- Candidate data: consent, retention duration, access and deletion.
- Transparency: no CV resale without consent, no systemic ghosting.
- Client/candidate confidentiality: strict separation.",
        Archetype::Unknown => "\
SPECIFIC MODULE - UNKNOWN:
Add a qualification section:
- What is the model: service, product, audit, data?
- What data is handled?
- What are the major risks: reputation, security, legal, human?",
    }
}

pub(super) fn build(project: &Project, user: &UserProfile, archetype: Archetype) -> String {
    let country = or_unspecified(project.country.as_deref());

    format!(
        "You are a chief ethics & governance officer. Write the Ethics Charter of \"{name}\".\n\
         Style: solemn, inspiring, founding — but operational and applicable.\n\
         \n\
         {context}\n\
         \n\
         CHARTER RULES:\n\
         - Never invent a certification, law or label that was not provided.\n\
         - Each theme contains: Allowed / Forbidden / Expected.\n\
         - Include: \"Reporting & sanctions\" and \"Non-retaliation\".\n\
         \n\
         {format}\n\
         \n\
         DETECTED ORGANIZATION TYPE: {archetype}\n\
         {module}\n\
         \n\
         REQUIRED STRUCTURE:\n\
         ## 0. Preamble\n\
         ## 1. Our fundamental pillars (3 non-negotiable values)\n\
         ## 2. Commitment to the territory ({country})\n\
         ## 3. Code of conduct & integrity (internal + external)\n\
         ## 4. Technological responsibility (AI, data, security)\n\
         ## 5. Client commitment & quality\n\
         ## 6. Reporting, investigations and sanctions\n\
         ## 7. Acceptance & updates (versioning)\n\
         ## Appendix: ethics checklist (10 questions)",
        name = project.name,
        context = render_context(project, user),
        format = FORMAT_CONTRACT,
        archetype = archetype.label(),
        module = archetype_module(archetype),
        country = country,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn every_archetype_has_a_module() {
        for archetype in Archetype::ALL {
            assert!(!archetype_module(archetype).is_empty());
        }
    }

    #[test]
    fn charter_skeleton_is_numbered_through_appendix() {
        let user = UserProfile::new(UserId::new("u-1").unwrap(), "Lina", "France");
        let mut project = Project::new(user.id.clone(), "Atlas Studio");
        project.country = Some("Senegal".to_string());

        let prompt = build(&project, &user, Archetype::HrRecruiting);
        assert!(prompt.contains("## 0. Preamble"));
        assert!(prompt.contains("## 2. Commitment to the territory (Senegal)"));
        assert!(prompt.contains("## Appendix: ethics checklist (10 questions)"));
        assert!(prompt.contains("SPECIFIC MODULE - HR/RECRUITING"));
    }
}
