//! Formal legal document builder (founders' agreement, draft articles,
//! service contract).
//!
//! Shared by the three legal kinds: only the mandatory clause skeleton
//! changes. Unlike the other builders, legal documents also embed a recent
//! excerpt of the mentor transcript, since negotiated specifics (splits,
//! vesting, terms) usually live in the conversation rather than the project
//! fields.

use crate::domain::project::{DocumentKind, Project, UserProfile};

use super::context::or_unspecified;

/// Transcript excerpt embedded in the instruction. Bounded so a long
/// mentorship cannot blow the context window.
const HISTORY_TAIL: usize = 10;
const HISTORY_MAX_CHARS: usize = 12_000;

/// Mandatory clause skeleton per legal kind.
fn clause_skeleton(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::FoundersAgreement => "\
Preamble, Purpose, Governance (decisions, committee), Share transfers (pre-emption right, \
approval clause, lock-up), Exit (tag-along, drag-along), General provisions.",
        DocumentKind::ArticlesDraft => "\
Company name, Corporate purpose, Registered office, Duration, Contributions, Share capital, \
Shares, Management, General meetings, Fiscal year, Liquidation.",
        DocumentKind::ServiceContract => "\
Contract purpose, Description of services, Price and payment terms, Provider obligations, \
Client obligations, Intellectual property, Confidentiality, Termination, Governing law.",
        // The dispatch in `build_prompt` only routes legal kinds here.
        _ => "",
    }
}

fn transcript_excerpt(project: &Project) -> String {
    let tail: Vec<&str> = project
        .history
        .iter()
        .rev()
        .take(HISTORY_TAIL)
        .map(|m| m.text.as_str())
        .collect();

    let mut joined = tail
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join(" ");

    if joined.len() > HISTORY_MAX_CHARS {
        let mut cut = HISTORY_MAX_CHARS;
        while !joined.is_char_boundary(cut) {
            cut -= 1;
        }
        joined.truncate(cut);
        joined.push_str("\n\n[TRUNCATED]");
    }

    if joined.is_empty() {
        "none yet".to_string()
    } else {
        joined
    }
}

pub(super) fn build(kind: DocumentKind, project: &Project, user: &UserProfile) -> String {
    let partners = project
        .collaborator_roster()
        .unwrap_or_else(|| "none (solo founder)".to_string());

    format!(
        "Act as a senior legal expert. Draft an extremely formal and structured \"{title}\".\n\
         \n\
         PARTNERS / COLLABORATORS TO INCLUDE AS PARTIES:\n\
         - Founder: {founder}\n\
         - Partners: {partners}\n\
         \n\
         MANDATORY STRUCTURE TO FOLLOW:\n\
         {skeleton}\n\
         \n\
         DRAFTING RULES:\n\
         - Use exclusively a structure of numbered ARTICLES (ARTICLE 1, ARTICLE 2, ...).\n\
         - The text must be dense, precise, and use the legal vocabulary of {country}.\n\
         - If information is missing, leave an explicit blank field: [TO BE COMPLETED].\n\
         - Do not include any personal commentary, only the text of the document.\n\
         - Add a signature block for ALL partners at the end.\n\
         \n\
         PROJECT CONTEXT:\n\
         - Name: {name}\n\
         - Country: {country}\n\
         - Activity: {activity}\n\
         - Specifics discussed with the mentor: {excerpt}",
        title = kind.title(),
        founder = user.display_name(),
        partners = partners,
        skeleton = clause_skeleton(kind),
        country = or_unspecified(project.country.as_deref()),
        name = project.name,
        activity = or_unspecified(project.offer.as_deref()),
        excerpt = transcript_excerpt(project),
    )
}
