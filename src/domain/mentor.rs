//! Mentor conversation session.
//!
//! An explicit, caller-owned session object: created for one project, passed
//! by handle to whoever drives the conversation, dropped on teardown. The
//! personalized system instruction is built once at opening from the user
//! profile and project; the session then accumulates the role-tagged
//! exchange that the distiller later reads.

use super::project::{ChatMessage, PlanSection, Project, UserProfile};
use super::prompt::or_unspecified;

/// Bootstrap message that elicits the mentor's opening reply.
pub const SESSION_BOOTSTRAP: &str =
    "Systems online. Initialize the mentoring session from my project details.";

/// Behavior contract for the mentor, independent of any one project.
const MENTOR_CHARTER: &str = "\
You are a sharp, strategic business mentor.
Your mission is to guide the entrepreneur through a precise venture-building workflow.

WORKFLOW:
1. Foundations & Idea
2. Market & Audience
3. Business Model
4. Legal Structure
5. Finance & ROI
6. Marketing & Expansion

IMPORTANT:
The entrepreneur already provided their project details during onboarding.
DO NOT ask again what they want to build.
Analyze what you received and open directly with a critical assessment or a probing question on step 1 (Foundations & Idea).

BEHAVIOR:
- Be direct; ask precise questions that fill the plan's gaps.
- If the project has collaborators, weave them into your strategic advice (role split, team management).
- If the entrepreneur focuses on one step, concentrate on it.
- Check whether you have enough information (problem, solution, customer profile, competitors, revenue, costs, legal status, channels).
- When a section looks more than 80% complete, congratulate them and suggest moving to the next step.";

/// A mentor conversation session for one project.
#[derive(Debug, Clone)]
pub struct MentorSession {
    system_instruction: String,
    history: Vec<ChatMessage>,
}

impl MentorSession {
    /// Opens a session with a system instruction personalized from the
    /// project and user profile.
    pub fn open(project: &Project, user: &UserProfile) -> Self {
        let crew = project
            .collaborator_roster()
            .unwrap_or_else(|| "solo founder".to_string());

        let system_instruction = format!(
            "{charter}\n\
             \n\
             --- MISSION CONTEXT ---\n\
             Entrepreneur: {entrepreneur}\n\
             Crew / partners: {crew}\n\
             Location: {location}\n\
             Project name: {name}\n\
             Offer: {offer}\n\
             CONCEPT / IDEA: \"{concept}\"\n\
             -----------------------\n\
             \n\
             Instructions for your first message:\n\
             1. Greet the entrepreneur briskly.\n\
             2. Confirm you received their project details: \"{concept}\".\n\
             3. If the crew has collaborators, acknowledge that the team is ready.\n\
             4. Give one quick viability impression or a major challenge of their sector.\n\
             5. Ask one specific question to validate the problem the idea solves.",
            charter = MENTOR_CHARTER,
            entrepreneur = user.display_name(),
            crew = crew,
            location = or_unspecified(project.country.as_deref()),
            name = project.name,
            offer = or_unspecified(project.offer.as_deref()),
            concept = or_unspecified(project.main_goal.as_deref()),
        );

        Self {
            system_instruction,
            history: Vec::new(),
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// The session's exchange so far, oldest first.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Records a message on the session timeline.
    pub fn record(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// Focus prompt sent when the user clicks a workflow step.
    pub fn focus_prompt(section: PlanSection) -> String {
        format!(
            "Focus on the \"{}\" step. Assess where we stand and ask what you still need.",
            section.title()
        )
    }
}
