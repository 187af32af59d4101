//! Refinement session - conversational editing of one generated document.
//!
//! A session owns the current content of one document and the ephemeral turn
//! history of its refinement dialog. Each turn walks the state machine
//! `Idle -> AwaitingModel -> Idle`; the failure edge returns to `Idle`
//! carrying a fallback message and the content untouched.
//!
//! Two invariants:
//! - `updated_content` is always a complete replacement of the document,
//!   never a diff, so retries and turn reordering cannot produce partial
//!   application.
//! - At most one turn is in flight per session (single-writer). A second
//!   `begin_turn` while a turn is outstanding is rejected, never interleaved:
//!   both turns would read-then-write the same content baseline and a race
//!   would silently discard one turn's effect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::project::{DocumentKind, MessageRole};
use super::schema::ResponseSchema;

/// Generic apology returned when a turn cannot be applied. The document
/// content is never discarded on a failed turn.
pub const REFINEMENT_APOLOGY: &str =
    "I ran into an issue while analyzing that. Could you rephrase your instruction?";

/// Session states. One terminal cycle per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefineState {
    /// Ready to accept a turn.
    Idle,
    /// A turn is in flight; the content baseline is locked.
    AwaitingModel,
}

/// One user-instruction/model-response exchange, kept in memory for the
/// duration of the session only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineTurn {
    pub role: MessageRole,
    pub text: String,
}

/// Result of one refinement turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineOutcome {
    /// Dialog message for the user.
    pub assistant_message: String,
    /// The full document content after the turn (unchanged on failure).
    pub updated_content: String,
    /// True when the turn fell back because of a gateway or decode failure.
    pub degraded: bool,
}

/// Refinement errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefineError {
    #[error("a refinement turn is already in flight for this document")]
    TurnInFlight,

    #[error("no refinement turn is in flight")]
    NoTurnInFlight,
}

/// The structured reply contract for a refinement turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineReply {
    pub assistant_message: String,
    pub updated_content: String,
}

/// Stateful refinement loop over one document.
#[derive(Debug, Clone)]
pub struct RefineSession {
    kind: DocumentKind,
    content: String,
    turns: Vec<RefineTurn>,
    state: RefineState,
    pending_instruction: Option<String>,
}

impl RefineSession {
    /// Opens a session over the document's current content.
    pub fn open(kind: DocumentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            turns: Vec::new(),
            state: RefineState::Idle,
            pending_instruction: None,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn state(&self) -> RefineState {
        self.state
    }

    /// The document content as of the last completed turn.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The accumulated turn history.
    pub fn turns(&self) -> &[RefineTurn] {
        &self.turns
    }

    /// The response shape every refinement turn requests: exactly two
    /// required string fields.
    pub fn response_schema() -> ResponseSchema {
        ResponseSchema::object()
            .with_required_property(
                "assistant_message",
                ResponseSchema::string()
                    .with_description("Direct dialog message to the user (advice, questions, confirmation)."),
            )
            .with_required_property(
                "updated_content",
                ResponseSchema::string().with_description(
                    "The complete document content (markdown), updated if needed.",
                ),
            )
    }

    /// Starts a turn: locks the baseline and returns the composed
    /// refinement instruction.
    ///
    /// Rejects with [`RefineError::TurnInFlight`] while a turn is
    /// outstanding.
    pub fn begin_turn(&mut self, instruction: impl Into<String>) -> Result<String, RefineError> {
        if self.state == RefineState::AwaitingModel {
            return Err(RefineError::TurnInFlight);
        }

        let instruction = instruction.into();
        let prompt = self.compose_instruction(&instruction);
        self.pending_instruction = Some(instruction);
        self.state = RefineState::AwaitingModel;
        Ok(prompt)
    }

    /// Applies a validated reply: replaces the content wholesale, records the
    /// turn pair, returns to `Idle`.
    pub fn complete_turn(&mut self, reply: RefineReply) -> Result<RefineOutcome, RefineError> {
        let instruction = self.take_pending()?;

        self.content = reply.updated_content.clone();
        self.push_turn_pair(instruction, reply.assistant_message.clone());

        Ok(RefineOutcome {
            assistant_message: reply.assistant_message,
            updated_content: reply.updated_content,
            degraded: false,
        })
    }

    /// Failure edge: gateway error or unparsable payload. The content stays
    /// exactly as it was; the user gets an apology and can simply retry.
    pub fn fail_turn(&mut self) -> Result<RefineOutcome, RefineError> {
        let instruction = self.take_pending()?;

        self.push_turn_pair(instruction, REFINEMENT_APOLOGY.to_string());

        Ok(RefineOutcome {
            assistant_message: REFINEMENT_APOLOGY.to_string(),
            updated_content: self.content.clone(),
            degraded: true,
        })
    }

    fn take_pending(&mut self) -> Result<String, RefineError> {
        if self.state != RefineState::AwaitingModel {
            return Err(RefineError::NoTurnInFlight);
        }
        self.state = RefineState::Idle;
        Ok(self
            .pending_instruction
            .take()
            .unwrap_or_default())
    }

    fn push_turn_pair(&mut self, instruction: String, reply: String) {
        self.turns.push(RefineTurn {
            role: MessageRole::User,
            text: instruction,
        });
        self.turns.push(RefineTurn {
            role: MessageRole::Assistant,
            text: reply,
        });
    }

    /// Composes the refinement instruction: document kind, full current
    /// content, the entire role-tagged turn history, and the new instruction.
    fn compose_instruction(&self, instruction: &str) -> String {
        let history = if self.turns.is_empty() {
            "(no prior turns)".to_string()
        } else {
            self.turns
                .iter()
                .map(|turn| format!("{}: {}", turn.role.transcript_tag(), turn.text))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "You are a strategy expert working on the \"{title}\" document.\n\
             \n\
             CURRENT DOCUMENT CONTENT:\n\
             ---\n\
             {content}\n\
             ---\n\
             \n\
             REFINEMENT CONVERSATION SO FAR:\n\
             {history}\n\
             \n\
             NEW INSTRUCTION FROM THE ENTREPRENEUR:\n\
             \"{instruction}\"\n\
             \n\
             YOUR TASKS:\n\
             1. ANALYZE: if the user asks \"what do you need?\", identify the \"to be specified\" \
             markers and logical gaps in the current document.\n\
             2. ANSWER: reply concisely and professionally in \"assistant_message\".\n\
             3. UPDATE: if the user provided specifics, integrate them into \"updated_content\" \
             keeping the strict markdown format (##, ###, **bold**, - lists). If no change is \
             needed, return the current content as is.\n\
             \n\
             FORMATTING RULES:\n\
             - \"updated_content\" is always the COMPLETE document, never a fragment.\n\
             - Never invent data the user did not confirm.",
            title = self.kind.title(),
            content = self.content,
            history = history,
            instruction = instruction,
        )
    }
}
