//! Turn-taking state machine for the email interview.
//!
//! The controller never performs I/O. The caller asks it for the
//! [`NextAction`], carries that action out (a remote completion, a line of user
//! input, or showing the result) and feeds the outcome back through
//! [`ConversationController::apply_reply`] or
//! [`ConversationController::apply_answer`].
//!
//! # Examples
//!
//! ```
//! use mailform::conversation::{ConversationController, NextAction, Phase};
//! use mailform::llm::LlmMessage;
//!
//! let mut controller = ConversationController::default();
//! assert_eq!(controller.next_action(), NextAction::RequestCompletion);
//!
//! let phase = controller
//!     .apply_reply(LlmMessage::assistant("What is the recipient's name?"))
//!     .unwrap();
//! assert_eq!(phase, Phase::AwaitingUser);
//!
//! assert!(controller.apply_answer("Dana"));
//! assert_eq!(controller.next_action(), NextAction::RequestCompletion);
//! ```

use crate::conversation::markers::CompletionMarkers;
use crate::conversation::prompt::SYSTEM_PROMPT;
use crate::conversation::session::{Phase, SessionState};
use crate::error::{FormError, Result};
use crate::llm::models::LlmMessage;
use tracing::{debug, info};

/// What the driver has to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction<'a> {
    /// Send the transcript to the completion client.
    RequestCompletion,
    /// Show `question` and read one line of input.
    AwaitAnswer { question: &'a str },
    /// Show the finished email. Nothing else will be requested.
    Present { email: &'a str },
}

#[derive(Debug, Clone)]
pub struct ConversationController {
    state: SessionState,
    markers: CompletionMarkers,
}

impl Default for ConversationController {
    fn default() -> Self {
        Self::new(CompletionMarkers::default())
    }
}

impl ConversationController {
    pub fn new(markers: CompletionMarkers) -> Self {
        Self::with_system_prompt(SYSTEM_PROMPT, markers)
    }

    pub fn with_system_prompt(system_prompt: impl Into<String>, markers: CompletionMarkers) -> Self {
        Self {
            state: SessionState::new(system_prompt),
            markers,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn transcript(&self) -> &[LlmMessage] {
        self.state.transcript()
    }

    pub fn history(&self) -> &[LlmMessage] {
        self.state.history()
    }

    pub fn turn(&self) -> usize {
        self.state.turn()
    }

    pub fn next_action(&self) -> NextAction<'_> {
        match self.state.phase() {
            Phase::AwaitingAssistant => NextAction::RequestCompletion,
            Phase::AwaitingUser => NextAction::AwaitAnswer {
                question: self.last_assistant_text(),
            },
            Phase::Done => NextAction::Present {
                email: self.last_assistant_text(),
            },
        }
    }

    /// The final email, once the interview is over.
    pub fn final_email(&self) -> Option<&str> {
        match self.next_action() {
            NextAction::Present { email } => Some(email),
            _ => None,
        }
    }

    /// Record the completion client's reply and classify it.
    ///
    /// Rejected unless the controller is waiting on the assistant, so a
    /// finished session can never grow further.
    pub fn apply_reply(&mut self, reply: LlmMessage) -> Result<Phase> {
        let phase = self.state.phase();
        if phase != Phase::AwaitingAssistant {
            return Err(FormError::InvalidTransition(format!(
                "received a reply while in {:?}",
                phase
            )));
        }

        let marker = self.markers.find(&reply.content).map(str::to_string);
        self.state.push(LlmMessage::assistant(reply.content));

        match marker {
            Some(marker) => {
                info!(session = %self.state.id(), marker = %marker, "Final email detected");
                self.state.mark_completed();
                Ok(Phase::Done)
            }
            None => {
                debug!(session = %self.state.id(), turn = self.state.turn(), "Question received");
                Ok(Phase::AwaitingUser)
            }
        }
    }

    /// Record one answer. Returns `false` when nothing was recorded: blank
    /// input, or the controller is not waiting on the user.
    pub fn apply_answer(&mut self, answer: &str) -> bool {
        let answer = answer.trim();
        if answer.is_empty() || self.state.phase() != Phase::AwaitingUser {
            return false;
        }

        self.state.push(LlmMessage::user(answer));
        debug!(session = %self.state.id(), "Answer recorded");
        true
    }

    /// Start over from any phase.
    pub fn reset(&mut self) {
        info!(session = %self.state.id(), "Session reset");
        self.state.reset();
    }

    fn last_assistant_text(&self) -> &str {
        self.state.last_assistant().map(|m| m.content.as_str()).unwrap_or_default()
    }
}
