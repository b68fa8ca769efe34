//! Process-local state of one interview.
//!
//! A [`SessionState`] owns the transcript and the completed flag. It knows how
//! to derive the current [`Phase`] from those two values but never talks to the
//! network; that is left to whoever drives the controller.

use crate::llm::models::{LlmMessage, MessageRole};
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Where the interview currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The remote service has to produce the next message.
    AwaitingAssistant,
    /// A question is on screen and an answer is needed.
    AwaitingUser,
    /// The final email has been produced.
    Done,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    started_at: DateTime<Local>,
    system_prompt: String,
    transcript: Vec<LlmMessage>,
    completed: bool,
}

impl SessionState {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        let system_prompt = system_prompt.into();
        Self {
            id: Uuid::new_v4(),
            started_at: Local::now(),
            transcript: vec![LlmMessage::system(system_prompt.clone())],
            system_prompt,
            completed: false,
        }
    }

    /// Drop everything but the system message and start a fresh session.
    pub fn reset(&mut self) {
        self.id = Uuid::new_v4();
        self.started_at = Local::now();
        self.transcript.clear();
        self.transcript.push(LlmMessage::system(self.system_prompt.clone()));
        self.completed = false;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn transcript(&self) -> &[LlmMessage] {
        &self.transcript
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            return Phase::Done;
        }

        match self.transcript.last() {
            None => Phase::AwaitingAssistant,
            Some(_) if self.transcript.len() == 1 => Phase::AwaitingAssistant,
            Some(last) if last.role == MessageRole::User => Phase::AwaitingAssistant,
            Some(_) => Phase::AwaitingUser,
        }
    }

    /// Prior turns, without the system message.
    pub fn history(&self) -> &[LlmMessage] {
        self.transcript.get(1..).unwrap_or_default()
    }

    pub fn last_assistant(&self) -> Option<&LlmMessage> {
        self.transcript.iter().rev().find(|m| m.role == MessageRole::Assistant)
    }

    /// Number of assistant messages received in this session.
    pub fn turn(&self) -> usize {
        self.history().iter().filter(|m| m.is_assistant()).count()
    }

    pub(crate) fn push(&mut self, message: LlmMessage) {
        self.transcript.push(message);
    }

    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session() {
        let state = SessionState::new("be brief");

        assert_eq!(state.transcript(), &[LlmMessage::system("be brief")]);
        assert!(!state.completed());
        assert_eq!(state.phase(), Phase::AwaitingAssistant);
        assert!(state.history().is_empty());
        assert_eq!(state.turn(), 0);
        assert!(state.last_assistant().is_none());
    }

    #[test]
    fn test_phase_follows_last_role() {
        let mut state = SessionState::new("sys");

        state.push(LlmMessage::assistant("Who is it for?"));
        assert_eq!(state.phase(), Phase::AwaitingUser);

        state.push(LlmMessage::user("My landlord"));
        assert_eq!(state.phase(), Phase::AwaitingAssistant);
    }

    #[test]
    fn test_completed_wins_over_transcript() {
        let mut state = SessionState::new("sys");
        state.push(LlmMessage::assistant("Subject: Rent"));
        state.mark_completed();

        assert_eq!(state.phase(), Phase::Done);
    }

    #[test]
    fn test_history_skips_system_message() {
        let mut state = SessionState::new("sys");
        state.push(LlmMessage::assistant("Q1"));
        state.push(LlmMessage::user("A1"));
        state.push(LlmMessage::assistant("Q2"));

        let history = state.history();
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|m| m.role != MessageRole::System));
        assert_eq!(state.turn(), 2);
        assert_eq!(state.last_assistant().map(|m| m.content.as_str()), Some("Q2"));
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut state = SessionState::new("sys");
        let first_id = state.id();
        state.push(LlmMessage::assistant("Subject: Hello"));
        state.mark_completed();

        state.reset();

        assert_eq!(state.transcript(), &[LlmMessage::system("sys")]);
        assert!(!state.completed());
        assert_eq!(state.phase(), Phase::AwaitingAssistant);
        assert_ne!(state.id(), first_id);
    }
}
