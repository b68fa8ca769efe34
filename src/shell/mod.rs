//! Interactive terminal driver for the conversation controller.
//!
//! [`FormShell`] is the only place that performs side effects: it asks the
//! controller what to do next, calls the broker or reads a line accordingly,
//! and feeds the outcome back. Input and output are generic so the whole loop
//! can be exercised against in-memory buffers.

pub mod render;

use crate::conversation::{ConversationController, NextAction};
use crate::error::Result;
use crate::llm::broker::LlmBroker;
use std::io::{BufRead, Write};
use tracing::{error, info};

/// Control words accepted at any prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    History,
    Reset,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            ":history" | ":h" => Some(Command::History),
            ":reset" | ":start-over" => Some(Command::Reset),
            ":quit" | ":q" | ":exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

enum Step {
    Request,
    Ask(String),
    Present(String),
}

enum Flow {
    Continue,
    Quit,
}

pub struct FormShell<R, W> {
    controller: ConversationController,
    broker: LlmBroker,
    input: R,
    output: W,
    history_expanded: bool,
}

impl<R: BufRead, W: Write> FormShell<R, W> {
    pub fn new(controller: ConversationController, broker: LlmBroker, input: R, output: W) -> Self {
        Self {
            controller,
            broker,
            input,
            output,
            history_expanded: false,
        }
    }

    pub fn controller(&self) -> &ConversationController {
        &self.controller
    }

    pub fn into_writer(self) -> W {
        self.output
    }

    /// Drive the form until the user quits or input ends.
    ///
    /// Remote failures are shown and the user may retry; only fatal errors
    /// (such as a closed terminal) end the loop with an error.
    pub async fn run(&mut self) -> Result<()> {
        self.start_session()?;

        loop {
            let step = match self.controller.next_action() {
                NextAction::RequestCompletion => Step::Request,
                NextAction::AwaitAnswer { question } => Step::Ask(question.to_string()),
                NextAction::Present { email } => Step::Present(email.to_string()),
            };

            let flow = match step {
                Step::Request => self.request_completion().await?,
                Step::Ask(question) => self.ask(&question)?,
                Step::Present(email) => self.present(&email)?,
            };

            if let Flow::Quit = flow {
                info!(session = %self.controller.state().id(), "Leaving form");
                return Ok(());
            }
        }
    }

    fn start_session(&mut self) -> Result<()> {
        let state = self.controller.state();
        info!(session = %state.id(), model = %self.broker.model(), "Session started");
        render::header(&mut self.output, state.id(), state.started_at())?;
        Ok(())
    }

    async fn request_completion(&mut self) -> Result<Flow> {
        match self.broker.generate(self.controller.transcript()).await {
            Ok(reply) => {
                self.controller.apply_reply(reply)?;
                Ok(Flow::Continue)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                error!(session = %self.controller.state().id(), error = %e, "Completion failed");
                render::error(&mut self.output, &e.to_string())?;

                match self.read_line()? {
                    None => Ok(Flow::Quit),
                    Some(line) => match Command::parse(&line) {
                        Some(command) => self.handle(command),
                        None => Ok(Flow::Continue),
                    },
                }
            }
        }
    }

    fn ask(&mut self, question: &str) -> Result<Flow> {
        // The question itself is shown below, so history stops just before it.
        let history = self.controller.history();
        let prior = &history[..history.len().saturating_sub(1)];
        render::history(&mut self.output, prior, self.history_expanded)?;
        render::question(&mut self.output, self.controller.turn(), question)?;
        render::answer_prompt(&mut self.output)?;

        let Some(line) = self.read_line()? else {
            return Ok(Flow::Quit);
        };

        if let Some(command) = Command::parse(&line) {
            return self.handle(command);
        }

        if !self.controller.apply_answer(&line) {
            writeln!(self.output, "Please type an answer.")?;
        }
        Ok(Flow::Continue)
    }

    fn present(&mut self, email: &str) -> Result<Flow> {
        render::history(&mut self.output, self.controller.history(), self.history_expanded)?;
        render::final_email(&mut self.output, email)?;

        loop {
            let Some(line) = self.read_line()? else {
                return Ok(Flow::Quit);
            };

            match Command::parse(&line) {
                Some(Command::History) => {
                    self.history_expanded = !self.history_expanded;
                    return Ok(Flow::Continue);
                }
                Some(command) => return self.handle(command),
                None => writeln!(self.output, "Type :reset to start over or :quit to exit.")?,
            }
        }
    }

    fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::History => {
                self.history_expanded = !self.history_expanded;
            }
            Command::Reset => {
                self.controller.reset();
                self.history_expanded = false;
                writeln!(self.output)?;
                self.start_session()?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
