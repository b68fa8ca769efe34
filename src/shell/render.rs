//! Text rendering for the terminal form.

use crate::llm::models::{LlmMessage, MessageRole};
use chrono::{DateTime, Local};
use std::io::{self, Write};
use uuid::Uuid;

pub const TITLE: &str = "Dynamic Personalized Email Generator";
const RULE_WIDTH: usize = 60;

fn rule(out: &mut impl Write, ch: char) -> io::Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(RULE_WIDTH))
}

pub fn header(out: &mut impl Write, session: Uuid, started_at: DateTime<Local>) -> io::Result<()> {
    rule(out, '=')?;
    writeln!(out, "{:^width$}", TITLE, width = RULE_WIDTH)?;
    rule(out, '=')?;
    writeln!(
        out,
        "Session {} started {}",
        &session.simple().to_string()[..8],
        started_at.format("%H:%M")
    )?;
    writeln!(out, "Commands: :history  :reset (start over)  :quit")?;
    writeln!(out)
}

/// The collapsible history. Collapsed, it is a single summary line.
pub fn history(out: &mut impl Write, turns: &[LlmMessage], expanded: bool) -> io::Result<()> {
    if turns.is_empty() {
        return Ok(());
    }

    if !expanded {
        writeln!(out, "[+] Conversation History ({} messages, :history to expand)", turns.len())?;
        return writeln!(out);
    }

    writeln!(out, "[-] Conversation History")?;
    for message in turns {
        match message.role {
            MessageRole::Assistant => writeln!(out, "    AI: {}", message.content)?,
            MessageRole::User => writeln!(out, "    You: {}", message.content)?,
            MessageRole::System => {}
        }
    }
    writeln!(out)
}

pub fn question(out: &mut impl Write, turn: usize, text: &str) -> io::Result<()> {
    writeln!(out, "Current Question ({}):", turn)?;
    for line in text.lines() {
        writeln!(out, "  {}", line)?;
    }
    writeln!(out)
}

pub fn answer_prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "Your Answer: ")?;
    out.flush()
}

pub fn final_email(out: &mut impl Write, email: &str) -> io::Result<()> {
    writeln!(out, "Email generation completed!")?;
    writeln!(out)?;
    writeln!(out, "Generated Email")?;
    rule(out, '-')?;
    writeln!(out, "{}", email)?;
    rule(out, '-')?;
    writeln!(out, "Type :reset to start over or :quit to exit.")
}

pub fn error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "Error: {}", message)?;
    write!(out, "Press Enter to retry, or use :reset / :quit. ")?;
    out.flush()
}
