//! User input collaborators
//!
//! Commands never read stdin directly; they receive a [`Prompter`]. The
//! interactive implementation uses cliclack and is only available when the
//! `tui` feature is enabled.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::ClackPrompter;

use crate::error::{BootError, Result};
use std::collections::VecDeque;

pub trait Prompter {
    /// Ask for a line of text; an empty answer yields `default` (or "")
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Ask a yes/no question; an empty answer yields `default`
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Replays pre-recorded answers in order
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next_answer(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            BootError::Prompt(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for '{}'", prompt),
            ))
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let answer = self.next_answer(prompt)?;
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.unwrap_or_default().to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = self.next_answer(prompt)?;
        Ok(parse_confirmation(&answer, default))
    }
}

/// `y`/`yes` (any case) confirm, blank takes the default, anything else declines
pub fn parse_confirmation(answer: &str, default: bool) -> bool {
    let normalized = answer.trim().to_lowercase();
    if normalized.is_empty() {
        return default;
    }
    normalized == "y" || normalized == "yes"
}
