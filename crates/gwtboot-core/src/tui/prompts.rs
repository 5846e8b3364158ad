//! Charm-style prompts using cliclack

use super::Prompter;
use crate::error::{BootError, Result};

/// Interactive terminal prompter
#[derive(Debug, Default, Clone, Copy)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = cliclack::input(prompt).required(false);
        if let Some(value) = default {
            input = input.placeholder(value).default_input(value);
        }
        let answer: String = input.interact().map_err(BootError::Prompt)?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        cliclack::confirm(prompt)
            .initial_value(default)
            .interact()
            .map_err(BootError::Prompt)
    }
}
