//! Yes/no confirmation prompts

use crate::error::{Error, Result};
use dialoguer::Confirm;
use std::io;

/// Asks the user a yes/no question
pub trait Prompt: Send + Sync {
    /// Ask `question`; an empty answer means no
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Interactive terminal prompt
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(prompt_error)
    }
}

/// Ctrl-C inside the prompt surfaces as an interrupted read
fn prompt_error(err: dialoguer::Error) -> Error {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => Error::Interrupted,
        other => Error::Internal(format!("confirmation prompt failed: {other}")),
    }
}
