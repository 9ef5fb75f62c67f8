//! Prompt with pre-recorded answers

use coursectl::error::Result;
use coursectl::prompt::Prompt;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers questions from a script; an exhausted script answers no
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Prompt with no scripted answers
    pub fn silent() -> Self {
        Self::answering(&[])
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }
}
