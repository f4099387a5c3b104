//! User interaction for the commands that need a decision.
use crate::error::Result;
use dialoguer::{Confirm, FuzzySelect};

/// Interface for asking the user questions.
pub trait Prompter {
    /// Asks a yes/no question. Returns `true` without asking when `skip`
    /// is set.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;

    /// Lets the user pick one of `items`. `None` means the user cancelled.
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;
}

/// Terminal prompts backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }

        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        Ok(FuzzySelect::new().with_prompt(prompt).items(items).default(0).interact_opt()?)
    }
}
