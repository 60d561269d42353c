use crate::error::Result;

/// One labeled option in a selection prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub title: String,
    pub description: Option<String>,
}

impl Choice {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Asks the user to pick one of N options.
///
/// Returns the index of the chosen option, or `None` when the user declined
/// or escaped the prompt.
pub trait Prompter {
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Option<usize>>;
}
