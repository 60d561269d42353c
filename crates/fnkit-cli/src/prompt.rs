use dialoguer::{theme::ColorfulTheme, Select};
use fnkit_core::prompt::{Choice, Prompter};
use fnkit_core::{FnkitError, Result};

/// Arrow-key select on the terminal. Esc or `q` cancels.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Option<usize>> {
        // Nothing to pick from reads the same as a declined prompt.
        if choices.is_empty() {
            return Ok(None);
        }
        let items: Vec<String> = choices
            .iter()
            .map(|c| match &c.description {
                Some(d) => format!("{} - {d}", c.title),
                None => c.title.clone(),
            })
            .collect();
        Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| FnkitError::Prompt(e.to_string()))
    }
}
