use council::editor::dispatch::{FixedAnswer, Prompter};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;

/// Interactive yes/no prompts backed by `dialoguer`.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&mut self, question: &str) -> bool {
        // A failed prompt (closed stdin, Ctrl-C) counts as "no".
        Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// `--yes` answers everything; otherwise ask on a terminal and decline
/// when there is nobody to ask.
pub fn prompter_for(yes: bool) -> Box<dyn Prompter> {
    if yes {
        Box::new(FixedAnswer(true))
    } else if std::io::stdin().is_terminal() {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(FixedAnswer(false))
    }
}
