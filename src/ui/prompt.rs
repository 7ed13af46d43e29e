//! Yes/no confirmation before destructive registry writes
//!
//! The sync engine only sees [`ConfirmPrompt`]. `None` means no answer was
//! obtained (closed stdin, prompt failure), which callers treat like "no".

use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};

use inquire::Confirm;

use crate::error::{EzpkgmError, prompt_failed};

/// Asks the user a yes/no question
pub trait ConfirmPrompt {
    fn confirm(&self, question: &str) -> Option<bool>;
}

/// Interactive prompt rendered by inquire; requires a terminal
#[derive(Debug, Default)]
pub struct InteractivePrompt;

impl ConfirmPrompt for InteractivePrompt {
    fn confirm(&self, question: &str) -> Option<bool> {
        match Confirm::new(question)
            .with_default(false)
            .with_help_message("Press 'y' to overwrite, or Enter to keep the local registry")
            .prompt()
        {
            Ok(answer) => Some(answer),
            Err(e) => {
                super::warn(EzpkgmError::from(e));
                None
            }
        }
    }
}

/// Line-based prompt for piped input
///
/// Prints the question and reads a single line; `y` or `yes` (any case) is affirmative.
pub struct LinePrompt<R> {
    reader: RefCell<R>,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: RefCell::new(reader),
        }
    }
}

impl<R: BufRead> ConfirmPrompt for LinePrompt<R> {
    fn confirm(&self, question: &str) -> Option<bool> {
        print!("{question} (y/n): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.reader.borrow_mut().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(is_affirmative(&line)),
            Err(e) => {
                super::warn(prompt_failed(e));
                None
            }
        }
    }
}

/// Prompt with a predetermined answer (`--yes`, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub Option<bool>);

impl ConfirmPrompt for FixedAnswer {
    fn confirm(&self, question: &str) -> Option<bool> {
        tracing::debug!(answer = ?self.0, "auto-answering: {question}");
        self.0
    }
}

/// Whether a typed answer means "yes"
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Pick the prompt for this process
pub fn for_terminal(assume_yes: bool) -> Box<dyn ConfirmPrompt> {
    if assume_yes {
        Box::new(FixedAnswer(Some(true)))
    } else if io::stdin().is_terminal() {
        Box::new(InteractivePrompt)
    } else {
        Box::new(LinePrompt::new(io::stdin().lock()))
    }
}
