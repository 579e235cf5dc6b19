//! Stdin-backed yes/no prompt.

use std::io::{self, BufRead, Write};

use crate::hasher::Prompt;

/// Asks questions on stdout and reads the answer from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str, yes_label: &str, no_label: &str) -> bool {
        print!("{} [{}/{}] ", question, yes_label, no_label);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().chars().next(), Some('y') | Some('Y'))
    }

    fn inform(&self, message: &str) {
        println!("{}", message);
    }
}
