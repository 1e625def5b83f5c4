//! User interaction for the CLI.
//!
//! Responsibilities:
//! - Yes/no confirmation for the batch gate (`TerminalPrompt`).
//! - Password and free-text prompts.
//! - Parsing community index selections such as `1,3-5`.
//!
//! Invariants:
//! - Any failure to obtain an answer (EOF, closed stdin, I/O error) is "no".
//! - Prompts are written to stderr; stdout is reserved for results.

use std::collections::BTreeSet;
use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Password};
use signoz_client::ConfirmPrompt;
use thiserror::Error;

/// Confirmation prompt on the controlling terminal, or line-based stdin when
/// stdin is not a terminal.
pub(crate) struct TerminalPrompt;

fn read_answer<R: BufRead>(mut reader: R) -> bool {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
    }
}

impl ConfirmPrompt for TerminalPrompt {
    fn ask(&self, question: &str) -> bool {
        if std::io::stdin().is_terminal() {
            return Confirm::new()
                .with_prompt(question)
                .default(false)
                .interact()
                .unwrap_or(false);
        }

        eprint!("{question} [y/N] ");
        let _ = std::io::stderr().flush();
        read_answer(std::io::stdin().lock())
    }
}

/// Ask for a value that was not provided on the command line.
pub(crate) fn prompt_text(label: &str) -> Result<String> {
    if std::io::stdin().is_terminal() {
        return Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .context("Failed to read input");
    }
    eprint!("{label}: ");
    let _ = std::io::stderr().flush();
    read_line_value()
}

/// Ask for a password without echoing it.
pub(crate) fn prompt_password(label: &str) -> Result<String> {
    if std::io::stdin().is_terminal() {
        return Password::new()
            .with_prompt(label)
            .interact()
            .context("Failed to read password");
    }
    eprint!("{label}: ");
    let _ = std::io::stderr().flush();
    read_line_value()
}

fn read_line_value() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    Ok(input.trim().to_string())
}

/// Invalid community selection input.
#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum SelectionError {
    #[error("Invalid selection '{0}': expected a number or a range like 1-3")]
    Malformed(String),
    #[error("Selection {0} is out of range (1-{1})")]
    OutOfRange(usize, usize),
    #[error("Invalid range {0}-{1}: start is greater than end")]
    Reversed(usize, usize),
}

/// Parse `1`, `1,3,5`, `1-3` or mixes into sorted, de-duplicated 1-based
/// indices no greater than `max`. Empty input yields an empty list (cancel).
pub(crate) fn parse_selection(input: &str, max: usize) -> Result<Vec<usize>, SelectionError> {
    let parse = |s: &str| -> Result<usize, SelectionError> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| SelectionError::Malformed(s.trim().to_string()))?;
        if n == 0 || n > max {
            return Err(SelectionError::OutOfRange(n, max));
        }
        Ok(n)
    };

    let mut picked = BTreeSet::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (parse(start)?, parse(end)?);
                if start > end {
                    return Err(SelectionError::Reversed(start, end));
                }
                picked.extend(start..=end);
            }
            None => {
                picked.insert(parse(part)?);
            }
        }
    }
    Ok(picked.into_iter().collect())
}
