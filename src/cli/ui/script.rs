//! Queue-driven [`Interaction`] used for script mode and tests.
//!
//! Each queued line answers the next prompt. A few tokens have special
//! meaning: `<KEEP>` accepts the prefilled value, `<EMPTY>` submits an
//! empty line, and `<ESC>` dismisses a menu or search.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::cli::core::CliError;
use crate::cli::io as cli_io;

use super::interaction::{Interaction, MenuOption};

const KEEP: &str = "<KEEP>";
const EMPTY: &str = "<EMPTY>";
const ESCAPE: &str = "<ESC>";

#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    inputs: VecDeque<String>,
    displayed: Vec<String>,
    prompts: Vec<String>,
    echo: bool,
}

impl ScriptedInteraction {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Reads every line of `reader`; prompts and answers are echoed so the
    /// transcript stays readable.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, CliError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        let mut script = Self::new(lines);
        script.echo = true;
        Ok(script)
    }

    /// Lines passed to [`Interaction::display`] so far.
    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    fn next_input(&mut self) -> Result<String, CliError> {
        self.inputs.pop_front().ok_or(CliError::InputClosed)
    }
}

impl Interaction for ScriptedInteraction {
    fn read_line(&mut self, prompt: &str, prefill: &str) -> Result<String, CliError> {
        self.prompts.push(prompt.to_string());
        let raw = self.next_input()?;
        let line = match raw.as_str() {
            KEEP => prefill.to_string(),
            EMPTY => String::new(),
            _ => raw,
        };
        if self.echo {
            cli_io::print_info(format!("{prompt}{line}"));
        }
        Ok(line)
    }

    fn display(&mut self, lines: &[String]) -> Result<(), CliError> {
        self.displayed.extend(lines.iter().cloned());
        if self.echo {
            cli_io::print_lines(lines);
        }
        Ok(())
    }

    /// Uses the next input as a case-insensitive substring query.
    fn search(&mut self, candidates: &[String], _prompt: &str) -> Result<Option<String>, CliError> {
        let query = self.next_input()?;
        if query == ESCAPE {
            return Ok(None);
        }
        let needle = query.to_lowercase();
        Ok(candidates
            .iter()
            .find(|candidate| candidate.to_lowercase().contains(&needle))
            .cloned())
    }

    /// Matches the next input against the option keys, skipping unknown
    /// answers.
    fn select(&mut self, title: &str, options: &[MenuOption]) -> Result<Option<usize>, CliError> {
        loop {
            let answer = self.next_input()?;
            if answer == ESCAPE {
                return Ok(None);
            }
            let answer = answer.trim();
            if let Some(index) = options.iter().position(|option| option.key == answer) {
                if self.echo {
                    cli_io::print_info(format!("{title}: {}", options[index].legend()));
                }
                return Ok(Some(index));
            }
            cli_io::print_error(format!("Unknown option `{answer}`."));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_returns_prefill() {
        let mut script = ScriptedInteraction::new(["<KEEP>", "typed", "<EMPTY>"]);
        assert_eq!(script.read_line("Name: ", "old").unwrap(), "old");
        assert_eq!(script.read_line("Name: ", "old").unwrap(), "typed");
        assert_eq!(script.read_line("Name: ", "old").unwrap(), "");
        assert!(matches!(
            script.read_line("Name: ", ""),
            Err(CliError::InputClosed)
        ));
        assert_eq!(script.prompts().len(), 4);
    }

    #[test]
    fn search_matches_substring() {
        let candidates = vec!["Coffee Shop".to_string(), "Bakery".to_string()];
        let mut script = ScriptedInteraction::new(["bak", "<ESC>", "zzz"]);
        assert_eq!(
            script.search(&candidates, "> ").unwrap().as_deref(),
            Some("Bakery")
        );
        assert_eq!(script.search(&candidates, "> ").unwrap(), None);
        assert_eq!(script.search(&candidates, "> ").unwrap(), None);
    }

    #[test]
    fn select_skips_unknown_keys() {
        let options = [MenuOption::new("a", "Add"), MenuOption::new("q", "Quit")];
        let mut script = ScriptedInteraction::new(["x", "q", "<ESC>"]);
        assert_eq!(script.select("Menu", &options).unwrap(), Some(1));
        assert_eq!(script.select("Menu", &options).unwrap(), None);
    }

    #[test]
    fn reader_lines_become_inputs() {
        let script = ScriptedInteraction::from_reader("a\nb\n".as_bytes()).unwrap();
        assert_eq!(script.remaining(), 2);
    }
}
