//! Raw terminal input and output used by prompts and menus.

use std::{
    env,
    io::Write,
    path::Path,
    process::{Command, Stdio},
};

use dialoguer::{theme::ColorfulTheme, Select};
use rustyline::{error::ReadlineError, DefaultEditor};
use shell_words::split;

use crate::cli::core::CliError;
use crate::cli::io as cli_io;

pub const FUZZY_FINDER: &str = "fzf";

/// One entry of a fixed menu: the command letter and its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    pub key: &'static str,
    pub label: &'static str,
}

impl MenuOption {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }

    pub fn legend(&self) -> String {
        format!("{} - {}", self.key, self.label)
    }
}

/// Everything the wizards need from the user's terminal.
pub trait Interaction {
    /// Reads one line with `prefill` already placed in the edit buffer.
    fn read_line(&mut self, prompt: &str, prefill: &str) -> Result<String, CliError>;

    /// Shows `lines` to the user, paged when possible.
    fn display(&mut self, lines: &[String]) -> Result<(), CliError>;

    /// Lets the user pick one of `candidates`; `None` when nothing was chosen.
    fn search(&mut self, candidates: &[String], prompt: &str) -> Result<Option<String>, CliError>;

    /// Picks an entry of a fixed menu; `None` when the menu was dismissed.
    fn select(&mut self, title: &str, options: &[MenuOption]) -> Result<Option<usize>, CliError>;
}

/// Interactive implementation backed by rustyline, dialoguer, `$PAGER` and
/// the external fuzzy finder.
pub struct TerminalInteraction {
    editor: DefaultEditor,
    theme: ColorfulTheme,
}

impl TerminalInteraction {
    pub fn new() -> Result<Self, CliError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            theme: ColorfulTheme::default(),
        })
    }

    fn page(&self, pager: &str, lines: &[String]) -> Result<bool, CliError> {
        let Ok(words) = split(pager) else {
            return Ok(false);
        };
        let Some((program, args)) = words.split_first() else {
            return Ok(false);
        };
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                tracing::debug!(pager, error = %err, "pager failed to start");
                return Ok(false);
            }
        };
        if let Some(mut stdin) = child.stdin.take() {
            let text = lines.join("\n") + "\n";
            // The pager may exit before reading everything.
            let _ = stdin.write_all(text.as_bytes());
        }
        child.wait()?;
        Ok(true)
    }
}

impl Interaction for TerminalInteraction {
    fn read_line(&mut self, prompt: &str, prefill: &str) -> Result<String, CliError> {
        match self.editor.readline_with_initial(prompt, (prefill, "")) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str()).ok();
                }
                Ok(line)
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Err(CliError::InputClosed),
            Err(err) => Err(err.into()),
        }
    }

    fn display(&mut self, lines: &[String]) -> Result<(), CliError> {
        if let Ok(pager) = env::var("PAGER") {
            if self.page(&pager, lines)? {
                return Ok(());
            }
        }
        cli_io::print_lines(lines);
        Ok(())
    }

    fn search(&mut self, candidates: &[String], prompt: &str) -> Result<Option<String>, CliError> {
        let mut child = match Command::new(FUZZY_FINDER)
            .arg("--prompt")
            .arg(prompt)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                cli_io::print_error(format!("`{FUZZY_FINDER}` is not installed."));
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        if let Some(mut stdin) = child.stdin.take() {
            let text = candidates.join("\n");
            let _ = stdin.write_all(text.as_bytes());
        }
        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Ok(None);
        }
        let choice = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        Ok((!choice.is_empty()).then_some(choice))
    }

    fn select(&mut self, title: &str, options: &[MenuOption]) -> Result<Option<usize>, CliError> {
        let items: Vec<String> = options.iter().map(MenuOption::legend).collect();
        let choice = Select::with_theme(&self.theme)
            .with_prompt(title)
            .items(&items)
            .default(0)
            .interact_opt()?;
        Ok(choice)
    }
}

/// True when `program` can be found on `PATH`.
pub fn command_available(program: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| is_executable_in(&dir, program)))
        .unwrap_or(false)
}

fn is_executable_in(dir: &Path, program: &str) -> bool {
    dir.join(program).is_file()
}
