//! Field prompts: one line of input that is either a value or a command.
//!
//! Commands are single letters typed instead of a value: `b` goes back one
//! step, `c` prints the command legend, `l` lists previous entries, `s`
//! searches them and prefills the choice, and `m` returns to the main menu.

use crate::cli::core::{CliError, Signal, WizardResult};
use crate::cli::io as cli_io;
use crate::cli::ui::interaction::{Interaction, MenuOption};
use crate::ledger::FieldKey;

pub const BACK: &str = "b";
pub const COMMANDS: &str = "c";
pub const LIST: &str = "l";
pub const MENU: &str = "m";
pub const SEARCH: &str = "s";

const BACK_OPTION: MenuOption = MenuOption::new(BACK, "Go back");
const LIST_OPTION: MenuOption = MenuOption::new(LIST, "List previous entries");
const SEARCH_OPTION: MenuOption = MenuOption::new(SEARCH, "Search previous entries");
const MENU_OPTION: MenuOption = MenuOption::new(MENU, "Return to main menu");

pub const SEARCH_PROMPT: &str = "Search: ";

type ListHandler<'a> = Box<dyn FnMut(&mut dyn Interaction) -> Result<(), CliError> + 'a>;
type SearchHandler<'a> =
    Box<dyn FnMut(&mut dyn Interaction) -> Result<Option<String>, CliError> + 'a>;

/// A reusable prompt for one field.
///
/// Every read, including a retry after a rejected value, starts from the
/// prefill. A search hit replaces it.
pub struct Prompt<'a> {
    label: String,
    prompt: String,
    prefill: String,
    history: Vec<String>,
    list: Option<ListHandler<'a>>,
    search: Option<SearchHandler<'a>>,
    can_go_back: bool,
    can_list_and_search: bool,
}

impl<'a> Prompt<'a> {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            prompt: format!("Enter the {label} ({COMMANDS} for commands): "),
            label,
            prefill: String::new(),
            history: Vec::new(),
            list: None,
            search: None,
            can_go_back: true,
            can_list_and_search: true,
        }
    }

    pub fn for_key(key: impl Into<FieldKey>) -> Self {
        Self::new(key.into().as_str())
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn prefill(mut self, prefill: impl Into<String>) -> Self {
        self.prefill = prefill.into();
        self
    }

    /// Previous values offered by the default list and search commands.
    pub fn history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self
    }

    pub fn on_list(
        mut self,
        handler: impl FnMut(&mut dyn Interaction) -> Result<(), CliError> + 'a,
    ) -> Self {
        self.list = Some(Box::new(handler));
        self
    }

    /// The handler's result becomes the prefill of the next read.
    pub fn on_search(
        mut self,
        handler: impl FnMut(&mut dyn Interaction) -> Result<Option<String>, CliError> + 'a,
    ) -> Self {
        self.search = Some(Box::new(handler));
        self
    }

    /// `b` is returned as text instead of going back.
    pub fn without_back(mut self) -> Self {
        self.can_go_back = false;
        self
    }

    /// `l` and `s` are returned as text instead of running.
    pub fn without_list_and_search(mut self) -> Self {
        self.can_list_and_search = false;
        self
    }

    /// Reads until the user enters a value, running any commands typed in
    /// the meantime.
    pub fn ask(&mut self, io: &mut dyn Interaction) -> WizardResult<String> {
        loop {
            let line = io.read_line(&self.prompt, &self.prefill)?;
            let input = line.trim();
            match input {
                "" => cli_io::print_error(format!("{} cannot be empty.", capitalize(&self.label))),
                COMMANDS => print_commands(self.can_go_back, self.can_list_and_search),
                BACK if self.can_go_back => return Err(Signal::Back),
                LIST if self.can_list_and_search => self.run_list(io)?,
                SEARCH if self.can_list_and_search => {
                    if let Some(choice) = self.run_search(io)? {
                        self.prefill = choice;
                    }
                }
                MENU => return Err(Signal::MainMenu),
                _ => return Ok(input.to_string()),
            }
        }
    }

    /// Repeats [`Prompt::ask`] until `parse` accepts the value, printing its
    /// message otherwise.
    pub fn ask_parsed<T>(
        &mut self,
        io: &mut dyn Interaction,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> WizardResult<T> {
        loop {
            let input = self.ask(io)?;
            match parse(&input) {
                Ok(value) => return Ok(value),
                Err(message) => cli_io::print_error(message),
            }
        }
    }

    fn run_list(&mut self, io: &mut dyn Interaction) -> Result<(), CliError> {
        match self.list.as_mut() {
            Some(handler) => handler(io),
            None => display_entries(io, &self.history),
        }
    }

    fn run_search(&mut self, io: &mut dyn Interaction) -> Result<Option<String>, CliError> {
        match self.search.as_mut() {
            Some(handler) => handler(io),
            None => io.search(&self.history, SEARCH_PROMPT),
        }
    }
}

/// Shows `entries`, or a warning when there are none.
pub fn display_entries(io: &mut dyn Interaction, entries: &[String]) -> Result<(), CliError> {
    if entries.is_empty() {
        cli_io::print_warning("No previous entries.");
        return Ok(());
    }
    io.display(entries)
}

pub fn print_commands(can_go_back: bool, can_list_and_search: bool) {
    let mut options = Vec::with_capacity(4);
    if can_go_back {
        options.push(BACK_OPTION);
    }
    if can_list_and_search {
        options.push(LIST_OPTION);
        options.push(SEARCH_OPTION);
    }
    options.push(MENU_OPTION);
    print_legend(&options);
}

pub fn print_legend(options: &[MenuOption]) {
    for option in options {
        cli_io::print_info(format!("    {}", option.legend()));
    }
}

/// Asks until the answer is `yes` or `no` (case-insensitive).
pub fn ask_binary(
    io: &mut dyn Interaction,
    question: &str,
    yes: &str,
    no: &str,
    prefill: &str,
) -> Result<bool, CliError> {
    let mut prefill = prefill.to_string();
    loop {
        let answer = io.read_line(question, &prefill)?;
        prefill.clear();
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case(yes) {
            return Ok(true);
        }
        if answer.eq_ignore_ascii_case(no) {
            return Ok(false);
        }
        cli_io::print_error(format!("Please enter either \"{yes}\" or \"{no}\"."));
    }
}

pub fn ask_yes_no(io: &mut dyn Interaction, question: &str) -> Result<bool, CliError> {
    ask_binary(io, question, "y", "n", "")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
