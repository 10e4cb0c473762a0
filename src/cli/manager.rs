//! Top-level command loop. This is the only place the ledger is mutated and
//! written back to storage.

use crate::cli::core::{CliError, Signal, WizardResult};
use crate::cli::editor::{leading_index, TransactionEditor};
use crate::cli::io as cli_io;
use crate::cli::prompt::{ask_yes_no, display_entries, print_legend, Prompt, SEARCH_PROMPT};
use crate::cli::ui::detail_view::transaction_view;
use crate::cli::ui::interaction::{Interaction, MenuOption};
use crate::cli::wizard::transaction::PREVIEW_TITLE;
use crate::cli::wizard::TransactionBuilder;
use crate::ledger::{FieldKey, Ledger, TransactionKey};
use crate::storage::{ReceiptStore, StorageBackend};

const MENU_TITLE: &str = "Command";
const NO_TRANSACTIONS: &str = "No transactions in the ledger.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainAction {
    Add,
    Edit,
    Remove,
    List,
    Search,
    Commands,
    Quit,
}

const MAIN_MENU: [(MenuOption, MainAction); 7] = [
    (MenuOption::new("a", "Add a transaction"), MainAction::Add),
    (MenuOption::new("e", "Edit a transaction"), MainAction::Edit),
    (MenuOption::new("r", "Remove a transaction"), MainAction::Remove),
    (MenuOption::new("l", "List all transactions"), MainAction::List),
    (MenuOption::new("s", "Search all transactions"), MainAction::Search),
    (MenuOption::new("c", "Print this command menu"), MainAction::Commands),
    (MenuOption::new("q", "Quit"), MainAction::Quit),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditAction {
    Field(TransactionKey),
    Back,
    MainMenu,
    Commands,
}

const EDIT_MENU: [(MenuOption, EditAction); 9] = [
    (
        MenuOption::new("a", "Edit the address"),
        EditAction::Field(TransactionKey::Address),
    ),
    (
        MenuOption::new("d", "Edit the description"),
        EditAction::Field(TransactionKey::Description),
    ),
    (
        MenuOption::new("i", "Edit the items"),
        EditAction::Field(TransactionKey::Items),
    ),
    (
        MenuOption::new("p", "Edit the payment method"),
        EditAction::Field(TransactionKey::PaymentMethod),
    ),
    (
        MenuOption::new("r", "Edit the receipt"),
        EditAction::Field(TransactionKey::Receipt),
    ),
    (
        MenuOption::new("t", "Edit the timestamp"),
        EditAction::Field(TransactionKey::Timestamp),
    ),
    (MenuOption::new("b", "Go back"), EditAction::Back),
    (MenuOption::new("m", "Return to main menu"), EditAction::MainMenu),
    (MenuOption::new("c", "Print this command menu"), EditAction::Commands),
];

fn options<A: Copy>(menu: &[(MenuOption, A)]) -> Vec<MenuOption> {
    menu.iter().map(|(option, _)| *option).collect()
}

pub struct TransactionManager<S: StorageBackend> {
    storage: S,
    ledger: Ledger,
    store: ReceiptStore,
}

impl<S: StorageBackend> TransactionManager<S> {
    pub fn new(storage: S, ledger: Ledger, store: ReceiptStore) -> Self {
        Self {
            storage,
            ledger,
            store,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Runs the main menu until the user quits. Navigation signals return
    /// here; fatal errors end the loop.
    pub fn run(&mut self, io: &mut dyn Interaction) -> Result<(), CliError> {
        let menu = options(&MAIN_MENU);
        loop {
            cli_io::print_info("Manage your transactions:");
            loop {
                let Some(choice) = io.select(MENU_TITLE, &menu)? else {
                    continue;
                };
                let outcome = match MAIN_MENU[choice].1 {
                    MainAction::Add => self.add(io),
                    MainAction::Edit => self.edit(io),
                    MainAction::Remove => self.remove(io),
                    MainAction::List => self.list(io),
                    MainAction::Search => self.search(io),
                    MainAction::Commands => {
                        print_legend(&menu);
                        continue;
                    }
                    MainAction::Quit => return Ok(()),
                };
                match outcome {
                    Ok(()) | Err(Signal::Back) | Err(Signal::MainMenu) => {
                        cli_io::print_info("");
                        break;
                    }
                    Err(Signal::Failed(err)) => return Err(err),
                }
            }
        }
    }

    fn save(&self) -> WizardResult<()> {
        self.storage.save(&self.ledger)?;
        Ok(())
    }

    fn add(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        cli_io::print_section("Add a new transaction:");
        let transaction = TransactionBuilder::new(&self.ledger, &self.store).build(io)?;
        self.ledger.add_transaction(transaction);
        self.save()?;
        tracing::info!(count = self.ledger.len(), "transaction added");
        cli_io::print_success("Transaction saved.");
        Ok(())
    }

    /// Picking another transaction is `b` in the field menu; `m` or a
    /// confirmed edit returns to the main menu.
    fn edit(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        if self.warn_if_empty() {
            return Ok(());
        }
        cli_io::print_section("Edit a transaction:");
        let menu = options(&EDIT_MENU);
        loop {
            let index = self.select_transaction(io)?;
            let Some(transaction) = self.ledger.get(index).cloned() else {
                continue;
            };
            loop {
                let action = match io.select(MENU_TITLE, &menu)? {
                    Some(choice) => EDIT_MENU[choice].1,
                    None => EditAction::Back,
                };
                let key = match action {
                    EditAction::Field(key) => key,
                    EditAction::Back => break,
                    EditAction::MainMenu => return Err(Signal::MainMenu),
                    EditAction::Commands => {
                        print_legend(&menu);
                        continue;
                    }
                };
                let edited = TransactionEditor::new(&self.ledger, &self.store)
                    .edit(io, &transaction, key)?;
                if let Some(edited) = edited {
                    self.ledger.replace_transaction(index, edited);
                    self.save()?;
                    tracing::info!(index, field = key.as_str(), "transaction replaced");
                    cli_io::print_success("Transaction saved.");
                    return Ok(());
                }
            }
        }
    }

    fn remove(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        if self.warn_if_empty() {
            return Ok(());
        }
        cli_io::print_section("Remove a transaction:");
        let index = self.select_transaction(io)?;
        if let Some(transaction) = self.ledger.get(index) {
            cli_io::print_lines(&transaction_view(PREVIEW_TITLE, transaction).render_lines());
        }
        if !ask_yes_no(io, "Remove this transaction? (y/n): ")? {
            return Ok(());
        }
        let Some(removed) = self.ledger.remove_transaction(index) else {
            return Ok(());
        };
        self.save()?;
        tracing::info!(index, "transaction removed");
        if removed.receipt().is_attached() && !self.store.remove(removed.receipt())? {
            cli_io::print_warning("The receipt file was not found.");
        }
        cli_io::print_success("Transaction removed.");
        Ok(())
    }

    fn list(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        if self.warn_if_empty() {
            return Ok(());
        }
        io.display(&self.numbered_transactions())?;
        Ok(())
    }

    fn search(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        if self.warn_if_empty() {
            return Ok(());
        }
        let lines = self.numbered_transactions();
        let Some(choice) = io.search(&lines, SEARCH_PROMPT)? else {
            return Ok(());
        };
        let found = leading_index(&choice)
            .and_then(|index| index.parse::<usize>().ok())
            .and_then(|index| self.ledger.get(index));
        match found {
            Some(transaction) => {
                cli_io::print_lines(&transaction_view(PREVIEW_TITLE, transaction).render_lines())
            }
            None => cli_io::print_error("Please enter a valid transaction number."),
        }
        Ok(())
    }

    fn warn_if_empty(&self) -> bool {
        if self.ledger.is_empty() {
            cli_io::print_warning(NO_TRANSACTIONS);
            return true;
        }
        false
    }

    /// Lines of the form `"<index>: <transaction>"`, oldest first.
    fn numbered_transactions(&self) -> Vec<String> {
        self.ledger
            .transactions()
            .iter()
            .enumerate()
            .map(|(index, transaction)| format!("{index}: {}", transaction.formatted()))
            .collect()
    }

    fn select_transaction(&self, io: &mut dyn Interaction) -> WizardResult<usize> {
        let lines = self.numbered_transactions();
        let count = self.ledger.len();
        let mut prompt = Prompt::for_key(FieldKey::Transactions)
            .with_prompt("Enter the transaction number (c for commands): ")
            .on_list(|io| display_entries(io, &lines))
            .on_search(|io| {
                let choice = io.search(&lines, SEARCH_PROMPT)?;
                Ok(choice.as_deref().and_then(leading_index))
            });
        prompt.ask_parsed(io, |text| match text.parse::<usize>() {
            Ok(index) if index < count => Ok(index),
            _ => Err("Please enter a valid transaction number.".to_string()),
        })
    }
}
