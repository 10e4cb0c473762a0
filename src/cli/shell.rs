use std::io;

use crate::cli::core::CliError;
use crate::cli::manager::TransactionManager;
use crate::cli::output;
use crate::cli::ui::interaction::{command_available, Interaction, TerminalInteraction, FUZZY_FINDER};
use crate::cli::ui::script::ScriptedInteraction;
use crate::config::AppConfig;

/// Set to read answers from stdin instead of the terminal editor.
pub const SCRIPT_ENV: &str = "RECEIPT_LEDGER_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// Loads the ledger described by `config` and runs the main menu. Closing
/// the input ends the session normally.
pub fn run_cli(config: &AppConfig) -> Result<(), CliError> {
    let mode = CliMode::from_env();
    let ledger = config.prepare()?;
    tracing::info!(
        path = %config.ledger_file.display(),
        transactions = ledger.len(),
        ?mode,
        "ledger loaded"
    );

    let mut interaction: Box<dyn Interaction> = match mode {
        CliMode::Interactive => {
            warn_missing_tools();
            Box::new(TerminalInteraction::new()?)
        }
        CliMode::Script => {
            output::set_colors(false);
            Box::new(ScriptedInteraction::from_reader(io::stdin().lock())?)
        }
    };

    let mut manager = TransactionManager::new(config.storage(), ledger, config.receipt_store());
    match manager.run(interaction.as_mut()) {
        Err(CliError::InputClosed) => {
            tracing::debug!("input closed");
            Ok(())
        }
        other => other,
    }
}

fn warn_missing_tools() {
    if !command_available(FUZZY_FINDER) {
        output::warning(format!("`{FUZZY_FINDER}` was not found; search is unavailable."));
    }
    if std::env::var_os("PAGER").is_none() {
        output::warning("PAGER is not set; lists are printed directly.");
    }
}
