use std::path::PathBuf;

use clap::Parser;
use once_cell::sync::Lazy;
use receipt_ledger::{cli::run_cli, config::AppConfig, init, utils::build_info};

static VERSION: Lazy<String> = Lazy::new(|| build_info::current().summary());

/// Record, edit and search transactions and their receipts.
#[derive(Debug, Parser)]
#[command(name = "receipt_ledger", version = VERSION.as_str())]
struct Args {
    /// Create a new ledger file; it must not already exist.
    #[arg(short = 'n', long = "new-file")]
    new_file: bool,

    /// Directory searched for receipts to attach [default: home directory].
    #[arg(short = 's', long = "search-directory", value_name = "DIR")]
    search_directory: Option<PathBuf>,

    /// The JSON ledger file.
    ledger_file: PathBuf,

    /// Directory where receipt copies are stored.
    receipts_directory: PathBuf,
}

fn main() {
    init();
    let args = Args::parse();
    let config = AppConfig::new(
        args.ledger_file,
        args.receipts_directory,
        args.search_directory,
        args.new_file,
    );

    if let Err(err) = run_cli(&config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
