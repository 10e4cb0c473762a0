pub mod core;
pub mod editor;
pub mod io;
pub mod manager;
pub mod output;
pub mod prompt;
mod shell;
pub mod ui;
pub mod wizard;

pub use shell::{run_cli, CliMode, SCRIPT_ENV};
