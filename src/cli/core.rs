//! Error and navigation types shared by every interactive command.

use std::io;

use thiserror::Error;

use crate::errors::LedgerError;

/// Failures that end the current interactive session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    /// End of input or interrupt on a prompt.
    #[error("input closed")]
    InputClosed,
}

/// Non-local control flow raised from inside a wizard.
///
/// `Back` unwinds exactly one step, `MainMenu` unwinds to the top-level
/// command loop, and `Failed` carries a fatal error out of the session.
#[derive(Debug)]
pub enum Signal {
    Back,
    MainMenu,
    Failed(CliError),
}

pub type WizardResult<T> = Result<T, Signal>;

impl From<CliError> for Signal {
    fn from(err: CliError) -> Self {
        Signal::Failed(err)
    }
}

impl From<LedgerError> for Signal {
    fn from(err: LedgerError) -> Self {
        Signal::Failed(CliError::Ledger(err))
    }
}

impl From<io::Error> for Signal {
    fn from(err: io::Error) -> Self {
        Signal::Failed(CliError::Io(err))
    }
}

impl Signal {
    pub fn is_back(&self) -> bool {
        matches!(self, Signal::Back)
    }
}

/// Turns `Back` into `None`, leaving other signals to propagate.
pub fn back_as_none<T>(result: WizardResult<T>) -> WizardResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Signal::Back) => Ok(None),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_as_none_only_absorbs_back() {
        assert_eq!(back_as_none(Ok::<_, Signal>(3)).unwrap(), Some(3));
        assert_eq!(back_as_none::<u8>(Err(Signal::Back)).unwrap(), None);
        assert!(matches!(
            back_as_none::<u8>(Err(Signal::MainMenu)),
            Err(Signal::MainMenu)
        ));
    }

    #[test]
    fn ledger_errors_become_failures() {
        let signal = Signal::from(LedgerError::InvalidItem("bad".into()));
        assert!(matches!(signal, Signal::Failed(CliError::Ledger(_))));
        assert!(!signal.is_back());
    }
}
