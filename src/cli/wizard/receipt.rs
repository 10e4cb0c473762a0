use crate::cli::core::WizardResult;
use crate::cli::prompt::{display_entries, Prompt, SEARCH_PROMPT};
use crate::cli::ui::interaction::Interaction;
use crate::ledger::{Receipt, TransactionKey, NOT_APPLICABLE};
use crate::storage::{ReceiptStore, RECEIPT_EXTENSIONS};
use crate::utils::expand_home;

use super::{run_steps, Advance, Completion, StepContext, StepFlow};

/// Picks the source file for a receipt. Nothing is copied until
/// [`ReceiptBuilder::commit`] runs.
pub struct ReceiptBuilder<'a> {
    store: &'a ReceiptStore,
    prefill: Option<Receipt>,
    source: Option<Receipt>,
}

impl<'a> ReceiptBuilder<'a> {
    /// `prefill` is a source path, not a stored name; use
    /// [`ReceiptBuilder::stored_source`] to edit a recorded receipt.
    pub fn new(store: &'a ReceiptStore, prefill: Option<Receipt>) -> Self {
        Self {
            store,
            prefill,
            source: None,
        }
    }

    pub fn build(mut self, io: &mut dyn Interaction) -> WizardResult<Receipt> {
        run_steps(&mut self, io)
    }

    /// Copies the chosen file into the receipts directory.
    pub fn commit(store: &ReceiptStore, source: &Receipt) -> WizardResult<Receipt> {
        Ok(store.commit(source)?)
    }

    /// The file behind a recorded receipt, as a source path.
    pub fn stored_source(store: &ReceiptStore, receipt: &Receipt) -> Receipt {
        store
            .stored_path(receipt)
            .map(Receipt::File)
            .unwrap_or_default()
    }

    fn seed(&self) -> String {
        self.source
            .as_ref()
            .or(self.prefill.as_ref())
            .map(Receipt::to_string)
            .unwrap_or_default()
    }
}

impl StepFlow for ReceiptBuilder<'_> {
    type Key = TransactionKey;
    type Output = Receipt;

    fn steps(&self) -> &[TransactionKey] {
        &[TransactionKey::Receipt]
    }

    fn build_step(
        &mut self,
        key: TransactionKey,
        _context: &StepContext,
        io: &mut dyn Interaction,
    ) -> WizardResult<Advance> {
        let store = self.store;
        let mut prompt = Prompt::for_key(key)
            .prefill(self.seed())
            .on_list(|io| display_entries(io, &store.candidates()))
            .on_search(|io| io.search(&store.candidates(), SEARCH_PROMPT));
        let source = prompt.ask_parsed(io, parse_source)?;
        self.source = Some(source);
        Ok(Advance::Next)
    }

    fn finish(&mut self, _io: &mut dyn Interaction) -> WizardResult<Completion<Receipt>> {
        Ok(Completion::Done(self.source.take().unwrap_or_default()))
    }
}

fn parse_source(text: &str) -> Result<Receipt, String> {
    if text == NOT_APPLICABLE {
        return Ok(Receipt::NotAttached);
    }
    let path = expand_home(text);
    if !path.is_file() {
        return Err(format!(
            "File does not exist. Please enter the full path, or \"{NOT_APPLICABLE}\"."
        ));
    }
    if path.extension().map_or(true, |extension| extension.is_empty()) {
        let patterns: Vec<String> = RECEIPT_EXTENSIONS
            .iter()
            .map(|extension| format!("*.{extension}"))
            .collect();
        return Err(format!(
            "Please enter a valid receipt file: [{}]",
            patterns.join(", ")
        ));
    }
    Ok(Receipt::File(path))
}
