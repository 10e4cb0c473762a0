//! Single-field edits of a recorded transaction.
//!
//! Every edit works on a clone. The ledger entry is only replaced by the
//! caller once [`TransactionEditor::edit`] returns `Some`.

use crate::cli::core::{back_as_none, WizardResult};
use crate::cli::io as cli_io;
use crate::cli::prompt::{ask_yes_no, display_entries, Prompt, SEARCH_PROMPT};
use crate::cli::ui::detail_view::transaction_view;
use crate::cli::ui::interaction::Interaction;
use crate::cli::wizard::transaction::{ask_description, ask_payment_method, PREVIEW_TITLE};
use crate::cli::wizard::{AddressBuilder, ItemBuilder, ReceiptBuilder, TimestampBuilder};
use crate::errors::LedgerError;
use crate::ledger::{Item, Ledger, Receipt, Transaction, TransactionKey};
use crate::storage::ReceiptStore;

pub struct TransactionEditor<'a> {
    ledger: &'a Ledger,
    store: &'a ReceiptStore,
}

impl<'a> TransactionEditor<'a> {
    pub fn new(ledger: &'a Ledger, store: &'a ReceiptStore) -> Self {
        Self { ledger, store }
    }

    /// Rebuilds `key` starting from the current value. Returns `None` when the
    /// user backs out of the field or declines the result.
    pub fn edit(
        &self,
        io: &mut dyn Interaction,
        transaction: &Transaction,
        key: TransactionKey,
    ) -> WizardResult<Option<Transaction>> {
        let mut working = transaction.clone();
        let edited = match key {
            TransactionKey::Address => {
                back_as_none(AddressBuilder::new(self.ledger, Some(transaction.address())).build(io))?
                    .map(|address| working.set_address(address))
            }
            TransactionKey::Description => {
                back_as_none(ask_description(io, self.ledger, transaction.description()))?
                    .map(|description| working.set_description(description))
            }
            TransactionKey::Items => self.edit_items(io, &mut working)?,
            TransactionKey::PaymentMethod => {
                back_as_none(ask_payment_method(io, self.ledger, transaction.payment_method()))?
                    .map(|method| working.set_payment_method(method))
            }
            TransactionKey::Receipt => {
                let current = ReceiptBuilder::stored_source(self.store, transaction.receipt());
                let prefill = transaction.receipt().is_attached().then_some(current);
                back_as_none(ReceiptBuilder::new(self.store, prefill).build(io))?
                    .map(|source| working.set_receipt(source))
            }
            TransactionKey::Timestamp => {
                back_as_none(TimestampBuilder::new(self.ledger, Some(transaction.timestamp())).build(io))?
                    .map(|timestamp| working.set_timestamp(timestamp))
            }
        };
        if edited.is_none() {
            return Ok(None);
        }

        cli_io::print_lines(&transaction_view(PREVIEW_TITLE, &working).render_lines());
        if !ask_yes_no(io, "Save this transaction? (y/n): ")? {
            return Ok(None);
        }
        if key == TransactionKey::Receipt {
            match self.replace_receipt(transaction.receipt(), working.receipt()) {
                Ok(stored) => working.set_receipt(stored),
                Err(LedgerError::FileNotFound(path)) => {
                    tracing::warn!(path = %path.display(), "receipt source disappeared");
                    cli_io::print_error("The receipt file was not found.");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(Some(working))
    }

    fn edit_items(
        &self,
        io: &mut dyn Interaction,
        working: &mut Transaction,
    ) -> WizardResult<Option<()>> {
        let mut items = working.items().to_vec();
        let Some(index) = back_as_none(select_item(io, &items))? else {
            return Ok(None);
        };
        let Some(item) = back_as_none(ItemBuilder::new(self.ledger, items.get(index)).build(io))?
        else {
            return Ok(None);
        };
        items[index] = item;
        working.set_items(items);
        Ok(Some(()))
    }

    /// Copies the new receipt in, then removes the old file. Picking the file
    /// already stored for this transaction changes nothing on disk.
    fn replace_receipt(&self, old: &Receipt, source: &Receipt) -> Result<Receipt, LedgerError> {
        if self.store.is_stored_as(source, old) {
            return Ok(old.clone());
        }
        let stored = self.store.commit(source)?;
        if old.is_attached() && !self.store.remove(old)? {
            cli_io::print_warning(format!("The receipt file \"{old}\" was not found."));
        }
        Ok(stored)
    }
}

/// Lines of the form `"<index>: <item>"`.
pub fn numbered_items(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{index}: {}", item.formatted()))
        .collect()
}

/// Index typed at the start of a numbered line.
pub fn leading_index(line: &str) -> Option<String> {
    line.split_once(':').map(|(index, _)| index.trim().to_string())
}

fn select_item(io: &mut dyn Interaction, items: &[Item]) -> WizardResult<usize> {
    let lines = numbered_items(items);
    let mut prompt = Prompt::for_key(TransactionKey::Items)
        .with_prompt("Enter the item number (c for commands): ")
        .on_list(|io| display_entries(io, &lines))
        .on_search(|io| {
            let choice = io.search(&lines, SEARCH_PROMPT)?;
            Ok(choice.as_deref().and_then(leading_index))
        });
    prompt.ask_parsed(io, |text| match text.parse::<usize>() {
        Ok(index) if index < items.len() => Ok(index),
        _ => Err("Please enter a valid item number.".to_string()),
    })
}
