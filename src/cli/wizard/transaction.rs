//! The six-step transaction wizard.
//!
//! Description and payment method are plain text fields; items, address,
//! timestamp and receipt delegate to their own builders. Nothing touches the
//! receipts directory until the user confirms the preview.

use crate::cli::core::{Signal, WizardResult};
use crate::cli::io as cli_io;
use crate::cli::prompt::{ask_yes_no, Prompt};
use crate::cli::ui::detail_view::{add_items, DetailView};
use crate::cli::ui::interaction::Interaction;
use crate::errors::LedgerError;
use crate::ledger::{
    format_price, Address, Item, Ledger, Receipt, Timestamp, Transaction, TransactionKey,
};
use crate::storage::ReceiptStore;

use super::{
    repeat_list, resolve_seed, run_steps, Advance, AddressBuilder, Completion, ItemBuilder,
    ReceiptBuilder, StepContext, StepFlow, TimestampBuilder,
};

pub const PREVIEW_TITLE: &str = "Current transaction:";

/// Fields entered so far. `receipt` is the chosen source file, not yet
/// copied.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub description: Option<String>,
    pub items: Vec<Item>,
    pub address: Option<Address>,
    pub timestamp: Option<Timestamp>,
    pub payment_method: Option<String>,
    pub receipt: Option<Receipt>,
}

impl TransactionDraft {
    /// Preview of the filled fields among `keys`.
    pub fn view(&self, title: &str, keys: &[TransactionKey]) -> DetailView {
        let mut view = DetailView::new(title);
        for key in keys {
            let label = key.as_str();
            match key {
                TransactionKey::Description => {
                    if let Some(description) = &self.description {
                        view.add_field(label, description.clone());
                    }
                }
                TransactionKey::Items => {
                    let formatted: Vec<String> = self.items.iter().map(Item::formatted).collect();
                    add_items(&mut view, &formatted);
                }
                TransactionKey::Address => {
                    if let Some(address) = &self.address {
                        view.add_field(label, address.formatted());
                    }
                }
                TransactionKey::Timestamp => {
                    if let Some(timestamp) = &self.timestamp {
                        view.add_field(label, timestamp.formatted());
                    }
                }
                TransactionKey::PaymentMethod => {
                    if let Some(method) = &self.payment_method {
                        view.add_field(label, method.clone());
                    }
                }
                TransactionKey::Receipt => {
                    if let Some(receipt) = &self.receipt {
                        view.add_field(label, receipt.to_string());
                    }
                }
            }
        }
        if keys.contains(&TransactionKey::Items) && !self.items.is_empty() {
            let total: f64 = self.items.iter().map(Item::price).sum();
            view.add_field("total", format_price(total));
        }
        view
    }

    fn print_preview(&self, keys: &[TransactionKey]) {
        let view = self.view(PREVIEW_TITLE, keys);
        if !view.fields.is_empty() {
            cli_io::print_lines(&view.render_lines());
        }
    }
}

pub struct TransactionBuilder<'a> {
    ledger: &'a Ledger,
    store: &'a ReceiptStore,
    draft: TransactionDraft,
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(ledger: &'a Ledger, store: &'a ReceiptStore) -> Self {
        Self {
            ledger,
            store,
            draft: TransactionDraft::default(),
        }
    }

    pub fn build(mut self, io: &mut dyn Interaction) -> WizardResult<Transaction> {
        run_steps(&mut self, io)
    }

    /// Builds items one at a time. Arriving from a later step resumes at the
    /// last item.
    fn build_items(&mut self, io: &mut dyn Interaction, backwards: bool) -> WizardResult<()> {
        let ledger = self.ledger;
        let mut items = std::mem::take(&mut self.draft.items);
        let start = if backwards { items.len().saturating_sub(1) } else { 0 };
        let preview = self.draft.clone();
        let result = repeat_list(
            io,
            &mut items,
            start,
            "Add another item? (y/n): ",
            |io, existing| {
                cli_io::print_info("Add an item:");
                ItemBuilder::new(ledger, existing).build(io)
            },
            |built| {
                let mut draft = preview.clone();
                draft.items = built.to_vec();
                draft.print_preview(&TransactionKey::STEPS[..2]);
            },
        );
        self.draft.items = items;
        result
    }

    /// Copies the receipt and assembles the transaction.
    fn commit(&mut self) -> Result<Transaction, LedgerError> {
        let source = self.draft.receipt.clone().unwrap_or_default();
        let receipt = self.store.commit(&source)?;
        let draft = std::mem::take(&mut self.draft);
        Ok(Transaction::new(
            draft.description.unwrap_or_default(),
            draft.items,
            draft.address.unwrap_or_else(|| Address::online("")),
            draft.timestamp.unwrap_or_else(|| Timestamp::now(chrono_tz::Tz::UTC)),
            draft.payment_method.unwrap_or_default(),
            receipt,
        ))
    }
}

impl StepFlow for TransactionBuilder<'_> {
    type Key = TransactionKey;
    type Output = Transaction;

    fn steps(&self) -> &[TransactionKey] {
        &TransactionKey::STEPS
    }

    fn build_step(
        &mut self,
        key: TransactionKey,
        context: &StepContext,
        io: &mut dyn Interaction,
    ) -> WizardResult<Advance> {
        match key {
            TransactionKey::Description => {
                let seed = self.draft.description.clone().unwrap_or_default();
                self.draft.description = Some(ask_description(io, self.ledger, &seed)?);
            }
            TransactionKey::Items => self.build_items(io, context.backwards)?,
            TransactionKey::Address => {
                cli_io::print_info("Add the address:");
                let address =
                    AddressBuilder::new(self.ledger, self.draft.address.as_ref()).build(io)?;
                self.draft.address = Some(address);
            }
            TransactionKey::Timestamp => {
                cli_io::print_info("Add the timestamp:");
                let timestamp =
                    TimestampBuilder::new(self.ledger, self.draft.timestamp.as_ref()).build(io)?;
                self.draft.timestamp = Some(timestamp);
            }
            TransactionKey::PaymentMethod => {
                let seed = resolve_seed(
                    self.draft.payment_method.clone(),
                    None,
                    self.ledger
                        .latest()
                        .map(|transaction| transaction.payment_method().to_string()),
                    String::new,
                );
                self.draft.payment_method = Some(ask_payment_method(io, self.ledger, &seed)?);
            }
            TransactionKey::Receipt => {
                let receipt = ReceiptBuilder::new(self.store, self.draft.receipt.clone()).build(io)?;
                self.draft.receipt = Some(receipt);
            }
        }
        Ok(Advance::Next)
    }

    /// Shows what is filled before the step being returned to.
    fn on_back(&mut self, context: &StepContext, _io: &mut dyn Interaction) {
        let filled = context.index.saturating_sub(1);
        self.draft.print_preview(&TransactionKey::STEPS[..filled]);
    }

    /// Declining goes back to the payment method.
    fn finish(&mut self, io: &mut dyn Interaction) -> WizardResult<Completion<Transaction>> {
        self.draft.print_preview(&TransactionKey::STEPS);
        if !ask_yes_no(io, "Save this transaction? (y/n): ")? {
            return Ok(Completion::Revisit(step_of(TransactionKey::PaymentMethod)));
        }
        match self.commit() {
            Ok(transaction) => Ok(Completion::Done(transaction)),
            Err(LedgerError::FileNotFound(path)) => {
                tracing::warn!(path = %path.display(), "receipt source disappeared");
                cli_io::print_error("The receipt file was not found.");
                Ok(Completion::Revisit(step_of(TransactionKey::Receipt)))
            }
            Err(err) => Err(Signal::from(err)),
        }
    }
}

fn step_of(key: TransactionKey) -> usize {
    TransactionKey::STEPS
        .iter()
        .position(|candidate| *candidate == key)
        .unwrap_or_default()
}

pub fn ask_description(
    io: &mut dyn Interaction,
    ledger: &Ledger,
    prefill: &str,
) -> WizardResult<String> {
    Prompt::for_key(TransactionKey::Description)
        .prefill(prefill)
        .history(ledger.history(TransactionKey::Description.into()))
        .ask(io)
}

pub fn ask_payment_method(
    io: &mut dyn Interaction,
    ledger: &Ledger,
    prefill: &str,
) -> WizardResult<String> {
    Prompt::for_key(TransactionKey::PaymentMethod)
        .prefill(prefill)
        .history(ledger.history(TransactionKey::PaymentMethod.into()))
        .ask(io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ui::script::ScriptedInteraction;
    use std::fs;
    use tempfile::TempDir;

    const ITEM: [&str; 6] = ["Milk", "4.5", "l", "2", "food", "n"];
    const TIMESTAMP: [&str; 7] = ["2023", "4", "30", "13", "5", "9", "UTC"];

    fn store() -> (TempDir, ReceiptStore) {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("receipts")).unwrap();
        let store = ReceiptStore::new(root.path().join("receipts"), root.path());
        (root, store)
    }

    fn script(parts: &[&[&str]]) -> ScriptedInteraction {
        ScriptedInteraction::new(parts.iter().flat_map(|part| part.iter().copied()))
    }

    #[test]
    fn builds_online_purchase_without_receipt() {
        let (_root, store) = store();
        let ledger = Ledger::default();
        let mut io = script(&[
            &["Groceries"],
            &ITEM,
            &["n", "www.grocer.com"],
            &TIMESTAMP,
            &["Visa", "N/A", "y"],
        ]);
        let transaction = TransactionBuilder::new(&ledger, &store).build(&mut io).unwrap();
        assert_eq!(transaction.description(), "Groceries");
        assert_eq!(transaction.address(), &Address::online("www.grocer.com"));
        assert_eq!(transaction.items()[0].price(), -4.5);
        assert_eq!(transaction.total(), -4.5);
        assert_eq!(transaction.payment_method(), "Visa");
        assert_eq!(transaction.receipt(), &Receipt::NotAttached);
        assert_eq!(transaction.timestamp().timestamp(), 1_682_859_909);
        assert_eq!(io.remaining(), 0);
    }

    #[test]
    fn declining_returns_to_payment_method() {
        let (_root, store) = store();
        let ledger = Ledger::default();
        let mut io = script(&[
            &["Groceries"],
            &ITEM,
            &["n", "www.grocer.com"],
            &TIMESTAMP,
            &["Visa", "N/A", "n", "Cash", "<KEEP>", "y"],
        ]);
        let transaction = TransactionBuilder::new(&ledger, &store).build(&mut io).unwrap();
        assert_eq!(transaction.payment_method(), "Cash");
        assert_eq!(transaction.description(), "Groceries");
        let payment_prompts = io
            .prompts()
            .iter()
            .filter(|prompt| prompt.starts_with("Enter the payment method"))
            .count();
        assert_eq!(payment_prompts, 2);
    }

    #[test]
    fn back_from_address_resumes_at_last_item() {
        let (_root, store) = store();
        let ledger = Ledger::default();
        let mut io = script(&[
            &["Groceries"],
            &ITEM,
            &["y", "Bread", "3", "l", "1", "food", "n", "n"],
            &["b"],
            // Second item, prefilled.
            &["<KEEP>", "<KEEP>", "<KEEP>", "<KEEP>", "<KEEP>", "n", "n"],
            &["www.grocer.com"],
            &TIMESTAMP,
            &["Visa", "N/A", "y"],
        ]);
        let transaction = TransactionBuilder::new(&ledger, &store).build(&mut io).unwrap();
        let names: Vec<&str> = transaction.items().iter().map(Item::name).collect();
        assert_eq!(names, ["Milk", "Bread"]);
        assert_eq!(transaction.total(), -7.5);
    }

    #[test]
    fn confirmed_receipt_is_copied() {
        let (root, store) = store();
        let scan = root.path().join("scan.pdf");
        fs::write(&scan, b"pdf").unwrap();
        let ledger = Ledger::default();
        let scan_text = scan.display().to_string();
        let mut io = script(&[
            &["Groceries"],
            &ITEM,
            &["n", "www.grocer.com"],
            &TIMESTAMP,
            &["Visa", scan_text.as_str(), "y"],
        ]);
        let transaction = TransactionBuilder::new(&ledger, &store).build(&mut io).unwrap();
        assert_eq!(transaction.receipt(), &Receipt::from("0.pdf"));
        assert!(store.receipts_dir().join("0.pdf").is_file());
        assert!(scan.is_file());
    }

    #[test]
    fn vanished_receipt_revisits_receipt_step() {
        let (root, store) = store();
        let scan = root.path().join("scan.png");
        fs::write(&scan, b"png").unwrap();
        let ledger = Ledger::default();
        let scan_text = scan.display().to_string();

        let mut builder = TransactionBuilder::new(&ledger, &store);
        let mut io = script(&[
            &["Groceries"],
            &ITEM,
            &["n", "www.grocer.com"],
            &TIMESTAMP,
            &["Visa", scan_text.as_str()],
        ]);
        for key in TransactionKey::STEPS {
            let context = StepContext {
                index: step_of(key),
                total: TransactionKey::STEPS.len(),
                backwards: false,
            };
            builder.build_step(key, &context, &mut io).unwrap();
        }
        fs::remove_file(&scan).unwrap();
        let mut confirm = ScriptedInteraction::new(["y"]);
        let outcome = builder.finish(&mut confirm).unwrap();
        assert!(matches!(outcome, Completion::Revisit(5)));
        assert!(fs::read_dir(store.receipts_dir()).unwrap().next().is_none());
    }

    #[test]
    fn back_from_description_propagates() {
        let (_root, store) = store();
        let ledger = Ledger::default();
        let mut io = ScriptedInteraction::new(["b"]);
        let result = TransactionBuilder::new(&ledger, &store).build(&mut io);
        assert!(matches!(result, Err(Signal::Back)));
    }

    #[test]
    fn partial_preview_only_lists_filled_fields() {
        let draft = TransactionDraft {
            description: Some("Groceries".into()),
            items: vec![Item::new("Milk", -4.5, 2, Vec::new()).unwrap()],
            ..TransactionDraft::default()
        };
        let view = draft.view(PREVIEW_TITLE, &TransactionKey::STEPS[..3]);
        let keys: Vec<&str> = view.fields.iter().map(|field| field.key.as_str()).collect();
        assert_eq!(keys, ["description", "item 0", "total"]);
    }
}
