use std::collections::HashSet;

use crate::cli::core::WizardResult;
use crate::cli::prompt::{display_entries, Prompt, SEARCH_PROMPT};
use crate::cli::ui::interaction::Interaction;
use crate::ledger::{Address, AddressKey, Ledger, NOT_APPLICABLE};

use super::{resolve_seed, run_steps, Advance, Completion, StepContext, StepFlow};

/// Names starting with one of these denote an online store.
pub const URL_PREFIXES: [&str; 3] = ["http://", "https://", "www."];

pub struct AddressBuilder<'a> {
    ledger: &'a Ledger,
    prefill: Option<&'a Address>,
    slots: [Option<String>; 6],
}

impl<'a> AddressBuilder<'a> {
    pub fn new(ledger: &'a Ledger, prefill: Option<&'a Address>) -> Self {
        Self {
            ledger,
            prefill,
            slots: Default::default(),
        }
    }

    pub fn build(mut self, io: &mut dyn Interaction) -> WizardResult<Address> {
        run_steps(&mut self, io)
    }

    fn slot(&mut self, key: AddressKey) -> &mut Option<String> {
        &mut self.slots[slot_index(key)]
    }

    /// Name and street only come from the prefill; the other fields fall back
    /// to the most recent transaction's address.
    fn seed(&self, key: AddressKey) -> String {
        let history = match key {
            AddressKey::Name | AddressKey::Street => None,
            _ => self
                .ledger
                .latest()
                .map(|transaction| transaction.address().get(key).to_string()),
        };
        resolve_seed(
            self.slots[slot_index(key)].clone(),
            self.prefill.map(|address| address.get(key).to_string()),
            history,
            String::new,
        )
    }

    /// Distinct previous addresses, most recent first.
    fn previous_addresses(&self) -> Vec<(String, Address)> {
        let mut seen = HashSet::new();
        self.ledger
            .transactions()
            .iter()
            .rev()
            .map(|transaction| transaction.address())
            .filter(|address| seen.insert(address.formatted()))
            .map(|address| (address.formatted(), address.clone()))
            .collect()
    }

    fn build_name(&mut self, io: &mut dyn Interaction) -> WizardResult<String> {
        let addresses = self.previous_addresses();
        let formatted: Vec<String> = addresses.iter().map(|(text, _)| text.clone()).collect();
        let mut picked: Option<Address> = None;
        let name = {
            let mut prompt = Prompt::for_key(AddressKey::Name)
                .prefill(self.seed(AddressKey::Name))
                .on_list(|io| display_entries(io, &formatted))
                .on_search(|io| {
                    let choice = io.search(&formatted, SEARCH_PROMPT)?;
                    let found = choice.and_then(|choice| {
                        addresses
                            .iter()
                            .find(|(text, _)| *text == choice)
                            .map(|(_, address)| address.clone())
                    });
                    let name = found.as_ref().map(|address| address.name().to_string());
                    if found.is_some() {
                        picked = found;
                    }
                    Ok(name)
                });
            prompt.ask(io)?
        };
        if let Some(address) = picked {
            for key in AddressKey::STEPS {
                *self.slot(key) = Some(address.get(key).to_string());
            }
        }
        Ok(name)
    }
}

impl StepFlow for AddressBuilder<'_> {
    type Key = AddressKey;
    type Output = Address;

    fn steps(&self) -> &[AddressKey] {
        &AddressKey::STEPS
    }

    fn build_step(
        &mut self,
        key: AddressKey,
        _context: &StepContext,
        io: &mut dyn Interaction,
    ) -> WizardResult<Advance> {
        if key == AddressKey::Name {
            let name = self.build_name(io)?;
            let online = is_url(&name);
            *self.slot(key) = Some(name);
            if online {
                for key in &AddressKey::STEPS[1..] {
                    *self.slot(*key) = Some(NOT_APPLICABLE.to_string());
                }
                return Ok(Advance::Finish);
            }
            return Ok(Advance::Next);
        }
        let value = Prompt::for_key(key)
            .prefill(self.seed(key))
            .history(self.ledger.history(key.into()))
            .ask(io)?;
        *self.slot(key) = Some(value);
        Ok(Advance::Next)
    }

    fn finish(&mut self, _io: &mut dyn Interaction) -> WizardResult<Completion<Address>> {
        let [name, street, city, province, postal_code, country] =
            std::mem::take(&mut self.slots).map(Option::unwrap_or_default);
        Ok(Completion::Done(Address::new(
            name,
            street,
            city,
            province,
            postal_code,
            country,
        )))
    }
}

fn slot_index(key: AddressKey) -> usize {
    AddressKey::STEPS
        .iter()
        .position(|candidate| *candidate == key)
        .unwrap_or_default()
}

pub fn is_url(name: &str) -> bool {
    URL_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}
