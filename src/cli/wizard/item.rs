use crate::cli::core::WizardResult;
use crate::cli::prompt::{ask_binary, Prompt};
use crate::cli::ui::interaction::Interaction;
use crate::ledger::{Item, ItemKey, Ledger};

use super::{repeat_list, resolve_seed, run_steps, Advance, Completion, StepContext, StepFlow};

const GAIN: &str = "g";
const LOSS: &str = "l";

pub struct ItemBuilder<'a> {
    ledger: &'a Ledger,
    prefill: Option<&'a Item>,
    name: Option<String>,
    price: Option<f64>,
    quantity: Option<u32>,
    tags: Option<Vec<String>>,
}

impl<'a> ItemBuilder<'a> {
    pub fn new(ledger: &'a Ledger, prefill: Option<&'a Item>) -> Self {
        Self {
            ledger,
            prefill,
            name: None,
            price: None,
            quantity: None,
            tags: None,
        }
    }

    pub fn build(mut self, io: &mut dyn Interaction) -> WizardResult<Item> {
        run_steps(&mut self, io)
    }

    fn build_name(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        let seed = resolve_seed(
            self.name.clone(),
            self.prefill.map(|item| item.name().to_string()),
            None,
            String::new,
        );
        let name = Prompt::for_key(ItemKey::Name)
            .prefill(seed)
            .history(self.ledger.history(ItemKey::Name.into()))
            .ask(io)?;
        self.name = Some(name);
        Ok(())
    }

    /// The magnitude is typed first, then whether it was a gain or a loss.
    fn build_price(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        let seed = self.price.or(self.prefill.map(Item::price));
        let magnitude = Prompt::for_key(ItemKey::Price)
            .prefill(seed.map(|price| price.abs().to_string()).unwrap_or_default())
            .without_list_and_search()
            .ask_parsed(io, parse_positive_price)?;
        let sign_seed = match seed {
            Some(price) if price > 0.0 => GAIN,
            Some(_) => LOSS,
            None => "",
        };
        let is_gain = ask_binary(
            io,
            "Is this a gain or a loss? (g/l): ",
            GAIN,
            LOSS,
            sign_seed,
        )?;
        self.price = Some(if is_gain { magnitude } else { -magnitude });
        Ok(())
    }

    fn build_quantity(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        let seed = resolve_seed(
            self.quantity.map(|quantity| quantity.to_string()),
            self.prefill.map(|item| item.quantity().to_string()),
            None,
            String::new,
        );
        let quantity = Prompt::for_key(ItemKey::Quantity)
            .prefill(seed)
            .without_list_and_search()
            .ask_parsed(io, parse_quantity)?;
        self.quantity = Some(quantity);
        Ok(())
    }

    fn build_tags(&mut self, io: &mut dyn Interaction) -> WizardResult<()> {
        let mut tags = resolve_seed(
            self.tags.take().filter(|tags| !tags.is_empty()),
            self.prefill.map(|item| item.tags().to_vec()),
            None,
            Vec::new,
        );
        let history = self.ledger.history(ItemKey::Tags.into());
        let result = repeat_list(
            io,
            &mut tags,
            0,
            "Add another tag? (y/n): ",
            |io, existing| {
                Prompt::new("tag")
                    .prefill(existing.cloned().unwrap_or_default())
                    .history(history.clone())
                    .ask(io)
            },
            |_| {},
        );
        self.tags = Some(tags);
        result
    }
}

impl StepFlow for ItemBuilder<'_> {
    type Key = ItemKey;
    type Output = Item;

    fn steps(&self) -> &[ItemKey] {
        &ItemKey::STEPS
    }

    fn build_step(
        &mut self,
        key: ItemKey,
        _context: &StepContext,
        io: &mut dyn Interaction,
    ) -> WizardResult<Advance> {
        match key {
            ItemKey::Name => self.build_name(io)?,
            ItemKey::Price => self.build_price(io)?,
            ItemKey::Quantity => self.build_quantity(io)?,
            ItemKey::Tags => self.build_tags(io)?,
        }
        Ok(Advance::Next)
    }

    fn finish(&mut self, _io: &mut dyn Interaction) -> WizardResult<Completion<Item>> {
        let item = Item::new(
            self.name.take().unwrap_or_default(),
            self.price.take().unwrap_or_default(),
            self.quantity.take().unwrap_or_default(),
            self.tags.take().unwrap_or_default(),
        )?;
        Ok(Completion::Done(item))
    }
}

fn parse_positive_price(text: &str) -> Result<f64, String> {
    match text.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err("Please enter a positive number.".to_string()),
    }
}

fn parse_quantity(text: &str) -> Result<u32, String> {
    match text.parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err("Please enter a positive integer.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::Signal;
    use crate::cli::ui::script::ScriptedInteraction;

    fn build(inputs: &[&str], prefill: Option<&Item>) -> WizardResult<Item> {
        let ledger = Ledger::default();
        let mut io = ScriptedInteraction::new(inputs.iter().copied());
        ItemBuilder::new(&ledger, prefill).build(&mut io)
    }

    #[test]
    fn loss_answer_negates_price() {
        let item = build(&["Chair", "10", "l", "1", "furniture", "n"], None).unwrap();
        assert_eq!(item.price(), -10.0);
        assert_eq!(item.tags(), ["furniture"]);
    }

    #[test]
    fn invalid_numbers_reprompt() {
        let item = build(
            &["Pens", "-3", "zero", "0", "2.5", "g", "0", "1.5", "3", "office", "n"],
            None,
        )
        .unwrap();
        assert_eq!(item.price(), 2.5);
        assert_eq!(item.quantity(), 3);
    }

    #[test]
    fn tags_loop_steps_back_one_tag_then_to_quantity() {
        let item = build(
            &[
                "Tea", "4", "l", "2", "drink", "y", "b", "<KEEP>", "y", "hot", "y", "b", "b",
                "b", "<KEEP>", "<KEEP>", "y", "<KEEP>", "n",
            ],
            None,
        )
        .unwrap();
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.tags(), ["drink", "hot"]);
    }

    #[test]
    fn prefilled_item_keeps_sign_and_tags() {
        let existing = Item::new("Refund", 15.0, 1, vec!["returns".into(), "misc".into()]).unwrap();
        let item = build(
            &["<KEEP>", "<KEEP>", "<KEEP>", "<KEEP>", "<KEEP>", "y", "<KEEP>", "n"],
            Some(&existing),
        )
        .unwrap();
        assert_eq!(item, existing);
    }

    #[test]
    fn answering_no_truncates_prefilled_tags() {
        let existing = Item::new("Soap", -2.0, 1, vec!["home".into(), "bath".into()]).unwrap();
        let item = build(
            &["<KEEP>", "<KEEP>", "<KEEP>", "<KEEP>", "<KEEP>", "n"],
            Some(&existing),
        )
        .unwrap();
        assert_eq!(item.price(), -2.0);
        assert_eq!(item.tags(), ["home"]);
    }

    #[test]
    fn back_from_name_propagates() {
        assert!(matches!(build(&["b"], None), Err(Signal::Back)));
    }
}
