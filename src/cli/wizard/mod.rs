//! Step-by-step builders for ledger records.
//!
//! Every builder is a [`StepFlow`]: an ordered list of field keys plus a
//! function that builds one field. [`run_steps`] walks the list, moving
//! forward on success and one step back on [`Signal::Back`]; going back from
//! the first step hands the signal to the caller.

pub mod address;
pub mod item;
pub mod receipt;
pub mod timestamp;
pub mod transaction;

use crate::cli::core::{Signal, WizardResult};
use crate::cli::prompt::ask_yes_no;
use crate::cli::ui::interaction::Interaction;

pub use address::AddressBuilder;
pub use item::ItemBuilder;
pub use receipt::ReceiptBuilder;
pub use timestamp::TimestampBuilder;
pub use transaction::TransactionBuilder;

/// Where the stepper currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepContext {
    pub index: usize,
    pub total: usize,
    /// True when this step was reached by going back.
    pub backwards: bool,
}

/// Outcome of a successfully built step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next,
    /// Skip the remaining steps.
    Finish,
}

/// Outcome of the final stage once every step is filled.
#[derive(Debug)]
pub enum Completion<T> {
    Done(T),
    /// Resume at the given step index.
    Revisit(usize),
}

pub trait StepFlow {
    type Key: Copy;
    type Output;

    fn steps(&self) -> &[Self::Key];

    fn build_step(
        &mut self,
        key: Self::Key,
        context: &StepContext,
        io: &mut dyn Interaction,
    ) -> WizardResult<Advance>;

    /// Called before stepping back from `context.index`.
    fn on_back(&mut self, _context: &StepContext, _io: &mut dyn Interaction) {}

    fn finish(&mut self, io: &mut dyn Interaction) -> WizardResult<Completion<Self::Output>>;
}

pub fn run_steps<F: StepFlow + ?Sized>(
    flow: &mut F,
    io: &mut dyn Interaction,
) -> WizardResult<F::Output> {
    let total = flow.steps().len();
    let mut index = 0;
    let mut backwards = false;
    loop {
        if index >= total {
            match flow.finish(io)? {
                Completion::Done(output) => return Ok(output),
                Completion::Revisit(step) => {
                    index = step.min(total.saturating_sub(1));
                    backwards = true;
                    continue;
                }
            }
        }
        let key = flow.steps()[index];
        let context = StepContext {
            index,
            total,
            backwards,
        };
        match flow.build_step(key, &context, io) {
            Ok(Advance::Next) => {
                index += 1;
                backwards = false;
            }
            Ok(Advance::Finish) => {
                index = total;
                backwards = false;
            }
            Err(Signal::Back) if index > 0 => {
                flow.on_back(&context, io);
                index -= 1;
                backwards = true;
            }
            Err(signal) => return Err(signal),
        }
    }
}

/// Seed for a field: the value entered earlier this session, else the
/// caller's prefill, else the latest recorded value, else `default`.
pub fn resolve_seed<T>(
    session: Option<T>,
    prefill: Option<T>,
    history: Option<T>,
    default: impl FnOnce() -> T,
) -> T {
    session.or(prefill).or(history).unwrap_or_else(default)
}

/// Builds a list one entry at a time, asking `question` after each entry.
///
/// Starts at `start`, revising existing entries in place. Going back from an
/// entry revisits the previous one; going back from the first entry
/// propagates and leaves `entries` as they were, so a later visit resumes
/// from them. Answering no drops every entry after the current one.
/// `after` sees the entries built so far whenever the position changes.
pub fn repeat_list<T>(
    io: &mut dyn Interaction,
    entries: &mut Vec<T>,
    start: usize,
    question: &str,
    mut build: impl FnMut(&mut dyn Interaction, Option<&T>) -> WizardResult<T>,
    mut after: impl FnMut(&[T]),
) -> WizardResult<()> {
    let mut step = start.min(entries.len());
    loop {
        match build(io, entries.get(step)) {
            Ok(entry) => {
                if step < entries.len() {
                    entries[step] = entry;
                } else {
                    entries.push(entry);
                }
            }
            Err(Signal::Back) if step > 0 => {
                step -= 1;
                after(&entries[..step]);
                continue;
            }
            Err(signal) => return Err(signal),
        }
        step += 1;
        after(&entries[..step]);
        if !ask_yes_no(io, question)? {
            entries.truncate(step);
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::Prompt;
    use crate::cli::ui::script::ScriptedInteraction;

    /// Three text fields; the second can end the flow early.
    struct Triple {
        keys: [&'static str; 3],
        values: [Option<String>; 3],
        backs: usize,
        confirmations: usize,
    }

    impl Triple {
        fn new() -> Self {
            Self {
                keys: ["first", "second", "third"],
                values: Default::default(),
                backs: 0,
                confirmations: 0,
            }
        }
    }

    impl StepFlow for Triple {
        type Key = usize;
        type Output = Vec<String>;

        fn steps(&self) -> &[usize] {
            &[0, 1, 2]
        }

        fn build_step(
            &mut self,
            key: usize,
            _context: &StepContext,
            io: &mut dyn Interaction,
        ) -> WizardResult<Advance> {
            let seed = resolve_seed(self.values[key].clone(), None, None, String::new);
            let value = Prompt::new(self.keys[key]).prefill(seed).ask(io)?;
            let skip = value == "skip";
            self.values[key] = Some(value);
            Ok(if skip { Advance::Finish } else { Advance::Next })
        }

        fn on_back(&mut self, _context: &StepContext, _io: &mut dyn Interaction) {
            self.backs += 1;
        }

        fn finish(&mut self, io: &mut dyn Interaction) -> WizardResult<Completion<Vec<String>>> {
            self.confirmations += 1;
            if ask_yes_no(io, "Save? (y/n): ")? {
                Ok(Completion::Done(
                    self.values.iter().map(|v| v.clone().unwrap_or_default()).collect(),
                ))
            } else {
                Ok(Completion::Revisit(1))
            }
        }
    }

    #[test]
    fn back_keeps_entered_values() {
        let mut io = ScriptedInteraction::new(["x", "y", "b", "<KEEP>", "z", "y"]);
        let mut flow = Triple::new();
        let out = run_steps(&mut flow, &mut io).unwrap();
        assert_eq!(out, ["x", "y", "z"]);
        assert_eq!(flow.backs, 1);
        assert_eq!(io.remaining(), 0);
    }

    #[test]
    fn back_from_first_step_propagates() {
        let mut io = ScriptedInteraction::new(["b"]);
        let mut flow = Triple::new();
        assert!(matches!(run_steps(&mut flow, &mut io), Err(Signal::Back)));
        assert_eq!(flow.backs, 0);
    }

    #[test]
    fn declined_finish_revisits_step() {
        let mut io = ScriptedInteraction::new(["x", "y", "z", "n", "<KEEP>", "<KEEP>", "y"]);
        let mut flow = Triple::new();
        let out = run_steps(&mut flow, &mut io).unwrap();
        assert_eq!(out, ["x", "y", "z"]);
        assert_eq!(flow.confirmations, 2);
        assert_eq!(io.prompts().len(), 7);
    }

    #[test]
    fn finish_skips_remaining_steps() {
        let mut io = ScriptedInteraction::new(["a", "skip", "y"]);
        let out = run_steps(&mut Triple::new(), &mut io).unwrap();
        assert_eq!(out, ["a", "skip", ""]);
    }

    #[test]
    fn seed_fallback_order() {
        assert_eq!(resolve_seed(Some(1), Some(2), Some(3), || 4), 1);
        assert_eq!(resolve_seed(None, Some(2), Some(3), || 4), 2);
        assert_eq!(resolve_seed(None, None, Some(3), || 4), 3);
        assert_eq!(resolve_seed(None::<i32>, None, None, || 4), 4);
    }

    fn ask_word(io: &mut dyn Interaction, existing: Option<&String>) -> WizardResult<String> {
        Prompt::new("word")
            .prefill(existing.cloned().unwrap_or_default())
            .ask(io)
    }

    #[test]
    fn repeat_list_truncates_on_no() {
        let mut io = ScriptedInteraction::new(["<KEEP>", "n"]);
        let mut words = vec!["one".to_string(), "two".to_string()];
        repeat_list(&mut io, &mut words, 0, "More? (y/n): ", ask_word, |_| {}).unwrap();
        assert_eq!(words, ["one"]);
    }

    #[test]
    fn repeat_list_steps_back_one_entry() {
        let mut io = ScriptedInteraction::new(["x", "y", "b", "<KEEP>", "y", "z", "n"]);
        let mut seen = Vec::new();
        let mut words = Vec::new();
        repeat_list(&mut io, &mut words, 0, "More? (y/n): ", ask_word, |built| {
            seen.push(built.len())
        })
        .unwrap();
        assert_eq!(words, ["x", "z"]);
        assert_eq!(seen, [1, 0, 1, 2]);
    }

    #[test]
    fn repeat_list_back_at_start_propagates_and_keeps_entries() {
        let mut io = ScriptedInteraction::new(["<KEEP>", "y", "b", "b"]);
        let mut words = vec!["kept".to_string()];
        let result = repeat_list(&mut io, &mut words, 0, "More? ", ask_word, |_| {});
        assert!(matches!(result, Err(Signal::Back)));
        assert_eq!(words, ["kept"]);
    }
}
