use chrono_tz::Tz;

use crate::cli::core::WizardResult;
use crate::cli::io as cli_io;
use crate::cli::prompt::{display_entries, Prompt, SEARCH_PROMPT};
use crate::cli::ui::interaction::Interaction;
use crate::ledger::timestamp::{is_valid_date, parse_timezone, suggest_timezone, supported_timezones};
use crate::ledger::{Ledger, Timestamp, TimestampKey};

use super::{resolve_seed, run_steps, Advance, Completion, StepContext, StepFlow};

pub struct TimestampBuilder<'a> {
    prefill: Option<&'a Timestamp>,
    now: Timestamp,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    timezone: Option<Tz>,
}

impl<'a> TimestampBuilder<'a> {
    /// "Now" is taken in the zone of the most recent transaction, or UTC for
    /// an empty ledger.
    pub fn new(ledger: &Ledger, prefill: Option<&'a Timestamp>) -> Self {
        let zone = ledger
            .latest()
            .map(|transaction| transaction.timestamp().timezone())
            .unwrap_or(Tz::UTC);
        Self {
            prefill,
            now: Timestamp::now(zone),
            year: None,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
            timezone: None,
        }
    }

    pub fn build(mut self, io: &mut dyn Interaction) -> WizardResult<Timestamp> {
        run_steps(&mut self, io)
    }

    fn session_value(&self, key: TimestampKey) -> Option<String> {
        match key {
            TimestampKey::Year => self.year.map(|value| value.to_string()),
            TimestampKey::Month => self.month.map(|value| value.to_string()),
            TimestampKey::Day => self.day.map(|value| value.to_string()),
            TimestampKey::Hour => self.hour.map(|value| value.to_string()),
            TimestampKey::Minute => self.minute.map(|value| value.to_string()),
            TimestampKey::Second => self.second.map(|value| value.to_string()),
            TimestampKey::Timezone => self.timezone.map(|tz| tz.name().to_string()),
            TimestampKey::Timestamp => None,
        }
    }

    /// The date and zone default to now; the time of day has no default.
    fn seed(&self, key: TimestampKey) -> String {
        let default = match key {
            TimestampKey::Year
            | TimestampKey::Month
            | TimestampKey::Day
            | TimestampKey::Timezone => Some(self.now.get(key)),
            _ => None,
        };
        resolve_seed(
            self.session_value(key),
            self.prefill.map(|timestamp| timestamp.get(key)),
            default,
            String::new,
        )
    }

    /// Calendar fields take numbers only; `l` and `s` are ordinary input.
    fn prompt(&self, key: TimestampKey) -> Prompt<'static> {
        Prompt::for_key(key)
            .prefill(self.seed(key))
            .without_list_and_search()
    }

    fn build_timezone(&mut self, io: &mut dyn Interaction) -> WizardResult<Tz> {
        let zones: Vec<String> = supported_timezones().iter().map(|zone| zone.to_string()).collect();
        let mut prompt = Prompt::for_key(TimestampKey::Timezone)
            .prefill(self.seed(TimestampKey::Timezone))
            .on_list(|io| display_entries(io, &zones))
            .on_search(|io| io.search(&zones, SEARCH_PROMPT));
        loop {
            let name = prompt.ask(io)?;
            match parse_timezone(&name) {
                Ok(tz) => return Ok(tz),
                Err(_) => {
                    cli_io::print_error("Please enter a valid timezone.");
                    if let Some(zone) = suggest_timezone(&name) {
                        cli_io::print_info(format!("Did you mean `{zone}`?"));
                    }
                }
            }
        }
    }
}

impl StepFlow for TimestampBuilder<'_> {
    type Key = TimestampKey;
    type Output = Timestamp;

    fn steps(&self) -> &[TimestampKey] {
        &TimestampKey::STEPS
    }

    fn build_step(
        &mut self,
        key: TimestampKey,
        _context: &StepContext,
        io: &mut dyn Interaction,
    ) -> WizardResult<Advance> {
        match key {
            TimestampKey::Year => {
                let year = self.prompt(key).ask_parsed(io, parse_year)?;
                self.year = Some(year);
            }
            TimestampKey::Month => {
                let month = self.prompt(key).ask_parsed(io, |text| {
                    parse_in_range(text, 1, 12, "Please enter a valid month [1-12].")
                })?;
                self.month = Some(month);
            }
            TimestampKey::Day => {
                let year = self.year.unwrap_or_default();
                let month = self.month.unwrap_or(1);
                let day = self
                    .prompt(key)
                    .ask_parsed(io, |text| parse_day(text, year, month))?;
                self.day = Some(day);
            }
            TimestampKey::Hour => {
                let hour = self.prompt(key).ask_parsed(io, |text| {
                    parse_in_range(text, 0, 23, "Please enter a valid hour [0-23].")
                })?;
                self.hour = Some(hour);
            }
            TimestampKey::Minute => {
                let minute = self.prompt(key).ask_parsed(io, |text| {
                    parse_in_range(text, 0, 59, "Please enter a valid minute [0-59].")
                })?;
                self.minute = Some(minute);
            }
            TimestampKey::Second => {
                let second = self.prompt(key).ask_parsed(io, |text| {
                    parse_in_range(text, 0, 59, "Please enter a valid second [0-59].")
                })?;
                self.second = Some(second);
            }
            TimestampKey::Timezone => {
                let tz = self.build_timezone(io)?;
                self.timezone = Some(tz);
            }
            TimestampKey::Timestamp => {}
        }
        Ok(Advance::Next)
    }

    /// A local time skipped by a clock change sends the user back to the
    /// hour.
    fn finish(&mut self, _io: &mut dyn Interaction) -> WizardResult<Completion<Timestamp>> {
        let tz = self.timezone.unwrap_or(Tz::UTC);
        let composed = Timestamp::from_calendar(
            self.year.unwrap_or_default(),
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
            self.hour.unwrap_or_default(),
            self.minute.unwrap_or_default(),
            self.second.unwrap_or_default(),
            tz,
        );
        match composed {
            Ok(timestamp) => Ok(Completion::Done(timestamp)),
            Err(err) => {
                tracing::debug!(error = %err, "rejected local time");
                cli_io::print_error(format!("This time does not exist in {}.", tz.name()));
                Ok(Completion::Revisit(hour_step()))
            }
        }
    }
}

fn hour_step() -> usize {
    TimestampKey::STEPS
        .iter()
        .position(|key| *key == TimestampKey::Hour)
        .unwrap_or_default()
}

fn parse_year(text: &str) -> Result<i32, String> {
    match text.parse::<i32>() {
        Ok(year) if (0..=9999).contains(&year) => Ok(year),
        _ => Err("Please enter a valid year [YYYY].".to_string()),
    }
}

fn parse_in_range(text: &str, low: u32, high: u32, message: &str) -> Result<u32, String> {
    match text.parse::<u32>() {
        Ok(value) if (low..=high).contains(&value) => Ok(value),
        _ => Err(message.to_string()),
    }
}

/// The range check and the calendar check are separate; each has its own
/// message.
fn parse_day(text: &str, year: i32, month: u32) -> Result<u32, String> {
    let day = parse_in_range(text, 1, 31, "Please enter a valid day [1-31].")?;
    if !is_valid_date(year, month, day) {
        return Err("Please enter a valid day in this month.".to_string());
    }
    Ok(day)
}
