//! Input handling for plan selection.
//!
//! Turns the raw answers from the prompt (or command-line flags) into a
//! [`PlanSelection`]. Nothing here reads from the terminal.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::Result;
use crate::planning_center::types::parse_date;
use crate::planning_center::PlanSelection;

/// Lookup modes offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Next plan the configured person is scheduled for
    Scheduled,
    /// Plan on a specific date
    Date,
}

impl Mode {
    /// Parse a menu answer. `2` or `date` picks [`Mode::Date`]; any other
    /// answer, including an empty one, picks [`Mode::Scheduled`].
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "2" | "date" => Self::Date,
            _ => Self::Scheduled,
        }
    }
}

/// The Sunday on or after `today`
pub fn next_sunday(today: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - today.weekday().num_days_from_sunday()) % 7;
    today
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .unwrap_or(today)
}

/// Build the selection for `mode`. In date mode an empty date means the
/// upcoming Sunday; otherwise it must be `YYYY-MM-DD`.
pub fn selection_for(mode: Mode, date_input: Option<&str>, today: NaiveDate) -> Result<PlanSelection> {
    match mode {
        Mode::Scheduled => Ok(PlanSelection::NextScheduled { today }),
        Mode::Date => match date_input.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Ok(PlanSelection::ByDate(parse_date(raw)?)),
            None => Ok(PlanSelection::ByDate(next_sunday(today))),
        },
    }
}
