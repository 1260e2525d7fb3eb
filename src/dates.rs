use chrono::{Duration, NaiveDate};

use crate::{Error, Result};

/// Parses a user-supplied ISO date (`YYYY-MM-DD`).
pub fn parse_user_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::BadDate(input.into()))
}

/// Lazily yields `start, start + step, start + 2 * step, ...` strictly below
/// `end`. The interval is half-open: `end` itself is never produced, and
/// `start >= end` yields nothing. The step must be positive, otherwise the
/// range is treated as empty.
pub fn date_range(
    start: NaiveDate,
    end: NaiveDate,
    step: Duration,
) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(
        (step > Duration::zero() && start < end).then_some(start),
        move |date| date.checked_add_signed(step).filter(|next| *next < end),
    )
}
