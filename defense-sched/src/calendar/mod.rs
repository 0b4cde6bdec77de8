/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Eligible defense dates.
//!
//! [`EligibleDates`] walks a period day by day in ascending order and skips:
//!
//! * the reserved non-working weekday,
//! * the fixed annual holidays (month/day, any year),
//! * dates the caller explicitly excluded.
//!
//! The walker is a plain iterator: lazy, finite, and restartable by cloning
//! or calling [`CalendarRules::eligible_dates`] again.

pub mod holiday;

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

pub use holiday::Holiday;

/// Default reserved weekday.
pub const DEFAULT_RESERVED_WEEKDAY: Weekday = Weekday::Fri;

// ── CalendarRules ─────────────────────────────────────────────────────────────

/// Non-working days that apply to every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRules {
    pub reserved_weekday: Weekday,
    pub holidays: Vec<Holiday>,
}

impl Default for CalendarRules {
    fn default() -> Self {
        Self {
            reserved_weekday: DEFAULT_RESERVED_WEEKDAY,
            holidays: holiday::default_holidays(),
        }
    }
}

impl CalendarRules {
    /// Returns `true` if `date` is a working day under these rules (caller
    /// exclusions are not considered here).
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        date.weekday() != self.reserved_weekday && !self.holidays.iter().any(|h| h.matches(date))
    }

    /// Eligible dates in `[start, end]`, both inclusive.
    pub fn eligible_dates<'a>(
        &'a self,
        start: NaiveDate,
        end: NaiveDate,
        excluded: &'a BTreeSet<NaiveDate>,
    ) -> EligibleDates<'a> {
        EligibleDates {
            rules: self,
            excluded,
            next: Some(start),
            end,
        }
    }
}

// ── EligibleDates ─────────────────────────────────────────────────────────────

/// Iterator over eligible dates.  See the module docs for the filters.
#[derive(Debug, Clone)]
pub struct EligibleDates<'a> {
    rules: &'a CalendarRules,
    excluded: &'a BTreeSet<NaiveDate>,
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for EligibleDates<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            let date = self.next.filter(|d| *d <= self.end)?;
            self.next = date.succ_opt();

            if !self.rules.is_working_day(date) {
                debug!(%date, "skipping non-working day");
                continue;
            }
            if self.excluded.contains(&date) {
                debug!(%date, "skipping excluded date");
                continue;
            }
            return Some(date);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
