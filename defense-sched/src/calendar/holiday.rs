/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Fixed-date annual holidays.
//!
//! Free functions and a tiny value type so they can be parsed and tested
//! without building a whole [`CalendarRules`](super::CalendarRules).

use chrono::{Datelike, NaiveDate};

/// An annual holiday on a fixed Gregorian month/day, valid for every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Holiday {
    pub month: u32,
    pub day: u32,
}

impl Holiday {
    /// Returns `None` for month/day pairs that never exist (Feb 29 is
    /// accepted because it exists in leap years).
    pub fn new(month: u32, day: u32) -> Option<Self> {
        // 2000 is a leap year, so every real month/day validates against it.
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

impl std::fmt::Display for Holiday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Parse an `MM-DD` string.
pub fn parse_holiday(s: &str) -> Option<Holiday> {
    let (m, d) = s.trim().split_once('-')?;
    Holiday::new(m.parse().ok()?, d.parse().ok()?)
}

/// The five fixed-date holidays used when the configuration names none.
pub fn default_holidays() -> Vec<Holiday> {
    [(1, 1), (1, 12), (5, 1), (7, 5), (11, 1)]
        .into_iter()
        .map(|(month, day)| Holiday { month, day })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
