/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Time-of-day windows and the per-day slot generator.
//!
//! A slot is `[t, t + duration)`.  The first slot starts at the working-hours
//! start; each following slot starts `duration + break` later, whether or not
//! the previous slot was filled.  Generation stops at the first slot that
//! would end after the working-hours end.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// A half-open time-of-day window `[start, end)` on some date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// Validated working-hours window for one run.  `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

// ── SlotGenerator ─────────────────────────────────────────────────────────────

/// Lazy, finite sequence of candidate windows for one day.
///
/// `Clone` gives a fresh copy of the remaining sequence, so the generator for
/// a run can be built once and cloned for every eligible date.
#[derive(Debug, Clone)]
pub struct SlotGenerator {
    next_start: Option<NaiveTime>,
    day_end: NaiveTime,
    duration: Duration,
    step: Duration,
}

impl SlotGenerator {
    /// `duration` must be positive; `gap` is the break inserted after each
    /// slot and may be zero.
    pub fn new(hours: WorkingHours, duration: Duration, gap: Duration) -> Self {
        let valid = duration > Duration::zero() && gap >= Duration::zero();
        Self {
            next_start: valid.then_some(hours.start),
            day_end: hours.end,
            duration,
            step: duration + gap,
        }
    }
}

/// `t + d`, or `None` if the addition runs past midnight.
fn add_within_day(t: NaiveTime, d: Duration) -> Option<NaiveTime> {
    let (sum, wrapped_secs) = t.overflowing_add_signed(d);
    (wrapped_secs == 0).then_some(sum)
}

impl Iterator for SlotGenerator {
    type Item = TimeWindow;

    fn next(&mut self) -> Option<TimeWindow> {
        let start = self.next_start.take()?;
        let end = add_within_day(start, self.duration)?;
        if end > self.day_end {
            return None;
        }
        self.next_start = add_within_day(start, self.step);
        Some(TimeWindow::new(start, end))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn hours(start: NaiveTime, end: NaiveTime) -> WorkingHours {
        WorkingHours { start, end }
    }

    #[test]
    fn back_to_back_slots_without_break() {
        let slots: Vec<_> = SlotGenerator::new(
            hours(t(8, 0), t(10, 0)),
            Duration::minutes(30),
            Duration::zero(),
        )
        .collect();
        assert_eq!(
            slots,
            vec![
                TimeWindow::new(t(8, 0), t(8, 30)),
                TimeWindow::new(t(8, 30), t(9, 0)),
                TimeWindow::new(t(9, 0), t(9, 30)),
                TimeWindow::new(t(9, 30), t(10, 0)),
            ]
        );
    }

    #[test]
    fn break_is_inserted_after_every_slot() {
        let starts: Vec<_> = SlotGenerator::new(
            hours(t(8, 0), t(10, 0)),
            Duration::minutes(30),
            Duration::minutes(15),
        )
        .map(|w| w.start)
        .collect();
        // 08:00, 08:45, 09:30 (ends exactly at 10:00)
        assert_eq!(starts, vec![t(8, 0), t(8, 45), t(9, 30)]);
    }

    #[test]
    fn last_slot_must_end_within_working_hours() {
        let slots: Vec<_> = SlotGenerator::new(
            hours(t(8, 0), t(9, 10)),
            Duration::minutes(30),
            Duration::zero(),
        )
        .collect();
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|w| w.end <= t(9, 10)));
    }

    #[test]
    fn window_shorter_than_duration_yields_nothing() {
        let mut gen = SlotGenerator::new(
            hours(t(8, 0), t(8, 20)),
            Duration::minutes(30),
            Duration::zero(),
        );
        assert!(gen.next().is_none());
    }

    #[test]
    fn generation_stops_at_midnight() {
        let slots: Vec<_> = SlotGenerator::new(
            hours(t(23, 0), NaiveTime::from_hms_opt(23, 59, 59).unwrap()),
            Duration::minutes(30),
            Duration::zero(),
        )
        .collect();
        assert_eq!(slots, vec![TimeWindow::new(t(23, 0), t(23, 30))]);
    }

    #[test]
    fn zero_duration_yields_nothing() {
        let mut gen = SlotGenerator::new(hours(t(8, 0), t(10, 0)), Duration::zero(), Duration::zero());
        assert!(gen.next().is_none());
    }

    #[test]
    fn cloned_generator_restarts_the_sequence() {
        let gen = SlotGenerator::new(
            hours(t(8, 0), t(9, 0)),
            Duration::minutes(30),
            Duration::zero(),
        );
        let first: Vec<_> = gen.clone().collect();
        let second: Vec<_> = gen.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn window_display_uses_hour_minute() {
        assert_eq!(TimeWindow::new(t(8, 0), t(8, 30)).to_string(), "08:00–08:30");
    }
}
