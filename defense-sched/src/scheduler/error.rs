/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the defense scheduler.
//!
//! Two error enums model the two failure layers:
//!
//! * [`ConfigError`]: the run configuration is malformed (raised by
//!   [`RunConfig::validate`](crate::config::RunConfig::validate) before any
//!   store access).
//! * [`SchedulerError`]: top-level failure returned from
//!   [`DefenseScheduler::run()`](super::DefenseScheduler::run).
//!
//! A unit that cannot be placed is **not** an error; it is reported in
//! [`SchedulingResult::unassigned_unit_ids`](crate::unit::SchedulingResult).

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Why a run configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("working hours block is missing")]
    MissingWorkingHours,

    /// A required working-hours field (`session`, `start_time`, `end_time`)
    /// is absent or blank.
    #[error("working hours field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("room list is empty")]
    NoRooms,

    #[error("room #{index} has an empty name")]
    EmptyRoomName { index: usize },

    #[error("invalid time '{value}' for '{field}' (expected HH:MM)")]
    InvalidTime { field: &'static str, value: String },

    #[error("working hours start {start} is not before end {end}")]
    HoursNotOrdered { start: String, end: String },

    #[error("invalid excluded date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("invalid holiday '{value}' (expected MM-DD)")]
    InvalidHoliday { value: String },

    #[error("invalid reserved weekday '{value}'")]
    InvalidWeekday { value: String },

    /// Defense duration must be positive and the break non-negative.
    #[error("invalid {field}: {minutes} minute(s)")]
    InvalidDuration { field: &'static str, minutes: i64 },
}

// ── Top-level scheduler errors ────────────────────────────────────────────────

/// Top-level error type returned by
/// [`DefenseScheduler::run()`](super::DefenseScheduler::run).
///
/// | Variant | Class | Written before failing |
/// |---|---|---|
/// | `Config` | configuration | nothing |
/// | `PeriodNotFound` / `NoEligibleUnits` | not found | nothing |
/// | `DateRange` | date range | nothing |
/// | `Store` | store I/O | whatever the store accepted so far |
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("no defense period found with title '{title}'")]
    PeriodNotFound { title: String },

    #[error("no eligible units found for session '{session}'")]
    NoEligibleUnits { session: String },

    /// The period start date is not strictly before its end date.
    #[error("period start {start} is not before end {end}")]
    DateRange { start: NaiveDate, end: NaiveDate },

    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

impl SchedulerError {
    /// `PeriodNotFound` and `NoEligibleUnits`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SchedulerError::PeriodNotFound { .. } | SchedulerError::NoEligibleUnits { .. }
        )
    }

    /// Only store failures may succeed when the same run is attempted again;
    /// every other variant is a deterministic function of the input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulerError::Store(_))
    }
}
