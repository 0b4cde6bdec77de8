/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Defense timetable scheduler.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── config/         – YAML run configuration + validation
//! ├── calendar/       – eligible dates (reserved weekday, holidays, exclusions)
//! ├── slots           – per-day time windows
//! ├── unit            – units, rooms, assignments, results
//! ├── scheduler/      – greedy assignment engine, conflicts, room selection
//! ├── store/          – persistent store boundary + in-memory store
//! ├── report          – result reporter boundary
//! └── runner          – per-session locking and bounded retry
//! ```

pub mod calendar;
pub mod config;
pub mod report;
pub mod runner;
pub mod scheduler;
pub mod slots;
pub mod store;
pub mod unit;
