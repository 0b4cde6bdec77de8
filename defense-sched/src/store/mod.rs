/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Persistent store boundary.
//!
//! The scheduler never talks to a database directly.  Everything it reads or
//! writes goes through [`ScheduleStore`], which is synchronous: each run is a
//! single sequential worker.
//!
//! [`InMemoryStore`] is the bundled implementation used by the CLI and the
//! tests.

pub mod memory;

use chrono::NaiveDate;
use thiserror::Error;

use crate::unit::{Assignment, EvaluationUnit, Period, Room};

pub use memory::InMemoryStore;

/// Failure of the underlying store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A write violated a store-side constraint.
    #[error("store rejected write: {0}")]
    Rejected(String),
}

/// Reads and writes the scheduler needs from the persistent store.
pub trait ScheduleStore {
    /// Period record with exactly this title.
    fn find_period(&self, title: &str) -> Result<Option<Period>, StoreError>;

    /// All units of `session`, in load order.
    fn units_for_session(&self, session: &str) -> Result<Vec<EvaluationUnit>, StoreError>;

    fn unit(&self, id: &str) -> Result<Option<EvaluationUnit>, StoreError>;

    /// Delete every assignment tagged with `session`; returns how many were
    /// removed.
    fn purge_session(&mut self, session: &str) -> Result<usize, StoreError>;

    /// Return the room called `name`, creating it first if absent.
    fn ensure_room(&mut self, name: &str) -> Result<Room, StoreError>;

    /// Every assignment on `date`, across all sessions.
    fn assignments_on(&self, date: NaiveDate) -> Result<Vec<Assignment>, StoreError>;

    fn insert_assignment(&mut self, assignment: Assignment) -> Result<(), StoreError>;

    /// Assignments of `session` in insertion order.
    fn session_assignments(&self, session: &str) -> Result<Vec<Assignment>, StoreError>;
}
