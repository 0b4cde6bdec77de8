/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Defense timetable scheduler.
//!
//! [`DefenseScheduler`] places every [`EvaluationUnit`] of a session into the
//! earliest feasible (date, slot, room) triple using a deterministic
//! first-fit greedy walk:
//!
//! ```text
//! for date in eligible dates            (ascending)
//!   for window in day slots             (ascending)
//!     for unit in remaining units       (load order)
//!       person conflict?  → next unit
//!       first free room?  → assign, drop unit from remaining
//! ```
//!
//! A run is split into three phases so each boundary can be exercised on its
//! own:
//!
//! | Phase | Writes | Fails with |
//! |---|---|---|
//! | [`prepare`](DefenseScheduler::prepare) | nothing | config / not-found / date-range errors |
//! | [`purge`](DefenseScheduler::purge) | deletes the session's assignments | store errors |
//! | [`place`](DefenseScheduler::place) | rooms + new assignments | store errors |
//!
//! Units that find no slot are returned in
//! [`SchedulingResult::unassigned_unit_ids`]; that is never an error.  The
//! placement is not optimal: an exact solver could leave fewer units out.
//!
//! # Example
//! ```rust,ignore
//! let mut scheduler = DefenseScheduler::new(store);
//! let result = scheduler.run(&run_config)?;
//! println!("{} created, {} unassigned", result.created(), result.unassigned());
//! ```

pub mod conflict;
pub mod error;
pub mod rooms;

pub use error::{ConfigError, SchedulerError};

use tracing::{debug, info, warn};

use crate::config::{RunConfig, ValidatedRun};
use crate::slots::SlotGenerator;
use crate::store::ScheduleStore;
use crate::unit::{Assignment, EvaluationUnit, Period, RoleSets, SchedulingResult};

use conflict::{has_person_conflict, Booking, Ledger};
use rooms::RoomCache;

// ── RunPlan ───────────────────────────────────────────────────────────────────

/// Everything [`prepare`](DefenseScheduler::prepare) checked and loaded.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub run: ValidatedRun,
    pub period: Period,
    /// Units of the session, in load order.
    pub units: Vec<EvaluationUnit>,
}

// ── DefenseScheduler ──────────────────────────────────────────────────────────

/// The assignment engine.
///
/// Owns the store handle only.  All per-run state (room cache, ledger,
/// remaining units) lives inside [`place`](Self::place) and is dropped when
/// the call returns, so nothing leaks from one run into the next.
pub struct DefenseScheduler<S> {
    store: S,
}

impl<S: ScheduleStore> DefenseScheduler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Run all three phases for the session named in `config`.
    ///
    /// Re-running with the same input replaces the previous result of the
    /// session entirely.
    ///
    /// # Errors
    /// Any [`SchedulerError`]; only [`SchedulerError::Store`] can occur after
    /// the purge phase has started.
    pub fn run(&mut self, config: &RunConfig) -> Result<SchedulingResult, SchedulerError> {
        let plan = self.prepare(config)?;
        self.purge(&plan)?;
        self.place(&plan)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Phase 1: prepare (read-only)
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate the configuration, look up the period and load the units.
    pub fn prepare(&self, config: &RunConfig) -> Result<RunPlan, SchedulerError> {
        let run = config.validate()?;

        let period = self
            .store
            .find_period(&run.period_title)?
            .ok_or_else(|| SchedulerError::PeriodNotFound {
                title: run.period_title.clone(),
            })?;

        if period.start_date >= period.end_date {
            return Err(SchedulerError::DateRange {
                start: period.start_date,
                end: period.end_date,
            });
        }

        let units = self.store.units_for_session(&run.session)?;
        if units.is_empty() {
            return Err(SchedulerError::NoEligibleUnits {
                session: run.session.clone(),
            });
        }

        info!(
            session = %run.session,
            period = %period.title,
            start = %period.start_date,
            end = %period.end_date,
            units = units.len(),
            rooms = run.rooms.len(),
            "run prepared"
        );

        Ok(RunPlan { run, period, units })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Phase 2: purge
    // ─────────────────────────────────────────────────────────────────────────

    /// Delete every existing assignment of the plan's session.
    pub fn purge(&mut self, plan: &RunPlan) -> Result<usize, SchedulerError> {
        let removed = self.store.purge_session(&plan.run.session)?;
        info!(session = %plan.run.session, removed, "previous assignments purged");
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Phase 3: place
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve the rooms, then greedily place every unit of the plan.
    pub fn place(&mut self, plan: &RunPlan) -> Result<SchedulingResult, SchedulerError> {
        let run = &plan.run;
        info!(session = %run.session, "=== DefenseScheduler::place() ===");

        let rooms = RoomCache::resolve(&mut self.store, &run.rooms)?;
        let slots = SlotGenerator::new(run.hours, run.duration, run.gap);
        let mut ledger = Ledger::new();

        let mut remaining: Vec<(EvaluationUnit, RoleSets)> = plan
            .units
            .iter()
            .map(|u| (u.clone(), u.role_sets()))
            .collect();
        let mut assignments: Vec<Assignment> = Vec::new();

        let dates = run.calendar.eligible_dates(
            plan.period.start_date,
            plan.period.end_date,
            &run.excluded_dates,
        );

        'dates: for date in dates {
            debug!(%date, remaining = remaining.len(), "visiting date");

            for window in slots.clone() {
                if remaining.is_empty() {
                    break 'dates;
                }

                let mut unplaced = Vec::with_capacity(remaining.len());
                for (unit, people) in std::mem::take(&mut remaining) {
                    let bookings = ledger.bookings_on(&self.store, date)?;

                    if has_person_conflict(bookings, &people, &window) {
                        debug!(unit = %unit.id, %date, %window, "person conflict");
                        unplaced.push((unit, people));
                        continue;
                    }

                    let Some(room) = rooms.select(bookings, &window) else {
                        debug!(unit = %unit.id, %date, %window, "no free room");
                        unplaced.push((unit, people));
                        continue;
                    };

                    let assignment = Assignment {
                        unit_id: unit.id.clone(),
                        room_id: room.id,
                        date,
                        window,
                        session: run.session.clone(),
                    };
                    debug!(
                        unit = %unit.id,
                        room = %room.name,
                        %date,
                        %window,
                        "✓ assigned"
                    );

                    self.store.insert_assignment(assignment.clone())?;
                    ledger.record(Booking {
                        assignment: assignment.clone(),
                        people,
                    });
                    assignments.push(assignment);
                }
                remaining = unplaced;
            }
        }

        let unassigned_unit_ids: Vec<_> = remaining.into_iter().map(|(u, _)| u.id).collect();
        for id in &unassigned_unit_ids {
            warn!(unit = %id, session = %run.session, "✗ no feasible slot");
        }

        info!(
            session = %run.session,
            created = assignments.len(),
            unassigned = unassigned_unit_ids.len(),
            "=== Scheduling complete ==="
        );

        Ok(SchedulingResult {
            session: run.session.clone(),
            assignments,
            unassigned_unit_ids,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
