/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core data structures for the defense scheduler.
//!
//! Two sides of the scheduling pipeline:
//!
//! ```text
//! store ──(EvaluationUnit)──►  DefenseScheduler  ──(Assignment)──►  store / reporter
//!           ↑ read-only input                          ↑ immutable output
//! ```
//!
//! # Ownership model
//! Units are loaded from the [`ScheduleStore`](crate::store::ScheduleStore)
//! once per run and never mutated.  The scheduler only ever produces new
//! [`Assignment`] values; it does not write placement state back into a unit.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::slots::TimeWindow;

/// Identifier of an evaluation unit as known to the store.
pub type UnitId = String;

/// Identifier of a room in the persistent room catalogue.
pub type RoomId = u32;

// ── Panel ─────────────────────────────────────────────────────────────────────

/// The two-person evaluation body assigned to a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub chair: String,
    pub examiner: String,
}

// ── RoleSets ──────────────────────────────────────────────────────────────────

/// The people attached to one unit, grouped by role family.
///
/// Empty identifiers are never inserted, so an absent secondary supervisor or
/// a missing panel simply yields a smaller set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSets {
    /// Primary and secondary supervisor.
    pub supervisors: BTreeSet<String>,
    /// Panel chair and examiner.
    pub panel: BTreeSet<String>,
}

impl RoleSets {
    /// Returns `true` if any person is shared between `self` and `other`.
    ///
    /// The four pairwise checks are kept separate so a shared person is
    /// detected whatever role they hold on either side.
    pub fn shares_person_with(&self, other: &RoleSets) -> bool {
        !self.supervisors.is_disjoint(&other.supervisors)
            || !self.panel.is_disjoint(&other.panel)
            || !self.supervisors.is_disjoint(&other.panel)
            || !other.supervisors.is_disjoint(&self.panel)
    }

    pub fn is_empty(&self) -> bool {
        self.supervisors.is_empty() && self.panel.is_empty()
    }
}

fn insert_person(set: &mut BTreeSet<String>, person: Option<&str>) {
    if let Some(p) = person.map(str::trim).filter(|p| !p.is_empty()) {
        set.insert(p.to_string());
    }
}

// ── EvaluationUnit ────────────────────────────────────────────────────────────

/// One student project (or group) that needs a defense slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationUnit {
    pub id: UnitId,

    /// Session label this unit belongs to.
    pub session: String,

    pub primary_supervisor: String,

    #[serde(default)]
    pub secondary_supervisor: Option<String>,

    /// Evaluation panel.  A unit without a panel can never be in a panel
    /// conflict.
    #[serde(default)]
    pub panel: Option<Panel>,
}

impl EvaluationUnit {
    /// Build the supervisor and panel sets used by conflict detection.
    pub fn role_sets(&self) -> RoleSets {
        let mut sets = RoleSets::default();
        insert_person(&mut sets.supervisors, Some(&self.primary_supervisor));
        insert_person(&mut sets.supervisors, self.secondary_supervisor.as_deref());
        if let Some(panel) = &self.panel {
            insert_person(&mut sets.panel, Some(&panel.chair));
            insert_person(&mut sets.panel, Some(&panel.examiner));
        }
        sets
    }
}

// ── Room ──────────────────────────────────────────────────────────────────────

/// A physical room as stored in the room catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
}

// ── Period ────────────────────────────────────────────────────────────────────

/// Defense period record, looked up by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub title: String,
    /// Inclusive.
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
}

// ── Assignment ────────────────────────────────────────────────────────────────

/// Final binding of a unit to a room, date and time window.
///
/// Immutable once created.  All assignments of a session are replaced as a
/// whole on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub unit_id: UnitId,
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub session: String,
}

// ── SchedulingResult ──────────────────────────────────────────────────────────

/// Outcome of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulingResult {
    pub session: String,

    /// Assignments in creation order.
    pub assignments: Vec<Assignment>,

    /// Units that could not be placed, in load order.
    pub unassigned_unit_ids: Vec<UnitId>,
}

impl SchedulingResult {
    pub fn created(&self) -> usize {
        self.assignments.len()
    }

    pub fn unassigned(&self) -> usize {
        self.unassigned_unit_ids.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
