/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! In-process [`ScheduleStore`] backed by plain collections.
//!
//! Seed data can be loaded from YAML:
//! ```yaml
//! periods:
//!   - title: "Defense 2026-S1"
//!     start_date: "2026-06-01"
//!     end_date: "2026-06-12"
//! rooms: ["Room A"]            # optional, pre-existing catalogue
//! units:
//!   - id: "PFE-001"
//!     session: "2026-S1"
//!     primary_supervisor: "dr.amrani"
//!     secondary_supervisor: "dr.benali"   # optional
//!     panel:                               # optional
//!       chair: "pr.cherif"
//!       examiner: "dr.djebbar"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use super::{ScheduleStore, StoreError};
use crate::unit::{Assignment, EvaluationUnit, Period, Room, RoomId};

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    periods: Vec<Period>,
    #[serde(default)]
    rooms: Vec<String>,
    #[serde(default)]
    units: Vec<EvaluationUnit>,
}

/// Store kept entirely in memory.  Room ids are assigned sequentially from 1
/// in creation order, so runs over the same data are reproducible.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    periods: BTreeMap<String, Period>,
    units: Vec<EvaluationUnit>,
    rooms: Vec<Room>,
    assignments: Vec<Assignment>,
    /// Number of upcoming write operations that will fail with
    /// [`StoreError::Unavailable`].
    failing_writes: u32,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a YAML seed file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading scheduling data from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open data file: {}", path.display()))?;
        let seed: SeedFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let mut store = Self::new();
        for period in seed.periods {
            store.add_period(period);
        }
        for name in &seed.rooms {
            store.create_room(name);
        }
        for unit in seed.units {
            store.add_unit(unit);
        }

        info!(
            periods = store.periods.len(),
            rooms = store.rooms.len(),
            units = store.units.len(),
            "Scheduling data loaded"
        );
        Ok(store)
    }

    pub fn add_period(&mut self, period: Period) {
        self.periods.insert(period.title.clone(), period);
    }

    /// Append a unit; load order is insertion order.
    pub fn add_unit(&mut self, unit: EvaluationUnit) {
        self.units.push(unit);
    }

    /// Room catalogue in creation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// All stored assignments, every session.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Make the next `n` write operations fail.
    pub fn fail_next_writes(&mut self, n: u32) {
        self.failing_writes = n;
    }

    fn check_write(&mut self, op: &str) -> Result<(), StoreError> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(StoreError::Unavailable(format!("{op} failed")));
        }
        Ok(())
    }

    fn create_room(&mut self, name: &str) -> Room {
        let room = Room {
            id: self.rooms.len() as RoomId + 1,
            name: name.to_string(),
        };
        self.rooms.push(room.clone());
        room
    }
}

impl ScheduleStore for InMemoryStore {
    fn find_period(&self, title: &str) -> Result<Option<Period>, StoreError> {
        Ok(self.periods.get(title).cloned())
    }

    fn units_for_session(&self, session: &str) -> Result<Vec<EvaluationUnit>, StoreError> {
        Ok(self
            .units
            .iter()
            .filter(|u| u.session == session)
            .cloned()
            .collect())
    }

    fn unit(&self, id: &str) -> Result<Option<EvaluationUnit>, StoreError> {
        Ok(self.units.iter().find(|u| u.id == id).cloned())
    }

    fn purge_session(&mut self, session: &str) -> Result<usize, StoreError> {
        self.check_write("purge_session")?;
        let before = self.assignments.len();
        self.assignments.retain(|a| a.session != session);
        Ok(before - self.assignments.len())
    }

    fn ensure_room(&mut self, name: &str) -> Result<Room, StoreError> {
        if let Some(room) = self.rooms.iter().find(|r| r.name == name) {
            return Ok(room.clone());
        }
        self.check_write("ensure_room")?;
        let room = self.create_room(name);
        debug!(room = %room.name, id = room.id, "room created");
        Ok(room)
    }

    fn assignments_on(&self, date: NaiveDate) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect())
    }

    fn insert_assignment(&mut self, assignment: Assignment) -> Result<(), StoreError> {
        self.check_write("insert_assignment")?;
        self.assignments.push(assignment);
        Ok(())
    }

    fn session_assignments(&self, session: &str) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.session == session)
            .cloned()
            .collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
