/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Person and room conflict detection.
//!
//! Both checks look only at bookings on the candidate's date.  They use
//! different boundary rules:
//!
//! | Check | Touching windows (`a.end == b.start`) |
//! |---|---|
//! | person | conflict (both ends inclusive) |
//! | room | no conflict (half-open) |
//!
//! So the same room can be booked back to back, while a person can never sit
//! two defenses in adjacent slots.  This asymmetry changes which slot a
//! unit lands in; keep the two rules separate.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::slots::TimeWindow;
use crate::store::{ScheduleStore, StoreError};
use crate::unit::{Assignment, RoleSets, RoomId};

// ── Overlap rules ─────────────────────────────────────────────────────────────

/// Person rule: `existing` overlaps `candidate` if either of its endpoints
/// lies in the closed candidate window, or it covers the candidate entirely.
pub fn person_windows_overlap(existing: &TimeWindow, candidate: &TimeWindow) -> bool {
    let within = |t: NaiveTime| candidate.start <= t && t <= candidate.end;
    within(existing.start)
        || within(existing.end)
        || (existing.start <= candidate.start && existing.end >= candidate.end)
}

/// Room rule: half-open overlap.  Windows that only touch do not overlap.
pub fn room_windows_overlap(existing: &TimeWindow, candidate: &TimeWindow) -> bool {
    let starts_inside = existing.start <= candidate.start && candidate.start < existing.end;
    let ends_inside = existing.start < candidate.end && candidate.end <= existing.end;
    let covers = candidate.start <= existing.start && candidate.end >= existing.end;
    let covered = candidate.start >= existing.start && candidate.end <= existing.end;
    starts_inside || ends_inside || covers || covered
}

// ── Booking ───────────────────────────────────────────────────────────────────

/// An assignment together with the people it occupies.
#[derive(Debug, Clone)]
pub struct Booking {
    pub assignment: Assignment,
    pub people: RoleSets,
}

/// Returns `true` if someone in `people` is already busy during `window`.
pub fn has_person_conflict(bookings: &[Booking], people: &RoleSets, window: &TimeWindow) -> bool {
    bookings.iter().any(|b| {
        person_windows_overlap(&b.assignment.window, window) && b.people.shares_person_with(people)
    })
}

/// Returns `true` if `room` is already occupied during `window`.
pub fn has_room_conflict(bookings: &[Booking], room: RoomId, window: &TimeWindow) -> bool {
    bookings
        .iter()
        .any(|b| b.assignment.room_id == room && room_windows_overlap(&b.assignment.window, window))
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Per-run view of every booking, grouped by date.
///
/// A date is read from the store the first time it is visited (picking up
/// assignments of other sessions); bookings made during the run are appended
/// with [`record`](Self::record).  Dropped at the end of the run.
#[derive(Debug, Default)]
pub struct Ledger {
    by_date: BTreeMap<NaiveDate, Vec<Booking>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookings on `date`, loading them from `store` on first access.
    pub fn bookings_on<S: ScheduleStore + ?Sized>(
        &mut self,
        store: &S,
        date: NaiveDate,
    ) -> Result<&[Booking], StoreError> {
        if !self.by_date.contains_key(&date) {
            let mut bookings = Vec::new();
            for assignment in store.assignments_on(date)? {
                let people = store
                    .unit(&assignment.unit_id)?
                    .map(|u| u.role_sets())
                    .unwrap_or_default();
                bookings.push(Booking { assignment, people });
            }
            debug!(%date, existing = bookings.len(), "loaded existing bookings");
            self.by_date.insert(date, bookings);
        }
        Ok(self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn record(&mut self, booking: Booking) {
        self.by_date
            .entry(booking.assignment.date)
            .or_default()
            .push(booking);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::unit::{EvaluationUnit, Panel};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn w(sh: u32, sm: u32, eh: u32, em: u32) -> TimeWindow {
        TimeWindow::new(t(sh, sm), t(eh, em))
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn people(supervisors: &[&str], panel: &[&str]) -> RoleSets {
        RoleSets {
            supervisors: supervisors.iter().map(|s| s.to_string()).collect(),
            panel: panel.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn booking(room: RoomId, window: TimeWindow, who: RoleSets) -> Booking {
        Booking {
            assignment: Assignment {
                unit_id: "existing".into(),
                room_id: room,
                date: date(),
                window,
                session: "s".into(),
            },
            people: who,
        }
    }

    // ── person rule ───────────────────────────────────────────────────────────

    #[test]
    fn person_rule_treats_touching_windows_as_overlapping() {
        let existing = w(8, 0, 8, 30);
        assert!(person_windows_overlap(&existing, &w(8, 30, 9, 0)));
        assert!(person_windows_overlap(&w(9, 0, 9, 30), &w(8, 30, 9, 0)));
    }

    #[test]
    fn person_rule_detects_containment() {
        assert!(person_windows_overlap(&w(8, 0, 10, 0), &w(8, 30, 9, 0)));
        assert!(person_windows_overlap(&w(8, 30, 9, 0), &w(8, 0, 10, 0)));
    }

    #[test]
    fn person_rule_ignores_separated_windows() {
        assert!(!person_windows_overlap(&w(8, 0, 8, 30), &w(9, 0, 9, 30)));
    }

    // ── room rule ─────────────────────────────────────────────────────────────

    #[test]
    fn room_rule_allows_back_to_back() {
        let existing = w(8, 0, 8, 30);
        assert!(!room_windows_overlap(&existing, &w(8, 30, 9, 0)));
        assert!(!room_windows_overlap(&existing, &w(7, 30, 8, 0)));
    }

    #[test]
    fn room_rule_detects_partial_and_full_overlap() {
        let existing = w(8, 0, 9, 0);
        assert!(room_windows_overlap(&existing, &w(8, 30, 9, 30)));
        assert!(room_windows_overlap(&existing, &w(7, 30, 8, 30)));
        assert!(room_windows_overlap(&existing, &w(7, 0, 10, 0)));
        assert!(room_windows_overlap(&existing, &w(8, 15, 8, 45)));
        assert!(room_windows_overlap(&existing, &w(8, 0, 9, 0)));
    }

    // ── has_person_conflict ───────────────────────────────────────────────────

    #[test]
    fn shared_person_in_overlapping_window_conflicts() {
        let bookings = vec![booking(1, w(8, 0, 8, 30), people(&["alice"], &[]))];
        assert!(has_person_conflict(&bookings, &people(&["alice"], &[]), &w(8, 0, 8, 30)));
        // adjacent slot still conflicts for a person
        assert!(has_person_conflict(&bookings, &people(&[], &["alice"]), &w(8, 30, 9, 0)));
    }

    #[test]
    fn shared_person_in_distant_window_does_not_conflict() {
        let bookings = vec![booking(1, w(8, 0, 8, 30), people(&["alice"], &[]))];
        assert!(!has_person_conflict(&bookings, &people(&["alice"], &[]), &w(9, 0, 9, 30)));
    }

    #[test]
    fn overlapping_window_with_different_people_does_not_conflict() {
        let bookings = vec![booking(1, w(8, 0, 8, 30), people(&["alice"], &["carol"]))];
        assert!(!has_person_conflict(&bookings, &people(&["bob"], &["dave"]), &w(8, 0, 8, 30)));
    }

    // ── has_room_conflict ─────────────────────────────────────────────────────

    #[test]
    fn room_conflict_is_per_room() {
        let bookings = vec![booking(1, w(8, 0, 8, 30), RoleSets::default())];
        assert!(has_room_conflict(&bookings, 1, &w(8, 0, 8, 30)));
        assert!(!has_room_conflict(&bookings, 2, &w(8, 0, 8, 30)));
        assert!(!has_room_conflict(&bookings, 1, &w(8, 30, 9, 0)));
    }

    // ── Ledger ────────────────────────────────────────────────────────────────

    #[test]
    fn ledger_loads_existing_bookings_with_their_people() {
        let mut store = InMemoryStore::new();
        store.add_unit(EvaluationUnit {
            id: "other".into(),
            session: "old".into(),
            primary_supervisor: "alice".into(),
            secondary_supervisor: None,
            panel: Some(Panel {
                chair: "carol".into(),
                examiner: "dave".into(),
            }),
        });
        store
            .insert_assignment(Assignment {
                unit_id: "other".into(),
                room_id: 1,
                date: date(),
                window: w(8, 0, 8, 30),
                session: "old".into(),
            })
            .unwrap();

        let mut ledger = Ledger::new();
        let bookings = ledger.bookings_on(&store, date()).unwrap();
        assert_eq!(bookings.len(), 1);
        assert!(bookings[0].people.panel.contains("carol"));
        assert!(has_person_conflict(bookings, &people(&["dave"], &[]), &w(8, 0, 8, 30)));
    }

    #[test]
    fn ledger_keeps_recorded_bookings() {
        let store = InMemoryStore::new();
        let mut ledger = Ledger::new();
        assert!(ledger.bookings_on(&store, date()).unwrap().is_empty());

        ledger.record(booking(3, w(9, 0, 9, 30), people(&["bob"], &[])));
        let bookings = ledger.bookings_on(&store, date()).unwrap();
        assert_eq!(bookings.len(), 1);
        assert!(has_room_conflict(bookings, 3, &w(9, 0, 9, 30)));
    }
}
