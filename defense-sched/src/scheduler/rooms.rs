/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Room resolution and first-fit room selection.

use tracing::debug;

use super::conflict::{has_room_conflict, Booking};
use crate::slots::TimeWindow;
use crate::store::{ScheduleStore, StoreError};
use crate::unit::Room;

/// Rooms of one run, resolved against the store once and kept in
/// configuration order.
///
/// Owned by the run that built it; a changed room list only takes effect on
/// the next run.
#[derive(Debug, Clone, Default)]
pub struct RoomCache {
    rooms: Vec<Room>,
}

impl RoomCache {
    /// Ensure every name exists in the store's room catalogue and remember
    /// the resulting identities.  Repeated names keep their first position.
    pub fn resolve<S: ScheduleStore + ?Sized>(
        store: &mut S,
        names: &[String],
    ) -> Result<Self, StoreError> {
        let mut rooms: Vec<Room> = Vec::with_capacity(names.len());
        for name in names {
            if rooms.iter().any(|r| &r.name == name) {
                continue;
            }
            let room = store.ensure_room(name)?;
            debug!(room = %room.name, id = room.id, "room resolved");
            rooms.push(room);
        }
        Ok(Self { rooms })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// First room, in configuration order, that is free during `window`.
    pub fn select(&self, bookings: &[Booking], window: &TimeWindow) -> Option<&Room> {
        self.rooms
            .iter()
            .find(|room| !has_room_conflict(bookings, room.id, window))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
