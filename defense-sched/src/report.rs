/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Result reporting boundary.
//!
//! A [`ResultReporter`] is told about every created assignment and about the
//! final outcome of a run.  Real deployments plug notification or e-mail
//! dispatch in here; the scheduler itself never sends anything.
//!
//! Reporter failures are logged by the caller and otherwise ignored: a
//! failed notification never rolls back a schedule.

use anyhow::Result;
use tracing::{info, warn};

use crate::scheduler::SchedulerError;
use crate::unit::{Assignment, SchedulingResult};

pub trait ResultReporter {
    fn assignment_created(&mut self, assignment: &Assignment) -> Result<()>;

    fn run_completed(&mut self, result: &SchedulingResult, attempts: u32) -> Result<()>;

    fn run_failed(&mut self, session: &str, error: &SchedulerError, attempts: u32) -> Result<()>;
}

/// Reporter that writes summaries to the `tracing` log.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ResultReporter for LogReporter {
    fn assignment_created(&mut self, assignment: &Assignment) -> Result<()> {
        info!(
            unit = %assignment.unit_id,
            room = assignment.room_id,
            date = %assignment.date,
            window = %assignment.window,
            "defense scheduled"
        );
        Ok(())
    }

    fn run_completed(&mut self, result: &SchedulingResult, attempts: u32) -> Result<()> {
        info!(
            session = %result.session,
            created = result.created(),
            unassigned = result.unassigned(),
            attempts,
            "scheduling run completed"
        );
        if result.unassigned() > 0 {
            warn!(
                session = %result.session,
                unassigned = ?result.unassigned_unit_ids,
                "{} unit(s) could not be scheduled",
                result.unassigned()
            );
        }
        Ok(())
    }

    fn run_failed(&mut self, session: &str, error: &SchedulerError, attempts: u32) -> Result<()> {
        warn!(session, attempts, "scheduling run failed: {error}");
        Ok(())
    }
}

/// Call `f`, logging (and swallowing) any reporter error.
pub(crate) fn notify<F>(what: &str, f: F)
where
    F: FnOnce() -> Result<()>,
{
    if let Err(e) = f() {
        warn!("reporter failed during {what}: {e:#}");
    }
}
