/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Invoking layer around [`DefenseScheduler`].
//!
//! [`SessionRunner`] adds what the engine deliberately does not do itself:
//!
//! * **Mutual exclusion per session.**  The engine holds no lock; two runs
//!   for the same session must never interleave, so the runner takes a
//!   [`SessionGuard`] for the duration of the run.
//! * **Bounded retry.**  A run that failed on a store error is repeated from
//!   scratch (purge, then place) up to `max_attempts` times.  Every other
//!   error is deterministic and is returned after the first attempt.
//! * **Reporting.**  The [`ResultReporter`] receives every assignment and
//!   then a completion or failure summary.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::report::{notify, ResultReporter};
use crate::scheduler::{DefenseScheduler, SchedulerError};
use crate::store::ScheduleStore;
use crate::unit::SchedulingResult;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

// ── Session locks ─────────────────────────────────────────────────────────────

/// Set of sessions that currently have a run in progress.  Cheap to clone;
/// clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    active: Arc<Mutex<HashSet<String>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the token for `session`, or `None` if another run holds it.
    pub fn try_acquire(&self, session: &str) -> Option<SessionGuard> {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(session.to_string()) {
            return None;
        }
        Some(SessionGuard {
            active: Arc::clone(&self.active),
            session: session.to_string(),
        })
    }

    pub fn is_active(&self, session: &str) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(session)
    }
}

/// Releases the session token on drop.
#[derive(Debug)]
pub struct SessionGuard {
    active: Arc<Mutex<HashSet<String>>>,
    session: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.session);
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RunError {
    #[error("a scheduling run for session '{0}' is already in progress")]
    SessionBusy(String),
}

/// Final state of a run after retries.
#[derive(Debug)]
pub enum RunOutcome {
    Completed {
        result: SchedulingResult,
        attempts: u32,
    },
    Failed {
        error: SchedulerError,
        attempts: u32,
    },
}

impl RunOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            RunOutcome::Completed { attempts, .. } | RunOutcome::Failed { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn result(&self) -> Option<&SchedulingResult> {
        match self {
            RunOutcome::Completed { result, .. } => Some(result),
            RunOutcome::Failed { .. } => None,
        }
    }
}

// ── SessionRunner ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SessionRunner {
    locks: SessionLocks,
    max_attempts: u32,
}

impl Default for SessionRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRunner {
    pub fn new() -> Self {
        Self {
            locks: SessionLocks::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// At least one attempt is always made.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Share an existing lock set, e.g. between runners on several threads.
    pub fn with_locks(mut self, locks: SessionLocks) -> Self {
        self.locks = locks;
        self
    }

    pub fn locks(&self) -> &SessionLocks {
        &self.locks
    }

    /// Run `config` to completion, retrying store failures.
    ///
    /// # Errors
    /// Only [`RunError::SessionBusy`]; scheduling failures are reported in
    /// [`RunOutcome::Failed`].
    pub fn run<S: ScheduleStore>(
        &self,
        scheduler: &mut DefenseScheduler<S>,
        config: &RunConfig,
        reporter: &mut dyn ResultReporter,
    ) -> Result<RunOutcome, RunError> {
        let session = config
            .working_hours
            .as_ref()
            .and_then(|h| h.session.as_deref())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let _guard = self
            .locks
            .try_acquire(&session)
            .ok_or_else(|| RunError::SessionBusy(session.clone()))?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            info!(session = %session, attempt, max = self.max_attempts, "starting scheduling run");

            match scheduler.run(config) {
                Ok(result) => {
                    for assignment in &result.assignments {
                        notify("assignment_created", || reporter.assignment_created(assignment));
                    }
                    notify("run_completed", || reporter.run_completed(&result, attempt));
                    return Ok(RunOutcome::Completed {
                        result,
                        attempts: attempt,
                    });
                }
                Err(error) if error.is_retryable() && attempt < self.max_attempts => {
                    warn!(session = %session, attempt, "run failed, retrying: {error}");
                }
                Err(error) => {
                    notify("run_failed", || reporter.run_failed(&session, &error, attempt));
                    return Ok(RunOutcome::Failed {
                        error,
                        attempts: attempt,
                    });
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
