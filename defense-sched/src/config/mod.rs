/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Run configuration loading and validation.
//!
//! The expected YAML structure is:
//! ```yaml
//! working_hours:
//!   session: "2026-S1"
//!   start_time: "08:00"
//!   end_time: "12:00"
//! rooms:
//!   - name: "Room A"
//!   - name: "Room B"
//! excluded_dates: ["2026-06-10"]
//! defense:                 # optional
//!   duration_minutes: 30
//!   break_minutes: 0
//! calendar:                # optional
//!   reserved_weekday: friday
//!   holidays: ["01-01", "01-12", "05-01", "07-05", "11-01"]
//! period_title: "Defense {session}"   # optional
//! ```
//!
//! Raw strings are kept as-is on [`RunConfig`]; [`RunConfig::validate`] turns
//! them into a strongly typed [`ValidatedRun`] or a [`ConfigError`].

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use serde::Deserialize;
use tracing::{debug, info};

use crate::calendar::holiday::{self, parse_holiday};
use crate::calendar::CalendarRules;
use crate::scheduler::error::ConfigError;
use crate::slots::WorkingHours;

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_DEFENSE_DURATION_MINUTES: i64 = 30;
pub const DEFAULT_BREAK_MINUTES: i64 = 0;
pub const DEFAULT_PERIOD_TITLE: &str = "Defense {session}";

fn default_duration_minutes() -> i64 {
    DEFAULT_DEFENSE_DURATION_MINUTES
}

fn default_break_minutes() -> i64 {
    DEFAULT_BREAK_MINUTES
}

fn default_reserved_weekday() -> String {
    String::from("friday")
}

fn default_holidays() -> Vec<String> {
    holiday::default_holidays()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_period_title() -> String {
    DEFAULT_PERIOD_TITLE.to_string()
}

// ── Raw YAML types ────────────────────────────────────────────────────────────

/// Working-hours block exactly as written in YAML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkingHoursEntry {
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomEntry {
    pub name: String,
}

/// Fixed defense duration and the break inserted after every slot.
#[derive(Debug, Clone, Deserialize)]
pub struct DefenseSettings {
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
}

impl Default for DefenseSettings {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_DEFENSE_DURATION_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarSettings {
    #[serde(default = "default_reserved_weekday")]
    pub reserved_weekday: String,
    #[serde(default = "default_holidays")]
    pub holidays: Vec<String>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            reserved_weekday: default_reserved_weekday(),
            holidays: default_holidays(),
        }
    }
}

/// One scheduling request, as loaded from YAML or built by a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub working_hours: Option<WorkingHoursEntry>,
    #[serde(default)]
    pub rooms: Vec<RoomEntry>,
    #[serde(default)]
    pub excluded_dates: Vec<String>,
    #[serde(default)]
    pub defense: DefenseSettings,
    #[serde(default)]
    pub calendar: CalendarSettings,
    /// Template for the period lookup title; `{session}` is substituted.
    #[serde(default = "default_period_title")]
    pub period_title: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            working_hours: None,
            rooms: Vec::new(),
            excluded_dates: Vec::new(),
            defense: DefenseSettings::default(),
            calendar: CalendarSettings::default(),
            period_title: default_period_title(),
        }
    }
}

// ── Validated run ─────────────────────────────────────────────────────────────

/// A run configuration that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedRun {
    pub session: String,
    pub hours: WorkingHours,
    /// Room names in configuration order.
    pub rooms: Vec<String>,
    pub excluded_dates: BTreeSet<NaiveDate>,
    pub duration: Duration,
    pub gap: Duration,
    pub calendar: CalendarRules,
    /// Title used to look up the defense period.
    pub period_title: String,
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField { field })
}

fn parse_time(value: &str, field: &'static str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ConfigError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

impl RunConfig {
    /// Check that working hours and rooms are well-formed and resolve every
    /// string field into its typed form.  No side effects.
    pub fn validate(&self) -> Result<ValidatedRun, ConfigError> {
        let hours = self
            .working_hours
            .as_ref()
            .ok_or(ConfigError::MissingWorkingHours)?;
        let session = required(&hours.session, "session")?;
        let start_raw = required(&hours.start_time, "start_time")?;
        let end_raw = required(&hours.end_time, "end_time")?;

        if self.rooms.is_empty() {
            return Err(ConfigError::NoRooms);
        }
        if let Some(index) = self.rooms.iter().position(|r| r.name.trim().is_empty()) {
            return Err(ConfigError::EmptyRoomName { index });
        }

        let start = parse_time(start_raw, "start_time")?;
        let end = parse_time(end_raw, "end_time")?;
        if start >= end {
            return Err(ConfigError::HoursNotOrdered {
                start: start_raw.to_string(),
                end: end_raw.to_string(),
            });
        }

        let excluded_dates = self
            .excluded_dates
            .iter()
            .map(|s| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidDate { value: s.clone() })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        if self.defense.duration_minutes <= 0 {
            return Err(ConfigError::InvalidDuration {
                field: "duration_minutes",
                minutes: self.defense.duration_minutes,
            });
        }
        if self.defense.break_minutes < 0 {
            return Err(ConfigError::InvalidDuration {
                field: "break_minutes",
                minutes: self.defense.break_minutes,
            });
        }

        let reserved_weekday = Weekday::from_str(self.calendar.reserved_weekday.trim()).map_err(
            |_| ConfigError::InvalidWeekday {
                value: self.calendar.reserved_weekday.clone(),
            },
        )?;
        let holidays = self
            .calendar
            .holidays
            .iter()
            .map(|s| parse_holiday(s).ok_or_else(|| ConfigError::InvalidHoliday { value: s.clone() }))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            session,
            %start,
            %end,
            rooms = self.rooms.len(),
            excluded = excluded_dates.len(),
            "run configuration validated"
        );

        Ok(ValidatedRun {
            session: session.to_string(),
            hours: WorkingHours { start, end },
            rooms: self.rooms.iter().map(|r| r.name.trim().to_string()).collect(),
            excluded_dates,
            duration: Duration::minutes(self.defense.duration_minutes),
            gap: Duration::minutes(self.defense.break_minutes),
            calendar: CalendarRules {
                reserved_weekday,
                holidays,
            },
            period_title: self.period_title.replace("{session}", session),
        })
    }
}

// ── RunConfigManager ──────────────────────────────────────────────────────────

/// Loads a [`RunConfig`] from a YAML file.
#[derive(Debug, Default)]
pub struct RunConfigManager {
    config: Option<RunConfig>,
}

impl RunConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `path` and replaces any previously loaded configuration.
    ///
    /// Only I/O and YAML structure are checked here; semantic checks are
    /// left to [`RunConfig::validate`] so they surface as [`ConfigError`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid YAML for
    /// [`RunConfig`].
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading run configuration from: {}", path.display());

        self.config = None;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config: RunConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        info!(
            session = ?config.working_hours.as_ref().and_then(|h| h.session.as_deref()),
            rooms = config.rooms.len(),
            excluded_dates = config.excluded_dates.len(),
            "Run configuration loaded"
        );

        self.config = Some(config);
        Ok(())
    }

    pub fn get_config(&self) -> Option<&RunConfig> {
        self.config.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.config.is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    fn valid_config() -> RunConfig {
        RunConfig {
            working_hours: Some(WorkingHoursEntry {
                session: Some("2026-S1".into()),
                start_time: Some("08:00".into()),
                end_time: Some("10:00".into()),
            }),
            rooms: vec![RoomEntry { name: "Room A".into() }],
            ..Default::default()
        }
    }

    // ── RunConfigManager ──────────────────────────────────────────────────────

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
working_hours:
  session: "2026-S1"
  start_time: "08:00"
  end_time: "12:00"
rooms:
  - name: "Room A"
  - name: "Room B"
excluded_dates: ["2026-06-10"]
defense:
  duration_minutes: 45
  break_minutes: 15
calendar:
  reserved_weekday: sunday
  holidays: ["12-25"]
period_title: "Soutenances {session}"
"#;
        let f = yaml_tempfile(yaml);
        let mut mgr = RunConfigManager::new();
        mgr.load_from_file(f.path()).unwrap();
        assert!(mgr.is_loaded());

        let run = mgr.get_config().unwrap().validate().unwrap();
        assert_eq!(run.session, "2026-S1");
        assert_eq!(run.rooms, vec!["Room A", "Room B"]);
        assert_eq!(run.duration, Duration::minutes(45));
        assert_eq!(run.gap, Duration::minutes(15));
        assert_eq!(run.calendar.reserved_weekday, Weekday::Sun);
        assert_eq!(run.calendar.holidays.len(), 1);
        assert_eq!(run.period_title, "Soutenances 2026-S1");
        assert!(run
            .excluded_dates
            .contains(&NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()));
    }

    #[test]
    fn optional_blocks_use_defaults_when_absent() {
        let yaml = r#"
working_hours:
  session: "s"
  start_time: "08:00"
  end_time: "09:00"
rooms:
  - name: "R"
"#;
        let f = yaml_tempfile(yaml);
        let mut mgr = RunConfigManager::new();
        mgr.load_from_file(f.path()).unwrap();

        let run = mgr.get_config().unwrap().validate().unwrap();
        assert_eq!(run.duration, Duration::minutes(DEFAULT_DEFENSE_DURATION_MINUTES));
        assert_eq!(run.gap, Duration::minutes(DEFAULT_BREAK_MINUTES));
        assert_eq!(run.calendar, CalendarRules::default());
        assert_eq!(run.period_title, "Defense s");
        assert!(run.excluded_dates.is_empty());
    }

    #[test]
    fn missing_file_returns_error() {
        let mut mgr = RunConfigManager::new();
        let result = mgr.load_from_file(Path::new("/nonexistent/path/run.yaml"));
        assert!(result.is_err());
        assert!(!mgr.is_loaded());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        let mut mgr = RunConfigManager::new();
        assert!(mgr.load_from_file(f.path()).is_err());
        assert!(!mgr.is_loaded());
    }

    // ── RunConfig::validate ───────────────────────────────────────────────────

    #[test]
    fn valid_config_passes() {
        let run = valid_config().validate().unwrap();
        assert_eq!(run.hours.start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(run.hours.end, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn missing_working_hours_is_rejected() {
        let cfg = RunConfig {
            working_hours: None,
            ..valid_config()
        };
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::MissingWorkingHours);
    }

    #[test]
    fn missing_session_is_rejected() {
        let mut cfg = valid_config();
        cfg.working_hours.as_mut().unwrap().session = Some("  ".into());
        assert_eq!(
            cfg.validate().unwrap_err(),
            ConfigError::MissingField { field: "session" }
        );
    }

    #[test]
    fn missing_end_time_is_rejected() {
        let mut cfg = valid_config();
        cfg.working_hours.as_mut().unwrap().end_time = None;
        assert_eq!(
            cfg.validate().unwrap_err(),
            ConfigError::MissingField { field: "end_time" }
        );
    }

    #[test]
    fn empty_room_list_is_rejected() {
        let cfg = RunConfig {
            rooms: vec![],
            ..valid_config()
        };
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::NoRooms);
    }

    #[test]
    fn blank_room_name_is_rejected() {
        let mut cfg = valid_config();
        cfg.rooms.push(RoomEntry { name: " ".into() });
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::EmptyRoomName { index: 1 });
    }

    #[test]
    fn start_equal_to_end_is_rejected() {
        let mut cfg = valid_config();
        cfg.working_hours.as_mut().unwrap().end_time = Some("08:00".into());
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::HoursNotOrdered { .. }
        ));
    }

    #[test]
    fn start_after_end_is_rejected() {
        let mut cfg = valid_config();
        cfg.working_hours.as_mut().unwrap().start_time = Some("11:00".into());
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::HoursNotOrdered { .. }
        ));
    }

    #[test]
    fn malformed_time_is_rejected() {
        let mut cfg = valid_config();
        cfg.working_hours.as_mut().unwrap().start_time = Some("8h".into());
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::InvalidTime { field: "start_time", .. }
        ));
    }

    #[test]
    fn malformed_excluded_date_is_rejected() {
        let cfg = RunConfig {
            excluded_dates: vec!["10/06/2026".into()],
            ..valid_config()
        };
        assert!(matches!(cfg.validate().unwrap_err(), ConfigError::InvalidDate { .. }));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let mut cfg = valid_config();
        cfg.defense.duration_minutes = 0;
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::InvalidDuration { field: "duration_minutes", .. }
        ));
    }

    #[test]
    fn bad_holiday_and_weekday_are_rejected() {
        let mut cfg = valid_config();
        cfg.calendar.holidays = vec!["02-31".into()];
        assert!(matches!(cfg.validate().unwrap_err(), ConfigError::InvalidHoliday { .. }));

        let mut cfg = valid_config();
        cfg.calendar.reserved_weekday = "someday".into();
        assert!(matches!(cfg.validate().unwrap_err(), ConfigError::InvalidWeekday { .. }));
    }
}
