//! Due-date classification of a single task.

use crate::task::domain::Task;
use chrono::{DateTime, TimeDelta, TimeZone};

/// Tuning knobs for schedule classification and board assembly.
///
/// # Examples
///
/// ```
/// use workboard::task::schedule::ScheduleConfig;
///
/// let config = ScheduleConfig::default();
/// assert_eq!(config.due_soon_window_days, 7);
/// assert_eq!(config.lane_limit, 8);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Days ahead of "now" still reported as due this week.
    pub due_soon_window_days: u32,
    /// Maximum number of tasks per schedule board lane.
    pub lane_limit: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            due_soon_window_days: 7,
            lane_limit: 8,
        }
    }
}

impl ScheduleConfig {
    /// Creates a configuration with explicit window and lane limit.
    #[must_use]
    pub const fn new(due_soon_window_days: u32, lane_limit: usize) -> Self {
        Self {
            due_soon_window_days,
            lane_limit,
        }
    }

    /// Returns the due-soon window as a duration.
    #[must_use]
    pub fn due_soon_window(&self) -> TimeDelta {
        TimeDelta::try_days(i64::from(self.due_soon_window_days)).unwrap_or(TimeDelta::MAX)
    }
}

/// Due-date bucket of a task relative to a captured "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueStatus {
    /// Expected finish fell on an earlier local day.
    Overdue,
    /// Expected finish falls on the current local day.
    DueToday,
    /// Expected finish falls after today, within the due-soon window.
    DueThisWeek,
    /// No expected finish, completed, or beyond the window.
    NotDue,
}

impl DueStatus {
    /// Returns the canonical display representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due_today",
            Self::DueThisWeek => "due_this_week",
            Self::NotDue => "not_due",
        }
    }
}

/// Classifies a task's expected finish against a captured "now".
///
/// Buckets are decided on local calendar days in the timezone of `now`:
/// an expected finish on today's date is [`DueStatus::DueToday`]
/// regardless of the time of day (the boundary is inclusive on both
/// ends, so an instant exactly at "now" is due today, never overdue);
/// an earlier day is [`DueStatus::Overdue`]; a later day within the
/// due-soon window is [`DueStatus::DueThisWeek`]. Completion suppresses
/// every due bucket regardless of the expected-finish value.
#[must_use]
pub fn classify<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>, config: &ScheduleConfig) -> DueStatus {
    if task.status().is_done() {
        return DueStatus::NotDue;
    }
    let Some(expected_finish) = task.expected_finish() else {
        return DueStatus::NotDue;
    };

    let expected_local = expected_finish.with_timezone(&now.timezone());
    let expected_day = expected_local.date_naive();
    let today = now.date_naive();

    if expected_day == today {
        return DueStatus::DueToday;
    }
    if expected_day < today {
        return DueStatus::Overdue;
    }
    // An overflowing horizon means the window covers every representable
    // future instant.
    let horizon = now.clone().checked_add_signed(config.due_soon_window());
    if horizon.is_none_or(|limit| expected_local <= limit) {
        return DueStatus::DueThisWeek;
    }
    DueStatus::NotDue
}
