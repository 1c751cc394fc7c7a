//! Five-lane schedule board over a task collection.

use super::{DueStatus, ScheduleConfig, classify};
use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, TimeZone};
use std::cmp::Ordering;

/// Dashboard partition of a task collection against one captured "now".
///
/// The in-progress lane is an independent axis: a task that is both in
/// progress and overdue appears in both lanes. Due lanes and the
/// in-progress lane sort ascending by expected finish with absent values
/// last; the completed lane sorts most-recently-completed first. Every
/// lane is bounded by the configured lane limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleBoard {
    overdue: Vec<Task>,
    due_today: Vec<Task>,
    due_this_week: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
}

impl ScheduleBoard {
    /// Partitions tasks into board lanes.
    #[must_use]
    pub fn build<Tz: TimeZone>(
        tasks: Vec<Task>,
        now: &DateTime<Tz>,
        config: &ScheduleConfig,
    ) -> Self {
        let mut board = Self::default();
        for task in tasks {
            if task.status().is_done() {
                board.completed.push(task);
                continue;
            }
            if matches!(task.status(), TaskStatus::InProgress) {
                board.in_progress.push(task.clone());
            }
            match classify(&task, now, config) {
                DueStatus::Overdue => board.overdue.push(task),
                DueStatus::DueToday => board.due_today.push(task),
                DueStatus::DueThisWeek => board.due_this_week.push(task),
                DueStatus::NotDue => {}
            }
        }

        for lane in [
            &mut board.overdue,
            &mut board.due_today,
            &mut board.due_this_week,
            &mut board.in_progress,
        ] {
            lane.sort_by(expected_finish_order);
            lane.truncate(config.lane_limit);
        }
        board.completed.sort_by(completion_recency_order);
        board.completed.truncate(config.lane_limit);
        board
    }

    /// Returns tasks whose expected finish fell on an earlier day.
    #[must_use]
    pub fn overdue(&self) -> &[Task] {
        &self.overdue
    }

    /// Returns tasks due on the current local day.
    #[must_use]
    pub fn due_today(&self) -> &[Task] {
        &self.due_today
    }

    /// Returns tasks due after today within the due-soon window.
    #[must_use]
    pub fn due_this_week(&self) -> &[Task] {
        &self.due_this_week
    }

    /// Returns tasks currently being worked on.
    #[must_use]
    pub fn in_progress(&self) -> &[Task] {
        &self.in_progress
    }

    /// Returns completed tasks, most recently completed first.
    #[must_use]
    pub fn completed(&self) -> &[Task] {
        &self.completed
    }
}

/// Ascending by expected finish; tasks without one sort last.
fn expected_finish_order(a: &Task, b: &Task) -> Ordering {
    match (a.expected_finish(), b.expected_finish()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Most recently completed first; tasks without a completion instant last.
fn completion_recency_order(a: &Task, b: &Task) -> Ordering {
    match (a.completed_at(), b.completed_at()) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
