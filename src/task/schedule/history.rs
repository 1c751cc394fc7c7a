//! Completion-history reporting grouped by local calendar day.
//!
//! Tallies read the explicit completion instant, never the creation
//! timestamp, so a task created weeks ago and finished today counts for
//! today.

use crate::task::domain::Task;
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Completion tally for one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionDay {
    /// The local calendar day.
    pub day: NaiveDate,
    /// Number of tasks completed on that day.
    pub completed: usize,
}

/// Groups completed tasks by the local day of their completion instant.
///
/// Returns one entry per day with at least one completion, most recent
/// day first.
#[must_use]
pub fn completion_history<Tz: TimeZone>(tasks: &[Task], zone: &Tz) -> Vec<CompletionDay> {
    let mut tally: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for completed_at in tasks.iter().filter_map(Task::completed_at) {
        let day = completed_at.with_timezone(zone).date_naive();
        *tally.entry(day).or_insert(0) += 1;
    }
    tally
        .into_iter()
        .rev()
        .map(|(day, completed)| CompletionDay { day, completed })
        .collect()
}

/// Counts tasks completed on the given local day.
#[must_use]
pub fn completed_on<Tz: TimeZone>(tasks: &[Task], day: NaiveDate, zone: &Tz) -> usize {
    tasks
        .iter()
        .filter_map(Task::completed_at)
        .filter(|completed_at| completed_at.with_timezone(zone).date_naive() == day)
        .count()
}
