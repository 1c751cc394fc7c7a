//! Task lifecycle and schedule classification for Workboard.
//!
//! This module implements the task side of the work management core:
//! creating tasks, guarded status/assignment/expected-finish mutations,
//! progress replies with an optional carried status change, due-date
//! classification against a captured "now", the five-lane schedule board,
//! and completion-history reporting. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Due-date classification in [`schedule`]
//! - Guard predicates in [`policy`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod policy;
pub mod ports;
pub mod schedule;
pub mod services;

#[cfg(test)]
mod tests;
