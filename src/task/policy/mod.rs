//! Guard predicates for task and reply mutations.
//!
//! Every mutation on the task surface is preceded by a rule from
//! [`rules`]; a violation blocks the mutation and carries the exact
//! caller-visible reason. Listing is never rejected for members; it is
//! scoped instead, see [`rules::list_scope`].

pub mod rules;

pub use rules::{
    TaskPolicyError, TaskScope, list_scope, validate_reply_creation, validate_reply_edit,
    validate_status_change, validate_task_creation, validate_task_reshape, validate_task_view,
};
