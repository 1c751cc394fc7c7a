//! Guard predicates for member-management mutations.
//!
//! Every mutation on the membership surface is preceded by a rule from
//! [`rules`]; a violation blocks the mutation and carries the exact
//! caller-visible reason.

pub mod rules;

pub use rules::{
    MemberPolicyError, validate_activation_change, validate_bootstrap, validate_enrollment,
    validate_role_change,
};
