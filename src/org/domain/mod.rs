//! Domain model for organization membership management.
//!
//! The org domain models per-organization memberships, the role privilege
//! order, and derivation of an actor's effective role while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod membership;
mod role;

pub use error::ParseRoleError;
pub use ids::{OrgId, UserId};
pub use membership::Membership;
pub use role::{Role, effective_role};
