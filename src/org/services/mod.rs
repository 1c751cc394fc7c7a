//! Application services for membership management.

mod membership;

pub use membership::{MembershipService, MembershipServiceError, MembershipServiceResult};
