//! Port contracts for organization membership management.
//!
//! Ports define infrastructure-agnostic interfaces used by org services.

pub mod directory;

pub use directory::{DirectoryError, DirectoryResult, MembershipDirectory};
