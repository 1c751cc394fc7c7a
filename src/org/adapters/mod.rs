//! Adapter implementations of org ports.

pub mod memory;
