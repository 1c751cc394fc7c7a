//! Unit tests for the task surface.

mod service_tests;
