//! Unit tests for organization membership management.
