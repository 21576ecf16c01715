//! Shared helpers for the bookshelf backend test suites.
//!
//! Kept in its own crate so integration test binaries and unit tests can
//! share log setup and error-contract assertions without depending on each
//! other.

pub mod logging;
pub mod problem_details;
