//! Integration tests for schema-change-core.
//!
//! Exercises change-log append and replay through real files.

mod log_replay_tests;
mod replica_tests;
