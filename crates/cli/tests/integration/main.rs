//! CLI integration tests for distagg.

mod common;

mod failure_tests;
