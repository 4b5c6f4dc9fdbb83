//! Shared utilities.
//!
//! Filesystem helpers used by the aggregator and test helpers.

pub mod fs;

#[cfg(test)]
pub mod testutil;
