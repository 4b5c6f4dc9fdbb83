mod aggregate;

pub use aggregate::{RevisionSource, cmd_aggregate};
