//! Shared wire-level types.

mod response;

pub use response::{FailedImport, ImportReport};
