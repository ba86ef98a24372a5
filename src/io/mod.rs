//! Input/output helpers.
//!
//! - CSV ingest + numeric validation (`ingest`)
//! - point/report/raw exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
