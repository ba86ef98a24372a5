//! Data sources that do not come from a file.

pub mod sample;

pub use sample::{SampleData, SampleSpec, generate_sample};
