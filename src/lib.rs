//! Single-pass Hoeffding tree (VFDT) learning over streams of nominal
//! instances, with the stream sources and prequential evaluation used to
//! exercise it.

pub mod classifiers;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod streams;
pub mod tasks;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::VfdtError;
