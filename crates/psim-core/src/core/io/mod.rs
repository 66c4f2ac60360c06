//! Reading and writing PSIM files.
//!
//! The interchange document handed to the engine is JSON and goes through the
//! [`ModelFile`](traits::ModelFile) trait. The engine's own result files are plain
//! whitespace-separated text and are read by [`results`].

pub mod json;
pub mod results;
pub mod traits;
