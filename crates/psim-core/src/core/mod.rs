//! # Core Module
//!
//! The building blocks of a PSIM model and everything needed to move it in and out of files.
//!
//! - **Entity Model** ([`models`]) - Points, triangles, cells, sensors, materials, emitting
//!   surfaces, settings, the builder that accumulates them and the export-time validator
//! - **File I/O** ([`io`]) - The JSON interchange format and the engine's result text files
//! - **Materials** ([`materials`]) - Published material presets and TOML material libraries
//! - **Utilities** ([`utils`]) - Vector helpers for cell decomposition

pub mod io;
pub mod materials;
pub mod models;
pub mod utils;
