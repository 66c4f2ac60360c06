//! # PSIM Model Toolkit
//!
//! Builds, validates and serializes the input model consumed by the PSIM phonon transport
//! engine: a 2-D domain made of triangulated cells, the sensors that group them, the
//! materials the sensors are made of, the boundary surfaces that emit phonons, and the
//! run settings.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Entity value types, the [`ModelBuilder`](core::models::builder::ModelBuilder)
//!   accumulator with its export-time validator, the JSON interchange format, material
//!   presets, and readers for the text results written by the engine.
//!
//! - **[`workflows`]: Prebuilt Geometries.** Ready-made builders for the standard test
//!   geometries (linear bars, side-heated strips, U-shaped channels and square wafers).

pub mod core;
pub mod workflows;
