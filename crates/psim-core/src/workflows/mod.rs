//! # Workflows Module
//!
//! Ready-made model builders for the geometries used to check the engine against
//! published results. Each generator returns a [`ModelBuilder`](crate::core::models::builder::ModelBuilder)
//! that already holds the material, sensors, cells and emitting surfaces; callers finish it
//! by setting the run parameters and exporting.
//!
//! - [`prebuilt`] - Linear bars, side-heated strips, U-shaped channels and square wafers

pub mod prebuilt;
