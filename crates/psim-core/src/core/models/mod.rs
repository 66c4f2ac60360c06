//! # Model Entities
//!
//! Value types for every part of a PSIM input model, the builder that accumulates them
//! and the validator that runs before a model is written.
//!
//! ## Key Components
//!
//! - [`geometry`] - Points, line segments and triangles in nm
//! - [`material`] - Dispersion and relaxation parameters, keyed by material name
//! - [`sensor`] - Measurement regions with an initial temperature
//! - [`cell`] - Triangular cells tied to a sensor, with a boundary specularity
//! - [`surface`] - Boundary segments that emit phonons at a fixed temperature
//! - [`settings`] - Run parameters and the simulation type
//! - [`model`] - The frozen, validated model
//! - [`builder`] - Incremental construction with per-call argument checks
//! - [`validation`] - Whole-model checks run before export
//! - [`error`] - Error categories shared by the builder and the validator
//!
//! ## Usage
//!
//! ```ignore
//! use psim::core::models::builder::ModelBuilder;
//! use psim::core::models::geometry::Point;
//!
//! let mut builder = ModelBuilder::new();
//! builder.add_material(silicon);
//! let sensor = builder.add_sensor("Silicon", 300.0)?;
//! builder.add_rectangular_cell(Point::new(0.0, 0.0), Point::new(10.0, 10.0), sensor, 1.0)?;
//! builder.add_surface(Point::new(0.0, 0.0), Point::new(0.0, 10.0), 310.0)?;
//! builder.set_measurements(1000)?.set_sim_time(10.0)?.set_num_phonons(100_000);
//! builder.export("model.json")?;
//! ```

pub mod builder;
pub mod cell;
pub mod error;
pub mod geometry;
pub mod material;
pub mod model;
pub mod sensor;
pub mod settings;
pub mod surface;
pub mod validation;
