//! Material parameter sets.
//!
//! [`presets`] holds published dispersion and relaxation fits that ship with the crate;
//! [`library`] loads additional materials from TOML files.

pub mod library;
pub mod presets;
