use super::geometry::{Point, Triangle};
use super::settings::SimulationType;
use thiserror::Error;

/// Every way a model can be rejected, either by a builder call or at export time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Broken reference: {0}")]
    ReferentialIntegrity(#[from] ReferenceError),

    #[error("Duplicate entry: {0}")]
    Uniqueness(#[from] UniquenessError),

    #[error("Timing violation: {0}")]
    Timing(#[from] TimingError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("the number of runs cannot be less than 1 (got {0})")]
    NumRuns(u32),

    #[error("the number of measurements must be greater than 10 (got {0})")]
    Measurements(u64),

    #[error("a {sim_type} simulation cannot have a step interval of {step_interval}")]
    StepInterval {
        sim_type: SimulationType,
        step_interval: u64,
    },

    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("specularity must be in the range [0, 1] (got {0})")]
    Specularity(f64),

    #[error("{0} must be set before export")]
    Unset(&'static str),

    #[error("unknown simulation type: {0}")]
    UnknownSimulationType(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("cell points must all be different: {}, {}, {}", .0.p1, .0.p2, .0.p3)]
    DegenerateTriangle(Triangle),

    #[error("a surface cannot be formed from identical points {0}")]
    DegenerateSurface(Point),

    #[error("coordinates must be finite: {0}")]
    NonFinitePoint(Point),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("sensor {sensor_id} has not been issued yet (next sensor id is {next_id})")]
    SensorNotIssued { sensor_id: u64, next_id: u64 },

    #[error("a cell has a sensor id of {sensor_id} but no sensor with this id exists")]
    UnknownSensor { sensor_id: u64 },

    #[error("material '{material}' of sensor {sensor_id} does not exist in the materials list")]
    UnknownMaterial { sensor_id: u64, material: String },

    #[error("no cells are linked to sensor {sensor_id}")]
    UnusedSensor { sensor_id: u64 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UniquenessError {
    #[error("material name '{0}' appears more than once")]
    Material(String),

    #[error("sensor id {0} appears more than once")]
    Sensor(u64),

    #[error("cell {}, {}, {} appears more than once", .0.p1, .0.p2, .0.p3)]
    Cell(Triangle),

    #[error("surface {p1} -> {p2} appears more than once")]
    Surface { p1: Point, p2: Point },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimingError {
    #[error(
        "surface {p1} -> {p2} is active until {end} ns but the simulation only lasts {sim_time} ns"
    )]
    SurfaceOutlastsSimulation {
        p1: Point,
        p2: Point,
        end: f64,
        sim_time: f64,
    },
}

/// Rejects negative and NaN values for a named scalar.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ModelError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::Negative { field, value }.into())
    }
}
