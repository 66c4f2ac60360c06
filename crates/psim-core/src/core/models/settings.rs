use super::error::{ConfigurationError, ModelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of run the engine performs; encoded as `0`, `1` or `2` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SimulationType {
    /// Measurements are averaged into a single steady-state result.
    #[default]
    SteadyState,
    /// Surfaces emit periodically and measurements are kept per step.
    Periodic,
    /// Measurements are kept per step while the system relaxes.
    Transient,
}

impl SimulationType {
    /// Whether measurements are recorded in steps, which requires a step interval.
    pub fn is_stepped(&self) -> bool {
        !matches!(self, SimulationType::SteadyState)
    }
}

impl From<SimulationType> for u8 {
    fn from(kind: SimulationType) -> Self {
        match kind {
            SimulationType::SteadyState => 0,
            SimulationType::Periodic => 1,
            SimulationType::Transient => 2,
        }
    }
}

impl TryFrom<u8> for SimulationType {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SimulationType::SteadyState),
            1 => Ok(SimulationType::Periodic),
            2 => Ok(SimulationType::Transient),
            other => Err(ConfigurationError::UnknownSimulationType(other.to_string()).into()),
        }
    }
}

impl FromStr for SimulationType {
    type Err = ModelError;

    /// Accepts the numeric code or the name, case-insensitively (e.g. `"periodic"`,
    /// `"steady-state"`, `"2"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "steadystate" | "steady-state" | "steady_state" => {
                Ok(SimulationType::SteadyState)
            }
            "1" | "periodic" => Ok(SimulationType::Periodic),
            "2" | "transient" => Ok(SimulationType::Transient),
            _ => Err(ConfigurationError::UnknownSimulationType(s.to_string()).into()),
        }
    }
}

impl fmt::Display for SimulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimulationType::SteadyState => "steady-state",
            SimulationType::Periodic => "periodic",
            SimulationType::Transient => "transient",
        };
        f.write_str(name)
    }
}

/// Global run settings of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Number of independently seeded runs averaged into the output.
    pub num_runs: u32,
    /// Number of measurements taken over the simulated time.
    pub num_measurements: u64,
    /// Simulated time in nanoseconds.
    pub sim_time: f64,
    pub num_phonons: u64,
    /// Linearization temperature in K; `0` simulates every phonon, not only deviational ones.
    pub t_eq: f64,
    pub sim_type: SimulationType,
    /// Distance between recorded steps; `0` for steady-state runs.
    pub step_interval: u64,
    /// Emit every phonon along the surface normal with a single velocity.
    pub phasor_sim: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            num_runs: 1,
            num_measurements: 0,
            sim_time: 0.0,
            num_phonons: 0,
            t_eq: 0.0,
            sim_type: SimulationType::SteadyState,
            step_interval: 0,
            phasor_sim: false,
        }
    }
}

impl SimulationSettings {
    /// Whether every phonon is simulated rather than only the deviational ones.
    pub fn is_full_simulation(&self) -> bool {
        self.t_eq == 0.0
    }
}

/// Checks a simulation type against its step interval.
pub(crate) fn check_step_interval(
    sim_type: SimulationType,
    step_interval: u64,
) -> Result<(), ModelError> {
    if sim_type.is_stepped() == (step_interval > 0) {
        Ok(())
    } else {
        Err(ConfigurationError::StepInterval {
            sim_type,
            step_interval,
        }
        .into())
    }
}
