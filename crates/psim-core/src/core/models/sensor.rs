use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A measurement point grouping one or more cells under a single material and initial
/// temperature. Sensors are keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: u64,
    /// Name of the material this sensor's cells are made of.
    pub material: String,
    /// Initial temperature in K.
    pub t_init: f64,
}

impl Sensor {
    pub fn new(id: u64, material: &str, t_init: f64) -> Self {
        Self {
            id,
            material: material.to_string(),
            t_init,
        }
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
