use super::geometry::Triangle;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A triangular region of the domain bound to one sensor.
///
/// Cells are keyed by their triangle: two cells covering the same ordered vertices are
/// duplicates even if their sensor or specularity differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub triangle: Triangle,
    #[serde(rename = "sensorID")]
    pub sensor_id: u64,
    /// Fraction of boundary reflections that are specular rather than diffuse, in `[0, 1]`.
    pub specularity: f64,
}

impl Cell {
    pub fn new(triangle: Triangle, sensor_id: u64, specularity: f64) -> Self {
        Self {
            triangle,
            sensor_id,
            specularity,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.triangle == other.triangle
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triangle.hash(state);
    }
}
