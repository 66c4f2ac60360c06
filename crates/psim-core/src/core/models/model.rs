use super::cell::Cell;
use super::geometry::{Point, Triangle};
use super::material::Material;
use super::sensor::Sensor;
use super::settings::SimulationSettings;
use super::surface::EmitSurface;
use std::collections::BTreeMap;

/// A complete, frozen model: the unit that is written to and read from the interchange
/// document.
///
/// A `Model` returned by [`ModelBuilder::build`](super::builder::ModelBuilder::build) has
/// passed validation; one read from a file has only been decoded until it is passed to
/// [`validate`](super::validation::validate).
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub settings: SimulationSettings,
    pub materials: Vec<Material>,
    pub sensors: Vec<Sensor>,
    pub cells: Vec<Cell>,
    pub emit_surfaces: Vec<EmitSurface>,
}

impl Model {
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn sensor(&self, id: u64) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id == id)
    }

    /// Triangles of every sensor, keyed by sensor id, in cell order.
    ///
    /// Sensors without cells are present with an empty list.
    pub fn sensor_cells(&self) -> BTreeMap<u64, Vec<&Triangle>> {
        let mut map: BTreeMap<u64, Vec<&Triangle>> =
            self.sensors.iter().map(|s| (s.id, Vec::new())).collect();
        for cell in &self.cells {
            map.entry(cell.sensor_id).or_default().push(&cell.triangle);
        }
        map
    }

    /// Centre of the bounding box enclosing each sensor's cells, keyed by sensor id.
    ///
    /// Sensors without cells are omitted.
    pub fn sensor_centres(&self) -> BTreeMap<u64, Point> {
        self.sensor_cells()
            .into_iter()
            .filter(|(_, triangles)| !triangles.is_empty())
            .map(|(id, triangles)| {
                let (lo, hi) = triangles.iter().map(|t| t.bounds()).fold(
                    (
                        Point::new(f64::INFINITY, f64::INFINITY),
                        Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
                    ),
                    |(lo, hi), (t_lo, t_hi)| {
                        (
                            Point::new(lo.x.min(t_lo.x), lo.y.min(t_lo.y)),
                            Point::new(hi.x.max(t_hi.x), hi.y.max(t_hi.y)),
                        )
                    },
                );
                (id, Point::new((lo.x + hi.x) / 2.0, (lo.y + hi.y) / 2.0))
            })
            .collect()
    }

    /// Total area covered by all cells, in nm².
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(|c| c.triangle.area()).sum()
    }
}
