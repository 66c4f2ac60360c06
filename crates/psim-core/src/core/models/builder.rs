use super::cell::Cell;
use super::error::{
    ConfigurationError, GeometryError, ModelError, ReferenceError, ensure_non_negative,
};
use super::geometry::{Point, Triangle};
use super::material::{DispersionData, Material, RelaxationData};
use super::model::Model;
use super::sensor::Sensor;
use super::settings::{SimulationSettings, SimulationType, check_step_interval};
use super::surface::EmitSurface;
use super::validation::{check_cell_shape, validate};
use crate::core::io::json::{JsonModelFile, ModelFileError};
use crate::core::io::traits::ModelFile;
use crate::core::utils::geometry::{offset_along, parallelogram_closure};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    File(#[from] ModelFileError),
}

/// Accumulates the pieces of a model.
///
/// Every call validates its own arguments and leaves the builder untouched when it fails.
/// Checks that span several entities (unique names, sensor and material references,
/// surface timing) run only in [`build`](Self::build) and [`export`](Self::export), so
/// materials, sensors and cells can be added in any order.
///
/// Sensor ids are handed out by the builder, starting at 0 and increasing by one per
/// [`add_sensor`](Self::add_sensor) call.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    settings: SimulationSettings,
    materials: Vec<Material>,
    sensors: Vec<Sensor>,
    cells: Vec<Cell>,
    surfaces: Vec<EmitSurface>,

    next_sensor_id: u64,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn surfaces(&self) -> &[EmitSurface] {
        &self.surfaces
    }

    /// The id the next [`add_sensor`](Self::add_sensor) call will return.
    pub fn next_sensor_id(&self) -> u64 {
        self.next_sensor_id
    }

    /// Number of independently seeded runs whose results are averaged together.
    pub fn set_num_runs(&mut self, num_runs: u32) -> Result<&mut Self, ModelError> {
        if num_runs < 1 {
            return Err(ConfigurationError::NumRuns(num_runs).into());
        }
        self.settings.num_runs = num_runs;
        Ok(self)
    }

    /// Selects the simulation type. Periodic and transient runs record a measurement every
    /// `step_interval` steps; steady-state runs must pass `0`.
    pub fn set_sim_type(
        &mut self,
        sim_type: SimulationType,
        step_interval: u64,
    ) -> Result<&mut Self, ModelError> {
        check_step_interval(sim_type, step_interval)?;
        self.settings.sim_type = sim_type;
        self.settings.step_interval = step_interval;
        Ok(self)
    }

    /// Turns emitting surfaces into phasors: every emitted phonon leaves along the surface
    /// normal with the same velocity.
    pub fn set_phasor_sim(&mut self) -> &mut Self {
        if self.settings.sim_type == SimulationType::SteadyState {
            warn!("Phasor emission enabled on a steady-state simulation.");
        }
        self.settings.phasor_sim = true;
        self
    }

    /// Number of measurements over the simulated time. Fewer measurements run faster but
    /// are noisier; around 1000 suits runs of 10 to 50 ns.
    pub fn set_measurements(&mut self, num_measurements: u64) -> Result<&mut Self, ModelError> {
        if num_measurements <= 10 {
            return Err(ConfigurationError::Measurements(num_measurements).into());
        }
        self.settings.num_measurements = num_measurements;
        Ok(self)
    }

    /// Total simulated time in nanoseconds.
    pub fn set_sim_time(&mut self, sim_time: f64) -> Result<&mut Self, ModelError> {
        ensure_non_negative("sim_time", sim_time)?;
        self.settings.sim_time = sim_time;
        Ok(self)
    }

    /// More phonons lower the energy carried by each one, trading runtime for variance.
    pub fn set_num_phonons(&mut self, num_phonons: u64) -> &mut Self {
        self.settings.num_phonons = num_phonons;
        self
    }

    /// Equilibrium (linearization) temperature in K. `0` simulates every phonon instead of
    /// only the deviational ones; otherwise keep it inside the model's temperature range.
    pub fn set_t_eq(&mut self, t_eq: f64) -> Result<&mut Self, ModelError> {
        ensure_non_negative("t_eq", t_eq)?;
        self.settings.t_eq = t_eq;
        Ok(self)
    }

    /// Material names must be unique by export time.
    pub fn add_material(&mut self, material: Material) -> &mut Self {
        self.materials.push(material);
        self
    }

    pub fn add_raw_material(
        &mut self,
        name: &str,
        d_data: DispersionData,
        r_data: RelaxationData,
    ) -> &mut Self {
        self.add_material(Material::new(name, d_data, r_data))
    }

    /// Adds a sensor made of `material_name` and returns its id.
    ///
    /// The material does not have to be added yet; it is looked up at export time.
    pub fn add_sensor(&mut self, material_name: &str, t_init: f64) -> Result<u64, ModelError> {
        ensure_non_negative("t_init", t_init)?;
        let id = self.next_sensor_id;
        self.sensors.push(Sensor::new(id, material_name, t_init));
        self.next_sensor_id += 1;
        Ok(id)
    }

    /// Adds a single triangular cell. Coordinates are in nm.
    ///
    /// Only ids the builder could have issued are accepted here; whether the sensor really
    /// exists is checked at export time.
    pub fn add_triangle_cell(
        &mut self,
        p1: Point,
        p2: Point,
        p3: Point,
        sensor_id: u64,
        specularity: f64,
    ) -> Result<&mut Self, ModelError> {
        self.add_cells(&[Triangle::new(p1, p2, p3)], sensor_id, specularity)
    }

    /// Adds an axis-aligned rectangle from its lower-left (`p1`) and upper-right (`p2`)
    /// corners, split into two triangles along the `p1 -> p2` diagonal.
    pub fn add_rectangular_cell(
        &mut self,
        p1: Point,
        p2: Point,
        sensor_id: u64,
        specularity: f64,
    ) -> Result<&mut Self, ModelError> {
        let upper_left = Point::new(p1.x, p2.y);
        let lower_right = Point::new(p2.x, p1.y);
        self.add_cells(
            &[
                Triangle::new(p1, upper_left, lower_right),
                Triangle::new(p2, lower_right, upper_left),
            ],
            sensor_id,
            specularity,
        )
    }

    /// Adds a four sided polygon as the triangles `(p1, p2, p3)` and `(p2, p3, p4)`.
    ///
    /// The points must be ordered so that both triangles lie inside the polygon.
    pub fn add_polygon_cell(
        &mut self,
        p1: Point,
        p2: Point,
        p3: Point,
        p4: Point,
        sensor_id: u64,
        specularity: f64,
    ) -> Result<&mut Self, ModelError> {
        self.add_cells(
            &[Triangle::new(p1, p2, p3), Triangle::new(p2, p3, p4)],
            sensor_id,
            specularity,
        )
    }

    /// Adds a parallelogram anchored at `p1` with sides `dx` and `dy`, rotated `angle`
    /// degrees counter-clockwise about the anchor.
    pub fn add_quadrilateral_cell(
        &mut self,
        p1: Point,
        dx: f64,
        dy: f64,
        angle: f64,
        sensor_id: u64,
        specularity: f64,
    ) -> Result<&mut Self, ModelError> {
        let p2 = offset_along(p1, dx, angle);
        let p3 = offset_along(p1, dy, angle + 90.0);
        let p4 = parallelogram_closure(p1, p2, p3);
        self.add_cells(
            &[Triangle::new(p1, p2, p3), Triangle::new(p4, p2, p3)],
            sensor_id,
            specularity,
        )
    }

    /// Adds a surface that emits at `temp` for the whole simulation.
    pub fn add_surface(&mut self, p1: Point, p2: Point, temp: f64) -> Result<&mut Self, ModelError> {
        self.add_timed_surface(p1, p2, temp, 0.0, 0.0)
    }

    /// Adds a surface that emits at `temp` from `start_time` for `duration` ns. A duration
    /// of `0` means until the end of the simulation.
    pub fn add_timed_surface(
        &mut self,
        p1: Point,
        p2: Point,
        temp: f64,
        duration: f64,
        start_time: f64,
    ) -> Result<&mut Self, ModelError> {
        for p in [p1, p2] {
            if !p.is_finite() {
                return Err(GeometryError::NonFinitePoint(p).into());
            }
        }
        if p1 == p2 {
            return Err(GeometryError::DegenerateSurface(p1).into());
        }
        ensure_non_negative("surface temperature", temp)?;
        ensure_non_negative("start time", start_time)?;
        ensure_non_negative("duration", duration)?;
        self.surfaces
            .push(EmitSurface::new(p1, p2, temp, duration, start_time));
        Ok(self)
    }

    /// Checks every triangle before appending any of them.
    fn add_cells(
        &mut self,
        triangles: &[Triangle],
        sensor_id: u64,
        specularity: f64,
    ) -> Result<&mut Self, ModelError> {
        for triangle in triangles {
            check_cell_shape(triangle, specularity)?;
        }
        if sensor_id > self.next_sensor_id {
            return Err(ReferenceError::SensorNotIssued {
                sensor_id,
                next_id: self.next_sensor_id,
            }
            .into());
        }
        self.cells.extend(
            triangles
                .iter()
                .map(|&triangle| Cell::new(triangle, sensor_id, specularity)),
        );
        Ok(self)
    }

    /// Validates the accumulated state and returns it as a frozen model.
    ///
    /// Open-ended surfaces receive the full simulation time and surfaces are ordered from
    /// longest to shortest in the returned model; the builder itself is not changed.
    pub fn build(&self) -> Result<Model, ModelError> {
        let mut model = Model {
            settings: self.settings.clone(),
            materials: self.materials.clone(),
            sensors: self.sensors.clone(),
            cells: self.cells.clone(),
            emit_surfaces: self.surfaces.clone(),
        };
        validate(&mut model)?;
        Ok(model)
    }

    /// Validates the model and writes it to `path` as JSON, replacing any existing file.
    ///
    /// Nothing is written unless validation succeeds. Returns the model that was written.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<Model, ExportError> {
        let path = path.as_ref();
        debug!("Validating model before export to {:?}", path);
        let model = self.build()?;
        JsonModelFile::write_to_path(&model, path)?;
        info!(
            sensors = model.sensors.len(),
            cells = model.cells.len(),
            surfaces = model.emit_surfaces.len(),
            "Model exported to {:?}",
            path
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::error::{TimingError, UniquenessError};
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::tempdir;

    fn silicon() -> Material {
        Material::new(
            "Silicon",
            DispersionData {
                la_data: [-2.22e-7, 9.26e3, 0.0],
                max_freq_la: 7.63916048e13,
                ta_data: [-2.28e-7, 5.24e3, 0.0],
                max_freq_ta: 3.0100793072e13,
            },
            RelaxationData {
                b_l: 1.3e-24,
                b_tn: 9.0e-13,
                b_tu: 1.9e-18,
                b_i: 0.0,
                w: 2.42e13,
            },
        )
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn ready_builder() -> ModelBuilder {
        let mut b = ModelBuilder::new();
        b.add_material(silicon());
        let id = b.add_sensor("Silicon", 300.0).unwrap();
        b.add_rectangular_cell(p(0.0, 0.0), p(10.0, 10.0), id, 1.0)
            .unwrap();
        b.set_measurements(1000)
            .unwrap()
            .set_sim_time(10.0)
            .unwrap()
            .set_num_phonons(1000);
        b
    }

    mod settings {
        use super::*;

        #[test]
        fn num_runs_below_one_is_rejected() {
            let mut b = ModelBuilder::new();
            assert_eq!(
                b.set_num_runs(0).unwrap_err(),
                ConfigurationError::NumRuns(0).into()
            );
            assert_eq!(b.settings().num_runs, 1);
            b.set_num_runs(4).unwrap();
            assert_eq!(b.settings().num_runs, 4);
        }

        #[test]
        fn sim_type_requires_matching_step_interval() {
            let mut b = ModelBuilder::new();
            assert!(b.set_sim_type(SimulationType::SteadyState, 3).is_err());
            assert!(b.set_sim_type(SimulationType::Periodic, 0).is_err());
            assert!(b.set_sim_type(SimulationType::Transient, 0).is_err());
            assert_eq!(b.settings().sim_type, SimulationType::SteadyState);

            b.set_sim_type(SimulationType::Periodic, 20).unwrap();
            assert_eq!(b.settings().sim_type, SimulationType::Periodic);
            assert_eq!(b.settings().step_interval, 20);
        }

        #[test]
        fn failed_sim_type_change_keeps_previous_values() {
            let mut b = ModelBuilder::new();
            b.set_sim_type(SimulationType::Transient, 5).unwrap();
            assert!(b.set_sim_type(SimulationType::SteadyState, 5).is_err());
            assert_eq!(b.settings().sim_type, SimulationType::Transient);
            assert_eq!(b.settings().step_interval, 5);
        }

        #[test]
        fn phasor_flag_is_set_even_for_steady_state() {
            let mut b = ModelBuilder::new();
            b.set_phasor_sim();
            assert!(b.settings().phasor_sim);
        }

        #[test]
        fn measurements_must_exceed_ten() {
            let mut b = ModelBuilder::new();
            for n in 0..=10 {
                assert_eq!(
                    b.set_measurements(n).unwrap_err(),
                    ConfigurationError::Measurements(n).into()
                );
            }
            b.set_measurements(11).unwrap();
            assert_eq!(b.settings().num_measurements, 11);
        }

        #[test]
        fn negative_times_and_temperatures_are_rejected() {
            let mut b = ModelBuilder::new();
            assert!(b.set_sim_time(-0.5).is_err());
            assert!(b.set_t_eq(-1.0).is_err());
            assert!(b.set_sim_time(f64::NAN).is_err());
            assert_eq!(b.settings().sim_time, 0.0);
            b.set_sim_time(0.0).unwrap().set_t_eq(300.0).unwrap();
            assert_eq!(b.settings().t_eq, 300.0);
        }
    }

    mod entities {
        use super::*;

        #[test]
        fn sensor_ids_are_dense_and_start_at_zero() {
            let mut b = ModelBuilder::new();
            assert_eq!(b.add_sensor("Silicon", 300.0), Ok(0));
            assert_eq!(b.add_sensor("Silicon", 300.0), Ok(1));
            assert!(b.add_sensor("Silicon", -1.0).is_err());
            assert_eq!(b.add_sensor("Germanium", 0.0), Ok(2));
            assert_eq!(b.next_sensor_id(), 3);
            assert_eq!(b.sensors().len(), 3);
        }

        #[test]
        fn triangle_cell_rejects_bad_specularity() {
            let mut b = ModelBuilder::new();
            for specularity in [-0.1, 1.1, f64::NAN] {
                assert!(matches!(
                    b.add_triangle_cell(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), 0, specularity),
                    Err(ModelError::Configuration(ConfigurationError::Specularity(_)))
                ));
            }
            assert!(b.cells().is_empty());
        }

        #[test]
        fn triangle_cell_rejects_coincident_points() {
            let mut b = ModelBuilder::new();
            let result = b.add_triangle_cell(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0), 0, 1.0);
            assert!(matches!(
                result,
                Err(ModelError::Geometry(GeometryError::DegenerateTriangle(_)))
            ));
        }

        #[test]
        fn triangle_cell_rejects_sensor_ids_not_yet_issued() {
            let mut b = ModelBuilder::new();
            b.add_sensor("Silicon", 300.0).unwrap();
            assert_eq!(
                b.add_triangle_cell(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), 2, 1.0)
                    .unwrap_err(),
                ReferenceError::SensorNotIssued {
                    sensor_id: 2,
                    next_id: 1
                }
                .into()
            );
            // The weak bound admits the next id before its sensor exists.
            assert!(
                b.add_triangle_cell(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), 1, 1.0)
                    .is_ok()
            );
        }

        #[test]
        fn rectangle_splits_along_lower_left_to_upper_right_diagonal() {
            let mut b = ModelBuilder::new();
            let id = b.add_sensor("Silicon", 300.0).unwrap();
            b.add_rectangular_cell(p(0.0, 0.0), p(10.0, 10.0), id, 1.0)
                .unwrap();

            let cells = b.cells();
            assert_eq!(cells.len(), 2);
            assert_eq!(
                cells[0].triangle,
                Triangle::new(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 0.0))
            );
            assert_eq!(
                cells[1].triangle,
                Triangle::new(p(10.0, 10.0), p(10.0, 0.0), p(0.0, 10.0))
            );
        }

        #[test]
        fn rectangle_triangles_cover_the_rectangle_and_share_the_diagonal() {
            let cases = [
                (p(0.0, 0.0), p(10.0, 10.0)),
                (p(-3.0, 2.0), p(4.5, 2.5)),
                (p(100.0, -50.0), p(250.0, 400.0)),
            ];
            for (lo, hi) in cases {
                let mut b = ModelBuilder::new();
                b.add_rectangular_cell(lo, hi, 0, 0.5).unwrap();
                let [a, c] = [b.cells()[0].triangle, b.cells()[1].triangle];

                let rect_area = (hi.x - lo.x) * (hi.y - lo.y);
                assert_relative_eq!(a.area() + c.area(), rect_area, max_relative = 1e-12);

                let diagonal_in = |t: &Triangle| {
                    let pts = t.points();
                    pts.contains(&lo) as u8 + pts.contains(&hi) as u8
                };
                assert_eq!(diagonal_in(&a), 1);
                assert_eq!(diagonal_in(&c), 1);
                assert_eq!(a.p1, lo);
                assert_eq!(c.p1, hi);
                // The two shared vertices are the off-diagonal corners.
                assert_eq!(a.p2, c.p3);
                assert_eq!(a.p3, c.p2);
            }
        }

        #[test]
        fn polygon_splits_into_two_triangles() {
            let mut b = ModelBuilder::new();
            b.add_polygon_cell(p(0.0, 0.0), p(0.0, 2.0), p(3.0, 0.0), p(3.0, 2.0), 0, 1.0)
                .unwrap();
            assert_eq!(
                b.cells()[0].triangle,
                Triangle::new(p(0.0, 0.0), p(0.0, 2.0), p(3.0, 0.0))
            );
            assert_eq!(
                b.cells()[1].triangle,
                Triangle::new(p(0.0, 2.0), p(3.0, 0.0), p(3.0, 2.0))
            );
        }

        #[test]
        fn quadrilateral_is_a_rotated_parallelogram() {
            let mut b = ModelBuilder::new();
            b.add_quadrilateral_cell(p(1.0, 1.0), 2.0, 3.0, 90.0, 0, 1.0)
                .unwrap();
            let first = b.cells()[0].triangle;
            let second = b.cells()[1].triangle;

            assert_eq!(first.p1, p(1.0, 1.0));
            assert_relative_eq!(first.p2.x, 1.0, epsilon = 1e-12);
            assert_relative_eq!(first.p2.y, 3.0, epsilon = 1e-12);
            assert_relative_eq!(first.p3.x, -2.0, epsilon = 1e-12);
            assert_relative_eq!(first.p3.y, 1.0, epsilon = 1e-12);
            assert_relative_eq!(second.p1.x, -2.0, epsilon = 1e-12);
            assert_relative_eq!(second.p1.y, 3.0, epsilon = 1e-12);
            assert_eq!(second.p2, first.p2);
            assert_eq!(second.p3, first.p3);
            assert_relative_eq!(first.area() + second.area(), 6.0, epsilon = 1e-9);
        }

        #[test]
        fn composite_cells_are_all_or_nothing() {
            let mut b = ModelBuilder::new();
            // Second triangle (p2, p3, p4) is degenerate because p4 == p2.
            let result =
                b.add_polygon_cell(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 0.0), 0, 1.0);
            assert!(result.is_err());
            assert!(b.cells().is_empty());
        }

        #[test]
        fn surface_validation() {
            let mut b = ModelBuilder::new();
            assert!(matches!(
                b.add_surface(p(1.0, 1.0), p(1.0, 1.0), 300.0),
                Err(ModelError::Geometry(GeometryError::DegenerateSurface(_)))
            ));
            assert!(b.add_surface(p(0.0, 0.0), p(0.0, 1.0), -1.0).is_err());
            assert!(
                b.add_timed_surface(p(0.0, 0.0), p(0.0, 1.0), 300.0, -1.0, 0.0)
                    .is_err()
            );
            assert!(
                b.add_timed_surface(p(0.0, 0.0), p(0.0, 1.0), 300.0, 1.0, -2.0)
                    .is_err()
            );
            assert!(b.surfaces().is_empty());

            b.add_timed_surface(p(0.0, 0.0), p(0.0, 1.0), 300.0, 2.0, 1.0)
                .unwrap();
            assert_eq!(b.surfaces()[0].duration(), 2.0);
            assert_eq!(b.surfaces()[0].start_time(), 1.0);
        }
    }

    mod export {
        use super::*;

        #[test]
        fn export_requires_measurements_sim_time_and_phonons() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("model.json");

            let mut b = ModelBuilder::new();
            b.add_material(silicon());
            assert!(matches!(
                b.export(&path),
                Err(ExportError::Model(ModelError::Configuration(
                    ConfigurationError::Unset(_)
                )))
            ));
            b.set_measurements(100).unwrap();
            assert!(b.export(&path).is_err());
            b.set_sim_time(1.0).unwrap();
            assert!(matches!(
                b.export(&path),
                Err(ExportError::Model(ModelError::Configuration(
                    ConfigurationError::Unset("the number of phonons")
                )))
            ));
            b.set_num_phonons(10);
            assert!(b.export(&path).is_ok());
        }

        #[test]
        fn failed_export_writes_nothing() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("model.json");
            let mut b = ready_builder();
            b.add_sensor("Unobtainium", 300.0).unwrap();

            assert!(b.export(&path).is_err());
            assert!(!path.exists());
        }

        #[test]
        fn failed_export_keeps_existing_file() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("model.json");
            fs::write(&path, "previous").unwrap();

            let mut b = ready_builder();
            b.add_material(silicon());
            assert!(matches!(
                b.export(&path),
                Err(ExportError::Model(ModelError::Uniqueness(
                    UniquenessError::Material(_)
                )))
            ));
            assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
        }

        #[test]
        fn export_rejects_duplicate_surfaces() {
            let dir = tempdir().unwrap();
            let mut b = ready_builder();
            b.add_surface(p(0.0, 0.0), p(0.0, 10.0), 310.0).unwrap();
            b.add_surface(p(0.0, 0.0), p(0.0, 10.0), 290.0).unwrap();
            assert!(matches!(
                b.export(dir.path().join("m.json")),
                Err(ExportError::Model(ModelError::Uniqueness(
                    UniquenessError::Surface { .. }
                )))
            ));
        }

        #[test]
        fn export_rejects_surfaces_outlasting_the_simulation() {
            let dir = tempdir().unwrap();
            let mut b = ready_builder();
            b.add_timed_surface(p(0.0, 0.0), p(0.0, 10.0), 310.0, 8.0, 3.0)
                .unwrap();
            assert!(matches!(
                b.export(dir.path().join("m.json")),
                Err(ExportError::Model(ModelError::Timing(
                    TimingError::SurfaceOutlastsSimulation { .. }
                )))
            ));
        }

        #[test]
        fn duplicate_surface_wins_over_an_earlier_timing_problem() {
            let mut b = ready_builder();
            b.add_timed_surface(p(0.0, 0.0), p(0.0, 10.0), 300.0, 8.0, 3.0)
                .unwrap();
            b.add_surface(p(0.0, 0.0), p(0.0, 10.0), 300.0).unwrap();
            assert!(matches!(
                b.build(),
                Err(ModelError::Uniqueness(UniquenessError::Surface { .. }))
            ));
        }

        #[test]
        fn surfaces_of_equal_length_keep_their_order() {
            let mut b = ready_builder();
            b.add_surface(p(0.0, 0.0), p(0.0, 5.0), 300.0).unwrap();
            b.add_surface(p(10.0, 0.0), p(10.0, 5.0), 301.0).unwrap();
            b.add_surface(p(5.0, 0.0), p(5.0, 3.0), 302.0).unwrap();
            b.add_surface(p(2.0, 0.0), p(2.0, 7.0), 303.0).unwrap();

            let model = b.build().unwrap();
            let temps: Vec<f64> = model.emit_surfaces.iter().map(|s| s.temp()).collect();
            assert_eq!(temps, vec![303.0, 300.0, 301.0, 302.0]);
            // The builder keeps insertion order.
            assert_eq!(b.surfaces()[0].temp(), 300.0);
        }

        #[test]
        fn silicon_bar_scenario_exports_with_full_duration_surfaces() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("bar.json");

            let mut b = ModelBuilder::new();
            b.add_material(silicon());
            let id = b.add_sensor("Silicon", 300.0).unwrap();
            assert_eq!(id, 0);
            b.add_rectangular_cell(p(0.0, 0.0), p(10.0, 10.0), id, 1.0)
                .unwrap();
            b.add_timed_surface(p(0.0, 0.0), p(0.0, 10.0), 310.0, 0.0, 0.0)
                .unwrap();
            b.add_timed_surface(p(10.0, 0.0), p(10.0, 10.0), 290.0, 0.0, 0.0)
                .unwrap();
            b.set_measurements(1000)
                .unwrap()
                .set_sim_time(10.0)
                .unwrap()
                .set_num_phonons(1000);

            let model = b.export(&path).unwrap();
            assert!(path.exists());
            assert_eq!(model.cells.len(), 2);
            assert_eq!(
                model.cells[0].triangle,
                Triangle::new(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 0.0))
            );
            assert_eq!(
                model.cells[1].triangle,
                Triangle::new(p(10.0, 10.0), p(10.0, 0.0), p(0.0, 10.0))
            );
            assert!(model.emit_surfaces.iter().all(|s| s.duration() == 10.0));

            let written = JsonModelFile::read_from_path(&path).unwrap();
            assert_eq!(written.emit_surfaces.len(), 2);
            assert!(written.emit_surfaces.iter().all(|s| s.duration() == 10.0));
        }

        #[test]
        fn builder_stays_usable_after_export() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("model.json");
            let mut b = ready_builder();
            b.export(&path).unwrap();

            let id = b.add_sensor("Silicon", 290.0).unwrap();
            assert_eq!(id, 1);
            b.add_rectangular_cell(p(10.0, 0.0), p(20.0, 10.0), id, 0.0)
                .unwrap();
            let model = b.export(&path).unwrap();
            assert_eq!(model.sensors.len(), 2);
            assert_eq!(model.cells.len(), 4);
        }
    }
}
