//! Whole-model consistency checks run at export time.
//!
//! The passes run in a fixed order and stop at the first violation: settings, materials,
//! sensors, cells, then surfaces. Within a pass, duplicates are reported before any
//! reference or timing problem. The surface pass is the only one that changes the model:
//! it gives open-ended surfaces (`duration == 0`) the full simulation time and sorts
//! surfaces from longest to shortest, which lets the engine test the large surfaces first.

use super::cell::Cell;
use super::error::{
    ConfigurationError, GeometryError, ModelError, ReferenceError, TimingError, UniquenessError,
    ensure_non_negative,
};
use super::geometry::Triangle;
use super::material::Material;
use super::model::Model;
use super::sensor::Sensor;
use super::settings::{SimulationSettings, check_step_interval};
use super::surface::EmitSurface;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Runs every pass over `model`, repairing surface durations and ordering in place.
pub fn validate(model: &mut Model) -> Result<(), ModelError> {
    check_settings(&model.settings)?;
    let materials = check_materials(&model.materials)?;
    let sensors = check_sensors(&model.sensors, &materials, &model.cells)?;
    check_cells(&model.cells, &sensors)?;
    normalize_surfaces(&mut model.emit_surfaces, model.settings.sim_time)?;
    debug!(
        materials = model.materials.len(),
        sensors = model.sensors.len(),
        cells = model.cells.len(),
        surfaces = model.emit_surfaces.len(),
        "Model passed validation."
    );
    Ok(())
}

/// The settings an engine run cannot start without. A zero in any of the counters or in the
/// simulation time means it was never set.
pub fn check_settings(settings: &SimulationSettings) -> Result<(), ModelError> {
    if settings.num_runs < 1 {
        return Err(ConfigurationError::NumRuns(settings.num_runs).into());
    }
    match settings.num_measurements {
        0 => return Err(ConfigurationError::Unset("the number of measurements").into()),
        n if n <= 10 => return Err(ConfigurationError::Measurements(n).into()),
        _ => {}
    }
    ensure_non_negative("sim_time", settings.sim_time)?;
    if settings.sim_time == 0.0 {
        return Err(ConfigurationError::Unset("the simulation time").into());
    }
    if settings.num_phonons == 0 {
        return Err(ConfigurationError::Unset("the number of phonons").into());
    }
    ensure_non_negative("t_eq", settings.t_eq)?;
    check_step_interval(settings.sim_type, settings.step_interval)
}

fn check_materials(materials: &[Material]) -> Result<HashMap<&str, &Material>, ModelError> {
    let mut by_name = HashMap::with_capacity(materials.len());
    for material in materials {
        if by_name.insert(material.name.as_str(), material).is_some() {
            return Err(UniquenessError::Material(material.name.clone()).into());
        }
    }
    Ok(by_name)
}

fn check_sensors<'a>(
    sensors: &'a [Sensor],
    materials: &HashMap<&str, &Material>,
    cells: &[Cell],
) -> Result<HashMap<u64, &'a Sensor>, ModelError> {
    let mut by_id = HashMap::with_capacity(sensors.len());
    for sensor in sensors {
        if by_id.insert(sensor.id, sensor).is_some() {
            return Err(UniquenessError::Sensor(sensor.id).into());
        }
    }

    let referenced: HashSet<u64> = cells.iter().map(|c| c.sensor_id).collect();
    for sensor in sensors {
        if !materials.contains_key(sensor.material.as_str()) {
            return Err(ReferenceError::UnknownMaterial {
                sensor_id: sensor.id,
                material: sensor.material.clone(),
            }
            .into());
        }
        if !referenced.contains(&sensor.id) {
            return Err(ReferenceError::UnusedSensor {
                sensor_id: sensor.id,
            }
            .into());
        }
        ensure_non_negative("t_init", sensor.t_init)?;
    }
    Ok(by_id)
}

fn check_cells(cells: &[Cell], sensors: &HashMap<u64, &Sensor>) -> Result<(), ModelError> {
    let mut seen: HashSet<&Triangle> = HashSet::with_capacity(cells.len());
    for cell in cells {
        if !seen.insert(&cell.triangle) {
            return Err(UniquenessError::Cell(cell.triangle).into());
        }
    }
    for cell in cells {
        if !sensors.contains_key(&cell.sensor_id) {
            return Err(ReferenceError::UnknownSensor {
                sensor_id: cell.sensor_id,
            }
            .into());
        }
        check_cell_shape(&cell.triangle, cell.specularity)?;
    }
    Ok(())
}

/// Local checks shared by the builder and the cell pass.
pub(crate) fn check_cell_shape(triangle: &Triangle, specularity: f64) -> Result<(), ModelError> {
    if !(0.0..=1.0).contains(&specularity) {
        return Err(ConfigurationError::Specularity(specularity).into());
    }
    if let Some(p) = triangle.points().into_iter().find(|p| !p.is_finite()) {
        return Err(GeometryError::NonFinitePoint(p).into());
    }
    if !triangle.has_distinct_points() {
        return Err(GeometryError::DegenerateTriangle(*triangle).into());
    }
    Ok(())
}

fn normalize_surfaces(surfaces: &mut [EmitSurface], sim_time: f64) -> Result<(), ModelError> {
    let mut seen = HashSet::with_capacity(surfaces.len());
    for surface in surfaces.iter() {
        if !seen.insert(surface.line()) {
            return Err(UniquenessError::Surface {
                p1: surface.p1(),
                p2: surface.p2(),
            }
            .into());
        }
    }
    for surface in surfaces.iter() {
        if surface.end_time() > sim_time {
            return Err(TimingError::SurfaceOutlastsSimulation {
                p1: surface.p1(),
                p2: surface.p2(),
                end: surface.end_time(),
                sim_time,
            }
            .into());
        }
    }

    for surface in surfaces.iter_mut().filter(|s| s.duration() == 0.0) {
        surface.set_duration(sim_time);
    }
    // Stable: equal lengths keep their insertion order.
    surfaces.sort_by(|a, b| b.length().total_cmp(&a.length()));
    Ok(())
}
