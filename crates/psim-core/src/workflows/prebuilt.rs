use crate::core::models::builder::ModelBuilder;
use crate::core::models::error::ModelError;
use crate::core::models::geometry::Point;
use crate::core::models::material::Material;
use crate::core::models::settings::SimulationType;
use serde::Deserialize;
use tracing::debug;

/// A bar of `num_cells` rectangular cells along x, each its own sensor, held between a hot
/// left edge and a cold right edge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SimpleLinear {
    pub num_cells: usize,
    pub t_high: f64,
    pub t_low: f64,
    pub t_init: f64,
    pub t_eq: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub specularity: f64,
}

impl Default for SimpleLinear {
    fn default() -> Self {
        Self {
            num_cells: 20,
            t_high: 310.0,
            t_low: 290.0,
            t_init: 300.0,
            t_eq: 300.0,
            cell_width: 50.0,
            cell_height: 200.0,
            specularity: 1.0,
        }
    }
}

/// A time window for the side heaters of [`SimpleLinearSides`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Pulse {
    pub start_time: f64,
    pub duration: f64,
}

/// A strip of square cells heated and cooled through its top and bottom edges.
///
/// Hot surfaces start at 30 % of the strip length and cold ones at 60 %, each spanning
/// 10 % of the length. The left and right edges emit at the average of the two
/// temperatures, which is also the initial temperature of every sensor.
///
/// With a pulse, the top hot and bottom cold surfaces switch on one `duration` after the
/// bottom hot and top cold surfaces, so the heat source alternates between the edges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SimpleLinearSides {
    pub num_cells: usize,
    pub t_high: f64,
    pub t_low: f64,
    pub t_eq: f64,
    /// Side length of the square cells.
    pub cell_size: f64,
    pub height: f64,
    pub specularity: f64,
    pub pulse: Option<Pulse>,
}

impl Default for SimpleLinearSides {
    fn default() -> Self {
        Self {
            num_cells: 100,
            t_high: 330.0,
            t_low: 270.0,
            t_eq: 300.0,
            cell_size: 10.0,
            height: 100.0,
            specularity: 1.0,
            pulse: None,
        }
    }
}

/// A U-shaped channel built from `length / 3` square cells, with hot surfaces on the
/// left leg and cold ones on the right leg. Sensors start at `t_eq`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct UKink {
    pub length: f64,
    pub t_high: f64,
    pub t_low: f64,
    pub t_eq: f64,
    pub specularity: f64,
}

impl Default for UKink {
    fn default() -> Self {
        Self {
            length: 300.0,
            t_high: 310.0,
            t_low: 290.0,
            t_eq: 300.0,
            specularity: 1.0,
        }
    }
}

/// An emitting edge of a [`Wafer2d`], covering `span` along that edge.
///
/// A non-zero `duration` makes the surface timed and the model transient.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WaferSurface {
    pub temp: f64,
    pub span: (f64, f64),
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub start_time: f64,
}

/// A square wafer of `num_cells x num_cells` cells with optional emitting spans on each
/// edge. Unlike the other generators it also sets the run parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Wafer2d {
    pub cell_size: f64,
    pub num_cells: usize,
    pub t_init: f64,
    pub specularity: f64,
    pub sim_time: f64,
    pub num_measurements: u64,
    pub num_phonons: u64,
    pub t_eq: f64,
    /// Step interval; when set the model records periodic steps.
    pub interval: Option<u64>,
    pub left: Option<WaferSurface>,
    pub top: Option<WaferSurface>,
    pub right: Option<WaferSurface>,
    pub bottom: Option<WaferSurface>,
}

impl Default for Wafer2d {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            num_cells: 10,
            t_init: 300.0,
            specularity: 1.0,
            sim_time: 10.0,
            num_measurements: 1000,
            num_phonons: 1_000_000,
            t_eq: 300.0,
            interval: None,
            left: None,
            top: None,
            right: None,
            bottom: None,
        }
    }
}

fn base_builder(material: Material, t_eq: f64) -> Result<ModelBuilder, ModelError> {
    let mut b = ModelBuilder::new();
    b.set_t_eq(t_eq)?;
    b.add_material(material);
    Ok(b)
}

pub fn simple_linear(params: &SimpleLinear, material: Material) -> Result<ModelBuilder, ModelError> {
    let name = material.name.clone();
    let mut b = base_builder(material, params.t_eq)?;
    let w = params.cell_width;
    let h = params.cell_height;

    for i in 0..params.num_cells {
        let x = i as f64 * w;
        let id = b.add_sensor(&name, params.t_init)?;
        let upper_right = Point::new(x + w, h);
        b.add_rectangular_cell(Point::new(x, 0.0), upper_right, id, params.specularity)?;
    }
    let end = params.num_cells as f64 * w;
    b.add_surface(Point::new(0.0, 0.0), Point::new(0.0, h), params.t_high)?;
    b.add_surface(Point::new(end, 0.0), Point::new(end, h), params.t_low)?;

    debug!(cells = params.num_cells, "Built simple linear geometry.");
    Ok(b)
}

pub fn simple_linear_sides(
    params: &SimpleLinearSides,
    material: Material,
) -> Result<ModelBuilder, ModelError> {
    let name = material.name.clone();
    let mut b = base_builder(material, params.t_eq)?;
    let size = params.cell_size;
    let avg_temp = (params.t_high + params.t_low) / 2.0;
    let length = params.num_cells as f64 * size;
    let rows = (params.height / size) as usize;
    let top = params.height;

    for i in 0..params.num_cells {
        for j in 0..rows {
            let id = b.add_sensor(&name, avg_temp)?;
            let lower_left = Point::new(i as f64 * size, j as f64 * size);
            let upper_right = Point::new((i + 1) as f64 * size, (j + 1) as f64 * size);
            b.add_rectangular_cell(lower_left, upper_right, id, params.specularity)?;
        }
    }

    // (duration, start) of the surfaces that switch on first and of those that follow.
    let windows = params
        .pulse
        .as_ref()
        .filter(|p| p.duration != 0.0)
        .map(|p| ((p.duration, p.start_time), (p.duration, p.start_time + p.duration)));
    let (first, second) = windows.unwrap_or(((0.0, 0.0), (0.0, 0.0)));

    let heater_count = (length * 0.1 / size) as usize;
    let mut hot_x = length * 0.3;
    let mut cold_x = length * 0.6;
    for _ in 0..heater_count {
        let hot_top = (Point::new(hot_x, top), Point::new(hot_x + size, top));
        let hot_bottom = (Point::new(hot_x, 0.0), Point::new(hot_x + size, 0.0));
        let cold_top = (Point::new(cold_x, top), Point::new(cold_x + size, top));
        let cold_bottom = (Point::new(cold_x, 0.0), Point::new(cold_x + size, 0.0));

        for ((p1, p2), temp, (duration, start)) in [
            (hot_top, params.t_high, second),
            (hot_bottom, params.t_high, first),
            (cold_top, params.t_low, first),
            (cold_bottom, params.t_low, second),
        ] {
            b.add_timed_surface(p1, p2, temp, duration, start)?;
        }
        hot_x += size;
        cold_x += size;
    }

    for j in 0..rows {
        let y0 = j as f64 * size;
        let y1 = (j + 1) as f64 * size;
        b.add_surface(Point::new(0.0, y0), Point::new(0.0, y1), avg_temp)?;
        b.add_surface(Point::new(length, y0), Point::new(length, y1), avg_temp)?;
    }

    debug!(
        columns = params.num_cells,
        rows,
        heaters = heater_count,
        "Built side-heated strip."
    );
    Ok(b)
}

pub fn u_kink(params: &UKink, material: Material) -> Result<ModelBuilder, ModelError> {
    let name = material.name.clone();
    let mut b = base_builder(material, params.t_eq)?;
    let l = params.length;
    let bx = l / 3.0;
    let by = 2.0 * bx;

    let add_row = |b: &mut ModelBuilder, count: usize, mut x: f64, y: f64| -> Result<(), ModelError> {
        for _ in 0..count {
            let id = b.add_sensor(&name, params.t_eq)?;
            let upper_right = Point::new(x + bx, y + bx);
            b.add_rectangular_cell(Point::new(x, y), upper_right, id, params.specularity)?;
            x += bx;
        }
        Ok(())
    };

    // Lower left leg.
    for i in 0..2 {
        add_row(&mut b, 3, 0.0, i as f64 * bx)?;
    }
    // Rising section.
    for i in 0..4 {
        add_row(&mut b, 2, bx, by + i as f64 * bx)?;
    }
    // Top bridge.
    for i in 0..2 {
        add_row(&mut b, 2, l, 2.0 * l - (i + 1) as f64 * bx)?;
    }
    // Falling section.
    for i in 0..4 {
        add_row(&mut b, 2, l + by, 2.0 * l - (i + 1) as f64 * bx)?;
    }
    // Lower right leg.
    for i in 0..2 {
        add_row(&mut b, 3, l + by, by - (i + 1) as f64 * bx)?;
    }

    let right = 2.0 * l + by;
    b.add_surface(Point::new(0.0, 0.0), Point::new(0.0, bx), params.t_high)?;
    b.add_surface(Point::new(0.0, bx), Point::new(0.0, by), params.t_high)?;
    b.add_surface(Point::new(right, 0.0), Point::new(right, bx), params.t_low)?;
    b.add_surface(Point::new(right, bx), Point::new(right, by), params.t_low)?;

    debug!(cells = b.cells().len() / 2, "Built U-shaped channel.");
    Ok(b)
}

#[derive(Clone, Copy)]
enum Edge {
    Vertical(f64),
    Horizontal(f64),
}

pub fn wafer_2d(params: &Wafer2d, material: Material) -> Result<ModelBuilder, ModelError> {
    let name = material.name.clone();
    let mut b = base_builder(material, params.t_eq)?;
    b.set_sim_time(params.sim_time)?
        .set_measurements(params.num_measurements)?
        .set_num_phonons(params.num_phonons);
    if let Some(interval) = params.interval.filter(|&i| i > 0) {
        b.set_sim_type(SimulationType::Periodic, interval)?;
    }

    let size = params.cell_size;
    for col in 0..params.num_cells {
        for row in 0..params.num_cells {
            let id = b.add_sensor(&name, params.t_init)?;
            let p1 = Point::new(row as f64 * size, col as f64 * size);
            let p2 = Point::new(p1.x + size, p1.y + size);
            b.add_rectangular_cell(p1, p2, id, params.specularity)?;
        }
    }

    let far = params.num_cells as f64 * size;
    let edges = [
        (&params.left, Edge::Vertical(0.0)),
        (&params.top, Edge::Horizontal(far)),
        (&params.right, Edge::Vertical(far)),
        (&params.bottom, Edge::Horizontal(0.0)),
    ];
    for (surface, edge) in edges {
        if let Some(surface) = surface {
            add_wafer_surface(&mut b, surface, edge, size, params.interval.unwrap_or(0))?;
        }
    }

    debug!(cells = params.num_cells, "Built square wafer.");
    Ok(b)
}

/// Emits from every `size`-long segment starting inside `span`.
fn add_wafer_surface(
    b: &mut ModelBuilder,
    surface: &WaferSurface,
    edge: Edge,
    size: f64,
    interval: u64,
) -> Result<(), ModelError> {
    let (start, end) = surface.span;
    let segments = ((end - start) / size).ceil().max(0.0) as usize;
    for k in 0..segments {
        let a = start + k as f64 * size;
        let (p1, p2) = match edge {
            Edge::Vertical(x) => (Point::new(x, a), Point::new(x, a + size)),
            Edge::Horizontal(y) => (Point::new(a, y), Point::new(a + size, y)),
        };
        if surface.duration != 0.0 {
            b.add_timed_surface(p1, p2, surface.temp, surface.duration, surface.start_time)?;
            b.set_sim_type(SimulationType::Transient, interval)?;
        } else {
            b.add_surface(p1, p2, surface.temp)?;
        }
    }
    Ok(())
}
