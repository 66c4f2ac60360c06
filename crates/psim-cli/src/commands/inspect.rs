use crate::cli::InspectArgs;
use crate::error::Result;
use psim::core::io::json::JsonModelFile;
use psim::core::io::traits::ModelFile;
use psim::core::models::model::Model;
use psim::core::models::validation::validate;
use std::fmt::Write;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Loading model from {:?}", &args.input);
    let mut model = JsonModelFile::read_from_path(&args.input)?;
    validate(&mut model)?;
    println!("{}", summarize(&model));
    Ok(())
}

/// Human-readable overview of a model's settings and contents.
pub fn summarize(model: &Model) -> String {
    let s = &model.settings;
    let mut out = String::new();
    let _ = writeln!(out, "Simulation:   {}", s.sim_type);
    if s.sim_type.is_stepped() {
        let _ = writeln!(out, "Step interval: {}", s.step_interval);
    }
    let _ = writeln!(
        out,
        "Runs: {}  Measurements: {}  Time: {} ns  Phonons: {}",
        s.num_runs, s.num_measurements, s.sim_time, s.num_phonons
    );
    if s.is_full_simulation() {
        let _ = writeln!(out, "T_eq:         0 K (full simulation)");
    } else {
        let _ = writeln!(out, "T_eq:         {} K", s.t_eq);
    }
    if s.phasor_sim {
        let _ = writeln!(out, "Phasor emission enabled");
    }
    let materials: Vec<&str> = model.materials.iter().map(|m| m.name.as_str()).collect();
    let _ = writeln!(out, "Materials:    {}", materials.join(", "));
    let _ = writeln!(out, "Sensors:      {}", model.sensors.len());
    let _ = writeln!(
        out,
        "Cells:        {} ({:.3} nm^2)",
        model.cells.len(),
        model.total_area()
    );
    let _ = write!(out, "Surfaces:     {}", model.emit_surfaces.len());
    out
}
