use crate::cli::FluxArgs;
use crate::error::Result;
use psim::core::io::json::JsonModelFile;
use psim::core::io::results::{SteadyStateResults, write_flux_table};
use psim::core::io::traits::ModelFile;
use std::fs;
use tracing::{info, warn};

pub fn run(args: FluxArgs) -> Result<()> {
    let model = JsonModelFile::read_from_path(&args.model)?;
    info!("Reading results from {:?}", &args.results);
    let results = SteadyStateResults::read_from_path(&args.results)?;
    if results.readings.len() != model.sensors.len() {
        warn!(
            "Results hold {} readings but the model has {} sensors.",
            results.readings.len(),
            model.sensors.len()
        );
    }
    let avg = results.average_flux()?;

    println!("{}", avg.title);
    println!("x flux: {:.6e} +/- {:.6e}", avg.x_flux, avg.x_flux_std);
    println!("y flux: {:.6e} +/- {:.6e}", avg.y_flux, avg.y_flux_std);

    if let Some(output) = &args.output {
        let mut table = Vec::new();
        write_flux_table(&model, &results, &mut table)?;
        fs::write(output, table)?;
        println!("Flux table written to {}", output.display());
    }
    Ok(())
}
