use crate::cli::BuildArgs;
use crate::commands::inspect::summarize;
use crate::config::BuildConfig;
use crate::error::Result;
use tracing::info;

pub fn run(args: BuildArgs) -> Result<()> {
    info!("Loading build configuration from {:?}", &args.config);
    let config = BuildConfig::load(&args.config)?;

    let builder = config.to_builder()?;
    info!(
        "Generated {} sensor(s), {} cell(s) and {} surface(s).",
        builder.sensors().len(),
        builder.cells().len(),
        builder.surfaces().len()
    );

    let model = builder.export(&args.output)?;
    println!("Model written to {}", args.output.display());
    println!("{}", summarize(&model));
    Ok(())
}
