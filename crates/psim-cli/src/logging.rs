use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::{fmt, prelude::*};

/// Stderr threshold picked by `-v` / `-q`.
fn console_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// A log file keeps the per-pass validation and export records even when stderr is quiet.
fn file_level(verbosity: u8) -> LevelFilter {
    if verbosity >= 3 {
        LevelFilter::TRACE
    } else {
        LevelFilter::DEBUG
    }
}

/// Events from the model library and this binary, at `level`; everything else is dropped.
fn psim_targets(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target("psim", level)
        .with_target(env!("CARGO_CRATE_NAME"), level)
}

fn subscriber(
    verbosity: u8,
    quiet: bool,
    log_file: Option<File>,
) -> impl Subscriber + Send + Sync + 'static {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(psim_targets(console_level(verbosity, quiet)));

    let file = log_file.map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_filter(psim_targets(file_level(verbosity)))
    });

    tracing_subscriber::registry().with(console).with(file)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let file = log_file
        .map(|path| File::create(&path))
        .transpose()
        .map_err(CliError::Io)?;
    subscriber(verbosity, quiet, file).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, info, trace};

    static INIT: Once = Once::new();

    #[test]
    fn verbosity_maps_to_console_levels() {
        assert_eq!(console_level(0, false), LevelFilter::WARN);
        assert_eq!(console_level(1, false), LevelFilter::INFO);
        assert_eq!(console_level(2, false), LevelFilter::DEBUG);
        assert_eq!(console_level(7, false), LevelFilter::TRACE);
        assert_eq!(console_level(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn log_file_never_drops_below_debug() {
        assert_eq!(file_level(0), LevelFilter::DEBUG);
        assert_eq!(file_level(2), LevelFilter::DEBUG);
        assert_eq!(file_level(3), LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn global_logger_installs_once() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
        info!(sensors = 2, "Model passed validation.");
    }

    #[test]
    #[serial]
    fn quiet_console_still_fills_the_log_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("psim.log");
        let file = File::create(&log_path).unwrap();

        tracing::subscriber::with_default(subscriber(0, true, Some(file)), || {
            debug!(cells = 64, "Model exported.");
            trace!("Per-cell detail.");
            debug!(target: "hyper", "Unrelated crate chatter.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Model exported."));
        assert!(content.contains("cells=64"));
        assert!(content.contains("DEBUG"));
        assert!(!content.contains("Per-cell detail."));
        assert!(!content.contains("Unrelated crate chatter."));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
