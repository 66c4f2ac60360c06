use psim::core::io::json::ModelFileError;
use psim::core::io::results::ResultsError;
use psim::core::materials::library::MaterialLoadError;
use psim::core::models::builder::ExportError;
use psim::core::models::error::ModelError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Failed to read model: {0}")]
    ModelFile(#[from] ModelFileError),

    #[error("Failed to read results: {0}")]
    Results(#[from] ResultsError),

    #[error("Failed to load materials: {0}")]
    Material(#[from] MaterialLoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
