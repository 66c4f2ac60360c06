use crate::core::io::traits::ModelFile;
use crate::core::models::cell::Cell;
use crate::core::models::material::Material;
use crate::core::models::model::Model;
use crate::core::models::sensor::Sensor;
use crate::core::models::settings::SimulationSettings;
use crate::core::models::surface::EmitSurface;
use serde::{Deserialize, Serialize};
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Version written to the `format_version` field of every document.
pub const FORMAT_VERSION: u32 = 1;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum ModelFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed model document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported model format version {0} (expected {FORMAT_VERSION})")]
    UnsupportedVersion(u32),
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    format_version: u32,
    settings: &'a SimulationSettings,
    materials: &'a [Material],
    sensors: &'a [Sensor],
    cells: &'a [Cell],
    emit_surfaces: &'a [EmitSurface],
}

#[derive(Deserialize)]
struct Document {
    #[serde(default = "current_version")]
    format_version: u32,
    settings: SimulationSettings,
    #[serde(default)]
    materials: Vec<Material>,
    #[serde(default)]
    sensors: Vec<Sensor>,
    #[serde(default)]
    cells: Vec<Cell>,
    #[serde(default)]
    emit_surfaces: Vec<EmitSurface>,
}

fn current_version() -> u32 {
    FORMAT_VERSION
}

/// The JSON interchange document read by the engine and the plotting tools.
///
/// Documents are pretty printed with four-space indentation. Decoding a document written
/// here and encoding it again reproduces it byte for byte. Documents without a
/// `format_version` field are read as version 1.
pub struct JsonModelFile;

impl JsonModelFile {
    pub fn encode(model: &Model) -> Result<String, ModelFileError> {
        let mut buffer = Vec::new();
        Self::write_to(model, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    pub fn decode(s: &str) -> Result<Model, ModelFileError> {
        let document: Document = serde_json::from_str(s)?;
        into_model(document)
    }
}

fn into_model(document: Document) -> Result<Model, ModelFileError> {
    if document.format_version != FORMAT_VERSION {
        return Err(ModelFileError::UnsupportedVersion(document.format_version));
    }
    Ok(Model {
        settings: document.settings,
        materials: document.materials,
        sensors: document.sensors,
        cells: document.cells,
        emit_surfaces: document.emit_surfaces,
    })
}

impl ModelFile for JsonModelFile {
    type Error = ModelFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Model, Self::Error> {
        let document: Document = serde_json::from_reader(reader)?;
        into_model(document)
    }

    fn write_to(model: &Model, writer: &mut impl Write) -> Result<(), Self::Error> {
        let document = DocumentRef {
            format_version: FORMAT_VERSION,
            settings: &model.settings,
            materials: &model.materials,
            sensors: &model.sensors,
            cells: &model.cells,
            emit_surfaces: &model.emit_surfaces,
        };
        let mut serializer =
            Serializer::with_formatter(&mut *writer, PrettyFormatter::with_indent(INDENT));
        document.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
