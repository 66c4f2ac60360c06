use crate::core::models::model::Model;
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Defines the interface for reading and writing a model file format.
pub trait ModelFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Decodes a model from a buffered reader.
    ///
    /// The model is returned exactly as stored; call
    /// [`validate`](crate::core::models::validation::validate) to check it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or reading fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Model, Self::Error>;

    /// Encodes a model to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn write_to(model: &Model, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a model from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoding fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Model, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a model to a file path, replacing any existing file.
    ///
    /// The whole document is encoded in memory first, so an encoding failure leaves the
    /// target untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the file cannot be written.
    fn write_to_path<P: AsRef<Path>>(model: &Model, path: P) -> Result<(), Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(model, &mut buffer)?;
        fs::write(path, buffer)?;
        Ok(())
    }
}
