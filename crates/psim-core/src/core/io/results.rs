//! Readers for the plain-text result files written by the engine.
//!
//! Steady-state files hold a title line followed by one line per sensor, in ascending
//! sensor id order:
//!
//! ```text
//! temp temp_std x_flux x_flux_std y_flux y_flux_std
//! ```
//!
//! Periodic files hold a title line followed by one block per recorded step: the step
//! index, the number of cells `n`, then `n` lines of `temp x_flux y_flux`.

use crate::core::models::model::Model;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: ResultsParseErrorKind,
    },
    #[error("Results file is empty (expected a title line)")]
    MissingTitle,
    #[error("At least two sensor readings are needed to average the flux, found {0}")]
    TooFewReadings(usize),
    #[error("Model has {sensors} sensors but the results hold {readings} readings")]
    SensorCountMismatch { sensors: usize, readings: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum ResultsParseErrorKind {
    #[error("Expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("Invalid number in column {column} (value: '{value}')")]
    InvalidFloat { column: usize, value: String },
    #[error("Invalid integer (value: '{value}')")]
    InvalidInt { value: String },
    #[error("Step block declares {found} cells, previous blocks declared {expected}")]
    CellCountChanged { expected: usize, found: usize },
    #[error("Step block ends after {found} of {expected} cell lines")]
    TruncatedBlock { expected: usize, found: usize },
}

/// One steady-state line: averaged temperature and flux of a sensor with their standard
/// deviations across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub temp: f64,
    pub temp_std: f64,
    pub x_flux: f64,
    pub x_flux_std: f64,
    pub y_flux: f64,
    pub y_flux_std: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateResults {
    pub title: String,
    /// Indexed by position in ascending sensor id order.
    pub readings: Vec<SensorReading>,
}

/// Flux averaged over all sensors of a steady-state run.
///
/// The deviations are the sample standard deviations of the per-sensor fluxes, not a
/// combination of the per-sensor deviations.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageFlux {
    pub title: String,
    pub x_flux: f64,
    pub x_flux_std: f64,
    pub y_flux: f64,
    pub y_flux_std: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellReading {
    pub temp: f64,
    pub x_flux: f64,
    pub y_flux: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicStep {
    pub step: u64,
    pub readings: Vec<CellReading>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicResults {
    pub title: String,
    pub num_cells: usize,
    pub steps: Vec<PeriodicStep>,
}

/// Reads every line, dropping trailing blank lines. Returns the title and the numbered
/// body lines (numbers are 1-based and count the title).
fn read_lines(reader: &mut impl BufRead) -> Result<(String, Vec<(usize, String)>), ResultsError> {
    let mut lines = reader.lines();
    let title = match lines.next() {
        Some(line) => line?.trim_end().to_string(),
        None => return Err(ResultsError::MissingTitle),
    };
    let mut body = Vec::new();
    for (index, line) in lines.enumerate() {
        body.push((index + 2, line?));
    }
    while body.last().is_some_and(|(_, l)| l.trim().is_empty()) {
        body.pop();
    }
    Ok((title, body))
}

fn parse_columns<const N: usize>(line_num: usize, line: &str) -> Result<[f64; N], ResultsError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != N {
        return Err(ResultsError::Parse {
            line: line_num,
            kind: ResultsParseErrorKind::ColumnCount {
                expected: N,
                found: fields.len(),
            },
        });
    }
    let mut values = [0.0; N];
    for (column, (slot, field)) in values.iter_mut().zip(fields).enumerate() {
        *slot = f64::from_str(field).map_err(|_| ResultsError::Parse {
            line: line_num,
            kind: ResultsParseErrorKind::InvalidFloat {
                column: column + 1,
                value: field.to_string(),
            },
        })?;
    }
    Ok(values)
}

fn parse_int<T: FromStr>(line_num: usize, line: &str) -> Result<T, ResultsError> {
    let trimmed = line.trim();
    trimmed.parse().map_err(|_| ResultsError::Parse {
        line: line_num,
        kind: ResultsParseErrorKind::InvalidInt {
            value: trimmed.to_string(),
        },
    })
}

fn mean_and_sample_std(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count() as f64;
    let mean = values.clone().sum::<f64>() / n;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}

impl SteadyStateResults {
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, ResultsError> {
        let (title, body) = read_lines(reader)?;
        let readings = body
            .iter()
            .map(|(line_num, line)| {
                let [temp, temp_std, x_flux, x_flux_std, y_flux, y_flux_std] =
                    parse_columns::<6>(*line_num, line)?;
                Ok(SensorReading {
                    temp,
                    temp_std,
                    x_flux,
                    x_flux_std,
                    y_flux,
                    y_flux_std,
                })
            })
            .collect::<Result<Vec<_>, ResultsError>>()?;
        Ok(Self { title, readings })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ResultsError> {
        let file = File::open(path)?;
        Self::read_from(&mut BufReader::new(file))
    }

    /// Mean and sample standard deviation of the x and y flux over all sensors.
    pub fn average_flux(&self) -> Result<AverageFlux, ResultsError> {
        if self.readings.len() < 2 {
            return Err(ResultsError::TooFewReadings(self.readings.len()));
        }
        let (x_flux, x_flux_std) = mean_and_sample_std(self.readings.iter().map(|r| r.x_flux));
        let (y_flux, y_flux_std) = mean_and_sample_std(self.readings.iter().map(|r| r.y_flux));
        Ok(AverageFlux {
            title: self.title.clone(),
            x_flux,
            x_flux_std,
            y_flux,
            y_flux_std,
        })
    }
}

impl PeriodicResults {
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, ResultsError> {
        let (title, body) = read_lines(reader)?;
        let mut num_cells: Option<usize> = None;
        let mut steps = Vec::new();
        let mut lines = body.iter();

        while let Some((step_line, step_text)) = lines.next() {
            let step = parse_int::<u64>(*step_line, step_text)?;
            let (count_line, count_text) = lines.next().ok_or_else(|| ResultsError::Parse {
                line: *step_line,
                kind: ResultsParseErrorKind::TruncatedBlock {
                    expected: num_cells.unwrap_or(0),
                    found: 0,
                },
            })?;
            let count = parse_int::<usize>(*count_line, count_text)?;
            let expected = *num_cells.get_or_insert(count);
            if count != expected {
                return Err(ResultsError::Parse {
                    line: *count_line,
                    kind: ResultsParseErrorKind::CellCountChanged {
                        expected,
                        found: count,
                    },
                });
            }

            let mut readings = Vec::with_capacity(count);
            let mut last_line = *count_line;
            for (line_num, text) in lines.by_ref().take(count) {
                let [temp, x_flux, y_flux] = parse_columns::<3>(*line_num, text)?;
                readings.push(CellReading {
                    temp,
                    x_flux,
                    y_flux,
                });
                last_line = *line_num;
            }
            if readings.len() < count {
                return Err(ResultsError::Parse {
                    line: last_line,
                    kind: ResultsParseErrorKind::TruncatedBlock {
                        expected: count,
                        found: readings.len(),
                    },
                });
            }
            steps.push(PeriodicStep { step, readings });
        }

        Ok(Self {
            title,
            num_cells: num_cells.unwrap_or(0),
            steps,
        })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ResultsError> {
        let file = File::open(path)?;
        Self::read_from(&mut BufReader::new(file))
    }
}

#[derive(Serialize)]
struct FluxRow {
    sensor_id: u64,
    x: Option<f64>,
    y: Option<f64>,
    temp: f64,
    temp_std: f64,
    x_flux: f64,
    x_flux_std: f64,
    y_flux: f64,
    y_flux_std: f64,
}

/// Writes one CSV row per sensor, pairing each steady-state reading with the sensor's
/// bounding-box centre. Sensors without cells leave the centre columns empty.
pub fn write_flux_table(
    model: &Model,
    results: &SteadyStateResults,
    writer: impl Write,
) -> Result<(), ResultsError> {
    let mut ids: Vec<u64> = model.sensors.iter().map(|s| s.id).collect();
    ids.sort_unstable();
    if ids.len() != results.readings.len() {
        return Err(ResultsError::SensorCountMismatch {
            sensors: ids.len(),
            readings: results.readings.len(),
        });
    }

    let centres = model.sensor_centres();
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (id, reading) in ids.into_iter().zip(&results.readings) {
        let centre = centres.get(&id);
        csv_writer.serialize(FluxRow {
            sensor_id: id,
            x: centre.map(|c| c.x),
            y: centre.map(|c| c.y),
            temp: reading.temp,
            temp_std: reading.temp_std,
            x_flux: reading.x_flux,
            x_flux_std: reading.x_flux_std,
            y_flux: reading.y_flux,
            y_flux_std: reading.y_flux_std,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
