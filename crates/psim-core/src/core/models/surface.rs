use super::geometry::{Line, Point};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A boundary segment that injects phonons at a fixed temperature over a time window.
///
/// `length` is the squared length of the segment. It is derived from the endpoints, written
/// to the interchange document for information only, and recomputed whenever a surface is
/// read back. Surfaces are keyed by their ordered endpoint pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "EmitSurfaceRecord")]
pub struct EmitSurface {
    p1: Point,
    p2: Point,
    temp: f64,
    duration: f64,
    start_time: f64,
    length: f64,
}

/// The fields of an emitting surface that are read back from a document.
#[derive(Deserialize)]
struct EmitSurfaceRecord {
    p1: Point,
    p2: Point,
    temp: f64,
    duration: f64,
    start_time: f64,
}

impl From<EmitSurfaceRecord> for EmitSurface {
    fn from(r: EmitSurfaceRecord) -> Self {
        EmitSurface::new(r.p1, r.p2, r.temp, r.duration, r.start_time)
    }
}

impl EmitSurface {
    pub fn new(p1: Point, p2: Point, temp: f64, duration: f64, start_time: f64) -> Self {
        Self {
            p1,
            p2,
            temp,
            duration,
            start_time,
            length: Line::new(p1, p2).squared_length(),
        }
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Emission temperature in K.
    pub fn temp(&self) -> f64 {
        self.temp
    }

    /// Active duration in ns; `0` until export fills in the full simulation time.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Time at which emission starts, in ns.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Squared length of the segment.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn line(&self) -> Line {
        Line::new(self.p1, self.p2)
    }

    /// When emission stops, in ns.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    pub(crate) fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }
}

impl PartialEq for EmitSurface {
    fn eq(&self, other: &Self) -> bool {
        self.p1 == other.p1 && self.p2 == other.p2
    }
}

impl Eq for EmitSurface {}

impl Hash for EmitSurface {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.p1.hash(state);
        self.p2.hash(state);
    }
}
