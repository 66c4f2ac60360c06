use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Quadratic fits of the LA and TA phonon dispersion branches.
///
/// Each branch holds its coefficients starting with the `k^2` term (`[c2, c1, c0]`) and the
/// maximum angular frequency reached on that branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionData {
    pub la_data: [f64; 3],
    pub max_freq_la: f64,
    pub ta_data: [f64; 3],
    pub max_freq_ta: f64,
}

/// Coefficients of the phonon relaxation-time model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaxationData {
    /// Longitudinal three-phonon scattering.
    pub b_l: f64,
    /// Transverse normal scattering.
    pub b_tn: f64,
    /// Transverse umklapp scattering.
    pub b_tu: f64,
    /// Impurity scattering.
    pub b_i: f64,
    /// Frequency separating the normal and umklapp transverse regimes.
    pub w: f64,
}

/// A named material. Names are the primary key: two materials are equal when their
/// names are, regardless of their coefficients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub d_data: DispersionData,
    pub r_data: RelaxationData,
}

impl Material {
    pub fn new(name: &str, d_data: DispersionData, r_data: RelaxationData) -> Self {
        Self {
            name: name.to_string(),
            d_data,
            r_data,
        }
    }

    /// Compares names and every coefficient.
    pub fn same_data(&self, other: &Material) -> bool {
        self.name == other.name && self.d_data == other.d_data && self.r_data == other.r_data
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Material {}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
