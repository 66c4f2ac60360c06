use crate::core::models::material::{DispersionData, Material, RelaxationData};
use phf::{Map, phf_map};

/// A published set of material parameters.
#[derive(Debug)]
pub struct MaterialPreset {
    /// Name given to materials built from this preset.
    pub name: &'static str,
    pub source: &'static str,
    pub d_data: DispersionData,
    pub r_data: RelaxationData,
}

impl MaterialPreset {
    pub fn to_material(&self) -> Material {
        Material::new(self.name, self.d_data.clone(), self.r_data.clone())
    }
}

// Every silicon fit shares the same branch cutoffs.
const SILICON_MAX_FREQ_LA: f64 = 7.63916048e13;
const SILICON_MAX_FREQ_TA: f64 = 3.0100793072e13;

pub static SILICON: MaterialPreset = MaterialPreset {
    name: "Silicon",
    source: "Jean et al., J. Appl. Phys. 115, 024304 (2014)",
    d_data: DispersionData {
        la_data: [-2.22e-7, 9.26e3, 0.0],
        max_freq_la: SILICON_MAX_FREQ_LA,
        ta_data: [-2.28e-7, 5.24e3, 0.0],
        max_freq_ta: SILICON_MAX_FREQ_TA,
    },
    r_data: RelaxationData {
        b_l: 1.3e-24,
        b_tn: 9.0e-13,
        b_tu: 1.9e-18,
        b_i: 0.0,
        w: 2.42e13,
    },
};

pub static SILICON_HOLLAND: MaterialPreset = MaterialPreset {
    name: "Silicon-Holland",
    source: "Holland, Phys. Rev. 132, 2461 (1963)",
    d_data: DispersionData {
        la_data: [-2.01e-7, 9.01e3, 0.0],
        max_freq_la: SILICON_MAX_FREQ_LA,
        ta_data: [-2.26e-7, 5.23e3, 0.0],
        max_freq_ta: SILICON_MAX_FREQ_TA,
    },
    r_data: RelaxationData {
        b_l: 2.0e-24,
        b_tn: 9.3e-13,
        b_tu: 5.5e-18,
        b_i: 0.0,
        w: 2.417e13,
    },
};

pub static SILICON_WONG: MaterialPreset = MaterialPreset {
    name: "Silicon-Wong",
    source: "Wong et al., J. Appl. Phys. 110, 113524 (2011)",
    d_data: DispersionData {
        la_data: [-2.234e-7, 9.28e3, 0.0],
        max_freq_la: SILICON_MAX_FREQ_LA,
        ta_data: [-2.278e-7, 5.24e3, 0.0],
        max_freq_ta: SILICON_MAX_FREQ_TA,
    },
    r_data: RelaxationData {
        b_l: 2.0e-24,
        b_tn: 9.3e-13,
        b_tu: 1.7e-18,
        b_i: 0.0,
        w: 2.417e13,
    },
};

pub static GERMANIUM: MaterialPreset = MaterialPreset {
    name: "Germanium",
    source: "Jean et al., J. Appl. Phys. 115, 024304 (2014)",
    d_data: DispersionData {
        la_data: [-1.50e-7, 5.63e3, 0.0],
        max_freq_la: 4.45236386e13,
        ta_data: [-1.13e-7, 2.60e3, 0.0],
        max_freq_ta: 1.4937724175e13,
    },
    r_data: RelaxationData {
        b_l: 2.3e-24,
        b_tn: 30.0e-13,
        b_tu: 1.5e-18,
        b_i: 0.0,
        w: 1.23e13,
    },
};

static PRESETS: Map<&'static str, &'static MaterialPreset> = phf_map! {
    "silicon" => &SILICON,
    "silicon-holland" => &SILICON_HOLLAND,
    "silicon-wong" => &SILICON_WONG,
    "germanium" => &GERMANIUM,
};

/// Looks up a preset by key (`silicon`, `silicon-holland`, `silicon-wong`, `germanium`),
/// ignoring case and surrounding whitespace.
pub fn lookup(name: &str) -> Option<&'static MaterialPreset> {
    PRESETS
        .get(name.trim().to_ascii_lowercase().as_str())
        .copied()
}

/// Builds the material for a preset key.
pub fn preset(name: &str) -> Option<Material> {
    lookup(name).map(MaterialPreset::to_material)
}

/// All presets, in a fixed order.
pub fn all() -> [&'static MaterialPreset; 4] {
    [&SILICON, &SILICON_HOLLAND, &SILICON_WONG, &GERMANIUM]
}

/// The lookup keys accepted by [`preset`], sorted.
pub fn keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = PRESETS.keys().copied().collect();
    keys.sort_unstable();
    keys
}
