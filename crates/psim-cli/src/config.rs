//! The TOML file read by `psim-model build`.
//!
//! ```toml
//! [material]
//! preset = "silicon"
//!
//! [settings]
//! num-measurements = 1000
//! sim-time = 10.0
//! num-phonons = 5000000
//!
//! [geometry]
//! kind = "simple-linear"
//! num-cells = 20
//! ```
//!
//! Settings are applied after the geometry is generated and override anything the
//! generator set.

use crate::error::{CliError, Result};
use psim::core::materials::library::MaterialLibrary;
use psim::core::materials::presets;
use psim::core::models::builder::ModelBuilder;
use psim::core::models::material::Material;
use psim::core::models::settings::SimulationType;
use psim::workflows::prebuilt::{self, SimpleLinear, SimpleLinearSides, UKink, Wafer2d};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_PRESET: &str = "silicon";

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default)]
    pub material: MaterialConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    pub geometry: GeometryConfig,
}

/// Where the model's single material comes from: a built-in preset, or a named entry
/// of a TOML material library.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MaterialConfig {
    pub preset: Option<String>,
    pub library: Option<PathBuf>,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SettingsConfig {
    pub num_runs: Option<u32>,
    pub num_measurements: Option<u64>,
    pub sim_time: Option<f64>,
    pub num_phonons: Option<u64>,
    pub t_eq: Option<f64>,
    /// Name (`steady-state`, `periodic`, `transient`) or numeric code.
    pub sim_type: Option<String>,
    pub step_interval: Option<u64>,
    pub phasor_sim: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GeometryConfig {
    SimpleLinear(SimpleLinear),
    SimpleLinearSides(SimpleLinearSides),
    UKink(UKink),
    Wafer2d(Wafer2d),
}

impl BuildConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: BuildConfig =
            toml::from_str(&content).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e,
            })?;

        // Library paths are relative to the configuration file.
        if let Some(base) = path.parent() {
            if let Some(library) = config.material.library.as_mut().filter(|l| l.is_relative()) {
                *library = base.join(&*library);
            }
        }
        debug!("Loaded build configuration from {:?}", path);
        Ok(config)
    }

    /// Generates the geometry and applies the settings on top of it.
    pub fn to_builder(&self) -> Result<ModelBuilder> {
        let material = self.material.resolve()?;
        let mut builder = match &self.geometry {
            GeometryConfig::SimpleLinear(p) => prebuilt::simple_linear(p, material)?,
            GeometryConfig::SimpleLinearSides(p) => prebuilt::simple_linear_sides(p, material)?,
            GeometryConfig::UKink(p) => prebuilt::u_kink(p, material)?,
            GeometryConfig::Wafer2d(p) => prebuilt::wafer_2d(p, material)?,
        };
        self.settings.apply(&mut builder)?;
        Ok(builder)
    }
}

impl MaterialConfig {
    pub fn resolve(&self) -> Result<Material> {
        match (&self.library, &self.preset) {
            (Some(_), Some(_)) => Err(CliError::Config(
                "[material] takes either 'preset' or 'library', not both".to_string(),
            )),
            (Some(path), None) => {
                let library = MaterialLibrary::load(path)?;
                let material = match &self.name {
                    Some(name) => library.get(name).cloned().ok_or_else(|| {
                        CliError::Config(format!(
                            "material '{}' not found in library {:?}",
                            name, path
                        ))
                    })?,
                    None if library.len() == 1 => library.into_materials().remove(0),
                    None => {
                        return Err(CliError::Config(format!(
                            "library {:?} holds {} materials; select one with 'name'",
                            path,
                            library.len()
                        )));
                    }
                };
                Ok(material)
            }
            (None, preset) => {
                let key = preset.as_deref().unwrap_or(DEFAULT_PRESET);
                let mut material = presets::preset(key).ok_or_else(|| {
                    CliError::Config(format!(
                        "unknown material preset '{}' (available: {})",
                        key,
                        presets::keys().join(", ")
                    ))
                })?;
                if let Some(name) = &self.name {
                    material.name = name.clone();
                }
                Ok(material)
            }
        }
    }
}

impl SettingsConfig {
    pub fn apply(&self, builder: &mut ModelBuilder) -> Result<()> {
        if let Some(n) = self.num_runs {
            builder.set_num_runs(n)?;
        }
        if let Some(n) = self.num_measurements {
            builder.set_measurements(n)?;
        }
        if let Some(t) = self.sim_time {
            builder.set_sim_time(t)?;
        }
        if let Some(n) = self.num_phonons {
            builder.set_num_phonons(n);
        }
        if let Some(t) = self.t_eq {
            builder.set_t_eq(t)?;
        }
        match (&self.sim_type, self.step_interval) {
            (Some(kind), interval) => {
                let kind: SimulationType = kind.parse()?;
                builder.set_sim_type(kind, interval.unwrap_or(0))?;
            }
            (None, Some(interval)) => {
                let kind = builder.settings().sim_type;
                builder.set_sim_type(kind, interval)?;
            }
            (None, None) => {}
        }
        if self.phasor_sim == Some(true) {
            builder.set_phasor_sim();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(toml: &str) -> BuildConfig {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn minimal_config_uses_silicon_and_generator_defaults() {
        let config = parse("[geometry]\nkind = \"simple-linear\"\n");
        let builder = config.to_builder().unwrap();
        assert_eq!(builder.materials()[0].name, "Silicon");
        assert_eq!(builder.sensors().len(), 20);
    }

    #[test]
    fn settings_override_generator_values() {
        let config = parse(
            r#"
            [settings]
            num-measurements = 200
            sim-time = 0.5
            num-phonons = 1000
            sim-type = "transient"
            step-interval = 4
            phasor-sim = true

            [geometry]
            kind = "wafer2d"
            num-cells = 3
            interval = 8
            "#,
        );
        let builder = config.to_builder().unwrap();
        let settings = builder.settings();
        assert_eq!(settings.sim_type, SimulationType::Transient);
        assert_eq!(settings.step_interval, 4);
        assert_eq!(settings.num_measurements, 200);
        assert!(settings.phasor_sim);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn step_interval_alone_keeps_the_generator_sim_type() {
        let config = parse(
            "[settings]\nstep-interval = 6\n[geometry]\nkind = \"wafer2d\"\nnum-cells = 2\ninterval = 3\n",
        );
        let builder = config.to_builder().unwrap();
        assert_eq!(builder.settings().sim_type, SimulationType::Periodic);
        assert_eq!(builder.settings().step_interval, 6);
    }

    #[test]
    fn unknown_keys_and_kinds_are_rejected() {
        assert!(toml::from_str::<BuildConfig>("[geometry]\nkind = \"spiral\"\n").is_err());
        assert!(
            toml::from_str::<BuildConfig>("[geometry]\nkind = \"u-kink\"\nwidth = 3.0\n").is_err()
        );
        assert!(
            toml::from_str::<BuildConfig>(
                "[settings]\nnum_runs = 2\n[geometry]\nkind = \"u-kink\"\n"
            )
            .is_err()
        );
    }

    #[test]
    fn invalid_settings_surface_as_model_errors() {
        let config = parse("[settings]\nnum-measurements = 5\n[geometry]\nkind = \"u-kink\"\n");
        assert!(matches!(config.to_builder(), Err(CliError::Model(_))));

        let config = parse("[settings]\nsim-type = \"chaotic\"\n[geometry]\nkind = \"u-kink\"\n");
        assert!(matches!(config.to_builder(), Err(CliError::Model(_))));
    }

    #[test]
    fn preset_can_be_renamed_and_unknown_preset_fails() {
        let material = MaterialConfig {
            preset: Some("germanium".to_string()),
            library: None,
            name: Some("Ge".to_string()),
        };
        assert_eq!(material.resolve().unwrap().name, "Ge");

        let missing = MaterialConfig {
            preset: Some("tin".to_string()),
            ..MaterialConfig::default()
        };
        assert!(matches!(missing.resolve(), Err(CliError::Config(_))));
    }

    #[test]
    fn library_is_resolved_relative_to_the_config_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("materials.toml"),
            "[[material]]\npreset = \"silicon-wong\"\n[[material]]\npreset = \"germanium\"\n",
        )
        .unwrap();
        let config_path = dir.path().join("build.toml");
        fs::write(
            &config_path,
            "[material]\nlibrary = \"materials.toml\"\nname = \"Germanium\"\n[geometry]\nkind = \"u-kink\"\n",
        )
        .unwrap();

        let config = BuildConfig::load(&config_path).unwrap();
        assert_eq!(
            config.material.library.as_deref(),
            Some(dir.path().join("materials.toml").as_path())
        );
        let builder = config.to_builder().unwrap();
        assert_eq!(builder.sensors()[0].material, "Germanium");

        let ambiguous = MaterialConfig {
            name: None,
            ..config.material.clone()
        };
        assert!(matches!(ambiguous.resolve(), Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_config_reports_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[geometry\n").unwrap();
        assert!(matches!(
            BuildConfig::load(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
