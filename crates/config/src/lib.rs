//! Configuration models and loaders for the drone motion workspace.

use std::fs::File;
use std::path::{Path, PathBuf};

use drone_core::{PhysicalConstants, constants};
use drone_vehicle::{Drone, Rotor, SpinDirection, VehicleError};
use serde::Deserialize;
use thiserror::Error;

/// Environment constants parsed from YAML or TOML.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EnvironmentConfig {
    #[serde(default = "default_gravity")]
    pub gravity_m_s2: f64,
    #[serde(default = "default_air_density")]
    pub air_density_kg_m3: f64,
}

fn default_gravity() -> f64 {
    constants::GRAVITY_M_S2
}

fn default_air_density() -> f64 {
    constants::AIR_DENSITY_KG_M3
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            gravity_m_s2: default_gravity(),
            air_density_kg_m3: default_air_density(),
        }
    }
}

impl From<&EnvironmentConfig> for PhysicalConstants {
    fn from(cfg: &EnvironmentConfig) -> Self {
        PhysicalConstants {
            gravity_m_s2: cfg.gravity_m_s2,
            air_density_kg_m3: cfg.air_density_kg_m3,
        }
    }
}

/// Rotor entry of a drone definition.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RotorConfig {
    pub speed_m_s: f64,
    pub area_m2: f64,
    #[serde(default)]
    pub spin: SpinConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpinConfig {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl From<SpinConfig> for SpinDirection {
    fn from(spin: SpinConfig) -> Self {
        match spin {
            SpinConfig::Clockwise => SpinDirection::Clockwise,
            SpinConfig::CounterClockwise => SpinDirection::CounterClockwise,
        }
    }
}

/// Drone definition parsed from catalogs.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DroneConfig {
    pub name: String,
    pub mass_kg: f64,
    #[serde(default)]
    pub pitch_deg: f64,
    #[serde(default)]
    pub roll_deg: f64,
    #[serde(default)]
    pub current_height_m: f64,
    pub rotors: Vec<RotorConfig>,
}

impl DroneConfig {
    /// Build the runtime vehicle, validating rotor areas and mass.
    pub fn to_drone(&self) -> Result<Drone, VehicleError> {
        let rotors = self
            .rotors
            .iter()
            .map(|r| Rotor::new(r.speed_m_s, r.area_m2, r.spin.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Drone::new(
            self.name.clone(),
            rotors,
            self.pitch_deg,
            self.roll_deg,
            self.mass_kg,
            self.current_height_m,
        )
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("expected exactly one environment record in {path} (found {count})")]
    EnvironmentCount { path: PathBuf, count: usize },
}

/// Load environment constants from a single YAML or TOML file.
pub fn load_environment<P: AsRef<Path>>(path: P) -> Result<EnvironmentConfig, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&contents)?);
    }
    if path.is_dir() {
        let mut records: Vec<EnvironmentConfig> = read_dir_records(path)?;
        if records.len() != 1 {
            return Err(ConfigError::EnvironmentCount {
                path: path.to_path_buf(),
                count: records.len(),
            });
        }
        return Ok(records.remove(0));
    }
    let reader = File::open(path)?;
    Ok(serde_yaml::from_reader(reader)?)
}

/// Load drone definitions from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_drones<P: AsRef<Path>>(path: P) -> Result<Vec<DroneConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD_TOML: &str = r#"
name = "Trainer Quad"
mass_kg = 1.2
current_height_m = 2.0

[[rotors]]
speed_m_s = 10.0
area_m2 = 0.05

[[rotors]]
speed_m_s = 10.0
area_m2 = 0.05
spin = "counter_clockwise"
"#;

    #[test]
    fn environment_defaults_fill_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.yaml");
        fs::write(&path, "gravity_m_s2: 3.71\n").unwrap();
        let env = load_environment(&path).unwrap();
        assert_eq!(env.gravity_m_s2, 3.71);
        assert_eq!(env.air_density_kg_m3, 1.0);
        let constants = PhysicalConstants::from(&env);
        assert_eq!(constants.gravity_m_s2, 3.71);
    }

    #[test]
    fn environment_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.toml");
        fs::write(&path, "air_density_kg_m3 = 1.225\n").unwrap();
        let env = load_environment(&path).unwrap();
        assert_eq!(env.gravity_m_s2, 9.8);
        assert_eq!(env.air_density_kg_m3, 1.225);
    }

    #[test]
    fn drones_from_toml_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.toml"), QUAD_TOML).unwrap();
        fs::write(
            dir.path().join("a.toml"),
            "name = \"Bare\"\nmass_kg = 0.5\nrotors = []\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let drones = load_drones(dir.path()).unwrap();
        assert_eq!(drones.len(), 2);
        assert_eq!(drones[0].name, "Bare");
        assert_eq!(drones[1].rotors[1].spin, SpinConfig::CounterClockwise);

        let drone = drones[1].to_drone().unwrap();
        assert_eq!(drone.current_height_m(), 2.0);
        assert_eq!(drone.rotors[0].spin, SpinDirection::Clockwise);
    }

    #[test]
    fn drones_from_yaml_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drones.yaml");
        fs::write(
            &path,
            "- name: Scout\n  mass_kg: 0.8\n  rotors:\n    - { speed_m_s: 5.0, area_m2: 0.02 }\n",
        )
        .unwrap();
        let drones = load_drones(&path).unwrap();
        assert_eq!(drones.len(), 1);
        assert_eq!(drones[0].rotors[0].area_m2, 0.02);
    }

    #[test]
    fn invalid_rotor_surfaces_vehicle_error() {
        let cfg = DroneConfig {
            name: "Broken".into(),
            mass_kg: 1.0,
            pitch_deg: 0.0,
            roll_deg: 0.0,
            current_height_m: 0.0,
            rotors: vec![RotorConfig {
                speed_m_s: 1.0,
                area_m2: -1.0,
                spin: SpinConfig::Clockwise,
            }],
        };
        assert_eq!(cfg.to_drone(), Err(VehicleError::InvalidRotorArea(-1.0)));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_drones("does/not/exist.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
