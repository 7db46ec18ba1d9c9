//! Configuration models and loaders for the Lorentz Tracker.

use std::fs::File;
use std::path::Path;

use lorentz_core::constants::{ELECTRON_MASS, ELEMENTARY_CHARGE, SPEED_OF_LIGHT};
use lorentz_steppers::StepperKind;
use serde::Deserialize;
use thiserror::Error;

/// A single tracking run: one particle, one pair of fields, one time grid,
/// integrated by every listed scheme.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RunConfig {
    pub particle: ParticleConfig,
    pub initial: InitialConditionConfig,
    pub time: TimeConfig,
    #[serde(default)]
    pub fields: FieldsConfig,
    /// Scheme names or aliases, resolved through [`StepperKind`].
    #[serde(default = "all_schemes")]
    pub schemes: Vec<StepperKind>,
}

/// Particle rest mass and charge in SI units.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    pub mass_kg: f64,
    pub charge_c: f64,
}

/// Initial position plus exactly one of velocity or momentum.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct InitialConditionConfig {
    #[serde(default)]
    pub position_m: [f64; 3],
    #[serde(default)]
    pub velocity_m_s: Option<[f64; 3]>,
    #[serde(default)]
    pub momentum_kg_m_s: Option<[f64; 3]>,
}

/// Fixed-step sampling grid.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct TimeConfig {
    #[serde(default)]
    pub t0_s: f64,
    pub step_s: f64,
    pub steps: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct FieldsConfig {
    #[serde(default)]
    pub electric: FieldConfig,
    #[serde(default)]
    pub magnetic: FieldConfig,
}

/// Field law in scenario manifests.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldConfig {
    Uniform {
        value: [f64; 3],
    },
    Oscillating {
        amplitude: [f64; 3],
        angular_frequency_rad_s: f64,
        #[serde(default)]
        phase_rad: f64,
    },
    Ramp {
        initial: [f64; 3],
        rate: [f64; 3],
    },
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig::Uniform { value: [0.0; 3] }
    }
}

fn all_schemes() -> Vec<StepperKind> {
    StepperKind::ALL.to_vec()
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl RunConfig {
    /// Electron-mass particle with charge +e at 0.9 c in a 1 T field along z,
    /// stepped at 8.93 ps for 20 steps.
    pub fn electron_demo() -> Self {
        RunConfig {
            particle: ParticleConfig {
                mass_kg: ELECTRON_MASS,
                charge_c: ELEMENTARY_CHARGE,
            },
            initial: InitialConditionConfig {
                position_m: [0.0; 3],
                velocity_m_s: Some([0.0, 0.9 * SPEED_OF_LIGHT, 0.0]),
                momentum_kg_m_s: None,
            },
            time: TimeConfig {
                t0_s: 0.0,
                step_s: 8.93e-12,
                steps: 20,
            },
            fields: FieldsConfig {
                electric: FieldConfig::Uniform { value: [0.0; 3] },
                magnetic: FieldConfig::Uniform {
                    value: [0.0, 0.0, 1.0],
                },
            },
            schemes: all_schemes(),
        }
    }

    /// Check the manifest for values no run could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mass = self.particle.mass_kg;
        if mass == 0.0 || !mass.is_finite() {
            return Err(invalid("particle.mass_kg", format!("must be non-zero and finite, got {mass}")));
        }
        if !self.particle.charge_c.is_finite() {
            return Err(invalid("particle.charge_c", "must be finite".to_string()));
        }
        match (self.initial.velocity_m_s, self.initial.momentum_kg_m_s) {
            (Some(_), Some(_)) => {
                return Err(invalid(
                    "initial",
                    "give either velocity_m_s or momentum_kg_m_s, not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(invalid(
                    "initial",
                    "one of velocity_m_s or momentum_kg_m_s is required".to_string(),
                ));
            }
            _ => {}
        }
        let step = self.time.step_s;
        if step == 0.0 || !step.is_finite() {
            return Err(invalid("time.step_s", format!("must be non-zero and finite, got {step}")));
        }
        if !self.time.t0_s.is_finite() {
            return Err(invalid("time.t0_s", "must be finite".to_string()));
        }
        if self.schemes.is_empty() {
            return Err(invalid("schemes", "at least one scheme is required".to_string()));
        }
        Ok(())
    }

    /// Initial momentum, converting a configured velocity with the particle mass.
    pub fn initial_momentum(&self) -> [f64; 3] {
        match (self.initial.momentum_kg_m_s, self.initial.velocity_m_s) {
            (Some(p), _) => p,
            (None, Some(v)) => v.map(|c| c * self.particle.mass_kg),
            (None, None) => [0.0; 3],
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

/// Parse and validate a YAML run manifest.
pub fn parse_yaml(contents: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig = serde_yaml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a TOML run manifest.
pub fn parse_toml(contents: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load a run manifest, choosing TOML or YAML by file extension.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let config: RunConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorentz_steppers::Stepper;
    use std::io::Write;

    const YAML: &str = r#"
particle: { mass_kg: 9.109e-31, charge_c: -1.602e-19 }
initial:
  position_m: [0.0, 0.0, 0.0]
  velocity_m_s: [1.0e6, 0.0, 0.0]
time: { step_s: 1.0e-12, steps: 50 }
fields:
  electric: { type: oscillating, amplitude: [0.0, 100.0, 0.0], angular_frequency_rad_s: 1.0e9 }
  magnetic: { type: uniform, value: [0.0, 0.0, 0.5] }
schemes: [boris, leapfrog, yoshida4]
"#;

    #[test]
    fn yaml_manifest_parses() {
        let config = parse_yaml(YAML).unwrap();
        assert_eq!(config.time.t0_s, 0.0);
        assert_eq!(config.time.steps, 50);
        assert_eq!(
            config.schemes,
            vec![StepperKind::Boris, StepperKind::Boris, StepperKind::Yoshida]
        );
        assert_eq!(
            config.fields.electric,
            FieldConfig::Oscillating {
                amplitude: [0.0, 100.0, 0.0],
                angular_frequency_rad_s: 1.0e9,
                phase_rad: 0.0,
            }
        );
        let p = config.initial_momentum();
        assert!((p[0] - 9.109e-25).abs() < 1e-37);
    }

    #[test]
    fn toml_manifest_defaults_fields_and_schemes() {
        let toml = r#"
[particle]
mass_kg = 1.0
charge_c = 1.0

[initial]
momentum_kg_m_s = [0.0, 1.0, 0.0]

[time]
t0_s = 2.0
step_s = 0.01
steps = 10
"#;
        let config = parse_toml(toml).unwrap();
        assert_eq!(config.fields, FieldsConfig::default());
        assert_eq!(config.schemes.len(), 3);
        assert_eq!(config.initial.position_m, [0.0; 3]);
        assert_eq!(config.initial_momentum(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn zero_mass_is_rejected() {
        let yaml = YAML.replace("mass_kg: 9.109e-31", "mass_kg: 0.0");
        let err = parse_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "particle.mass_kg", .. }));
    }

    #[test]
    fn ambiguous_initial_condition_is_rejected() {
        let mut config = RunConfig::electron_demo();
        config.initial.momentum_kg_m_s = Some([0.0; 3]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "initial", .. })
        ));
        config.initial.velocity_m_s = None;
        config.initial.momentum_kg_m_s = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_scheme_fails_to_parse() {
        let yaml = YAML.replace("[boris, leapfrog, yoshida4]", "[euler]");
        let err = parse_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("rk4, boris, yoshida"));
    }

    #[test]
    fn every_scheme_name_and_alias_is_accepted() {
        for kind in StepperKind::ALL {
            for name in std::iter::once(kind.name()).chain(kind.aliases().iter().copied()) {
                let yaml = YAML.replace("[boris, leapfrog, yoshida4]", &format!("[\"{name}\"]"));
                let config = parse_yaml(&yaml).unwrap_or_else(|err| panic!("{name}: {err}"));
                assert_eq!(config.schemes, vec![kind], "{name}");
            }
        }
    }

    #[test]
    fn loader_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("run.yaml");
        File::create(&yaml_path)
            .unwrap()
            .write_all(YAML.as_bytes())
            .unwrap();
        assert_eq!(load_run_config(&yaml_path).unwrap().time.steps, 50);

        let toml_path = dir.path().join("run.toml");
        std::fs::write(
            &toml_path,
            "schemes = [\"rk4\"]\n\n[particle]\nmass_kg = 2.0\ncharge_c = 0.5\n\n[initial]\nvelocity_m_s = [1.0, 0.0, 0.0]\n\n[time]\nstep_s = 0.1\nsteps = 3\n\n[fields.magnetic]\ntype = \"ramp\"\ninitial = [0.0, 0.0, 1.0]\nrate = [0.0, 0.0, 0.1]\n",
        )
        .unwrap();
        let config = load_run_config(&toml_path).unwrap();
        assert_eq!(config.schemes, vec![StepperKind::Rk4]);
        assert_eq!(config.initial_momentum(), [2.0, 0.0, 0.0]);
        assert!(matches!(config.fields.magnetic, FieldConfig::Ramp { .. }));
    }

    #[test]
    fn demo_is_valid() {
        let demo = RunConfig::electron_demo();
        demo.validate().unwrap();
        assert_eq!(demo.time.steps, 20);

        let electron = lorentz_core::Particle::electron();
        assert_eq!(demo.particle.mass_kg, electron.mass());
        assert_eq!(demo.particle.charge_c, electron.charge());
        assert_eq!(demo.initial.velocity_m_s, Some([0.0, 0.9 * SPEED_OF_LIGHT, 0.0]));
    }
}
