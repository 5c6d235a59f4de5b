use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use walkthrough_gate::GateConfig;
use walkthrough_input::LookSettings;

/// Errors from loading or validating a session config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session configuration. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera position at startup.
    pub start_position: Vec3,
    /// Length of one keyboard step.
    pub move_step: f32,
    pub look: LookSettings,
    pub gate: GateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 0.0, 3.0),
            move_step: 0.2,
            look: LookSettings::default(),
            gate: GateConfig::default(),
        }
    }
}

impl Config {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start_position.is_finite() {
            return Err(ConfigError::Invalid("start_position must be finite".into()));
        }
        if !(self.move_step.is_finite() && self.move_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "move_step must be positive, got {}",
                self.move_step
            )));
        }
        if !self.look.sensitivity.is_finite() {
            return Err(ConfigError::Invalid("look.sensitivity must be finite".into()));
        }
        if !(self.look.pitch_limit > 0.0 && self.look.pitch_limit < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "look.pitch_limit must be in (0, 90), got {}",
                self.look.pitch_limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use walkthrough_gate::GateProfile;

    #[test]
    fn defaults_match_the_canonical_walkthrough() {
        let cfg = Config::default();
        assert_eq!(cfg.start_position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(cfg.move_step, 0.2);
        assert_eq!(cfg.look.sensitivity, 0.2);
        assert_eq!(cfg.gate, GateConfig::profile(GateProfile::Original));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walkthrough.json");
        let cfg = Config {
            move_step: 0.5,
            gate: GateConfig::profile(GateProfile::Revised),
            ..Config::default()
        };
        cfg.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "move_step": 0.1, "gate": {{ "crossing_floor": 0.5 }} }}"#).unwrap();
        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.move_step, 0.1);
        assert_eq!(cfg.gate.crossing_floor, 0.5);
        assert_eq!(cfg.gate.branch_low, 11.0);
        assert_eq!(cfg.start_position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn rejects_non_positive_step() {
        let cfg = Config {
            move_step: 0.0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_pitch_limit_at_vertical() {
        let mut cfg = Config::default();
        cfg.look.pitch_limit = 90.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Json(_))
        ));
    }
}
