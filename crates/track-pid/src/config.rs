//! Track PID configuration

use std::path::{Path, PathBuf};

use crate::PidError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use event_data::DataLabels;
use serde::{Deserialize, Serialize};
use track_features::FeatureConfig;
use tracing::info;

/// Prefix of environment variables overriding configuration
pub const ENV_PREFIX: &str = "TRACK_PID";

/// Track PID configuration
///
/// Feature parameters live in a `[features]` table. Unknown keys are
/// rejected, so a feature parameter given at the top level is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PidConfig {
    /// Directory holding the network. A leading `$NAME` is read from the environment.
    pub network_path: String,

    /// Network file name inside `network_path`
    pub network_name: String,

    /// Particle collection label
    pub particle_label: String,

    /// Track collection label
    pub track_label: String,

    /// Calorimetry collection label
    pub calorimetry_label: String,

    /// Feature extraction parameters
    pub features: FeatureConfig,

    /// Seed for the padding generator; entropy when unset
    pub seed: Option<u64>,
}

impl Default for PidConfig {
    fn default() -> Self {
        let labels = DataLabels::default();
        Self {
            network_path: ".".to_string(),
            network_name: "track_pid.onnx".to_string(),
            particle_label: labels.particle,
            track_label: labels.track,
            calorimetry_label: labels.calorimetry,
            features: FeatureConfig::default(),
            seed: None,
        }
    }
}

impl PidConfig {
    /// Load defaults, then an optional file, then `TRACK_PID_*` environment
    /// variables. Feature parameters are read from the file's `[features]`
    /// table and from `TRACK_PID_FEATURES__*` variables, e.g.
    /// `TRACK_PID_FEATURES__DEDX_LENGTH`.
    pub fn load(path: Option<&Path>) -> Result<Self, PidError> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            info!("Loading track PID configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }
        Self::finish(builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        ))
    }

    /// Defaults overlaid with TOML text
    pub fn from_toml_str(toml: &str) -> Result<Self, PidError> {
        Self::finish(Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, PidError> {
        Ok(Config::builder().add_source(Config::try_from(&PidConfig::default())?))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, PidError> {
        let config: PidConfig = builder.build()?.try_deserialize()?;
        config.features.validate()?;
        Ok(config)
    }

    /// Data labels selecting the products to read
    pub fn labels(&self) -> DataLabels {
        DataLabels {
            particle: self.particle_label.clone(),
            track: self.track_label.clone(),
            calorimetry: self.calorimetry_label.clone(),
        }
    }

    /// Full path of the network file
    pub fn network_location(&self) -> Result<PathBuf, PidError> {
        let dir = match self.network_path.strip_prefix('$') {
            Some(reference) => {
                let (name, rest) = reference.split_once('/').unwrap_or((reference, ""));
                let base = std::env::var(name).map_err(|_| {
                    PidError::Config(format!("network_path refers to unset environment variable {}", name))
                })?;
                PathBuf::from(base).join(rest)
            }
            None => PathBuf::from(&self.network_path),
        };
        Ok(dir.join(&self.network_name))
    }
}
