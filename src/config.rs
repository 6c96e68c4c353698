//! Configuration management for rimshot-puns.
//!
//! Loads config from YAML files in standard locations. Every section
//! falls back to defaults, so an empty or missing file is a valid setup.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    /// Name of the string field carrying the joke in each feed entry.
    pub text_field: String,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "https://raw.githubusercontent.com/xasos/Puns/master/Backend/puns.json".into(),
            text_field: "Pun".into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplesConfig {
    pub dir: PathBuf,
    pub extension: String,
    pub kick_prefix: String,
    pub crash_prefix: String,
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("sample"),
            extension: "ogg".into(),
            kick_prefix: "kick".into(),
            crash_prefix: "crash".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollyConfig {
    pub region: String,
    pub profile: Option<String>,
    pub voice: String,
    pub engine: String,
    /// Polly only offers 8000 and 16000 for PCM output.
    pub sample_rate: u32,
}

impl Default for PollyConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".into(),
            profile: None,
            voice: "Joanna".into(),
            engine: "standard".into(),
            sample_rate: 16000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub samples: SamplesConfig,
    pub polly: PollyConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./config.yaml
    /// 2. ~/.config/rimshot-puns/config.yaml
    /// 3. /etc/rimshot-puns/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("config.yaml")),
                dirs::home_dir().map(|h| h.join(".config/rimshot-puns/config.yaml")),
                Some(PathBuf::from("/etc/rimshot-puns/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match Self::from_yaml(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(contents)
    }
}
