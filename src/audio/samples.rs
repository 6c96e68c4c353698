//! Kick and crash sample bank.
//!
//! Samples are discovered by filename prefix and extension in a single
//! directory (e.g. `sample/kick1.ogg`, `sample/crash-ride.ogg`), decoded
//! fully into memory and kept read-only for the rest of the run.

use std::path::{Path, PathBuf};

use tracing::info;

use super::decode::decode_file;
use super::resample::resample;
use super::{AudioError, Waveform};
use crate::config::SamplesConfig;

/// Decoded kick and crash samples.
#[derive(Debug, Clone)]
pub struct SampleBank {
    pub kicks: Vec<Waveform>,
    pub crashes: Vec<Waveform>,
}

impl SampleBank {
    /// Load every matching kick and crash file from `config.dir`.
    pub fn load(config: &SamplesConfig) -> Result<Self, AudioError> {
        let kick_paths = find_samples(&config.dir, &config.kick_prefix, &config.extension)?;
        let crash_paths = find_samples(&config.dir, &config.crash_prefix, &config.extension)?;

        let bank = Self {
            kicks: decode_all(&kick_paths)?,
            crashes: decode_all(&crash_paths)?,
        };
        bank.check_counts()?;

        info!(
            "Loaded {} kicks and {} crashes from {}",
            bank.kicks.len(),
            bank.crashes.len(),
            config.dir.display()
        );
        Ok(bank)
    }

    /// Fail early when a rimshot could not be built from this bank.
    pub fn check_counts(&self) -> Result<(), AudioError> {
        if self.kicks.len() < 2 || self.crashes.is_empty() {
            return Err(AudioError::NotEnoughSamples {
                kicks: self.kicks.len(),
                crashes: self.crashes.len(),
            });
        }
        Ok(())
    }

    /// Convert every sample to `sample_rate`. Samples already at that rate are kept as-is.
    pub fn conform_to(self, sample_rate: u32) -> Result<Self, AudioError> {
        let convert = |waveforms: Vec<Waveform>| -> Result<Vec<Waveform>, AudioError> {
            waveforms
                .into_iter()
                .map(|w| {
                    if w.sample_rate == sample_rate {
                        Ok(w)
                    } else {
                        info!("Resampling effect sample {}Hz -> {sample_rate}Hz", w.sample_rate);
                        resample(&w, sample_rate)
                    }
                })
                .collect()
        };

        Ok(Self {
            kicks: convert(self.kicks)?,
            crashes: convert(self.crashes)?,
        })
    }
}

/// List files in `dir` named `<prefix>*.<extension>`, sorted by path.
pub fn find_samples(dir: &Path, prefix: &str, extension: &str) -> Result<Vec<PathBuf>, AudioError> {
    let entries = std::fs::read_dir(dir).map_err(|source| AudioError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let suffix = format!(".{extension}");
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AudioError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(prefix) && name.ends_with(&suffix) {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Decode every path; a sample with no audio would make a silent hit, so it is rejected.
fn decode_all(paths: &[PathBuf]) -> Result<Vec<Waveform>, AudioError> {
    paths
        .iter()
        .map(|path| {
            let waveform = decode_file(path)?;
            if waveform.is_empty() {
                return Err(AudioError::EmptySample(path.clone()));
            }
            Ok(waveform)
        })
        .collect()
}
