//! Per-joke pipeline: SSML → speech → WAV on disk → rimshot appended.
//!
//! Every joke is planned (markup + output name) before the first synthesis
//! request, so a bad joke aborts the run without spending any Polly calls.
//! Jokes are then processed strictly one at a time; the first error stops
//! the run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::audio::decode::decode_file;
use crate::audio::effect::{append_effect, compose_effect};
use crate::audio::samples::SampleBank;
use crate::audio::{write_pcm16_wav, AudioError, Waveform};
use crate::markup::{to_ssml, MarkupError};
use crate::synth::{SpeechSynthesizer, SynthesisError};

const OUTPUT_EXTENSION: &str = "wav";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One joke, ready to synthesize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPlan {
    pub text: String,
    pub ssml: String,
    pub path: PathBuf,
}

/// File stem for a joke: words 2-4, lower-cased, hyphens dropped, joined by `_`.
///
/// Path separators are removed so the name always stays inside the output
/// directory. A joke with nothing usable after the first word becomes `joke`.
pub fn joke_file_stem(text: &str) -> String {
    let lowered = text.to_lowercase().replace('-', "");
    let stem: String = lowered
        .split(' ')
        .skip(1)
        .take(3)
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .collect();

    if stem.is_empty() {
        "joke".into()
    } else {
        stem
    }
}

/// Build markup and a unique output path for every joke.
///
/// Repeated stems get `_2`, `_3`, ... so no joke overwrites another.
pub fn plan_jobs(jokes: &[String], output_dir: &Path) -> Result<Vec<JobPlan>, PipelineError> {
    let mut used = HashSet::new();
    let mut plans = Vec::with_capacity(jokes.len());

    for text in jokes {
        let ssml = to_ssml(text)?;

        let stem = joke_file_stem(text);
        let mut name = stem.clone();
        let mut n = 1;
        while !used.insert(name.clone()) {
            n += 1;
            name = format!("{stem}_{n}");
        }
        if n > 1 {
            warn!("Duplicate output name '{stem}', writing '{name}' instead");
        }

        plans.push(JobPlan {
            text: text.clone(),
            ssml,
            path: output_dir.join(format!("{name}.{OUTPUT_EXTENSION}")),
        });
    }

    Ok(plans)
}

pub struct RimshotPipeline<'a, S: SpeechSynthesizer, R: Rng> {
    synth: &'a S,
    bank: &'a SampleBank,
    rng: R,
}

impl<'a, S: SpeechSynthesizer, R: Rng> RimshotPipeline<'a, S, R> {
    pub fn new(synth: &'a S, bank: &'a SampleBank, rng: R) -> Self {
        Self { synth, bank, rng }
    }

    /// Process every joke into `output_dir`. Returns the written paths in feed order.
    pub async fn run(
        &mut self,
        jokes: &[String],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        fs::create_dir_all(output_dir).map_err(|source| PipelineError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let plans = plan_jobs(jokes, output_dir)?;
        info!("Planned {} jokes into {}", plans.len(), output_dir.display());

        let mut written = Vec::with_capacity(plans.len());
        for plan in &plans {
            self.process(plan).await?;
            written.push(plan.path.clone());
        }

        info!("Wrote {} files", written.len());
        Ok(written)
    }

    /// Synthesize one joke, save it, then append a fresh rimshot in place.
    pub async fn process(&mut self, plan: &JobPlan) -> Result<(), PipelineError> {
        info!("Synthesizing \"{}\"", plan.text);
        debug!("{}", plan.ssml);

        let speech = self.synth.synthesize(&plan.ssml).await?;
        write_pcm16_wav(&plan.path, &speech.pcm_data, speech.sample_rate, speech.channels)?;

        self.add_sound_effect(&plan.path)?;
        info!("{} output", plan.path.display());
        Ok(())
    }

    /// Replace the file at `path` with its audio followed by a random rimshot.
    fn add_sound_effect(&mut self, path: &Path) -> Result<(), PipelineError> {
        let speech = decode_file(path)?;
        let effect = compose_effect(&self.bank.kicks, &self.bank.crashes, &mut self.rng)?;
        let mixed = append_effect(speech, &effect)?;

        replace_file(path, &mixed)?;

        debug!(
            "Appended {:.2}s rimshot to {}",
            effect.duration_secs(),
            path.display()
        );
        Ok(())
    }
}

/// Write `waveform` beside `path`, then rename it over the original.
///
/// The temporary file is removed again if either step fails.
fn replace_file(path: &Path, waveform: &Waveform) -> Result<(), PipelineError> {
    let tmp_path = path.with_extension(format!("{OUTPUT_EXTENSION}.tmp"));

    let result = waveform
        .write_wav(&tmp_path)
        .map_err(PipelineError::from)
        .and_then(|()| {
            fs::rename(&tmp_path, path).map_err(|source| PipelineError::Io {
                path: path.to_path_buf(),
                source,
            })
        });

    if result.is_err() && tmp_path.exists() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            warn!("Could not remove {}: {e}", tmp_path.display());
        }
    }
    result
}
