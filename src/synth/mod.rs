//! Speech synthesis.
//!
//! - `polly`: AWS Polly SSML synthesis to raw PCM

pub mod polly;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("unknown voice id: {0}")]
    UnknownVoice(String),

    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    #[error("unsupported PCM sample rate {0}Hz (expected 8000 or 16000)")]
    UnsupportedSampleRate(u32),

    #[error("Failed to synthesize speech: {0}")]
    Service(String),

    #[error("Failed to collect audio stream: {0}")]
    Stream(String),
}

/// Audio returned by a synthesizer: signed 16-bit little-endian PCM.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub pcm_data: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
}

/// Anything that can turn an SSML document into speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Rate of the audio returned by `synthesize`.
    fn sample_rate(&self) -> u32;

    async fn synthesize(&self, ssml: &str) -> Result<SpeechAudio, SynthesisError>;
}
