use std::path::PathBuf;

/// Error types for loading, mixing and writing audio
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: symphonia::core::errors::Error,
    },

    #[error("No audio track found in '{}'", .0.display())]
    NoAudioTrack(PathBuf),

    #[error("'{}' decoded to zero samples", .0.display())]
    EmptySample(PathBuf),

    #[error("Sample rate not specified in '{}'", .0.display())]
    UnknownSampleRate(PathBuf),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Resampling failed: {0}Hz -> {1}Hz: {2}")]
    ResamplingFailed(u32, u32, String),

    #[error("Sample rate mismatch: target is {target}Hz, effect is {effect}Hz")]
    SampleRateMismatch { target: u32, effect: u32 },

    #[error("Need at least 2 kicks and 1 crash, found {kicks} kicks and {crashes} crashes")]
    NotEnoughSamples { kicks: usize, crashes: usize },
}
