//! Mono waveforms and the rimshot effect.
//!
//! Components:
//! - `decode`: symphonia decoding of any supported file into a mono `Waveform`
//! - `samples`: kick/crash sample bank discovery and loading
//! - `effect`: kick-kick-crash composition and appending
//! - `resample`: sample-rate conversion so effects match the speech rate

pub mod decode;
pub mod effect;
pub mod error;
pub mod resample;
pub mod samples;

use std::path::Path;

use tracing::warn;

pub use error::AudioError;

/// Decoded mono audio at a known sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Write the waveform to a 32-bit float mono WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<(), AudioError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }
}

/// Collapse interleaved frames to mono.
///
/// Frames with two or more channels become the average of the first two;
/// any further channels are ignored. A trailing partial frame is dropped.
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        0 | 1 => interleaved.to_vec(),
        n => interleaved
            .chunks_exact(n)
            .map(|frame| (frame[0] + frame[1]) / 2.0)
            .collect(),
    }
}

/// Write raw 16-bit little-endian PCM bytes to a WAV file unchanged.
///
/// A trailing odd byte cannot form a sample; it is dropped with a warning.
pub fn write_pcm16_wav(
    path: &Path,
    pcm_data: &[u8],
    sample_rate: u32,
    channels: u16,
) -> Result<(), AudioError> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    if pcm_data.len() % 2 != 0 {
        warn!(
            "PCM stream for {} has an odd length ({} bytes), dropping the last byte",
            path.display(),
            pcm_data.len()
        );
    }

    let mut writer = hound::WavWriter::create(path, spec)?;
    for chunk in pcm_data.chunks_exact(2) {
        writer.write_sample(i16::from_le_bytes([chunk[0], chunk[1]]))?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_downmix_averages_first_two_channels() {
        let interleaved = [1.0, 0.0, 0.5, -0.5, -1.0, -0.5];
        assert_eq!(downmix(&interleaved, 2), vec![0.5, 0.0, -0.75]);
    }

    #[test]
    fn wider_downmix_ignores_extra_channels() {
        let interleaved = [0.2, 0.4, 9.0, 0.6, 0.8, 9.0];
        let mono = downmix(&interleaved, 3);
        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 0.3).abs() < 1e-6);
        assert!((mono[1] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn mono_downmix_is_identity() {
        let interleaved = [0.1, 0.2, 0.3];
        assert_eq!(downmix(&interleaved, 1), interleaved.to_vec());
    }

    #[test]
    fn pcm16_wav_keeps_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.wav");
        let samples: [i16; 4] = [0, 1000, -1000, i16::MAX];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

        write_pcm16_wav(&path, &bytes, 16000, 1).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 16000);
        assert_eq!(reader.spec().bits_per_sample, 16);
        let read: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples.to_vec());
    }

    #[test]
    fn pcm16_wav_drops_odd_trailing_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.wav");
        let mut bytes: Vec<u8> = [500i16, -500].iter().flat_map(|s| s.to_le_bytes()).collect();
        bytes.push(0x7f);

        write_pcm16_wav(&path, &bytes, 16000, 1).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let read: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, vec![500, -500]);
    }

    #[test]
    fn float_wav_roundtrips_through_hound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mix.wav");
        let waveform = Waveform::new(vec![0.25, -0.5, 0.75], 22050);

        waveform.write_wav(&path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
        let read: Vec<f32> = reader.into_samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(read, waveform.samples);
    }
}
