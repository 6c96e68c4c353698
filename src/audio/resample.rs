//! Sample-rate conversion for effect samples.
//!
//! Feeds fixed-size chunks through an FFT resampler, zero-padding the tail,
//! then drops the resampler delay so the output lines up with the input.

use rubato::{FftFixedIn, Resampler};

use super::{AudioError, Waveform};

const CHUNK_SIZE: usize = 1024;

/// Resample a mono waveform to `target_rate`.
///
/// The result has `round(len * target_rate / source_rate)` samples.
pub fn resample(waveform: &Waveform, target_rate: u32) -> Result<Waveform, AudioError> {
    let source_rate = waveform.sample_rate;
    if source_rate == target_rate || waveform.is_empty() {
        return Ok(Waveform::new(waveform.samples.clone(), target_rate));
    }

    let fail = |e: String| AudioError::ResamplingFailed(source_rate, target_rate, e);

    let mut resampler =
        FftFixedIn::<f32>::new(source_rate as usize, target_rate as usize, CHUNK_SIZE, 2, 1)
            .map_err(|e| fail(e.to_string()))?;

    let expected = expected_len(waveform.len(), source_rate, target_rate);
    let delay = resampler.output_delay();
    let mut output: Vec<f32> = Vec::with_capacity(expected + delay);
    let mut pos = 0;

    // Keep feeding (zero-padded) chunks until the delayed tail has come out
    while output.len() < expected + delay {
        let frames_needed = resampler.input_frames_next();
        let end = (pos + frames_needed).min(waveform.len());

        let mut input_chunk = waveform.samples[pos..end].to_vec();
        input_chunk.resize(frames_needed, 0.0);
        pos = end;

        let resampled = resampler
            .process(&[input_chunk], None)
            .map_err(|e| fail(e.to_string()))?;
        if let Some(chunk) = resampled.into_iter().next() {
            output.extend(chunk);
        }
    }

    let samples: Vec<f32> = output.into_iter().skip(delay).take(expected).collect();
    Ok(Waveform::new(samples, target_rate))
}

fn expected_len(len: usize, source_rate: u32, target_rate: u32) -> usize {
    let numerator = len as u64 * target_rate as u64 + source_rate as u64 / 2;
    (numerator / source_rate as u64) as usize
}
