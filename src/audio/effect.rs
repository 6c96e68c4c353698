//! The "joke landed" rimshot: kick, kick, crash.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{AudioError, Waveform};

/// Pick two distinct kicks and one crash at random and play them back to back.
///
/// All three segments must share one sample rate, which the effect inherits.
pub fn compose_effect<R: Rng + ?Sized>(
    kicks: &[Waveform],
    crashes: &[Waveform],
    rng: &mut R,
) -> Result<Waveform, AudioError> {
    let not_enough = || AudioError::NotEnoughSamples {
        kicks: kicks.len(),
        crashes: crashes.len(),
    };
    if kicks.len() < 2 {
        return Err(not_enough());
    }
    let crash = crashes.choose(rng).ok_or_else(not_enough)?;

    let segments: Vec<&Waveform> = kicks
        .choose_multiple(rng, 2)
        .chain(std::iter::once(crash))
        .collect();

    let sample_rate = segments[0].sample_rate;
    if let Some(odd) = segments.iter().find(|w| w.sample_rate != sample_rate) {
        return Err(AudioError::SampleRateMismatch {
            target: sample_rate,
            effect: odd.sample_rate,
        });
    }

    let total: usize = segments.iter().map(|w| w.len()).sum();
    let mut samples = Vec::with_capacity(total);
    for segment in &segments {
        samples.extend_from_slice(&segment.samples);
    }

    Ok(Waveform::new(samples, sample_rate))
}

/// Append `effect` to the end of `target`. Raw concatenation, no crossfade.
pub fn append_effect(target: Waveform, effect: &Waveform) -> Result<Waveform, AudioError> {
    if target.sample_rate != effect.sample_rate {
        return Err(AudioError::SampleRateMismatch {
            target: target.sample_rate,
            effect: effect.sample_rate,
        });
    }

    let mut samples = target.samples;
    samples.extend_from_slice(&effect.samples);
    Ok(Waveform::new(samples, target.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Waveform of `len` samples all equal to `tag`, so segments can be identified.
    fn tagged(tag: f32, len: usize) -> Waveform {
        Waveform::new(vec![tag; len], 16000)
    }

    /// Split a composed effect back into runs of equal samples.
    fn runs(samples: &[f32]) -> Vec<(f32, usize)> {
        let mut runs: Vec<(f32, usize)> = Vec::new();
        for &s in samples {
            match runs.last_mut() {
                Some((tag, n)) if *tag == s => *n += 1,
                _ => runs.push((s, 1)),
            }
        }
        runs
    }

    #[test]
    fn effect_is_two_distinct_kicks_then_a_crash() {
        let kicks: Vec<_> = (1..=4).map(|i| tagged(i as f32, 10 * i)).collect();
        let crashes: Vec<_> = (1..=3).map(|i| tagged(-(i as f32), 7 * i)).collect();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let effect = compose_effect(&kicks, &crashes, &mut rng).unwrap();

            let runs = runs(&effect.samples);
            assert_eq!(runs.len(), 3, "seed {seed}");

            let (k1, k1_len) = runs[0];
            let (k2, k2_len) = runs[1];
            let (c, c_len) = runs[2];
            assert_ne!(k1, k2, "kicks must be distinct (seed {seed})");
            assert!(kicks.iter().any(|k| k.samples[0] == k1 && k.len() == k1_len));
            assert!(kicks.iter().any(|k| k.samples[0] == k2 && k.len() == k2_len));
            assert!(crashes.iter().any(|x| x.samples[0] == c && x.len() == c_len));
            assert_eq!(effect.len(), k1_len + k2_len + c_len);
        }
    }

    #[test]
    fn same_seed_gives_same_effect() {
        let kicks: Vec<_> = (1..=5).map(|i| tagged(i as f32, i)).collect();
        let crashes: Vec<_> = (1..=5).map(|i| tagged(-(i as f32), i)).collect();

        let a = compose_effect(&kicks, &crashes, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = compose_effect(&kicks, &crashes, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exactly_two_kicks_uses_both() {
        let kicks = vec![tagged(1.0, 3), tagged(2.0, 5)];
        let crashes = vec![tagged(-1.0, 4)];
        let mut rng = StdRng::seed_from_u64(1);

        let effect = compose_effect(&kicks, &crashes, &mut rng).unwrap();

        assert_eq!(effect.len(), 12);
        let mut kick_tags: Vec<f32> = runs(&effect.samples)[..2].iter().map(|r| r.0).collect();
        kick_tags.sort_by(f32::total_cmp);
        assert_eq!(kick_tags, vec![1.0, 2.0]);
    }

    #[test]
    fn too_few_samples_fail() {
        let mut rng = StdRng::seed_from_u64(0);
        let one_kick = vec![tagged(1.0, 3)];
        let two_kicks = vec![tagged(1.0, 3), tagged(2.0, 3)];

        assert!(matches!(
            compose_effect(&one_kick, &[tagged(-1.0, 3)], &mut rng),
            Err(AudioError::NotEnoughSamples { kicks: 1, crashes: 1 })
        ));
        assert!(matches!(
            compose_effect(&two_kicks, &[], &mut rng),
            Err(AudioError::NotEnoughSamples { kicks: 2, crashes: 0 })
        ));
    }

    #[test]
    fn mixed_rate_segments_are_rejected() {
        let kicks = vec![tagged(1.0, 3), tagged(2.0, 3)];
        let crashes = vec![Waveform::new(vec![-1.0; 3], 44100)];

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(matches!(
                compose_effect(&kicks, &crashes, &mut rng),
                Err(AudioError::SampleRateMismatch {
                    target: 16000,
                    effect: 44100
                })
            ));
        }
    }

    #[test]
    fn append_keeps_target_prefix() {
        let target = Waveform::new(vec![0.1, 0.2, 0.3], 16000);
        let effect = Waveform::new(vec![0.9, 0.8], 16000);

        let mixed = append_effect(target.clone(), &effect).unwrap();

        assert_eq!(mixed.len(), target.len() + effect.len());
        assert_eq!(&mixed.samples[..target.len()], target.samples.as_slice());
        assert_eq!(&mixed.samples[target.len()..], effect.samples.as_slice());
        assert_eq!(mixed.sample_rate, 16000);
    }

    #[test]
    fn append_rejects_rate_mismatch() {
        let target = Waveform::new(vec![0.1], 16000);
        let effect = Waveform::new(vec![0.9], 22050);

        assert!(matches!(
            append_effect(target, &effect),
            Err(AudioError::SampleRateMismatch {
                target: 16000,
                effect: 22050
            })
        ));
    }
}
