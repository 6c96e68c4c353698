//! AWS Polly text-to-speech implementation

use async_trait::async_trait;
use aws_sdk_polly::config::Region;
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{Engine, OutputFormat, TextType, VoiceId};
use aws_sdk_polly::Client;
use tracing::{debug, info};

use super::{SpeechAudio, SpeechSynthesizer, SynthesisError};
use crate::config::PollyConfig;

/// Sample rates Polly accepts for PCM output.
const PCM_SAMPLE_RATES: [u32; 2] = [8000, 16000];

/// AWS Polly text-to-speech provider
pub struct AwsPolly {
    client: Client,
    voice: VoiceId,
    engine: Engine,
    sample_rate: u32,
}

impl AwsPolly {
    /// Create a new AWS Polly client
    pub async fn new(config: &PollyConfig) -> Result<Self, SynthesisError> {
        let voice = parse_voice_id(&config.voice)?;
        let engine = parse_engine(&config.engine)?;
        if !PCM_SAMPLE_RATES.contains(&config.sample_rate) {
            return Err(SynthesisError::UnsupportedSampleRate(config.sample_rate));
        }

        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        aws_config_loader = aws_config_loader.region(Region::new(config.region.clone()));

        let aws_config = aws_config_loader.load().await;
        let client = Client::new(&aws_config);

        info!(
            "Polly ready (region: {}, voice: {}, engine: {}, {}Hz)",
            config.region, config.voice, config.engine, config.sample_rate
        );

        Ok(Self {
            client,
            voice,
            engine,
            sample_rate: config.sample_rate,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for AwsPolly {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    async fn synthesize(&self, ssml: &str) -> Result<SpeechAudio, SynthesisError> {
        debug!("Synthesizing {} chars of SSML", ssml.len());

        let response = self
            .client
            .synthesize_speech()
            .text(ssml)
            .text_type(TextType::Ssml)
            .voice_id(self.voice.clone())
            .engine(self.engine.clone())
            .output_format(OutputFormat::Pcm)
            .sample_rate(self.sample_rate.to_string())
            .send()
            .await
            .map_err(|e| SynthesisError::Service(DisplayErrorContext(&e).to_string()))?;

        let bytes = response
            .audio_stream
            .collect()
            .await
            .map_err(|e| SynthesisError::Stream(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(SpeechAudio {
            pcm_data: bytes,
            sample_rate: self.sample_rate,
            channels: 1,
        })
    }
}

fn parse_voice_id(voice_id: &str) -> Result<VoiceId, SynthesisError> {
    if VoiceId::values().iter().any(|v| *v == voice_id) {
        Ok(VoiceId::from(voice_id))
    } else {
        Err(SynthesisError::UnknownVoice(voice_id.to_string()))
    }
}

fn parse_engine(engine: &str) -> Result<Engine, SynthesisError> {
    if Engine::values().iter().any(|e| *e == engine) {
        Ok(Engine::from(engine))
    } else {
        Err(SynthesisError::UnknownEngine(engine.to_string()))
    }
}
