//! Speech engine interfaces
//!
//! The capture and synthesis engines are inherently blocking, one-at-a-time
//! resources. This module defines the traits the session coordinator consumes,
//! the factories that pick an implementation from configuration, and the
//! `SpeakerHandle` that serializes every caller onto the single audio device.

mod output;
mod scripted;
mod system;

pub use output::SpeakerHandle;
pub use scripted::ScriptedRecognizer;
pub use system::{SilentSynthesizer, SystemSynthesizer};

use crate::config::SpeechConfig;
use anyhow::Result;
use std::sync::Arc;

/// Result of one blocking capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// One recognized utterance
    Text(String),
    /// Nothing was said before the capture window closed
    Timeout,
    /// Audio was captured but could not be transcribed
    Unintelligible,
    /// The recognition backend failed (network, auth, provider)
    ServiceError(String),
    /// The capture device itself failed
    DeviceError(String),
}

impl RecognitionOutcome {
    /// Transient outcomes are retried by the voice worker; the rest end the
    /// session.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Unintelligible)
    }
}

/// Blocking speech-to-text capture. One call captures one utterance; the call
/// may block for the full length of the capture window, so it must never run
/// on the async control plane.
pub trait SpeechRecognizer: Send + Sync {
    fn recognize(&self) -> RecognitionOutcome;

    /// Recognizer name for logging
    fn name(&self) -> &str;
}

/// Blocking text-to-speech rendering. Callers go through [`SpeakerHandle`],
/// which serializes access to the shared device.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str) -> Result<()>;

    /// Synthesizer name for logging
    fn name(&self) -> &str;
}

/// Recognizer factory keyed by `speech.recognizer`
pub struct RecognizerFactory;

impl RecognizerFactory {
    pub fn create(config: &SpeechConfig) -> Result<Arc<dyn SpeechRecognizer>> {
        match config.recognizer.as_str() {
            "scripted" => {
                let recognizer = ScriptedRecognizer::from_file(&config.script_path)?;
                Ok(Arc::new(recognizer))
            }
            other => {
                anyhow::bail!("Unsupported recognizer provider: {}", other)
            }
        }
    }
}

/// Synthesizer factory keyed by `speech.synthesizer`
pub struct SynthesizerFactory;

impl SynthesizerFactory {
    pub fn create(config: &SpeechConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
        match config.synthesizer.as_str() {
            "system" => Ok(Arc::new(SystemSynthesizer)),
            "silent" => Ok(Arc::new(SilentSynthesizer)),
            other => {
                anyhow::bail!("Unsupported synthesizer provider: {}", other)
            }
        }
    }
}
