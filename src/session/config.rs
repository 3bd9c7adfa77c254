use crate::config::SpeechConfig;
use std::time::Duration;

/// Tuning knobs for the voice worker loop.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pause between successful iterations, lets the capture device settle
    pub loop_pause: Duration,

    /// Pause after a transient recognition miss, bounds the retry rate
    pub retry_pause: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            loop_pause: Duration::from_millis(100),
            retry_pause: Duration::from_millis(1000),
        }
    }
}

impl SessionConfig {
    pub fn from_speech(config: &SpeechConfig) -> Self {
        Self {
            loop_pause: Duration::from_millis(config.loop_pause_ms),
            retry_pause: Duration::from_millis(config.retry_pause_ms),
        }
    }
}
