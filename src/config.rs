use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub speech: SpeechConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub bind: String,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "deskvoice".to_string(),
            bind: "127.0.0.1".to_string(),
            port: 8765,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Recognizer provider name ("scripted" is the only built-in)
    pub recognizer: String,

    /// Utterance script for the scripted recognizer (one utterance per line)
    pub script_path: String,

    /// Synthesizer provider name ("system" or "silent")
    pub synthesizer: String,

    /// Pause between voice loop iterations, in milliseconds
    pub loop_pause_ms: u64,

    /// Pause after a transient recognition miss, in milliseconds
    pub retry_pause_ms: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            recognizer: "scripted".to_string(),
            script_path: "config/utterances.txt".to_string(),
            synthesizer: "system".to_string(),
            loop_pause_ms: 100,
            retry_pause_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; the weather skill replies with a setup hint
    /// when this is missing
    pub api_key: Option<String>,

    /// City used when a weather query names none
    pub default_city: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: "London".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("DESKVOICE").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
