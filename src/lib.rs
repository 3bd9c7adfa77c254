pub mod config;
pub mod router;
pub mod server;
pub mod session;
pub mod skills;
pub mod speech;

pub use config::Config;
pub use router::CommandRouter;
pub use server::{create_router, AppState, ClientMessage, ServerEvent};
pub use session::{SessionConfig, SessionCoordinator};
pub use skills::{AppLauncher, KnowledgeProvider, OpenWeatherMap, SystemLauncher, WeatherProvider, WikipediaClient};
pub use speech::{
    RecognitionOutcome, ScriptedRecognizer, SpeakerHandle, SpeechRecognizer, SpeechSynthesizer,
};
