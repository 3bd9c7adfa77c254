use crate::router::CommandRouter;
use crate::session::SessionConfig;
use crate::speech::{SpeakerHandle, SpeechRecognizer};
use std::sync::Arc;

/// Shared dependencies handed to every connection. Each connection builds its
/// own `SessionCoordinator` from these; only the speech output device is
/// shared across sessions.
#[derive(Clone)]
pub struct AppState {
    pub session_config: SessionConfig,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub router: Arc<CommandRouter>,
    pub speaker: SpeakerHandle,
}

impl AppState {
    pub fn new(
        session_config: SessionConfig,
        recognizer: Arc<dyn SpeechRecognizer>,
        router: Arc<CommandRouter>,
        speaker: SpeakerHandle,
    ) -> Self {
        Self {
            session_config,
            recognizer,
            router,
            speaker,
        }
    }
}
