use super::config::SessionConfig;
use crate::router::{rules, CommandRouter};
use crate::server::ServerEvent;
use crate::speech::{RecognitionOutcome, SpeakerHandle, SpeechRecognizer};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Listening flag and worker generation, updated together under one lock so
/// start/stop/farewell transitions are linearizable.
#[derive(Debug, Default)]
struct SessionState {
    listening: bool,
    generation: u64,
}

fn lock_state(state: &StdMutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Per-connection coordinator bridging the blocking recognition loop and the
/// message-driven transport.
///
/// At most one voice worker is live at a time. Every start moves the
/// generation forward; a worker spawned for an older generation must not
/// emit events or speak once the counter moves on, even if its blocking
/// capture call is still draining.
pub struct SessionCoordinator {
    id: Uuid,
    config: SessionConfig,
    recognizer: Arc<dyn SpeechRecognizer>,
    router: Arc<CommandRouter>,
    speaker: SpeakerHandle,
    events: mpsc::UnboundedSender<ServerEvent>,
    state: Arc<StdMutex<SessionState>>,
    worker_handle: Mutex<Option<JoinHandle<()>>>,
}

impl SessionCoordinator {
    pub fn new(
        id: Uuid,
        config: SessionConfig,
        recognizer: Arc<dyn SpeechRecognizer>,
        router: Arc<CommandRouter>,
        speaker: SpeakerHandle,
        events: mpsc::UnboundedSender<ServerEvent>,
    ) -> Self {
        Self {
            id,
            config,
            recognizer,
            router,
            speaker,
            events,
            state: Arc::new(StdMutex::new(SessionState::default())),
            worker_handle: Mutex::new(None),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_listening(&self) -> bool {
        lock_state(&self.state).listening
    }

    /// Current worker generation, moves forward on every start.
    pub fn generation(&self) -> u64 {
        lock_state(&self.state).generation
    }

    /// Starts the voice worker. No-op when one is already listening.
    pub async fn start_listening(&self) {
        let generation = {
            let mut state = lock_state(&self.state);
            if state.listening {
                warn!("Session {}: already listening, ignoring start", self.id);
                return;
            }
            state.listening = true;
            state.generation += 1;
            state.generation
        };

        info!(
            "Session {}: starting voice worker (generation {})",
            self.id, generation
        );

        let worker = VoiceWorker {
            session_id: self.id,
            generation,
            config: self.config.clone(),
            recognizer: Arc::clone(&self.recognizer),
            router: Arc::clone(&self.router),
            speaker: self.speaker.clone(),
            events: self.events.clone(),
            state: Arc::clone(&self.state),
        };

        let handle = tokio::spawn(worker.run());

        // A predecessor may still occupy the slot: either finished (farewell
        // or fatal outcome) or fenced out and draining its last capture call.
        // Dropping the handle detaches it; the generation fence keeps it mute.
        let mut slot = self.worker_handle.lock().await;
        if slot.replace(handle).is_some() {
            debug!("Session {}: replaced previous worker handle", self.id);
        }
    }

    /// Clears the listening flag. Never blocks waiting for the worker; it
    /// exits at its next checkpoint, bounded by the capture call's own
    /// timeout. Idempotent when already stopped.
    pub fn stop_listening(&self) {
        let mut state = lock_state(&self.state);
        if state.listening {
            state.listening = false;
            info!("Session {}: stop requested", self.id);
        }
    }

    /// Routes a typed command and replies immediately, independent of any
    /// active voice worker. Speaking happens off the control plane.
    pub async fn submit_text_command(&self, command: &str) {
        let response = self.router.route(command).await;

        if self
            .events
            .send(ServerEvent::Response {
                text: response.clone(),
            })
            .is_err()
        {
            debug!("Session {}: event channel closed, dropping reply", self.id);
            return;
        }

        let speaker = self.speaker.clone();
        tokio::spawn(async move {
            speaker.say(&response).await;
        });
    }

    /// Forces a stop and releases the worker. Called when the transport goes
    /// away; the worker winds down cooperatively at its next checkpoint.
    pub async fn on_disconnect(&self) {
        self.stop_listening();

        if let Some(handle) = self.worker_handle.lock().await.take() {
            drop(handle);
        }

        info!("Session {}: released", self.id);
    }
}

/// One listen-recognize-route-reply loop, bound to a fixed generation.
struct VoiceWorker {
    session_id: Uuid,
    generation: u64,
    config: SessionConfig,
    recognizer: Arc<dyn SpeechRecognizer>,
    router: Arc<CommandRouter>,
    speaker: SpeakerHandle,
    events: mpsc::UnboundedSender<ServerEvent>,
    state: Arc<StdMutex<SessionState>>,
}

impl VoiceWorker {
    /// Checkpoint: the worker may only proceed while the session still wants
    /// this generation listening.
    fn live(&self) -> bool {
        let state = lock_state(&self.state);
        state.listening && state.generation == self.generation
    }

    /// Clears the listening flag unless a newer generation already took over.
    fn stop_session(&self) {
        let mut state = lock_state(&self.state);
        if state.generation == self.generation {
            state.listening = false;
        }
    }

    async fn run(self) {
        info!(
            "Session {}: voice worker {} started ({})",
            self.session_id,
            self.generation,
            self.recognizer.name()
        );

        while self.live() {
            let recognizer = Arc::clone(&self.recognizer);
            let outcome = match tokio::task::spawn_blocking(move || recognizer.recognize()).await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(
                        "Session {}: recognition task panicked: {}",
                        self.session_id, e
                    );
                    self.stop_session();
                    break;
                }
            };

            // The flag or generation may have moved while the capture call
            // was in flight; a fenced worker must not emit or speak.
            if !self.live() {
                break;
            }

            match outcome {
                RecognitionOutcome::Text(text) => {
                    if !self.handle_utterance(&text).await {
                        break;
                    }
                }
                RecognitionOutcome::Timeout => {
                    debug!("Session {}: capture timed out, retrying", self.session_id);
                    tokio::time::sleep(self.config.retry_pause).await;
                    continue;
                }
                RecognitionOutcome::Unintelligible => {
                    debug!(
                        "Session {}: could not understand audio, retrying",
                        self.session_id
                    );
                    tokio::time::sleep(self.config.retry_pause).await;
                    continue;
                }
                RecognitionOutcome::ServiceError(message) => {
                    error!(
                        "Session {}: recognition service failed: {}",
                        self.session_id, message
                    );
                    self.stop_session();
                    break;
                }
                RecognitionOutcome::DeviceError(message) => {
                    error!(
                        "Session {}: capture device failed: {}",
                        self.session_id, message
                    );
                    self.stop_session();
                    break;
                }
            }

            tokio::time::sleep(self.config.loop_pause).await;
        }

        info!(
            "Session {}: voice worker {} exited",
            self.session_id, self.generation
        );
    }

    /// Emits the recognition event, routes the utterance, replies, and
    /// speaks. Returns false when the loop should end (farewell heard or the
    /// transport went away).
    async fn handle_utterance(&self, text: &str) -> bool {
        if self
            .events
            .send(ServerEvent::VoiceRecognized {
                text: text.to_string(),
            })
            .is_err()
        {
            return false;
        }

        let response = self.router.route(text).await;

        if self
            .events
            .send(ServerEvent::Response {
                text: response.clone(),
            })
            .is_err()
        {
            return false;
        }

        self.speaker.say(&response).await;

        if rules::contains_farewell(&rules::normalize(text)) {
            info!("Session {}: farewell heard, stopping", self.session_id);
            self.stop_session();
            return false;
        }

        true
    }
}
