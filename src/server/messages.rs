use serde::{Deserialize, Serialize};

/// Client→server control and command messages.
///
/// Unknown `type` tags map to `Unknown` and are ignored; a payload that does
/// not decode at all closes the connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    TextCommand { command: String },
    StartListening,
    StopListening,
    #[serde(other)]
    Unknown,
}

/// Server→client events, delivered in emission order. A `voice_recognized`
/// for an utterance always precedes the `response` derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    VoiceRecognized { text: String },
    Response { text: String },
}
