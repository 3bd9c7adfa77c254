use super::{RecognitionOutcome, SpeechRecognizer};
use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::warn;

/// File-backed recognizer for development and testing.
///
/// Returns one scripted utterance per capture call, then idles on timeouts
/// once the script runs out. Each call sleeps for the configured capture
/// delay so the loop behaves like a real blocking microphone read.
pub struct ScriptedRecognizer {
    utterances: Mutex<VecDeque<String>>,
    capture_delay: Duration,
}

impl ScriptedRecognizer {
    /// Loads a script file with one utterance per line. Blank lines and
    /// `#` comments are skipped. A missing file yields an empty script so a
    /// zero-config server still starts; voice sessions then idle on timeouts.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(
                "No utterance script at {}; voice sessions will idle",
                path.display()
            );
            return Ok(Self::from_lines(std::iter::empty::<String>()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read utterance script {}", path.display()))?;

        let lines = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect::<Vec<_>>();

        Ok(Self {
            utterances: Mutex::new(lines.into()),
            capture_delay: Duration::from_millis(500),
        })
    }

    /// Builds a recognizer directly from utterances, with no capture delay.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            utterances: Mutex::new(lines.into_iter().map(Into::into).collect()),
            capture_delay: Duration::ZERO,
        }
    }

    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = delay;
        self
    }

    fn next_utterance(&self) -> Option<String> {
        match self.utterances.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn recognize(&self) -> RecognitionOutcome {
        if !self.capture_delay.is_zero() {
            std::thread::sleep(self.capture_delay);
        }

        match self.next_utterance() {
            Some(text) => RecognitionOutcome::Text(text.to_lowercase()),
            None => RecognitionOutcome::Timeout,
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn plays_back_lines_then_times_out() {
        let recognizer = ScriptedRecognizer::from_lines(["Hello", "what time is it"]);

        assert_eq!(
            recognizer.recognize(),
            RecognitionOutcome::Text("hello".to_string())
        );
        assert_eq!(
            recognizer.recognize(),
            RecognitionOutcome::Text("what time is it".to_string())
        );
        assert_eq!(recognizer.recognize(), RecognitionOutcome::Timeout);
        assert_eq!(recognizer.recognize(), RecognitionOutcome::Timeout);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# warm-up").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "open youtube").unwrap();
        file.flush().unwrap();

        let recognizer = ScriptedRecognizer::from_file(file.path())
            .unwrap()
            .with_capture_delay(Duration::ZERO);

        assert_eq!(
            recognizer.recognize(),
            RecognitionOutcome::Text("open youtube".to_string())
        );
        assert_eq!(recognizer.recognize(), RecognitionOutcome::Timeout);
    }

    #[test]
    fn missing_file_yields_empty_script() {
        let recognizer = ScriptedRecognizer::from_file("does/not/exist.txt").unwrap();
        let recognizer = recognizer.with_capture_delay(Duration::ZERO);
        assert_eq!(recognizer.recognize(), RecognitionOutcome::Timeout);
    }
}
