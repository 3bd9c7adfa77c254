use super::SpeechSynthesizer;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

/// Handle to the single shared speech output device.
///
/// Every caller (text-command replies and voice-loop replies alike) speaks
/// through the same handle; an async mutex serializes device access so audio
/// never interleaves. The blocking synthesis call runs on the blocking pool.
/// Synthesis failure is non-fatal: logged and swallowed, the conversation
/// continues.
#[derive(Clone)]
pub struct SpeakerHandle {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    device: Arc<Mutex<()>>,
}

impl SpeakerHandle {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            device: Arc::new(Mutex::new(())),
        }
    }

    pub async fn say(&self, text: &str) {
        let _device = self.device.lock().await;

        let synthesizer = Arc::clone(&self.synthesizer);
        let text = text.to_string();

        match tokio::task::spawn_blocking(move || synthesizer.speak(&text)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("Speech output failed: {:#}", e);
            }
            Err(e) => {
                error!("Speech output task panicked: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fails the test if two speak calls ever overlap.
    struct ExclusiveSynthesizer {
        active: AtomicUsize,
        spoken: AtomicUsize,
    }

    impl SpeechSynthesizer for ExclusiveSynthesizer {
        fn speak(&self, _text: &str) -> Result<()> {
            let active = self.active.fetch_add(1, Ordering::SeqCst);
            assert_eq!(active, 0, "speak calls overlapped");
            std::thread::sleep(Duration::from_millis(5));
            self.active.fetch_sub(1, Ordering::SeqCst);
            self.spoken.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &str {
            "exclusive"
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_are_serialized() {
        let synthesizer = Arc::new(ExclusiveSynthesizer {
            active: AtomicUsize::new(0),
            spoken: AtomicUsize::new(0),
        });
        let speaker = SpeakerHandle::new(synthesizer.clone() as Arc<dyn SpeechSynthesizer>);

        let mut tasks = Vec::new();
        for i in 0..8 {
            let speaker = speaker.clone();
            tasks.push(tokio::spawn(async move {
                speaker.say(&format!("utterance {}", i)).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(synthesizer.spoken.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        struct FailingSynthesizer;
        impl SpeechSynthesizer for FailingSynthesizer {
            fn speak(&self, _text: &str) -> Result<()> {
                anyhow::bail!("device unplugged")
            }
            fn name(&self) -> &str {
                "failing"
            }
        }

        let speaker = SpeakerHandle::new(Arc::new(FailingSynthesizer));
        // Must not panic or propagate.
        speaker.say("hello").await;
    }
}
