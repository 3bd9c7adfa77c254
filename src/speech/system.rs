use super::SpeechSynthesizer;
use anyhow::{Context, Result};
use std::process::Command;

/// Text-to-speech through the operating system's speech command:
/// `say` on macOS, `espeak` elsewhere.
pub struct SystemSynthesizer;

impl SystemSynthesizer {
    fn speech_command(text: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("say");
            cmd.arg(text);
            cmd
        } else {
            let mut cmd = Command::new("espeak");
            cmd.arg(text);
            cmd
        }
    }
}

impl SpeechSynthesizer for SystemSynthesizer {
    fn speak(&self, text: &str) -> Result<()> {
        let status = Self::speech_command(text)
            .status()
            .context("Failed to launch the system speech command")?;

        if !status.success() {
            anyhow::bail!("System speech command exited with {}", status);
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "system"
    }
}

/// No-op synthesizer for tests and headless deployments.
pub struct SilentSynthesizer;

impl SpeechSynthesizer for SilentSynthesizer {
    fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "silent"
    }
}
