use std::process::{Command, Stdio};
use std::thread;

use textgrab_config::speech::SpeechConfig;
use textgrab_core::Speaker;

/// Speaks by spawning an external text-to-speech program.
pub struct ProcessSpeaker {
    config: SpeechConfig,
}

impl ProcessSpeaker {
    pub fn new(config: SpeechConfig) -> Self {
        Self { config }
    }

    pub fn command(&self, text: &str) -> Command {
        let mut command = Command::new(&self.config.program);
        command.args(&self.config.args);
        match &self.config.text_env {
            Some(var) => {
                command.env(var, text);
            }
            None => {
                command.arg(text);
            }
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Speaker for ProcessSpeaker {
    fn speak(&self, text: &str) {
        match self.command(text).spawn() {
            Ok(mut child) => {
                thread::spawn(move || {
                    if let Err(e) = child.wait() {
                        tracing::debug!("Speech process wait failed: {}", e);
                    }
                });
            }
            Err(e) => tracing::debug!("Speech unavailable ({}): {}", self.config.program, e),
        }
    }
}
