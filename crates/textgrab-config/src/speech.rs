use serde::{Deserialize, Serialize};

#[cfg(target_os = "macos")]
fn default_program() -> String {
    "say".to_string()
}

#[cfg(target_os = "windows")]
fn default_program() -> String {
    "powershell".to_string()
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_program() -> String {
    "spd-say".to_string()
}

#[cfg(target_os = "windows")]
fn default_args() -> Vec<String> {
    vec![
        "-NoProfile".to_string(),
        "-Command".to_string(),
        "Add-Type -AssemblyName System.Speech; (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak($env:TEXTGRAB_SPEECH_TEXT)"
            .to_string(),
    ]
}

#[cfg(target_os = "windows")]
fn default_text_env() -> Option<String> {
    Some("TEXTGRAB_SPEECH_TEXT".to_string())
}

#[cfg(not(target_os = "windows"))]
fn default_args() -> Vec<String> {
    Vec::new()
}

#[cfg(not(target_os = "windows"))]
fn default_text_env() -> Option<String> {
    None
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Text-to-speech executable
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Pass the text in this environment variable instead of as the last
    /// argument
    #[serde(default = "default_text_env")]
    pub text_env: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            text_env: default_text_env(),
        }
    }
}
