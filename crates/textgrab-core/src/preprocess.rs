use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor: Send + Sync {
    // Default cleanup for recognized text
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFC), engines disagree on composed forms
        let text: String = text.nfc().collect();

        text.replace("\r\n", "\n")
            .replace('\r', "\n")
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
