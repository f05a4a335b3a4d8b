mod capture;
#[cfg(windows)]
mod com;
mod hotkey;
mod ocr;

pub use capture::{PrimaryDisplay, capture_primary_screen};
#[cfg(windows)]
pub use com::ComGuard;
pub use hotkey::{HotkeyManager, ShortcutRegistrar, hotkey_for};
#[cfg(windows)]
pub use ocr::WindowsRecognizer;
pub use ocr::{TesseractRecognizer, build_recognizer};
