pub mod clipboard;
pub mod speech;

pub use clipboard::SystemClipboard;
pub use speech::ProcessSpeaker;
