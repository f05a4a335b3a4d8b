use std::sync::{Mutex, PoisonError};

use arboard::Clipboard;
use textgrab_core::CaptureError;

/// The OS clipboard. One `arboard::Clipboard` is kept for the life of the
/// process; some platforms drop the contents when it goes away.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Mutex<Option<Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_clipboard<T>(
        &self,
        f: impl FnOnce(&mut Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, CaptureError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.is_none() {
            *inner = Some(Clipboard::new().map_err(|e| CaptureError::Clipboard(e.to_string()))?);
        }

        let Some(clipboard) = inner.as_mut() else {
            return Err(CaptureError::Clipboard("clipboard unavailable".to_string()));
        };
        f(clipboard).map_err(|e| {
            // a broken handle is rebuilt on the next write
            *inner = None;
            CaptureError::Clipboard(e.to_string())
        })
    }

    pub fn get_text(&self) -> Result<String, CaptureError> {
        self.with_clipboard(|c| c.get_text())
    }
}

impl textgrab_core::Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), CaptureError> {
        self.with_clipboard(|c| c.set_text(text.to_string()))?;
        tracing::debug!("Clipboard set ({} chars)", text.chars().count());
        Ok(())
    }
}
