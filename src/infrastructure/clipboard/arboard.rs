//! Cross-platform clipboard adapter using arboard

use async_trait::async_trait;

use crate::application::ports::{Clipboard, ClipboardError};

/// Clipboard adapter backed by arboard (Windows, macOS, X11/Wayland)
pub struct ArboardClipboard;

impl ArboardClipboard {
    /// Create a new clipboard adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clipboard for ArboardClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();

        // arboard is blocking; keep it off the async runtime threads
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

            clipboard
                .set_text(&text)
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::CopyFailed(format!("Task join error: {}", e)))?
    }
}
