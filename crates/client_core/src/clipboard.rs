//! Clipboard writes with a scratch-selection fallback.
//!
//! The primary path hands text to the system clipboard. When that path is
//! missing or fails, the text is placed in a temporary scratch element on a
//! [`SelectionHost`], selected, and copied with the host's copy command. The
//! scratch element is always removed again, whether or not the copy worked.

use std::{
    io::{IsTerminal, Write},
    sync::{Arc, Mutex},
};

use arboard::Clipboard;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use crate::error::ClipboardError;

#[async_trait]
pub trait ClipboardProvider: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Handle to a scratch element created by a [`SelectionHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScratchId(pub u64);

pub trait SelectionHost: Send + Sync {
    fn create_scratch(&self, text: &str) -> Result<ScratchId, ClipboardError>;
    fn select_contents(&self, id: ScratchId) -> Result<(), ClipboardError>;
    /// Copies the current selection.
    fn copy_selection(&self) -> Result<(), ClipboardError>;
    fn remove_scratch(&self, id: ScratchId);
}

/// Removes the scratch element when dropped.
struct ScratchGuard<'a> {
    host: &'a dyn SelectionHost,
    id: ScratchId,
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        self.host.remove_scratch(self.id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Primary,
    Fallback,
}

pub struct ClipboardService {
    primary: Option<Arc<dyn ClipboardProvider>>,
    fallback: Arc<dyn SelectionHost>,
}

impl ClipboardService {
    pub fn new(
        primary: Option<Arc<dyn ClipboardProvider>>,
        fallback: Arc<dyn SelectionHost>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// System clipboard first, terminal selection as fallback.
    pub fn system() -> Self {
        Self::new(
            Some(Arc::new(SystemClipboard)),
            Arc::new(TerminalSelectionHost::stdout()),
        )
    }

    pub async fn copy_text(&self, text: &str) -> Result<CopyPath, ClipboardError> {
        let primary_err = match &self.primary {
            Some(primary) => match primary.write_text(text).await {
                Ok(()) => return Ok(CopyPath::Primary),
                Err(err) => err,
            },
            None => ClipboardError::Unavailable("no clipboard provider".to_string()),
        };
        warn!(error = %primary_err, "clipboard: primary write failed, using selection fallback");

        copy_via_selection(self.fallback.as_ref(), text)
            .map(|()| CopyPath::Fallback)
            .map_err(|err| ClipboardError::FallbackFailed {
                text: text.to_string(),
                reason: match err {
                    ClipboardError::Unavailable(reason) => reason,
                    ClipboardError::FallbackFailed { reason, .. } => reason,
                },
            })
    }
}

fn copy_via_selection(host: &dyn SelectionHost, text: &str) -> Result<(), ClipboardError> {
    let id = host.create_scratch(text)?;
    let guard = ScratchGuard { host, id };
    host.select_contents(guard.id)?;
    host.copy_selection()?;
    debug!(scratch = guard.id.0, "clipboard: copied through scratch selection");
    Ok(())
}

/// Desktop clipboard through `arboard`.
pub struct SystemClipboard;

#[async_trait]
impl ClipboardProvider for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), ClipboardError> {
            let mut clipboard =
                Clipboard::new().map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|err| ClipboardError::Unavailable(err.to_string()))
        })
        .await
        .map_err(|err| ClipboardError::Unavailable(err.to_string()))?
    }
}

#[derive(Default)]
struct TerminalSelection {
    next_id: u64,
    scratch: Option<(ScratchId, String)>,
    selected: Option<ScratchId>,
}

/// Copies through the terminal emulator with an OSC 52 escape sequence.
pub struct TerminalSelectionHost<W> {
    out: Mutex<W>,
    interactive: bool,
    state: Mutex<TerminalSelection>,
}

impl TerminalSelectionHost<std::io::Stdout> {
    pub fn stdout() -> Self {
        let out = std::io::stdout();
        let interactive = out.is_terminal();
        Self::new(out, interactive)
    }
}

impl<W: Write + Send> TerminalSelectionHost<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self {
            out: Mutex::new(out),
            interactive,
            state: Mutex::new(TerminalSelection::default()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut TerminalSelection) -> T) -> T {
        let mut guard = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl<W: Write + Send> SelectionHost for TerminalSelectionHost<W> {
    fn create_scratch(&self, text: &str) -> Result<ScratchId, ClipboardError> {
        if !self.interactive {
            return Err(ClipboardError::Unavailable(
                "no terminal attached".to_string(),
            ));
        }
        Ok(self.with_state(|state| {
            state.next_id += 1;
            let id = ScratchId(state.next_id);
            state.scratch = Some((id, text.to_string()));
            id
        }))
    }

    fn select_contents(&self, id: ScratchId) -> Result<(), ClipboardError> {
        self.with_state(|state| match &state.scratch {
            Some((current, _)) if *current == id => {
                state.selected = Some(id);
                Ok(())
            }
            _ => Err(ClipboardError::Unavailable(format!(
                "scratch {} does not exist",
                id.0
            ))),
        })
    }

    fn copy_selection(&self) -> Result<(), ClipboardError> {
        let text = self.with_state(|state| match (&state.scratch, state.selected) {
            (Some((id, text)), Some(selected)) if *id == selected => Some(text.clone()),
            _ => None,
        });
        let Some(text) = text else {
            return Err(ClipboardError::Unavailable("nothing selected".to_string()));
        };

        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        write!(out, "\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
            .and_then(|()| out.flush())
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))
    }

    fn remove_scratch(&self, id: ScratchId) {
        self.with_state(|state| {
            if matches!(&state.scratch, Some((current, _)) if *current == id) {
                state.scratch = None;
            }
            if state.selected == Some(id) {
                state.selected = None;
            }
        });
    }
}

#[cfg(test)]
#[path = "tests/clipboard_tests.rs"]
mod tests;
