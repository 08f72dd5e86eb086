//! Clipboard Bridge
//!
//! Rendered markup goes to the clipboard as rich content when the platform
//! allows it, with a plain-text rendition as the fallback path.

use std::cell::RefCell;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

pub trait Clipboard {
    /// Place `html` on the clipboard, with `alt_text` for plain-text targets.
    fn write_html(&self, html: &str, alt_text: &str) -> Result<(), ClipboardError>;

    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn open() -> Result<arboard::Clipboard, ClipboardError> {
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn write_html(&self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = Self::open()?;
        match clipboard.set_html(html.to_string(), Some(alt_text.to_string())) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "rich clipboard write failed, falling back to plain text");
                clipboard
                    .set_text(alt_text.to_string())
                    .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
            }
        }
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        Self::open()?
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    Html { html: String, alt_text: String },
    Text(String),
}

/// In-process clipboard that remembers the last write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    last: RefCell<Option<ClipboardContent>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write fails.
    pub fn failing() -> Self {
        Self {
            last: RefCell::new(None),
            fail: true,
        }
    }

    pub fn contents(&self) -> Option<ClipboardContent> {
        self.last.borrow().clone()
    }

    fn store(&self, content: ClipboardContent) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::WriteFailed("memory clipboard set to fail".into()));
        }
        *self.last.borrow_mut() = Some(content);
        Ok(())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_html(&self, html: &str, alt_text: &str) -> Result<(), ClipboardError> {
        self.store(ClipboardContent::Html {
            html: html.to_string(),
            alt_text: alt_text.to_string(),
        })
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.store(ClipboardContent::Text(text.to_string()))
    }
}

/// Plain-text rendition of signature markup: one line per table row.
pub fn plain_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len() / 4);
    let mut chars = markup.chars();

    while let Some(c) = chars.next() {
        if c != '<' {
            text.push(c);
            continue;
        }
        let tag: String = chars.by_ref().take_while(|&c| c != '>').collect();
        let name = tag
            .split(|c: char| c.is_whitespace() || (c == '/' && !tag.starts_with('/')))
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match name.as_str() {
            "/tr" | "br" => text.push('\n'),
            "/td" => text.push(' '),
            _ => {}
        }
    }

    decode_entities(&text)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
