//! Document text acquisition.
//!
//! A document is reduced to an immutable character sequence before any frame is produced, so
//! every failure here aborts the run up front.

mod docx;
mod plain;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{HandwriteError, HandwriteResult};

/// Ordered, immutable document characters, including `\n` line-break markers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentText(String);

impl DocumentText {
    /// Wrap already-extracted text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Load a document, choosing the reader from the file extension.
    ///
    /// `.docx` files yield their body paragraphs joined with `\n`; `.txt`, `.text` and `.md`
    /// files are read verbatim with `\r\n` normalized to `\n`.
    #[tracing::instrument(level = "debug")]
    pub fn from_path(path: &Path) -> HandwriteResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let bytes = std::fs::read(path)
            .with_context(|| format!("read document '{}'", path.display()))
            .map_err(|e| HandwriteError::input(format!("{e:#}")))?;

        match ext.as_str() {
            "docx" => Self::from_docx_bytes(&bytes),
            "txt" | "text" | "md" => Self::from_plain_bytes(&bytes),
            other => Err(HandwriteError::input(format!(
                "unsupported document type '.{other}' (expected .docx, .txt or .md)"
            ))),
        }
    }

    /// Extract paragraph text from the bytes of a WordprocessingML (`.docx`) package.
    pub fn from_docx_bytes(bytes: &[u8]) -> HandwriteResult<Self> {
        let paragraphs = docx::paragraphs(bytes)?;
        Ok(Self(paragraphs.join("\n")))
    }

    /// Decode UTF-8 plain text.
    pub fn from_plain_bytes(bytes: &[u8]) -> HandwriteResult<Self> {
        plain::decode(bytes).map(Self)
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters, which is also the number of per-character frames.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Return `true` when there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for DocumentText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
