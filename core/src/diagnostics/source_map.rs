use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// A compilation unit: the path it was read from and its full text.
///
/// Shared through `Arc` by the cursor and by every span taken from it.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceFile {
    path: String,
    text: String,
}

impl SourceFile {
    pub fn new(text: impl Into<String>, path: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            path: path.into(),
            text: text.into(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset at which the line containing `index` begins.
    ///
    /// # Panics
    ///
    /// If `index` is past the end of the text or not on a `char` boundary.
    pub fn line_start(&self, index: usize) -> usize {
        self.text[..index].rfind('\n').map_or(0, |nl| nl + 1)
    }
}

/// A position inside a source file.
///
/// `index` is a byte offset; `row` and `column` are 0-based and count
/// characters. Source identity lives on the [`Span`](super::span::Span)
/// that holds the location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    pub index: usize,
    pub row: usize,
    pub column: usize,
}

impl Location {
    /// Moves past `ch`.
    pub(crate) fn advance(&mut self, ch: char) {
        self.index += ch.len_utf8();
        if ch == '\n' {
            self.row += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    pub fn line(&self) -> usize {
        self.row + 1
    }

    pub fn col(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line(), self.col())
    }
}
