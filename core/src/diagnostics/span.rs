use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::render::{self, ContextOptions};
use super::source_map::{Location, SourceFile};
use crate::errors::SpanError;

/// A half-open range `[start, end)` of one source file.
#[derive(Clone)]
pub struct Span {
    file: Arc<SourceFile>,
    start: Location,
    end: Location,
}

impl Span {
    pub fn new(file: Arc<SourceFile>, start: Location, end: Location) -> Self {
        debug_assert!(start.index <= end.index, "span ends before it starts");
        Self { file, start, end }
    }

    /// The smallest span covering both `a` and `b`, whatever their order.
    pub fn join(a: &Span, b: &Span) -> Result<Span, SpanError> {
        if !Arc::ptr_eq(&a.file, &b.file) {
            return Err(SpanError::DifferentSources {
                left: a.file.path().to_owned(),
                right: b.file.path().to_owned(),
            });
        }
        let start = a.start.min(b.start);
        let end = a.end.max(b.end);
        Ok(Span::new(Arc::clone(&a.file), start, end))
    }

    pub fn file(&self) -> &Arc<SourceFile> {
        &self.file
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end.index - self.start.index
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The source text covered by this span.
    pub fn as_str(&self) -> &str {
        &self.file.text()[self.start.index..self.end.index]
    }

    /// Renders the span with the default options: header, one line of
    /// context on each side, `^` underlines, no colour.
    pub fn context(&self) -> String {
        self.context_with(&ContextOptions::default())
    }

    pub fn context_with(&self, options: &ContextOptions) -> String {
        render::context(self, options)
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.file, &other.file) && self.start == other.start && self.end == other.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Span({} {}..{} {:?})",
            self.file.path(),
            self.start,
            self.end,
            self.as_str()
        )
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Span", 3)?;
        state.serialize_field("path", self.file.path())?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.end()
    }
}
