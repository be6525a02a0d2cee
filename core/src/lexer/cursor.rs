use std::sync::Arc;

use crate::diagnostics::{Location, SourceFile, Span};

/// Character-level reader over one source file.
///
/// Tracks the current [`Location`] and a stack of span starts so lexemes
/// (and pieces of lexemes) can be recorded as [`Span`]s.
pub struct Cursor {
    file: Arc<SourceFile>,
    loc: Location,
    span_stack: Vec<Location>,
}

impl Cursor {
    pub fn new(text: impl Into<String>, path: impl Into<String>) -> Self {
        Self::from_file(SourceFile::new(text, path))
    }

    pub fn from_file(file: Arc<SourceFile>) -> Self {
        Self {
            file,
            loc: Location::default(),
            span_stack: Vec::new(),
        }
    }

    pub fn file(&self) -> &Arc<SourceFile> {
        &self.file
    }

    /// Current position in the source.
    pub fn location(&self) -> Location {
        self.loc
    }

    /// Whether the cursor has reached the end.
    pub fn is_at_end(&self) -> bool {
        self.loc.index >= self.file.text().len()
    }

    fn rest(&self) -> &str {
        &self.file.text()[self.loc.index..]
    }

    /// Advance one character and return it, or `None` at end of input.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.loc.advance(ch);
        Some(ch)
    }

    /// Peek at the current character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek `offset` characters past the current one.
    pub fn peek_offset(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Whether `literal` appears at the current position. Does not consume.
    pub fn matches(&self, literal: &str) -> bool {
        literal
            .chars()
            .enumerate()
            .all(|(i, ch)| self.peek_offset(i) == Some(ch))
    }

    /// Consume characters while `predicate` holds.
    pub fn skip(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.next();
        }
    }

    /// Begins a span at the current position.
    pub fn start_span(&mut self) {
        self.span_stack.push(self.loc);
    }

    /// Ends the most recently started span at the current position.
    ///
    /// # Panics
    ///
    /// If no span was started.
    pub fn end_span(&mut self) -> Span {
        let start = self.span_stack.pop().expect("popped empty span stack");
        Span::new(Arc::clone(&self.file), start, self.loc)
    }

    /// The span from the most recently started span to here, leaving the
    /// span open.
    pub fn current_span(&self) -> Span {
        let start = *self.span_stack.last().expect("no span has been started");
        Span::new(Arc::clone(&self.file), start, self.loc)
    }

    pub fn span_depth(&self) -> usize {
        self.span_stack.len()
    }

    /// Drops every span started after the stack was `depth` deep.
    pub fn unwind_spans(&mut self, depth: usize) {
        self.span_stack.truncate(depth);
    }
}
