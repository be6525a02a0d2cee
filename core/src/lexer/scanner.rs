use tracing::{debug, trace};

use super::cursor::Cursor;
use super::token::{Token, TokenKind};
use crate::diagnostics::emitter::stderr_handler;
use crate::diagnostics::{Handler, Severity};
use crate::errors::Diagnostic;

/// Lexes one source, producing a token per call to [`Lexer::next`].
///
/// Problems are not returned: warnings and errors go to the two handlers,
/// which print to stderr unless replaced.
pub struct Lexer<'h> {
    pub(super) cursor: Cursor,
    on_warning: Handler<'h>,
    on_error: Handler<'h>,
}

impl<'h> Lexer<'h> {
    pub fn new(cursor: Cursor) -> Self {
        Self {
            cursor,
            on_warning: stderr_handler(Severity::Warning),
            on_error: stderr_handler(Severity::Error),
        }
    }

    pub fn with_warning_handler(mut self, handler: impl FnMut(Diagnostic) + 'h) -> Self {
        self.on_warning = Box::new(handler);
        self
    }

    pub fn with_error_handler(mut self, handler: impl FnMut(Diagnostic) + 'h) -> Self {
        self.on_error = Box::new(handler);
        self
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Reads the next token.
    ///
    /// Returns `None` when the input is exhausted or when the lexeme at the
    /// cursor was malformed; in the latter case the error handler has been
    /// called and at least one character was consumed.
    pub fn next(&mut self) -> Option<Token> {
        self.cursor.skip(char::is_whitespace);
        if self.cursor.is_at_end() {
            return None;
        }

        let depth = self.cursor.span_depth();
        let start = self.cursor.location();
        self.cursor.start_span();
        let lexed = self.lex_token();
        self.cursor.unwind_spans(depth);

        match lexed {
            Ok(token) => {
                trace!(kind = %token.kind, span = ?token.span, "token");
                Some(token)
            }
            Err(diagnostic) => {
                if self.cursor.location() == start {
                    self.cursor.next();
                }
                self.error(diagnostic);
                None
            }
        }
    }

    /// Lexes the whole source, skipping past malformed lexemes.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            match self.next() {
                Some(token) => tokens.push(token),
                None if self.cursor.is_at_end() => break,
                None => {}
            }
        }
        tokens
    }

    fn lex_token(&mut self) -> Result<Token, Diagnostic> {
        if let Some(token) = self.identifier() {
            return Ok(token);
        }
        if let Some(token) = self.operator() {
            return Ok(token);
        }
        if let Some(token) = self.string()? {
            return Ok(token);
        }
        if let Some(token) = self.number()? {
            return Ok(token);
        }

        self.cursor.next();
        let span = self.cursor.end_span();
        let message = format!("unexpected character `{span}`");
        Err(Diagnostic::new(span, message))
    }

    pub(super) fn warn(&mut self, diagnostic: Diagnostic) {
        debug!(message = %diagnostic.message, span = ?diagnostic.span, "lex warning");
        (self.on_warning)(diagnostic);
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        debug!(message = %diagnostic.message, span = ?diagnostic.span, "lex error");
        (self.on_error)(diagnostic);
    }

    fn operator(&mut self) -> Option<Token> {
        let first = self.cursor.peek()?;
        if is_long_operator(first) {
            self.cursor.next();
            match (first, self.cursor.peek()) {
                ('=', Some('>')) | (_, Some('=')) => {
                    self.cursor.next();
                }
                _ => {}
            }
        } else if is_short_operator(first) {
            self.cursor.next();
        } else if first == '>' || first == '<' {
            self.cursor.next();
            if self.cursor.peek() == Some(first) {
                // >> or <<, then >>= or <<=
                self.cursor.next();
            }
            if self.cursor.peek() == Some('=') {
                self.cursor.next();
            }
        } else {
            return None;
        }

        let span = self.cursor.end_span();
        Some(Token {
            kind: TokenKind::Operator(span.as_str().to_owned()),
            span,
        })
    }
}

fn is_short_operator(c: char) -> bool {
    matches!(
        c,
        '^' | '!' | '.' | ':' | '?' | '(' | ')' | '{' | '}' | '[' | ']' | ';' | '@' | ','
    )
}

/// Operators that may take a trailing `=`.
fn is_long_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '=')
}
