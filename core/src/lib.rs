pub mod diagnostics;
pub mod errors;
pub mod lexer;

use std::path::Path;

pub use diagnostics::{ContextOptions, Location, Severity, SourceFile, Span};
pub use errors::{Diagnostic, DrizzleError, LexFailure, SpanError};
pub use lexer::{Cursor, Lexer, Token, TokenKind, lex};

/// Reads a source file and returns a cursor at its start.
pub fn load(path: impl AsRef<Path>) -> Result<Cursor, DrizzleError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Cursor::new(text, display)),
        Err(source) => Err(DrizzleError::Io {
            path: display,
            source,
        }),
    }
}

/// Convenience function to lex a file end-to-end.
pub fn lex_file(path: impl AsRef<Path>) -> Result<Vec<Token>, DrizzleError> {
    let cursor = load(path)?;
    Ok(lexer::lex_cursor(cursor)?)
}
