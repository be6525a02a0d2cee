pub mod cursor;
mod number_ident_scanner;
pub mod scanner;
mod string_scanner;
pub mod token;

pub use cursor::Cursor;
pub use scanner::Lexer;
pub use token::{Token, TokenKind};

use crate::errors::{Diagnostic, LexFailure};

/// Tokenize source code into a list of tokens.
///
/// Warnings are dropped; if any error was reported the collected errors are
/// returned instead of the tokens.
pub fn lex(source: &str, path: &str) -> Result<Vec<Token>, LexFailure> {
    lex_cursor(Cursor::new(source, path))
}

pub fn lex_cursor(cursor: Cursor) -> Result<Vec<Token>, LexFailure> {
    let mut errors = Vec::<Diagnostic>::new();
    let tokens = Lexer::new(cursor)
        .with_warning_handler(|_| {})
        .with_error_handler(|diagnostic| errors.push(diagnostic))
        .tokenize();

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(LexFailure::new(errors))
    }
}
