use std::borrow::Cow;

use drizzle::{Cursor, Lexer, TokenKind};
use owo_colors::OwoColorize;

/// Colours each token by kind. Text the lexer rejects is left as typed.
pub fn highlight_line(line: &str) -> Cow<'_, str> {
    let tokens = Lexer::new(Cursor::new(line, "<repl>"))
        .with_warning_handler(|_| {})
        .with_error_handler(|_| {})
        .tokenize();
    if tokens.is_empty() {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() * 2);
    let mut last = 0;
    for token in &tokens {
        let start = token.span.start().index;
        let end = token.span.end().index;
        out.push_str(&line[last..start]);
        let text = &line[start..end];
        let styled = match &token.kind {
            TokenKind::Identifier(_) => text.to_string(),
            TokenKind::Operator(op) if op.chars().all(char::is_alphabetic) => {
                text.magenta().to_string()
            }
            TokenKind::Operator(_) => text.bright_white().to_string(),
            TokenKind::Integer(_) | TokenKind::Float(_) => text.yellow().to_string(),
            TokenKind::String(_) => text.green().to_string(),
            _ => text.blue().bold().to_string(),
        };
        out.push_str(&styled);
        last = end;
    }
    out.push_str(&line[last..]);
    Cow::Owned(out)
}

pub fn highlight_prompt(prompt: &str) -> Cow<'_, str> {
    if prompt == "> " {
        return Cow::Owned(format!("{} ", ">".bright_green().bold()));
    }
    if prompt == "... " {
        return Cow::Owned(format!("{} ", "...".yellow().bold()));
    }
    Cow::Borrowed(prompt)
}
