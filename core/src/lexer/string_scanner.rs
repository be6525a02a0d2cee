use super::scanner::Lexer;
use super::token::{Token, TokenKind};
use crate::diagnostics::Span;
use crate::errors::Diagnostic;

impl Lexer<'_> {
    pub(super) fn string(&mut self) -> Result<Option<Token>, Diagnostic> {
        let Some(quote) = self.cursor.peek().filter(|&c| is_quote(c)) else {
            return Ok(None);
        };
        self.cursor.next();

        let mut value = String::new();
        loop {
            match self.cursor.peek() {
                None => {
                    let span = self.cursor.current_span();
                    let replacement = format!("{span}{quote}");
                    return Err(Diagnostic::new(span, "unclosed string")
                        .with_hint("close the string")
                        .with_replacement(replacement));
                }
                Some(c) if c == quote => break,
                Some('\\') if self.cursor.peek_offset(1).is_none() => {
                    // A trailing backslash leaves the string unclosed.
                    self.cursor.next();
                }
                Some('\\') => match self.escape_sequence(quote) {
                    Ok(ch) => value.push(ch),
                    Err(diagnostic) => {
                        self.skip_past_quote(quote);
                        return Err(diagnostic);
                    }
                },
                Some(c) => {
                    self.cursor.next();
                    value.push(c);
                }
            }
        }
        self.cursor.next();

        let span = self.cursor.end_span();
        Ok(Some(Token {
            kind: TokenKind::String(value),
            span,
        }))
    }

    /// Moves past the rest of a literal whose escape was malformed.
    fn skip_past_quote(&mut self, quote: char) {
        while let Some(c) = self.cursor.next() {
            if c == quote {
                break;
            }
            if c == '\\' {
                self.cursor.next();
            }
        }
    }

    fn escape_sequence(&mut self, quote: char) -> Result<char, Diagnostic> {
        self.cursor.start_span();
        self.cursor.next(); // '\\'

        match self.cursor.next() {
            Some('x') => {
                let digits = self.hex_digits(quote, 2)?;
                let escape = self.cursor.end_span();
                code_point(&digits, escape)
            }
            Some('u') => self.unicode_escape(quote),
            Some(c) => match simple_escape(c) {
                Some(decoded) => {
                    self.cursor.end_span();
                    Ok(decoded)
                }
                None => {
                    let span = self.cursor.end_span();
                    self.warn(
                        Diagnostic::new(span, "invalid escape sequence")
                            .with_hint(format!("`\\{c}` is not a known escape"))
                            .with_replacement(c.to_string()),
                    );
                    Ok(c)
                }
            },
            None => Err(Diagnostic::new(
                self.cursor.end_span(),
                "unexpected EOF in escape sequence",
            )),
        }
    }

    /// `\u{XXXX}` or `\u{XXXXXX}`, with the `\u` already consumed.
    fn unicode_escape(&mut self, quote: char) -> Result<char, Diagnostic> {
        if self.cursor.peek() != Some('{') {
            let span = self.cursor.current_span();
            let replacement = format!("{span}{{01f327}}");
            return Err(Diagnostic::new(span, "expected `{` in unicode escape")
                .with_hint("complete the unicode escape")
                .with_replacement(replacement));
        }
        self.cursor.next();

        self.cursor.start_span();
        self.hex_digits(quote, 4)?;
        let extended = self.cursor.peek().is_some_and(|c| c.is_ascii_hexdigit())
            && self.cursor.peek_offset(1).is_some_and(|c| c.is_ascii_hexdigit());
        if extended {
            self.hex_digits(quote, 2)?;
        }
        let digits = self.cursor.end_span();

        if self.cursor.peek() != Some('}') {
            let span = self.cursor.current_span();
            let replacement = format!("{span}}}");
            return Err(Diagnostic::new(span, "unclosed bracket in escape sequence")
                .with_hint("add a bracket at the end")
                .with_replacement(replacement));
        }
        self.cursor.next();

        let escape = self.cursor.end_span();
        code_point(&digits, escape)
    }

    /// Consumes exactly `count` hex digits and returns their span.
    fn hex_digits(&mut self, quote: char, count: usize) -> Result<Span, Diagnostic> {
        self.cursor.start_span();
        for _ in 0..count {
            match self.cursor.peek() {
                None => {
                    return Err(Diagnostic::new(
                        self.cursor.end_span(),
                        "unexpected EOF in escape sequence",
                    ));
                }
                Some(c) if c == quote => {
                    return Err(Diagnostic::new(
                        self.cursor.end_span(),
                        "unexpected end of string in escape sequence",
                    )
                    .with_hint(format!("this escape needs {count} hex digits")));
                }
                Some(c) if c.is_ascii_hexdigit() => {
                    self.cursor.next();
                }
                // Left unconsumed so resync sees a `\` or quote here.
                Some(c) => {
                    return Err(Diagnostic::new(
                        self.cursor.end_span(),
                        "invalid character in hex or unicode escape",
                    )
                    .with_hint(format!("`{c}` is not a-f / A-F / 0-9")));
                }
            }
        }
        Ok(self.cursor.end_span())
    }
}

fn code_point(digits: &Span, escape: Span) -> Result<char, Diagnostic> {
    u32::from_str_radix(digits.as_str(), 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| {
            Diagnostic::new(escape, format!("invalid unicode codepoint `{digits}`"))
                .with_hint("codepoints must be at most 10ffff and outside d800-dfff")
        })
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"' | '`')
}

fn simple_escape(c: char) -> Option<char> {
    Some(match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        'a' => '\x07',
        'e' => '\x1b',
        _ => return None,
    })
}
