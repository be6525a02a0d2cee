use super::scanner::Lexer;
use super::token::{Token, TokenKind, WORD_OPERATORS};
use crate::diagnostics::Span;
use crate::errors::Diagnostic;

/// From this magnitude on, neighbouring integers collapse onto one `f64`.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0; // 2^53
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

/// How a scanned numeric literal should be evaluated.
enum Shape {
    /// Digits only, in the given radix (a base tag, if any, is still in the text).
    Integer(u32),
    /// Has a fraction and/or an exponent.
    Real,
}

impl Lexer<'_> {
    pub(super) fn identifier(&mut self) -> Option<Token> {
        let first = self.cursor.peek()?;
        if !is_name_start(first) {
            return None;
        }
        self.cursor.next();
        self.cursor.skip(is_name_continue);

        let span = self.cursor.end_span();
        Some(Token {
            kind: identify(span.as_str()),
            span,
        })
    }

    pub(super) fn number(&mut self) -> Result<Option<Token>, Diagnostic> {
        if !self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Ok(None);
        }

        let shape = match self.base_tag() {
            Some(radix) => self.radix_digits(radix)?,
            None => self.decimal_digits()?,
        };

        let span = self.cursor.end_span();
        let text = span.as_str();
        if text.ends_with('_') {
            let trimmed = text.trim_end_matches('_').to_owned();
            return Err(Diagnostic::new(span, "number cannot end with an underscore")
                .with_hint("remove the trailing underscore")
                .with_replacement(trimmed));
        }

        let kind = self.evaluate(shape, &span)?;
        Ok(Some(Token { kind, span }))
    }

    /// Consumes `0x`, `0c` or `0b` and returns the radix it announces.
    fn base_tag(&mut self) -> Option<u32> {
        if self.cursor.peek() != Some('0') {
            return None;
        }
        let radix = match self.cursor.peek_offset(1)? {
            'x' => 16,
            'c' => 8,
            'b' => 2,
            _ => return None,
        };
        self.cursor.next();
        self.cursor.next();
        Some(radix)
    }

    fn radix_digits(&mut self, radix: u32) -> Result<Shape, Diagnostic> {
        let leading_separator = self.cursor.peek() == Some('_');
        if !leading_separator && !self.cursor.peek().is_some_and(|c| c.is_digit(radix)) {
            let span = self.cursor.current_span();
            let replacement = format!("{span}0");
            return Err(Diagnostic::new(span, "expected digit after base tag")
                .with_hint(format!("a base-{radix} literal needs at least one digit"))
                .with_replacement(replacement));
        }

        self.cursor.skip(|c| c == '_' || c.is_digit(radix));

        if leading_separator {
            let span = self.cursor.current_span();
            let text = span.as_str();
            let replacement = format!("{}{}", &text[..2], text[2..].trim_start_matches('_'));
            return Err(Diagnostic::new(span, "expected digit after base tag")
                .with_hint("digit separators cannot follow the base tag")
                .with_replacement(replacement));
        }

        if let Some(c) = self.cursor.peek().filter(|c| c.is_ascii_alphanumeric()) {
            self.cursor.next();
            let span = self.cursor.current_span();
            return Err(Diagnostic::new(
                span,
                format!("invalid digit for base {radix} literal: `{c}`"),
            ));
        }

        Ok(Shape::Integer(radix))
    }

    fn decimal_digits(&mut self) -> Result<Shape, Diagnostic> {
        self.cursor.skip(is_decimal_char);
        let mut shape = Shape::Integer(10);

        if self.cursor.peek() == Some('.') {
            self.cursor.next();
            if !self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                let span = self.cursor.current_span();
                let replacement = format!("{span}0");
                return Err(Diagnostic::new(span, "expected fractional-part")
                    .with_hint("a float needs a digit after the `.`")
                    .with_replacement(replacement));
            }
            self.cursor.skip(is_decimal_char);
            shape = Shape::Real;
        }

        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            self.cursor.next();
            if matches!(self.cursor.peek(), Some('+' | '-')) {
                self.cursor.next();
            }
            if !self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                let span = self.cursor.current_span();
                let replacement = format!("{span}0");
                return Err(Diagnostic::new(span, "expected exponent")
                    .with_hint("an exponent is an integer, optionally signed")
                    .with_replacement(replacement));
            }
            self.cursor.skip(is_decimal_char);
            shape = Shape::Real;
        }

        Ok(shape)
    }

    fn evaluate(&mut self, shape: Shape, span: &Span) -> Result<TokenKind, Diagnostic> {
        let digits: String = span.as_str().chars().filter(|&c| c != '_').collect();

        match shape {
            Shape::Integer(radix) => {
                let digits = if radix == 10 { &digits[..] } else { &digits[2..] };
                match i64::from_str_radix(digits, radix) {
                    Ok(value) => Ok(TokenKind::Integer(value)),
                    Err(_) => {
                        let value = digits
                            .chars()
                            .filter_map(|c| c.to_digit(radix))
                            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
                        if value.is_infinite() {
                            return Err(unparsable(span.clone()));
                        }
                        self.warn(imprecise(span.clone()));
                        Ok(TokenKind::Float(value))
                    }
                }
            }
            Shape::Real => {
                let value = digits
                    .parse::<f64>()
                    .ok()
                    .filter(|value| !value.is_infinite())
                    .ok_or_else(|| unparsable(span.clone()))?;
                if value.abs() >= MAX_EXACT_FLOAT_INT {
                    self.warn(imprecise(span.clone()));
                }
                if value.fract() == 0.0 && value.abs() < I64_LIMIT {
                    Ok(TokenKind::Integer(value as i64))
                } else {
                    Ok(TokenKind::Float(value))
                }
            }
        }
    }
}

fn imprecise(span: Span) -> Diagnostic {
    Diagnostic::new(
        span,
        "number cannot be represented exactly as a 64-bit integer; value may lose precision",
    )
}

fn unparsable(span: Span) -> Diagnostic {
    Diagnostic::new(span, "couldn't parse this number")
        .with_hint("the value does not fit in a 64-bit float")
}

fn identify(text: &str) -> TokenKind {
    if WORD_OPERATORS.contains(&text) {
        TokenKind::Operator(text.to_owned())
    } else if let Some(keyword) = TokenKind::keyword(text) {
        keyword
    } else {
        TokenKind::Identifier(text.to_owned())
    }
}

fn is_name_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_digit() || unicode_ident::is_xid_continue(c)
}

fn is_decimal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '_'
}
