use drizzle::diagnostics::emitter::render;
use drizzle::{
    ContextOptions, Cursor, Diagnostic, DrizzleError, Lexer, Severity, Token, TokenKind, lex,
    lex_file,
};
use miette::Diagnostic as _;

struct Outcome {
    token: Option<Token>,
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
}

/// Runs a single `next()` call and records what the handlers saw.
fn lex_once(source: &str) -> Outcome {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = Lexer::new(Cursor::new(source, "test.dzl"))
        .with_warning_handler(|w| warnings.push(w))
        .with_error_handler(|e| errors.push(e));
    let token = lexer.next();
    assert_eq!(lexer.cursor().span_depth(), 0, "span stack leaked");
    drop(lexer);
    Outcome {
        token,
        warnings,
        errors,
    }
}

fn expect_error(source: &str) -> Diagnostic {
    let outcome = lex_once(source);
    assert!(outcome.token.is_none(), "errors must not produce a token");
    outcome
        .errors
        .into_iter()
        .next()
        .expect("expected error, but error handler was not called")
}

fn expect_warning(source: &str) -> (Diagnostic, Token) {
    let outcome = lex_once(source);
    assert!(outcome.errors.is_empty(), "unexpected error: {:?}", outcome.errors);
    let warning = outcome
        .warnings
        .into_iter()
        .next()
        .expect("expected warning, but warning handler was not called");
    let token = outcome.token.expect("warnings must still produce a token");
    (warning, token)
}

#[test]
fn float_without_fractional_part() {
    let e = expect_error("5.");
    assert!(e.message.contains("fractional"));
    assert_eq!(e.span.as_str(), "5.");
    assert_eq!(e.replace_with.as_deref(), Some("5.0"));
}

#[test]
fn missing_exponent() {
    for source in ["123e", "123e ", "12.3e", "4e+"] {
        let e = expect_error(source);
        assert!(e.message.contains("exponent"), "{source}: {}", e.message);
    }
}

#[test]
fn trailing_underscore() {
    let e = expect_error("10_");
    assert!(e.message.contains("underscore"));
    assert_eq!(e.replace_with.as_deref(), Some("10"));

    let e = expect_error("0x10__");
    assert!(e.message.contains("underscore"));
    assert_eq!(e.replace_with.as_deref(), Some("0x10"));
}

#[test]
fn underscore_after_base_tag() {
    let e = expect_error("0x_10");
    assert!(e.message.contains("base tag"));
    assert_eq!(e.span.as_str(), "0x_10");
    assert_eq!(e.replace_with.as_deref(), Some("0x10"));
}

#[test]
fn base_tag_without_digits() {
    let e = expect_error("0b ");
    assert!(e.message.contains("base tag"));
    assert_eq!(e.span.as_str(), "0b");
}

#[test]
fn digit_outside_base() {
    let e = expect_error("0b102");
    assert!(e.message.contains("invalid digit"));
    assert_eq!(e.span.as_str(), "0b102");
}

#[test]
fn number_too_large_for_f64() {
    let e = expect_error("1e999");
    assert!(e.message.contains("couldn't parse"));
}

#[test]
fn big_integer_warns() {
    let (w, token) = expect_warning("417298374983274234329472384239");
    assert_eq!(
        w.message,
        "number cannot be represented exactly as a 64-bit integer; value may lose precision"
    );
    let TokenKind::Float(value) = token.kind else {
        panic!("expected a float, got {:?}", token.kind);
    };
    assert!((value / 4.172_983_749_832_742e29 - 1.0).abs() < 1e-12);
}

#[test]
fn integer_too_large_for_f64() {
    for source in [format!("1{}", "0".repeat(400)), format!("0x{}", "f".repeat(300))] {
        let outcome = lex_once(&source);
        assert!(outcome.token.is_none(), "{source}");
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].message.contains("couldn't parse"));
        assert_eq!(outcome.errors[0].span.as_str(), source);
    }
}

#[test]
fn float_rounding_onto_two_pow_53_warns() {
    let (w, token) = expect_warning("9007199254740993.0");
    assert!(w.message.contains("precision"));
    assert_eq!(token.kind, TokenKind::Integer(9_007_199_254_740_992));
}

#[test]
fn big_float_warns() {
    let (w, token) = expect_warning("417298374983274234329472384239.2534343");
    assert!(w.message.contains("precision"));
    assert!(matches!(token.kind, TokenKind::Float(_)));
}

#[test]
fn big_hex_warns() {
    let (w, token) = expect_warning("0xffffffffffffffffffffffffff");
    assert!(w.message.contains("precision"));
    assert_eq!(w.span.as_str(), "0xffffffffffffffffffffffffff");
    assert!(matches!(token.kind, TokenKind::Float(_)));
}

#[test]
fn unclosed_string() {
    let e = expect_error("'abc");
    assert!(e.message.contains("unclosed"));
    assert_eq!(e.span.as_str(), "'abc");
    assert_eq!(e.replace_with.as_deref(), Some("'abc'"));
}

#[test]
fn unclosed_string_after_trailing_backslash() {
    let e = expect_error(r"'abc\");
    assert!(e.message.contains("unclosed"));
}

#[test]
fn eof_in_hex_escape() {
    let e = expect_error(r"'a\x");
    assert!(e.message.contains("unclosed") || e.message.contains("EOF"));
}

#[test]
fn invalid_char_in_hex_escape() {
    let e = expect_error(r"'a\xgf'");
    assert!(e.message.contains("invalid"));
    assert!(e.hint.as_deref().is_some_and(|hint| hint.contains('g')));
}

#[test]
fn invalid_hex_char_points_at_the_char() {
    let e = expect_error(r"'\x4z'");
    assert!(e.message.contains("invalid character"));
    assert_eq!(e.span.end().index, 4);
}

#[test]
fn backslash_in_hex_escape_resyncs_at_closing_quote() {
    let mut errors = Vec::new();
    let tokens = Lexer::new(Cursor::new(r"'\x4\'abc' next", "test.dzl"))
        .with_warning_handler(|_| {})
        .with_error_handler(|e| errors.push(e))
        .tokenize();
    let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Identifier("next".into())]);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("invalid character"));
}

#[test]
fn end_of_string_in_escape() {
    let e = expect_error(r"'a\xa'");
    assert!(e.message.contains("end of string"));
}

#[test]
fn unicode_escape_without_brace() {
    let e = expect_error(r"'a\u'");
    assert!(e.message.contains('{'));
    assert_eq!(e.replace_with.as_deref(), Some(r"\u{01f327}"));
}

#[test]
fn unclosed_unicode_escape() {
    let e = expect_error(r"'a\u{ffef'");
    assert!(e.message.contains("unclosed"));
    assert_eq!(e.replace_with.as_deref(), Some(r"\u{ffef}"));
}

#[test]
fn invalid_unicode_codepoints() {
    for source in [r"'\u{d800}'", r"'\u{ffffff}'"] {
        let e = expect_error(source);
        assert!(e.message.contains("codepoint"), "{source}");
    }
}

#[test]
fn invalid_escape_sequence_warns() {
    let (w, token) = expect_warning(r"'\g'");
    assert!(w.message.contains("invalid escape"));
    assert_eq!(w.span.as_str(), r"\g");
    assert_eq!(token.kind, TokenKind::String("g".into()));
}

#[test]
fn unexpected_character() {
    let e = expect_error("#");
    assert!(e.message.contains("unexpected character"));
    assert_eq!(e.span.as_str(), "#");
}

#[test]
fn lexing_resumes_after_errors() {
    let mut errors = Vec::new();
    let tokens = Lexer::new(Cursor::new(r"a # '\xzz' b 5 c", "test.dzl"))
        .with_warning_handler(|_| {})
        .with_error_handler(|e| errors.push(e))
        .tokenize();
    let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier("a".into()),
            TokenKind::Identifier("b".into()),
            TokenKind::Integer(5),
            TokenKind::Identifier("c".into()),
        ]
    );
    assert_eq!(errors.len(), 2);
}

#[test]
fn lex_collects_errors() {
    let failure = lex("'open", "test.dzl").expect_err("lexing should fail");
    assert_eq!(failure.diagnostics.len(), 1);
    assert_eq!(failure.reports.len(), 1);
    assert!(failure.to_string().contains("1 error"));
}

#[test]
fn lex_file_reports_unreadable_path() {
    let err = lex_file("does/not/exist.dzl").expect_err("missing file");
    match err {
        DrizzleError::Io { path, .. } => assert_eq!(path, "does/not/exist.dzl"),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn lex_ignores_warnings() {
    let tokens = lex(r"'\q'", "test.dzl").expect("warnings are not failures");
    assert_eq!(tokens.len(), 1);
}

#[test]
fn render_includes_context_and_hint() {
    let e = expect_error("'abc");
    let text = render(Severity::Error, &e, &ContextOptions::default());
    assert!(text.starts_with("error: unclosed string\n"));
    assert!(text.contains(" 1 │ 'abc"));
    assert!(text.contains("^^^^"));
    assert!(text.ends_with("hint: close the string: `'abc'`"));
}

#[test]
fn report_carries_severity_and_help() {
    let (w, _) = expect_warning(r"'\g'");
    let report = w.to_report(Severity::Warning);
    assert_eq!(report.severity(), Some(miette::Severity::Warning));
    assert!(report.help().is_some());
    assert_eq!(report.span.offset(), 1);
    assert_eq!(report.span.len(), 2);
}
