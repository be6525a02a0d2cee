use std::sync::Arc;

use drizzle::diagnostics::render::display_width;
use drizzle::{ContextOptions, Location, SourceFile, Span, SpanError};

/// Span over the first occurrence of `needle` in `file`.
fn span_of(file: &Arc<SourceFile>, needle: &str) -> Span {
    let start = file.text().find(needle).expect("needle should be in the source");
    Span::new(
        Arc::clone(file),
        location(file, start),
        location(file, start + needle.len()),
    )
}

fn location(file: &SourceFile, index: usize) -> Location {
    let before = &file.text()[..index];
    let row = before.matches('\n').count();
    let column = before[file.line_start(index)..].chars().count();
    Location { index, row, column }
}

fn bare() -> ContextOptions {
    ContextOptions {
        include_meta: false,
        lines: 0,
        ..ContextOptions::default()
    }
}

#[test]
fn line_start_of_each_row() {
    let file = SourceFile::new("ab\ncd\n", "test.dzl");
    assert_eq!(file.line_start(0), 0);
    assert_eq!(file.line_start(2), 0);
    assert_eq!(file.line_start(3), 3);
    assert_eq!(file.line_start(6), 6);
}

#[test]
#[should_panic]
fn line_start_inside_a_char_panics() {
    let file = SourceFile::new("é", "test.dzl");
    file.line_start(1);
}

#[test]
fn span_text_and_length() {
    let file = SourceFile::new("let café = 1", "test.dzl");
    let span = span_of(&file, "café");
    assert_eq!(span.as_str(), "café");
    assert_eq!(span.to_string(), "café");
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
    assert_eq!(span.start().column, 4);
    assert_eq!(span.end().column, 8);
}

#[test]
fn join_is_order_independent() {
    let file = SourceFile::new("one two three", "test.dzl");
    let one = span_of(&file, "one");
    let three = span_of(&file, "three");

    let joined = Span::join(&one, &three).expect("same source");
    assert_eq!(joined.as_str(), "one two three");
    assert_eq!(Span::join(&three, &one).expect("same source"), joined);
}

#[test]
fn join_overlapping_spans() {
    let file = SourceFile::new("abcdef", "test.dzl");
    let left = span_of(&file, "abcd");
    let right = span_of(&file, "cdef");
    assert_eq!(Span::join(&left, &right).expect("same source").as_str(), "abcdef");
}

#[test]
fn join_rejects_different_sources() {
    let a = SourceFile::new("same", "a.dzl");
    let b = SourceFile::new("same", "b.dzl");
    let err = Span::join(&span_of(&a, "same"), &span_of(&b, "same")).unwrap_err();
    match err {
        SpanError::DifferentSources { left, right } => {
            assert_eq!(left, "a.dzl");
            assert_eq!(right, "b.dzl");
        }
    }
}

#[test]
fn spans_from_equal_text_in_different_files_differ() {
    let a = SourceFile::new("x", "same.dzl");
    let b = SourceFile::new("x", "same.dzl");
    assert_ne!(span_of(&a, "x"), span_of(&b, "x"));
}

#[test]
fn single_line_context() {
    let file = SourceFile::new("a\nlimit = 0x_ff\nb", "test.dzl");
    let span = span_of(&file, "0x_ff");
    let expected = [
        "   ╭── test.dzl ── (2:9..2:14) ──",
        " 1 │ a",
        " 2 │ limit = 0x_ff",
        "   │         ^^^^^",
        " 3 │ b",
    ]
    .join("\n");
    assert_eq!(span.context(), expected);
}

#[test]
fn context_is_repeatable() {
    let file = SourceFile::new("a\nlimit = 0x_ff\nb", "test.dzl");
    let span = span_of(&file, "limit");
    assert_eq!(span.context(), span.context());
}

#[test]
fn multi_line_context_underlines_each_row() {
    let file = SourceFile::new("ab\ncd\nef", "test.dzl");
    let span = Span::new(Arc::clone(&file), location(&file, 1), location(&file, 4));
    let expected = [" 1 │ ab", "   │  ^", " 2 │ cd", "   │ ^"].join("\n");
    assert_eq!(span.context_with(&bare()), expected);
}

#[test]
fn span_ending_at_line_start_skips_that_line() {
    let file = SourceFile::new("ab\ncd", "test.dzl");
    let span = Span::new(Arc::clone(&file), location(&file, 0), location(&file, 3));
    assert_eq!(span.context_with(&bare()), " 1 │ ab\n   │ ^^");
}

#[test]
fn empty_span_gets_one_caret() {
    let file = SourceFile::new("abc", "test.dzl");
    let here = location(&file, 1);
    let span = Span::new(Arc::clone(&file), here, here);
    assert!(span.is_empty());
    assert_eq!(span.context_with(&bare()), " 1 │ abc\n   │  ^");
}

#[test]
fn wide_characters_widen_the_underline() {
    let file = SourceFile::new("x = 東京", "test.dzl");
    let span = span_of(&file, "東京");
    assert_eq!(display_width("東京"), 4);
    assert_eq!(span.context_with(&bare()), " 1 │ x = 東京\n   │     ^^^^");
}

#[test]
fn tabs_expand_to_four_columns() {
    let file = SourceFile::new("\tx", "test.dzl");
    let span = span_of(&file, "x");
    assert_eq!(span.context_with(&bare()), " 1 │     x\n   │     ^");
}

#[test]
fn custom_highlight_character() {
    let file = SourceFile::new("abc", "test.dzl");
    let span = span_of(&file, "bc");
    let options = ContextOptions {
        highlight: '~',
        ..bare()
    };
    assert_eq!(span.context_with(&options), " 1 │ abc\n   │  ~~");
}

#[test]
fn context_lines_are_clamped_to_the_file() {
    let file = SourceFile::new("1\n2\n3\n4\n5", "test.dzl");
    let span = span_of(&file, "1");
    let options = ContextOptions {
        include_meta: false,
        lines: 2,
        ..ContextOptions::default()
    };
    assert_eq!(
        span.context_with(&options),
        " 1 │ 1\n   │ ^\n 2 │ 2\n 3 │ 3"
    );
}

#[test]
fn color_adds_escapes_only_when_enabled() {
    let file = SourceFile::new("abc", "test.dzl");
    let span = span_of(&file, "b");
    assert!(!span.context().contains('\u{1b}'));
    let colored = span.context_with(&ContextOptions {
        color: true,
        ..ContextOptions::default()
    });
    assert!(colored.contains('\u{1b}'));
}

#[test]
fn span_serializes_with_path_and_locations() {
    let file = SourceFile::new("hello", "test.dzl");
    let json = serde_json::to_value(span_of(&file, "ell")).expect("span should serialize");
    assert_eq!(json["path"], "test.dzl");
    assert_eq!(json["start"]["index"], 1);
    assert_eq!(json["end"]["column"], 4);
}
