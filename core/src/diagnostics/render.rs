//! Source-context rendering for spans.
//!
//! Produces the gutter-and-caret blocks printed under every diagnostic:
//!
//! ```text
//!     ╭── main.dzl ── (2:9..2:12) ──
//!   1 │ import io
//!   2 │ limit = 0x_ff
//!     │         ^^^
//!   3 │ return limit
//! ```

use owo_colors::{OwoColorize, Style};
use unicode_width::UnicodeWidthChar;

use super::span::Span;

const TAB_WIDTH: usize = 4;

/// Knobs for [`Span::context_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextOptions {
    /// Print the `╭── path ── (range) ──` header line.
    pub include_meta: bool,
    /// Lines of context shown before and after the span.
    pub lines: usize,
    /// Character used for the underline.
    pub highlight: char,
    /// Emit ANSI styling.
    pub color: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            include_meta: true,
            lines: 1,
            highlight: '^',
            color: false,
        }
    }
}

/// Terminal columns taken by `text`. Wide glyphs count double, tabs count
/// as [`TAB_WIDTH`].
pub fn display_width(text: &str) -> usize {
    text.chars()
        .map(|ch| match ch {
            '\t' => TAB_WIDTH,
            _ => ch.width().unwrap_or(0),
        })
        .sum()
}

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }
}

pub(crate) fn context(span: &Span, options: &ContextOptions) -> String {
    let painter = Painter {
        color: options.color,
    };
    let text = span.file().text();
    let raw_lines: Vec<&str> = text.split('\n').collect();
    let mut line_starts = Vec::with_capacity(raw_lines.len());
    let mut offset = 0;
    for line in &raw_lines {
        line_starts.push(offset);
        offset += line.len() + 1;
    }

    let start = span.start();
    let end = span.end();
    let last_index = raw_lines.len() - 1;
    let first_row = start.row.min(last_index);
    // A span that stops at the very start of a line does not touch that line.
    let last_row = if end.column == 0 && end.row > start.row {
        end.row - 1
    } else {
        end.row
    }
    .clamp(first_row, last_index);

    let before = first_row.saturating_sub(options.lines);
    let after = (last_row + options.lines).min(last_index);
    let gutter_width = (after + 1).to_string().len();

    let gutter_style = Style::new().blue();
    let number = |n: Option<usize>, style: Style| {
        let label = n.map(|n| n.to_string()).unwrap_or_default();
        painter.paint(&format!(" {label:>gutter_width$} │ "), style)
    };
    let display_line = |row: usize| {
        let line = raw_lines[row];
        line.strip_suffix('\r').unwrap_or(line).replace('\t', "    ")
    };

    let mut out = Vec::new();

    if options.include_meta {
        let location = format!("({}..{})", start, end);
        out.push(format!(
            "{}{} {} {} {} {}",
            " ".repeat(gutter_width + 2),
            painter.paint("╭──", gutter_style),
            painter.paint(span.file().path(), Style::new().bold()),
            painter.paint("──", gutter_style),
            painter.paint(&location, Style::new().red()),
            painter.paint("──", gutter_style),
        ));
    }

    for row in before..first_row {
        out.push(format!(
            "{}{}",
            number(Some(row + 1), gutter_style),
            painter.paint(&display_line(row), Style::new().bright_black())
        ));
    }

    let single_line = first_row == last_row;
    for row in first_row..=last_row {
        let raw = raw_lines[row];
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let line_start = line_starts[row];
        let lo = if row == start.row {
            start.index - line_start
        } else {
            0
        }
        .min(line.len());
        let hi = if row == end.row {
            end.index - line_start
        } else {
            line.len()
        }
        .clamp(lo, line.len());

        let offset = display_width(&line[..lo]);
        let mut width = display_width(&line[lo..hi]);
        if single_line {
            width = width.max(1);
        }

        out.push(format!(
            "{}{}",
            number(Some(row + 1), Style::new().cyan()),
            display_line(row)
        ));
        if width > 0 {
            let underline = options.highlight.to_string().repeat(width);
            out.push(format!(
                "{}{}{}",
                number(None, Style::new().cyan()),
                " ".repeat(offset),
                painter.paint(&underline, Style::new().red().bold())
            ));
        }
    }

    for row in last_row + 1..=after {
        out.push(format!(
            "{}{}",
            number(Some(row + 1), gutter_style),
            painter.paint(&display_line(row), Style::new().bright_black())
        ));
    }

    out.join("\n")
}
