use std::fmt;
use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;

use super::render::ContextOptions;
use crate::errors::Diagnostic;

/// Receives every diagnostic of one severity from a lexer.
pub type Handler<'h> = Box<dyn FnMut(Diagnostic) + 'h>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Formats a diagnostic as `level: message`, the span context, and the hint
/// line when one is present.
pub fn render(severity: Severity, diagnostic: &Diagnostic, options: &ContextOptions) -> String {
    let color = options.color;
    let label = format!("{}:", severity.label());
    let (label, message) = if color {
        let label = match severity {
            Severity::Warning => label.yellow().bold().to_string(),
            Severity::Error => label.red().bold().to_string(),
        };
        (label, diagnostic.message.bold().to_string())
    } else {
        (label, diagnostic.message.clone())
    };

    let mut out = format!(
        "{label} {message}\n{}",
        diagnostic.span.context_with(options)
    );

    let hint = match (&diagnostic.hint, &diagnostic.replace_with) {
        (Some(hint), Some(replacement)) => Some(format!("hint: {hint}: `{replacement}`")),
        (Some(hint), None) => Some(format!("hint: {hint}")),
        (None, Some(replacement)) => Some(format!("hint: replace with `{replacement}`")),
        (None, None) => None,
    };
    if let Some(hint) = hint {
        out.push('\n');
        if color {
            out.push_str(&hint.bright_black().to_string());
        } else {
            out.push_str(&hint);
        }
    }
    out
}

/// The default handler: pretty-prints to stderr, styled when stderr is a
/// terminal.
pub fn stderr_handler<'h>(severity: Severity) -> Handler<'h> {
    let options = ContextOptions {
        color: io::stderr().is_terminal(),
        ..ContextOptions::default()
    };
    Box::new(move |diagnostic| {
        let rendered = render(severity, &diagnostic, &options);
        let _ = writeln!(io::stderr().lock(), "{rendered}");
    })
}
