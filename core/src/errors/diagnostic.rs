use std::fmt;

use miette::{LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

use crate::diagnostics::{Severity, Span};

/// A lexical error or warning.
///
/// Built where the problem is detected and handed straight to the lexer's
/// handler; whether it is a warning or an error depends on which handler
/// receives it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct Diagnostic {
    /// Where the problem is.
    pub span: Span,
    pub message: String,
    /// How to fix it, when that is clear.
    pub hint: Option<String>,
    /// Text that could replace `span` to fix it.
    pub replace_with: Option<String>,
}

impl Diagnostic {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            hint: None,
            replace_with: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replace_with = Some(replacement.into());
        self
    }

    /// Converts into a self-contained `miette` report.
    pub fn to_report(&self, severity: Severity) -> LexReport {
        let file = self.span.file();
        let help = match (&self.hint, &self.replace_with) {
            (Some(hint), Some(replacement)) => Some(format!("{hint}: `{replacement}`")),
            (Some(hint), None) => Some(hint.clone()),
            (None, Some(replacement)) => Some(format!("replace with `{replacement}`")),
            (None, None) => None,
        };
        LexReport {
            severity,
            message: self.message.clone(),
            source_code: NamedSource::new(file.path(), file.text().to_owned()),
            span: (self.span.start().index, self.span.len()).into(),
            help,
        }
    }
}

/// A [`Diagnostic`] detached from the lexer, renderable by `miette`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LexReport {
    pub severity: Severity,
    pub message: String,
    pub source_code: NamedSource<String>,
    pub span: SourceSpan,
    pub help: Option<String>,
}

impl miette::Diagnostic for LexReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.severity {
            Severity::Warning => "drizzle::lex::warning",
            Severity::Error => "drizzle::lex::error",
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some("here".to_owned()),
            self.span,
        ))))
    }
}
