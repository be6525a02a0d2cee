mod diagnostic;
mod span_error;

pub use diagnostic::{Diagnostic, LexReport};
pub use span_error::SpanError;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Every lexical error reported while lexing one source.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("lexing failed with {} error(s)", .reports.len())]
#[diagnostic(code(drizzle::lex::failed))]
pub struct LexFailure {
    pub diagnostics: Vec<Diagnostic>,
    #[related]
    pub reports: Vec<LexReport>,
}

impl LexFailure {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        let reports = diagnostics
            .iter()
            .map(|diagnostic| diagnostic.to_report(crate::diagnostics::Severity::Error))
            .collect();
        Self {
            diagnostics,
            reports,
        }
    }
}

/// Unified error type wrapping all Drizzle front-end errors.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum DrizzleError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Span(#[from] SpanError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexFailure),

    #[error("could not read `{path}`")]
    #[diagnostic(code(drizzle::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
