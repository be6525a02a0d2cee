use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SpanError {
    #[error("spans are of different sources: `{left}` and `{right}`")]
    #[diagnostic(code(drizzle::span::different_sources))]
    DifferentSources { left: String, right: String },
}
