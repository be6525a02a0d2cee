use clap::ValueEnum;
use drizzle::diagnostics::emitter::render;
use drizzle::{ContextOptions, Cursor, Diagnostic, Lexer, Severity, Token};
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportStyle {
    /// Gutter-and-caret context block with a hint line
    Plain,
    /// Graphical `miette` report
    Miette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Result of lexing one source through a [`Reporter`].
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub warnings: usize,
    pub errors: usize,
}

/// Prints diagnostics to stderr in the configured style.
pub struct Reporter {
    style: ReportStyle,
    options: ContextOptions,
}

impl Reporter {
    pub fn new(style: ReportStyle, color: bool, context_lines: usize) -> Self {
        if style == ReportStyle::Miette {
            let installed = miette::set_hook(Box::new(move |_| {
                Box::new(
                    miette::MietteHandlerOpts::new()
                        .color(color)
                        .context_lines(context_lines)
                        .build(),
                )
            }));
            if installed.is_err() {
                tracing::debug!("miette hook already installed");
            }
        }
        Self {
            style,
            options: ContextOptions {
                lines: context_lines,
                color,
                ..ContextOptions::default()
            },
        }
    }

    pub fn color(&self) -> bool {
        self.options.color
    }

    pub fn emit(&self, severity: Severity, diagnostic: &Diagnostic) {
        match self.style {
            ReportStyle::Plain => eprintln!("{}", render(severity, diagnostic, &self.options)),
            ReportStyle::Miette => {
                let report = miette::Report::new(diagnostic.to_report(severity));
                eprintln!("{report:?}");
            }
        }
    }

    /// Reports a failure that is not tied to a span, such as an unreadable file.
    pub fn fail(&self, err: drizzle::DrizzleError) {
        match self.style {
            ReportStyle::Plain => {
                let cause = std::error::Error::source(&err)
                    .map(|source| format!(": {source}"))
                    .unwrap_or_default();
                if self.color() {
                    eprintln!("{} {err}{cause}", "error:".red().bold());
                } else {
                    eprintln!("error: {err}{cause}");
                }
            }
            ReportStyle::Miette => eprintln!("{:?}", miette::Report::new(err)),
        }
    }

    /// Lexes the whole source, reporting each diagnostic as it is found.
    pub fn lex(&self, cursor: Cursor) -> Lexed {
        let mut warnings = 0;
        let mut errors = 0;
        let tokens = Lexer::new(cursor)
            .with_warning_handler(|diagnostic| {
                warnings += 1;
                self.emit(Severity::Warning, &diagnostic);
            })
            .with_error_handler(|diagnostic| {
                errors += 1;
                self.emit(Severity::Error, &diagnostic);
            })
            .tokenize();
        Lexed {
            tokens,
            warnings,
            errors,
        }
    }
}

/// One line per token: location, kind tag, source text.
pub fn token_line(token: &Token, color: bool) -> String {
    let location = format!("{:>8}", token.span.start().to_string());
    let tag = format!("{:<10}", token.kind.name());
    let text = token.span.as_str();
    if color {
        format!(
            "{} {} {}",
            location.bright_black(),
            tag.cyan(),
            text.bright_white()
        )
    } else {
        format!("{location} {tag} {text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_choice() {
        assert!(ColorChoice::Auto.enabled(true));
        assert!(!ColorChoice::Auto.enabled(false));
        assert!(ColorChoice::Always.enabled(false));
        assert!(!ColorChoice::Never.enabled(true));
    }

    #[test]
    fn token_line_without_color() {
        let tokens = drizzle::lex("x\n  return", "t.dzl").expect("should lex");
        assert_eq!(token_line(&tokens[1], false), "     2:3 return     return");
    }
}
