use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use colored::Colorize;
use drizzle::diagnostics::emitter::render;
use drizzle::{ContextOptions, Diagnostic, Lexer, Severity};
use rayon::prelude::*;

use crate::panic_message::format_panic;

#[derive(Debug)]
pub enum FileResult {
    Clean,
    Failed(String),
    Unreadable(String),
}

pub struct FileRecord {
    pub path: PathBuf,
    pub tokens: usize,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
    pub result: FileResult,
}

#[derive(Default)]
pub struct CheckSummary {
    pub clean: usize,
    pub failed: usize,
    pub unreadable: usize,
    pub tokens: usize,
    pub warnings: usize,
    pub errors: usize,
    pub failures: Vec<(PathBuf, String)>,
}

impl CheckSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.unreadable > 0
    }
}

pub fn check_all(files: &[PathBuf], verbose: bool) -> CheckSummary {
    let records: Vec<_> = files.par_iter().map(|path| check_file(path)).collect();
    let options = ContextOptions {
        color: colored::control::SHOULD_COLORIZE.should_colorize(),
        ..ContextOptions::default()
    };

    let mut summary = CheckSummary::default();
    for record in records {
        apply_record(&mut summary, &record, verbose, &options);
    }
    summary
}

pub fn check_file(path: &Path) -> FileRecord {
    let mut record = FileRecord {
        path: path.to_path_buf(),
        tokens: 0,
        warnings: Vec::new(),
        errors: Vec::new(),
        result: FileResult::Clean,
    };

    let cursor = match drizzle::load(path) {
        Ok(cursor) => cursor,
        Err(err) => {
            let cause = std::error::Error::source(&err)
                .map(|source| format!(": {source}"))
                .unwrap_or_default();
            record.result = FileResult::Unreadable(format!("{err}{cause}"));
            return record;
        }
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();
        let tokens = Lexer::new(cursor)
            .with_warning_handler(|diagnostic| warnings.push(diagnostic))
            .with_error_handler(|diagnostic| errors.push(diagnostic))
            .tokenize();
        (tokens.len(), warnings, errors)
    }));

    match outcome {
        Ok((tokens, warnings, errors)) => {
            record.tokens = tokens;
            if let Some(first) = errors.first() {
                record.result = FileResult::Failed(format!(
                    "{} error(s), first at {}: {}",
                    errors.len(),
                    first.span.start(),
                    first.message
                ));
            }
            record.warnings = warnings;
            record.errors = errors;
        }
        Err(payload) => record.result = FileResult::Failed(format_panic(payload)),
    }
    record
}

fn apply_record(
    summary: &mut CheckSummary,
    record: &FileRecord,
    verbose: bool,
    options: &ContextOptions,
) {
    summary.tokens += record.tokens;
    summary.warnings += record.warnings.len();
    summary.errors += record.errors.len();

    let path = &record.path;
    match &record.result {
        FileResult::Clean => {
            summary.clean += 1;
            if verbose {
                println!("{} {} ({} tokens)", "OK".green(), path.display(), record.tokens);
            }
        }
        FileResult::Failed(reason) => {
            summary.failed += 1;
            if verbose {
                println!("{} {} - {}", "FAIL".red(), path.display(), reason);
            }
            summary.failures.push((path.clone(), reason.clone()));
        }
        FileResult::Unreadable(reason) => {
            summary.unreadable += 1;
            if verbose {
                println!("{} {} - {}", "SKIP".yellow(), path.display(), reason);
            }
            summary.failures.push((path.clone(), reason.clone()));
        }
    }

    if verbose {
        for warning in &record.warnings {
            println!("{}", render(Severity::Warning, warning, options));
        }
        for error in &record.errors {
            println!("{}", render(Severity::Error, error, options));
        }
    }
}
