use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use crate::cli::Cli;
use crate::discovery::{SOURCE_EXTENSION, collect_source_files};
use crate::execution::{CheckSummary, check_all};

/// Runs the checker and returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    let start = Instant::now();

    let files = collect_source_files(&cli.path);
    println!(
        "{} {} .{SOURCE_EXTENSION} files...\n",
        "Lexing".bold().cyan(),
        files.len()
    );

    let summary = check_all(&files, cli.verbose);
    print_totals(&summary, start.elapsed().as_secs_f64());

    if summary.has_failures() && !cli.verbose {
        print_failure_sample(&summary.failures);
    }

    if summary.has_failures() { 1 } else { 0 }
}

fn print_totals(summary: &CheckSummary, elapsed_secs: f64) {
    println!("\n{}", "=".repeat(60));
    println!(
        "Clean: {} | Failed: {} | Unreadable: {}",
        summary.clean.to_string().green().bold(),
        summary.failed.to_string().red().bold(),
        summary.unreadable.to_string().yellow().bold()
    );
    println!(
        "Tokens: {} | Warnings: {} | Errors: {}",
        summary.tokens,
        summary.warnings.to_string().yellow(),
        summary.errors.to_string().red()
    );
    println!("Completed in {:.2}s", elapsed_secs);
    println!("{}", "=".repeat(60));
}

fn print_failure_sample(failures: &[(std::path::PathBuf, String)]) {
    let max_rows = 10;
    let shown = failures.len().min(max_rows);

    println!("\n{}", "Failing files:".red().bold());
    for (path, reason) in failures.iter().take(shown) {
        println!("  {} - {}", path.display(), reason);
    }
    if failures.len() > shown {
        println!(
            "  ... and {} more (use --verbose for all)",
            failures.len() - shown
        );
    }
}
