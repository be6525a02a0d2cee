use std::io::{self, IsTerminal};
use std::process;

use clap::Parser;
use drizzle::Cursor;
use owo_colors::OwoColorize;

mod repl;
mod report;

use report::{ColorChoice, ReportStyle, Reporter};

#[derive(Parser)]
#[command(name = "drizzle", about = "Tokenizer for Drizzle source files")]
struct Cli {
    /// Path to a .dzl file to lex
    file: Option<String>,
    /// Lex inline source instead of a file
    #[arg(long)]
    eval: Option<String>,
    /// Print token stream
    #[arg(long)]
    tokens: bool,
    /// Print tokens as JSON lines
    #[arg(long)]
    json: bool,
    /// How diagnostics are printed
    #[arg(long, value_enum, default_value_t = ReportStyle::Plain)]
    report: ReportStyle,
    /// When to use ANSI colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Lines of source shown around each diagnostic
    #[arg(long, default_value_t = 1)]
    context_lines: usize,
    /// Print version and exit
    #[arg(long)]
    version: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if cli.version {
        println!(
            "{} {}",
            "drizzle".bright_cyan().bold(),
            env!("CARGO_PKG_VERSION").bright_black()
        );
        return;
    }

    let reporter = Reporter::new(
        cli.report,
        cli.color.enabled(io::stderr().is_terminal()),
        cli.context_lines,
    );

    let cursor = match (cli.eval, cli.file) {
        (Some(code), _) => Cursor::new(code, "<eval>"),
        (None, Some(file)) => match drizzle::load(&file) {
            Ok(cursor) => cursor,
            Err(err) => {
                reporter.fail(err);
                process::exit(1);
            }
        },
        (None, None) => {
            if let Err(err) = repl::run(&reporter) {
                eprintln!("{} {err}", "repl error:".red().bold());
                process::exit(1);
            }
            return;
        }
    };
    let path = cursor.file().path().to_owned();

    let lexed = reporter.lex(cursor);
    tracing::debug!(
        path = %path,
        tokens = lexed.tokens.len(),
        warnings = lexed.warnings,
        errors = lexed.errors,
        "lexed"
    );

    let stdout_color = cli.color.enabled(io::stdout().is_terminal());
    for token in &lexed.tokens {
        if cli.json {
            match serde_json::to_string(token) {
                Ok(line) => println!("{line}"),
                Err(err) => {
                    eprintln!("{} {err}", "error:".red().bold());
                    process::exit(1);
                }
            }
        } else if cli.tokens {
            println!("{}", report::token_line(token, stdout_color));
        }
    }

    if !cli.json && !cli.tokens {
        let summary = format!(
            "{path}: {} tokens, {} warnings, {} errors",
            lexed.tokens.len(),
            lexed.warnings,
            lexed.errors
        );
        if stdout_color {
            println!("{}", summary.bright_black());
        } else {
            println!("{summary}");
        }
    }

    if lexed.errors > 0 {
        process::exit(1);
    }
}

/// Enable with `RUST_LOG=drizzle=trace` to see every token.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
