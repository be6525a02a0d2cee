mod completer;
mod helper;
mod highlighter;

use drizzle::Cursor;
use owo_colors::OwoColorize;
use rustyline::error::ReadlineError;
use rustyline::{Config, EditMode, Editor};

use self::helper::ReplHelper;
use crate::report::{self, Reporter};

pub fn run(reporter: &Reporter) -> Result<(), ReadlineError> {
    let config = Config::builder()
        .history_ignore_dups(true)?
        .completion_type(rustyline::CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut rl: Editor<ReplHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(ReplHelper));

    println!(
        "{} {}",
        "Drizzle".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "Type .help for REPL commands".bright_black());

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match command(trimmed) {
                    Some(Command::Exit) => break,
                    Some(Command::Help) => print_help(),
                    Some(Command::Load(path)) => match drizzle::load(path) {
                        Ok(cursor) => lex_snippet(reporter, cursor),
                        Err(err) => reporter.fail(err),
                    },
                    None => lex_snippet(reporter, Cursor::new(line.as_str(), "<repl>")),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "bye".bright_black());
                break;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

const COMMANDS: [&str; 3] = [".help", ".load ", ".exit"];

enum Command<'a> {
    Exit,
    Help,
    Load(&'a str),
}

fn command(trimmed: &str) -> Option<Command<'_>> {
    match trimmed {
        ".exit" | "exit" => Some(Command::Exit),
        ".help" => Some(Command::Help),
        _ => trimmed
            .strip_prefix(".load ")
            .map(|path| Command::Load(path.trim())),
    }
}

fn print_help() {
    println!("{}", ".help                show commands".bright_blue());
    println!("{}", ".load <file.dzl>     lex a file".bright_blue());
    println!("{}", ".exit                exit REPL".bright_blue());
}

fn lex_snippet(reporter: &Reporter, cursor: Cursor) {
    for line in snippet_lines(reporter, cursor) {
        println!("{line}");
    }
}

fn snippet_lines(reporter: &Reporter, cursor: Cursor) -> Vec<String> {
    let lexed = reporter.lex(cursor);
    let color = reporter.color();
    let mut lines: Vec<String> = lexed
        .tokens
        .iter()
        .map(|token| report::token_line(token, color))
        .collect();
    if lines.is_empty() && lexed.errors == 0 {
        let empty = "no tokens";
        lines.push(if color {
            empty.bright_black().to_string()
        } else {
            empty.to_string()
        });
    }
    lines
}

/// Whether `source` ends inside a string or with an unclosed bracket.
pub fn needs_more_input(source: &str) -> bool {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in source.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Some(_) if ch == '\\' => escaped = true,
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None => match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '(' | '{' | '[' => depth += 1,
                ')' | '}' | ']' => depth -= 1,
                _ => {}
            },
        }
    }

    quote.is_some() || depth > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_input_is_complete() {
        assert!(!needs_more_input("a = [1, 2] + f(x)"));
        assert!(!needs_more_input("'it\\'s' + \"{\""));
        assert!(!needs_more_input("}"));
    }

    #[test]
    fn open_brackets_need_more() {
        assert!(needs_more_input("if x {"));
        assert!(needs_more_input("f(a, [b"));
    }

    #[test]
    fn open_strings_need_more() {
        assert!(needs_more_input("'abc"));
        assert!(needs_more_input("`multi\nline"));
        assert!(needs_more_input("\"ends with escaped quote\\\""));
    }

    #[test]
    fn snippet_output_follows_color_setting() {
        let plain = Reporter::new(report::ReportStyle::Plain, false, 1);
        let lines = snippet_lines(&plain, Cursor::new("return 'x'", "<repl>"));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| !line.contains('\u{1b}')));
        assert_eq!(snippet_lines(&plain, Cursor::new("  ", "<repl>")), vec!["no tokens"]);

        let colored = Reporter::new(report::ReportStyle::Plain, true, 1);
        let lines = snippet_lines(&colored, Cursor::new("return", "<repl>"));
        assert!(lines[0].contains('\u{1b}'));
    }

    #[test]
    fn commands() {
        assert!(matches!(command(".exit"), Some(Command::Exit)));
        assert!(matches!(command(".help"), Some(Command::Help)));
        assert!(matches!(command(".load  a.dzl "), Some(Command::Load("a.dzl"))));
        assert!(command("return 1").is_none());
    }
}
