use drizzle::lexer::token::{KEYWORDS, WORD_OPERATORS};
use rustyline::completion::Pair;

pub fn complete_line(line: &str, pos: usize) -> (usize, Vec<Pair>) {
    let safe_pos = pos.min(line.len());
    let prefix = &line[..safe_pos];

    let start = word_start(prefix);
    let needle = &prefix[start..];
    if needle.is_empty() {
        return (start, Vec::new());
    }

    let words = KEYWORDS
        .iter()
        .chain(WORD_OPERATORS.iter())
        .filter(|word| word.starts_with(needle))
        .map(|word| Pair {
            display: (*word).to_string(),
            replacement: (*word).to_string(),
        })
        .collect();

    (start, words)
}

fn word_start(prefix: &str) -> usize {
    prefix
        .char_indices()
        .rev()
        .find(|(_, ch)| !is_word_char(*ch))
        .map_or(0, |(idx, ch)| idx + ch.len_utf8())
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
