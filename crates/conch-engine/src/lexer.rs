//! Line tokenizer.
//!
//! Splits on runs of whitespace only. No quoting, escaping, or comment
//! syntax: a literal quote character is an ordinary part of a token.

/// Split a raw input line into whitespace-delimited tokens.
///
/// Runs of whitespace (space, tab, and any other Unicode whitespace) are
/// delimiters and never appear in a token. An empty or all-whitespace line
/// yields an empty vector; that is not an error. Deterministic and
/// side-effect-free.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
