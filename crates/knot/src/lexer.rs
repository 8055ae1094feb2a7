//! Whitespace/bracket/quote tokenizer (spec.md §6 preprocessor contract).
//!
//! Grounded on `examples/original_source/src/lexer.c`'s `tokenize`: splits
//! on whitespace, and always treats `'`, `(`, `)` as their own
//! single-character token regardless of surrounding whitespace.

/// Splits preprocessed source into tokens. `'`, `(`, and `)` always form
/// their own token; everything else is a maximal run of non-whitespace,
/// non-bracket, non-quote characters.
#[must_use]
pub fn tokenize(source: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in source.chars() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '\'' | '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
