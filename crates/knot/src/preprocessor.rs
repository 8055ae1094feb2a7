//! Comment stripping and case folding (spec.md §6 preprocessor contract).
//!
//! Grounded on `examples/original_source/src/preproc.c`: everything from a
//! `;` to end-of-line becomes a space, line breaks become spaces, and every
//! other character is upper-cased — so the lexer only ever sees a single
//! logical line of whitespace-separated, already-folded tokens.

/// Blanks out `;`-comments and newlines, upper-cases everything else.
#[must_use]
pub fn preprocess(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut commenting = false;
    for c in source.chars() {
        if c == ';' {
            commenting = true;
        }
        if c == '\n' {
            commenting = false;
        }
        if commenting || c == '\n' {
            out.push(' ');
        } else {
            out.push(c.to_ascii_uppercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_source_becomes_uppercase() {
        assert_eq!(preprocess("(set 'a 5)"), "(SET 'A 5)");
    }

    #[test]
    fn comments_are_blanked_to_end_of_line() {
        let result = preprocess("(+ 1 2) ; add these\n(+ 3 4)");
        assert!(!result.contains("ADD"));
        assert!(result.trim_start().ends_with("(+ 3 4)"));
    }

    #[test]
    fn comment_ends_at_the_next_newline_not_the_source_end() {
        let result = preprocess(";comment\nSTILL-CODE");
        assert!(result.trim().ends_with("STILL-CODE"));
    }
}
