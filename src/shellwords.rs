//! Shell-style word splitting for rc-file contents.
//!
//! Splits a raw text blob into words the way a POSIX shell would: runs of
//! unquoted characters, single-quoted spans and double-quoted spans, with
//! backslash escapes allowed inside quotes. Quoted whitespace is preserved
//! inside a single token.
//!
//! Two historical quirks are kept on purpose and pinned by tests:
//!
//! - an unterminated quote silently truncates the remaining input instead of
//!   raising an error;
//! - only the first backslash escape inside a quoted span is resolved; later
//!   escapes keep their backslash.

/// Splits `text` into shell-style words.
///
/// At each scan position (after skipping leading whitespace) one of three
/// alternatives is matched, in priority order: a run of characters that are
/// not whitespace, backslash or a quote; a single-quoted span; a
/// double-quoted span. Scanning stops as soon as no alternative matches, so
/// malformed input drops its tail rather than producing an error.
///
/// Adjacent segments with no intervening whitespace are NOT merged:
/// `a"b"` yields `["a", "b"]`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start();

        let Some(first) = rest.chars().next() else {
            break;
        };

        match first {
            '\'' | '"' => match quoted_span(rest, first) {
                Some((body, consumed)) => {
                    words.push(unescape_first(body));
                    rest = &rest[consumed..];
                }
                // Unterminated quote: no alternative matches, stop scanning.
                None => break,
            },
            // A bare backslash matches no alternative.
            '\\' => break,
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || matches!(c, '\\' | '\'' | '"'))
                    .unwrap_or(rest.len());
                words.push(rest[..end].to_string());
                rest = &rest[end..];
            }
        }
    }

    words
}

/// Scans a quoted span starting at the opening `quote` character.
///
/// The body may contain `\x` escape pairs or any character except an
/// unescaped closing quote. Returns the raw body and the total number of
/// bytes consumed (quotes included), or `None` if the span never closes.
fn quoted_span(s: &str, quote: char) -> Option<(&str, usize)> {
    let body_start = quote.len_utf8();
    let mut escaped = false;

    for (i, c) in s[body_start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            c if c == quote => {
                let body = &s[body_start..body_start + i];
                return Some((body, body_start + i + quote.len_utf8()));
            }
            _ => {}
        }
    }

    None
}

/// Resolves the FIRST backslash escape in `body`, leaving any later escapes
/// untouched.
fn unescape_first(body: &str) -> String {
    match body.find('\\') {
        Some(i) if i + 1 < body.len() => {
            let mut out = String::with_capacity(body.len() - 1);
            out.push_str(&body[..i]);
            out.push_str(&body[i + 1..]);
            out
        }
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bare_word() {
        assert_eq!(tokenize("lib"), vec!["lib"]);
    }

    #[test]
    fn test_quoted_spaces_preserved() {
        assert_eq!(
            tokenize(r#"--title "Foobar #123""#),
            vec!["--title", "Foobar #123"]
        );
    }

    #[test]
    fn test_single_quotes() {
        assert_eq!(tokenize("'foo bar' baz"), vec!["foo bar", "baz"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  ").is_empty());
    }

    #[test]
    fn test_multiline_input() {
        assert_eq!(
            tokenize("--output out\n\nlib src\n"),
            vec!["--output", "out", "lib", "src"]
        );
    }

    #[test]
    fn test_adjacent_segments_not_merged() {
        // Matches the original matcher: each segment is its own token.
        assert_eq!(tokenize(r#"a"b""#), vec!["a", "b"]);
        assert_eq!(tokenize("a'b'c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        assert_eq!(tokenize(r#"'it\'s'"#), vec!["it's"]);
        assert_eq!(tokenize(r#""say \"hi\"""#), vec![r#"say "hi\""#]);
    }

    #[test]
    fn test_only_first_escape_unescaped() {
        // Known quirk: the second escape keeps its backslash.
        assert_eq!(tokenize(r#""a\"b\"c""#), vec![r#"a"b\"c"#]);
    }

    #[test]
    fn test_unterminated_quote_truncates() {
        // Known quirk: the unterminated span and everything after it vanish.
        assert_eq!(tokenize(r#"foo "bar baz"#), vec!["foo"]);
        assert!(tokenize(r#""never closed"#).is_empty());
    }

    #[test]
    fn test_bare_backslash_halts_scan() {
        assert_eq!(tokenize(r"ab\cd ef"), vec!["ab"]);
    }

    #[test]
    fn test_empty_quoted_span() {
        assert_eq!(tokenize(r#""" x"#), vec!["", "x"]);
    }
}
