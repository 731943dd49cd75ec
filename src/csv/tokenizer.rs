//! Line tokenizer
//!
//! Splits one line of delimited text into field strings, honoring RFC-4180
//! style quoting: an ordinary `"` opens a quoted span, `""` inside a span is
//! a literal quote, and the separator is literal text while quoted. An
//! unterminated span simply consumes to end of line.

/// Splits `line` into field strings on `sep`.
///
/// The line must already be free of its terminator.
pub fn tokenize(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Doubled quote: literal "
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    fields.push(current);
    fields
}

/// Removes a leading UTF-8 byte-order mark. Applied to the first header
/// field only.
pub fn strip_bom(field: &str) -> &str {
    field.strip_prefix('\u{feff}').unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(tokenize("a,b,c", ','), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_separator() {
        assert_eq!(tokenize("a,\"b,c\",d", ','), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_doubled_quote_escape() {
        assert_eq!(
            tokenize("\"He said \"\"hi\"\"\"", ','),
            vec!["He said \"hi\""]
        );
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(tokenize(",,", ','), vec!["", "", ""]);
        assert_eq!(tokenize("", ','), vec![""]);
    }

    #[test]
    fn test_unterminated_quote_consumes_to_eol() {
        assert_eq!(tokenize("a,\"b,c", ','), vec!["a", "b,c"]);
    }

    #[test]
    fn test_alternate_separator() {
        assert_eq!(tokenize("a;b;c", ';'), vec!["a", "b", "c"]);
        // Comma is literal under a different separator
        assert_eq!(tokenize("a,b;c", ';'), vec!["a,b", "c"]);
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}Name"), "Name");
        assert_eq!(strip_bom("Name"), "Name");
    }
}
