//! Span location for `export const NAME = { ... }` blocks.

use std::iter::Peekable;
use std::str::CharIndices;

use regex::Regex;

/// Locate the object body of a named export, returning byte offsets
/// `[start, end)` that exclude the enclosing braces.
///
/// Brace depth is counted with quoted string interiors treated as opaque, so
/// label values containing `}` or quote characters cannot derail the scan.
/// Template literals may contain `${...}` substitutions, which are live code:
/// they are depth-tracked themselves and may nest further quoted literals.
pub fn locate_export_block(content: &str, export_name: &str) -> Option<(usize, usize)> {
    let pattern = format!(
        r"export\s+const\s+{}\s*=\s*\{{",
        regex::escape(export_name)
    );
    let open = Regex::new(&pattern).ok()?.find(content)?;
    let start = open.end();

    let mut chars = content[start..].char_indices().peekable();
    let mut depth = 1usize;
    while let Some((offset, c)) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((start, start + offset));
                }
            }
            '\'' | '"' | '`' => skip_quoted(&mut chars, c),
            _ => {}
        }
    }
    None
}

/// Consume a quoted literal up to its closing quote. Backslash escapes the
/// next character. Inside back-quoted literals, `${` opens a substitution.
fn skip_quoted(chars: &mut Peekable<CharIndices<'_>>, quote: char) {
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '$' if quote == '`' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    skip_substitution(chars);
                }
            }
            c if c == quote => return,
            _ => {}
        }
    }
}

/// Consume a `${...}` template substitution, including nested braces and
/// nested quoted literals, resuming opaque-string tracking once it closes.
fn skip_substitution(chars: &mut Peekable<CharIndices<'_>>) {
    let mut depth = 1usize;
    while let Some((_, c)) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            '\'' | '"' | '`' => skip_quoted(chars, c),
            _ => {}
        }
    }
}
