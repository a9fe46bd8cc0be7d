//! Double-quoted string detection.

/// Returns true if byte offset `pos` lies inside a double-quoted string literal.
///
/// Counts the `"` characters strictly before `pos` that are not escaped. A quote
/// is escaped when it is preceded by an odd run of backslashes. An odd count of
/// live quotes means `pos` sits inside a string.
///
/// This is a line-agnostic heuristic: it knows nothing about character literals,
/// raw strings or comments.
pub fn is_quoted(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    let end = pos.min(bytes.len());

    let mut live = 0usize;
    for (i, &b) in bytes[..end].iter().enumerate() {
        if b != b'"' {
            continue;
        }
        let backslashes = bytes[..i].iter().rev().take_while(|&&c| c == b'\\').count();
        if backslashes % 2 == 0 {
            live += 1;
        }
    }

    live % 2 == 1
}
