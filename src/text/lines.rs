//! Line-level helpers: trivial-line classification and line windows.

/// Returns true if a line carries no evidence of usage.
///
/// Trivial lines are blank lines, comments, `#include`/`using` directives,
/// bare braces and preprocessor directives (guards, defines, pragmas).
pub fn is_trivial_line(line: &str) -> bool {
    let line = line.trim();
    line.is_empty()
        || line.starts_with("//")
        || line.starts_with("/*")
        || line.starts_with('*')
        || line.starts_with("using ")
        || line.starts_with('#')
        || line == "{"
        || line == "}"
}

/// Returns true if every non-blank line is trivial.
///
/// Such a file can only declare or include things, never demonstrate usage.
pub fn is_trivial_file(text: &str) -> bool {
    text.lines().all(is_trivial_line)
}

/// Zero-based index of the line containing byte offset `pos`.
pub fn line_of_offset(text: &str, pos: usize) -> usize {
    let end = pos.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}

/// Lines `[line - before, line + after)`, clamped to the text, joined with `\n`.
pub fn window(lines: &[&str], line: usize, before: usize, after: usize) -> String {
    let start = line.saturating_sub(before);
    let end = lines.len().min(line + after);
    if start >= end {
        return String::new();
    }
    lines[start..end].join("\n")
}

/// Lines surrounding `snippet` inside `full_text`, padded by `pad` lines on both sides.
///
/// Falls back to the whole text when the snippet cannot be located.
pub fn surrounding_window(full_text: &str, snippet: &str, pad: usize) -> String {
    let snippet = snippet.trim();
    if snippet.is_empty() {
        return full_text.to_string();
    }
    let Some(offset) = full_text.find(snippet) else {
        return full_text.to_string();
    };

    let first = line_of_offset(full_text, offset);
    let span = snippet.matches('\n').count() + 1;
    let lines: Vec<&str> = full_text.lines().collect();
    window(&lines, first, pad, span + pad)
}
