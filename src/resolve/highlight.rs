use crate::usage::{UsageKind, UsageMatcher, member_name};

/// 1-based numbers of the snippet lines that use one of `tokens`, space-separated.
///
/// Qualified tokens are matched by their last segment. A line that only
/// declares a variable named after the token is skipped unless the token is
/// also called, qualified or accessed on that line. Returns `None` when no
/// line qualifies.
pub fn compute_highlight_lines<S: AsRef<str>>(snippet: &str, tokens: &[S]) -> Option<String> {
    let matchers: Vec<UsageMatcher> = tokens
        .iter()
        .map(|token| member_name(token.as_ref()))
        .filter(|token| !token.is_empty())
        .map(UsageMatcher::new)
        .collect();
    if snippet.is_empty() || matchers.is_empty() {
        return None;
    }

    let lines: Vec<String> = snippet
        .lines()
        .enumerate()
        .filter(|(_, line)| matchers.iter().any(|matcher| highlights(matcher, line)))
        .map(|(i, _)| (i + 1).to_string())
        .collect();

    (!lines.is_empty()).then(|| lines.join(" "))
}

fn highlights(matcher: &UsageMatcher, line: &str) -> bool {
    let used = matcher.has_any(line, UsageKind::LINE);
    if !used && !matcher.mentioned_in(line) {
        return false;
    }
    used || !matcher.declares_name(line)
}
