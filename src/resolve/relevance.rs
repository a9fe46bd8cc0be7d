//! Post-filter that drops results which merely declare a name instead of using it.

use super::LOCAL_BEFORE;
use crate::catalog::SnippetResult;
use crate::source::SourceReader;
use crate::text::surrounding_window;
use crate::usage::{UsageKind, UsageMatcher, member_reached_through, split_scope};

/// Keeps the results whose snippet actually uses one of `names`.
///
/// For a scope-qualified name (`Type::member`) the member must be called or
/// accessed; for a plain name the token must be constructed, qualified, called
/// or accessed, or used beyond declaring a variable. A title or source path
/// containing the token also counts.
///
/// With `strict` set and a scope-qualified name requested, a result is further
/// required to show the owning type: by name, or through a receiver variable
/// bound to that type in the lines around the snippet.
pub fn filter_by_relevance<S: AsRef<str>>(
    results: Vec<SnippetResult>,
    names: &[S],
    strict: bool,
    sources: &SourceReader,
) -> Vec<SnippetResult> {
    let query = RelevanceQuery::new(names);
    if query.tokens.is_empty() {
        return results;
    }

    let before = results.len();
    let kept: Vec<SnippetResult> = results
        .into_iter()
        .filter(|result| query.accepts(result, strict, sources))
        .collect();
    tracing::debug!("Relevance filter kept {} of {} results", kept.len(), before);
    kept
}

struct RelevanceQuery<'n> {
    tokens: Vec<UsageMatcher>,
    scoped: Vec<(&'n str, &'n str)>,
    plain: Vec<&'n str>,
}

impl<'n> RelevanceQuery<'n> {
    fn new<S: AsRef<str>>(names: &'n [S]) -> Self {
        let mut tokens: Vec<&str> = Vec::new();
        let mut scoped = Vec::new();
        let mut plain = Vec::new();

        for name in names.iter().map(AsRef::as_ref).filter(|n| !n.is_empty()) {
            match split_scope(name) {
                Some((owner, member)) => {
                    scoped.push((owner, member));
                    tokens.extend([member, owner]);
                }
                None => {
                    plain.push(name);
                    tokens.push(name);
                }
            }
        }

        let mut seen = ahash::AHashSet::new();
        tokens.retain(|token| seen.insert(*token));

        Self {
            tokens: tokens.into_iter().map(UsageMatcher::new).collect(),
            scoped,
            plain,
        }
    }

    fn member_context(&self) -> bool {
        !self.scoped.is_empty()
    }

    fn accepts(&self, result: &SnippetResult, strict: bool, sources: &SourceReader) -> bool {
        let title = result.title.to_lowercase();
        let src = result.src.to_string_lossy().to_lowercase();
        let snippet = result.snippet.as_str();

        let used = self.tokens.iter().any(|matcher| {
            let token = matcher.token().to_lowercase();
            self.used_in(matcher, snippet) || title.contains(&token) || src.contains(&token)
        });
        if !used {
            tracing::trace!("Dropping {} ({}): no usage", result.id, result.src.display());
            return false;
        }
        if !(strict && self.member_context()) {
            return true;
        }

        let labels = [title.as_str(), src.as_str()];
        if self.owner_named(snippet, &labels) {
            return true;
        }

        let full = sources.read_or_empty(&result.src);
        let local = surrounding_window(&full, snippet, LOCAL_BEFORE);
        let reached = self
            .scoped
            .iter()
            .any(|&(owner, member)| member_reached_through(snippet, &local, owner, member));
        if !reached {
            tracing::trace!("Dropping {} ({}): owner type not in scope", result.id, result.src.display());
        }
        reached
    }

    fn used_in(&self, matcher: &UsageMatcher, snippet: &str) -> bool {
        if self.member_context() {
            matcher.has_any(snippet, UsageKind::MEMBER)
        } else {
            matcher.has_any(snippet, UsageKind::FREE) || matcher.used_beyond_declaration(snippet)
        }
    }

    /// An owning type, or a requested type name, appears in the snippet or labels.
    fn owner_named(&self, snippet: &str, labels: &[&str]) -> bool {
        let owners = self.scoped.iter().map(|&(owner, _)| owner);
        let types = self
            .plain
            .iter()
            .copied()
            .filter(|name| name.starts_with(|c: char| c.is_ascii_uppercase()));

        owners.chain(types).any(|name| {
            let lowered = name.to_lowercase();
            UsageMatcher::new(name).mentioned_in(snippet)
                || labels.iter().any(|label| label.contains(&lowered))
        })
    }
}
