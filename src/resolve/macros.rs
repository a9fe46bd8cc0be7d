use super::{DISPLAY_AFTER, DISPLAY_BEFORE};
use crate::catalog::{Example, ExampleCatalog};
use crate::collab::MacroCatalog;
use crate::error::{Diagnostic, Resolved};
use crate::render::fence_language;
use crate::source::SourceReader;
use crate::text::{Lines, Pattern, Quotes, window};
use std::fmt::Write;
use std::path::Path;

/// Collapsible markdown notes showing where each documented macro is used.
///
/// Macros are visited in name order. For every macro, each example source
/// contributes at most one block, cut around the first whole-word match.
/// An unavailable macro catalog yields no blocks and a diagnostic.
pub fn collect_macro_usage_blocks(
    macros: &dyn MacroCatalog,
    catalog: &ExampleCatalog,
    sources: &SourceReader,
) -> Resolved<Vec<String>> {
    let mut decls = match macros.macros() {
        Ok(decls) => decls,
        Err(source) => {
            tracing::warn!("Macro catalog unavailable: {}", source);
            return Resolved::with_diagnostics(Vec::new(), vec![Diagnostic::MacroCatalogUnavailable { source }]);
        }
    };
    decls.sort_by(|a, b| a.name.cmp(&b.name));

    let mut blocks = Vec::new();
    for decl in decls.iter().filter(|decl| !decl.name.is_empty()) {
        let pattern = Pattern::word(&decl.name);
        let before = blocks.len();
        for example in catalog.examples() {
            for src in &example.srcs {
                let Some(text) = sources.read(src) else {
                    continue;
                };
                let Some(hit) = pattern.first(&text, Quotes::Include, Lines::Any) else {
                    continue;
                };
                let lines: Vec<&str> = text.lines().collect();
                let snippet = window(&lines, hit.line, DISPLAY_BEFORE, DISPLAY_AFTER);
                blocks.push(note_block(example, &sources.display_path(src), src, &snippet));
            }
        }
        tracing::debug!("Macro {} used in {} sources", decl.name, blocks.len() - before);
    }

    Resolved::new(blocks)
}

fn note_block(example: &Example, shown: &Path, src: &Path, snippet: &str) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "??? note \"{}\"", shown.display());
    let _ = writeln!(block, "    [{}]({}.md) — {}", example.title, example.id, example.description);
    let _ = writeln!(block, "    ```{}", fence_language(src));
    for line in snippet.lines() {
        let _ = writeln!(block, "    {line}");
    }
    block.push_str("    ```\n");
    block
}
