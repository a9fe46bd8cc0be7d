mod common;

use assert2::check;
use common::{Corpus, corpus, for_each_corpus};
use rstest::rstest;
use symbol_examples::{
    LookupError, MacroDecl, PageEntry, PageIndex, Resolver, StaticPageIndex, build_index,
    collect_macro_usage_blocks, compute_highlight_lines, filter_by_relevance,
};

const NO_ANCHORS: &[&str] = &[];

fn snippet_ids(corpus: &Corpus, names: &[&str], anchors: &[&str]) -> Vec<String> {
    let catalog = corpus.catalog();
    let sources = corpus.sources();
    let index = build_index(&catalog, &sources);
    let resolver = Resolver::new(&catalog, &sources).with_index(&index);
    let mut ids: Vec<String> = resolver
        .resolve_symbol_with_snippets(names, anchors)
        .into_value()
        .into_iter()
        .map(|result| result.id)
        .collect();
    ids.sort_unstable();
    ids
}

#[rstest]
#[case("AForEachUI")]
#[case("AUI_DECLARATIVE_FOR")]
fn test_alias_pair_resolves_both_examples(for_each_corpus: Corpus, #[case] name: &str) {
    check!(snippet_ids(&for_each_corpus, &[name], NO_ANCHORS) == vec!["declarative", "for_each"]);

    let catalog = for_each_corpus.catalog();
    let sources = for_each_corpus.sources();
    let mut ids: Vec<&str> = Resolver::new(&catalog, &sources)
        .resolve_symbol(&[name])
        .into_value()
        .into_iter()
        .map(|example| example.id.as_str())
        .collect();
    ids.sort_unstable();
    check!(ids == vec!["declarative", "for_each"]);
}

#[rstest]
fn test_canonical_snippet_is_centered_on_strong_pattern(for_each_corpus: Corpus) {
    let catalog = for_each_corpus.catalog();
    let sources = for_each_corpus.sources();
    let results = Resolver::new(&catalog, &sources)
        .resolve_symbol_with_snippets(&["AForEachUI"], NO_ANCHORS)
        .into_value();

    let for_each = results.iter().find(|r| r.id == "for_each").unwrap();
    check!(for_each.snippet.contains("_new<AForEachUI<AString>>(items)"));
    check!(for_each.snippet.lines().next() == Some("#include <AUI/View/AForEachUI.h>"));
}

/// `head`, seven unrelated lines, then `tail`, so `head` sits outside the
/// displayed snippet but inside the local window.
fn distant(head: &str, tail: &str) -> String {
    let filler: Vec<String> = (1..=7).map(|i| format!("int v{i} = {i};")).collect();
    format!("{head}\n{}\n{tail}\n", filler.join("\n"))
}

#[rstest]
#[case::mentioned("auto b = _new<AButton>();\nb->setText(\"x\");\n".to_string(), true)]
#[case::bound_variable(distant("AButton* b = findButton();", "b->setText(\"x\");"), true)]
#[case::constructed_nearby(distant("setContents(_new<AButton>());", "label->setText(\"x\");"), true)]
#[case::other_type(distant("auto l = _new<ALabel>();", "l->setText(\"x\");"), false)]
fn test_plain_anchor_gate(corpus: Corpus, #[case] body: String, #[case] accepted: bool) {
    let corpus = corpus.with_source("button", &body);
    let expected: Vec<String> = if accepted { vec!["button".to_string()] } else { Vec::new() };
    check!(snippet_ids(&corpus, &["setText"], &["AButton"]) == expected);
}

#[rstest]
fn test_strong_patterns_leave_unrelated_queries_alone(corpus: Corpus) {
    let mut lines = vec!["auto b = _new<AButton>();".to_string()];
    lines.extend((1..=20).map(|i| format!("int v{i} = {i};")));
    lines.push("auto list = _new<AForEachUI<AString>>(items);".to_string());
    let corpus = corpus.with_source("mixed", &lines.join("\n"));

    let catalog = corpus.catalog();
    let sources = corpus.sources();
    let results = Resolver::new(&catalog, &sources)
        .resolve_symbol_with_snippets(&["_new"], NO_ANCHORS)
        .into_value();
    check!(results.len() == 1);
    check!(results[0].snippet.contains("_new<AButton>"));
    check!(!results[0].snippet.contains("AForEachUI"));
}

#[rstest]
fn test_page_index_aliases_are_followed(corpus: Corpus) {
    let corpus = corpus
        .with_source("button", "auto b = _new<AButton>();\nb->setText(\"go\");")
        .with_source("builder", "auto b = Button { \"go\" };\nb.clicked();");

    let mut pages = StaticPageIndex::default();
    let page = PageEntry {
        url: "AButton.md".to_string(),
        title: "AButton".to_string(),
    };
    pages.insert("AButton", page.clone());
    pages.insert("Button", page);

    let catalog = corpus.catalog();
    let sources = corpus.sources();
    let resolver = Resolver::new(&catalog, &sources).with_pages(&pages);
    let mut ids: Vec<String> = resolver
        .resolve_symbol_with_snippets(&["AButton"], NO_ANCHORS)
        .into_value()
        .into_iter()
        .map(|r| r.id)
        .collect();
    ids.sort_unstable();
    check!(ids == vec!["builder", "button"]);
}

struct FailingPages;

impl PageIndex for FailingPages {
    fn find_page(&self, _name: &str) -> Result<Option<PageEntry>, LookupError> {
        Err(LookupError::new("page index", "import failed"))
    }

    fn entries(&self) -> Result<Vec<(String, PageEntry)>, LookupError> {
        Err(LookupError::new("page index", "import failed"))
    }
}

#[rstest]
fn test_failing_page_index_degrades_with_diagnostic(corpus: Corpus) {
    let corpus = corpus.with_source("button", "auto b = _new<AButton>();");
    let catalog = corpus.catalog();
    let sources = corpus.sources();
    let resolved = Resolver::new(&catalog, &sources)
        .with_pages(&FailingPages)
        .resolve_symbol_with_snippets(&["AButton"], NO_ANCHORS);

    check!(resolved.value.len() == 1);
    check!(resolved.diagnostics.len() == 1);
}

#[rstest]
fn test_quoted_only_match_loses_to_real_usage(corpus: Corpus) {
    let corpus = corpus
        .with_source("logging", "ALogger::info(\"setText was called\");")
        .with_source("label", "auto l = _new<ALabel>();\nl->setText(\"hi\");");
    check!(snippet_ids(&corpus, &["setText"], NO_ANCHORS) == vec!["label"]);
}

#[rstest]
fn test_missing_sources_contribute_nothing(corpus: Corpus) {
    let corpus = corpus.with_source("button", "auto b = _new<AButton>();");
    let mut catalog_examples: Vec<_> = corpus.catalog().examples().cloned().collect();
    catalog_examples[0].srcs.push("button/missing.cpp".into());
    let catalog = symbol_examples::ExampleCatalog::from_examples(catalog_examples);
    let sources = corpus.sources();

    let results = Resolver::new(&catalog, &sources)
        .resolve_symbol_with_snippets(&["AButton"], NO_ANCHORS)
        .into_value();
    check!(results.len() == 1);
    check!(results[0].src.ends_with("main.cpp"));
}

#[rstest]
fn test_every_source_yields_its_own_snippet(corpus: Corpus) {
    let corpus = corpus.with_example(
        "window",
        "Window",
        &[
            ("main.cpp", "auto w = _new<AWindow>();\nw->show();"),
            ("helper.cpp", "void open(AWindow& w) {\n    w.show();\n}"),
        ],
    );
    let catalog = corpus.catalog();
    let sources = corpus.sources();
    let results = Resolver::new(&catalog, &sources)
        .resolve_symbol_with_snippets(&["show"], NO_ANCHORS)
        .into_value();
    check!(results.len() == 2);
    check!(results.iter().all(|r| r.id == "window"));
}

#[rstest]
fn test_strict_member_filter_end_to_end(corpus: Corpus) {
    let corpus = corpus
        .with_source("unbound", "obj.bar();")
        .with_source("bound", "auto obj = _new<Foo>();\nobj.bar();");
    let catalog = corpus.catalog();
    let sources = corpus.sources();
    let results = Resolver::new(&catalog, &sources)
        .resolve_symbol_with_snippets(&["bar"], NO_ANCHORS)
        .into_value();
    check!(results.len() == 2);

    let strict = filter_by_relevance(results.clone(), &["Foo::bar"], true, &sources);
    check!(strict.iter().map(|r| r.id.as_str()).collect::<Vec<_>>() == vec!["bound"]);

    let loose = filter_by_relevance(results, &["Foo::bar"], false, &sources);
    check!(loose.len() == 2);
}

#[test]
fn test_highlight_skips_declaration_line() {
    check!(compute_highlight_lines("int x;\nx->show();", &["x"]) == Some("2".to_string()));
}

#[rstest]
fn test_macro_blocks_cover_every_using_source(for_each_corpus: Corpus) {
    let catalog = for_each_corpus.catalog();
    let sources = for_each_corpus.sources();
    let macros = vec![MacroDecl {
        name: "AUI_DECLARATIVE_FOR".to_string(),
    }];

    let blocks = collect_macro_usage_blocks(&macros, &catalog, &sources).into_value();
    check!(blocks.len() == 1);
    check!(blocks[0].contains("[Declarative Lists](declarative.md) — Declarative Lists example"));
    check!(blocks[0].contains("    return AUI_DECLARATIVE_FOR(i, items, AVerticalLayout) {"));
}
