mod common;

use assert2::check;
use common::{Corpus, corpus};
use rstest::rstest;
use symbol_examples::{TokenIndex, build_index, find_unquoted_word};

#[rstest]
fn test_index_lists_each_example_once_per_token(corpus: Corpus) {
    let corpus = corpus
        .with_example(
            "button",
            "Button",
            &[
                ("main.cpp", "auto b = _new<AButton>();\nauto c = _new<AButton>();"),
                ("extra.cpp", "AButton* other = nullptr;"),
            ],
        )
        .with_source("label", "auto l = _new<ALabel>();\nAButton::Style s;");

    let index = build_index(&corpus.catalog(), &corpus.sources());
    check!(index.lookup("AButton") == ["button", "label"]);
    check!(index.lookup("ALabel") == ["label"]);
    check!(index.lookup("Style") == ["label"]);
    check!(index.lookup("AButton::Style") == ["label"]);
}

#[rstest]
fn test_trivial_files_are_not_indexed(corpus: Corpus) {
    let corpus = corpus
        .with_example(
            "headers",
            "Headers",
            &[(
                "main.h",
                "#pragma once\n// AHiddenWidget lives here\n#include <AUI/AHiddenWidget.h>\nusing namespace ahidden;\n{\n}\n",
            )],
        )
        .with_source("visible", "auto v = _new<AVisibleWidget>();");

    let index = build_index(&corpus.catalog(), &corpus.sources());
    check!(!index.contains("AHiddenWidget"));
    check!(index.lookup("AVisibleWidget") == ["visible"]);
    check!(index.example_count() == 1);
}

#[rstest]
fn test_cached_index_matches_fresh_build(corpus: Corpus) {
    let corpus = corpus.with_source("button", "auto b = _new<AButton>();");
    let catalog = corpus.catalog();
    let sources = corpus.sources();
    let cache = corpus.workspace.path().join(".cache/tokens.index");

    let first = TokenIndex::load_or_build(&catalog, &sources, &cache);
    let second = TokenIndex::load_or_build(&catalog, &sources, &cache);
    check!(first == second);
    check!(first == build_index(&catalog, &sources));
}

#[rstest]
fn test_suggestions_come_from_indexed_tokens(corpus: Corpus) {
    let corpus = corpus.with_source("button", "auto b = _new<AButton>();\nb->setText(\"x\");");
    let index = build_index(&corpus.catalog(), &corpus.sources());

    let suggestions = index.suggest("setTxt", 3);
    check!(suggestions.first().map(|(token, _)| token.as_str()) == Some("setText"));
}

#[rstest]
#[case(r#"call("AButton");"#, false)]
#[case(r#"call("AButton"); AButton x;"#, true)]
#[case(r#"call("escaped \" AButton");"#, false)]
#[case("AButtonGroup g;", false)]
fn test_find_unquoted_word(#[case] text: &str, #[case] expected: bool) {
    check!(find_unquoted_word("AButton", text) == expected);
}
