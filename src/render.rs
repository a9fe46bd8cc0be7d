//! Markdown and JSON rendering of snippet results.

use crate::catalog::SnippetResult;
use crate::resolve::compute_highlight_lines;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Code fence language for a source file, `cpp` unless the extension says otherwise.
pub fn fence_language(src: &Path) -> &'static str {
    if src
        .file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case("CMakeLists.txt"))
    {
        return "cmake";
    }
    let extension = src
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "cmake" => "cmake",
        "py" => "python",
        "json" => "json",
        "xml" => "xml",
        "sh" => "bash",
        "md" => "markdown",
        "toml" => "toml",
        _ => "cpp",
    }
}

/// A snippet result together with its highlighted lines.
#[derive(Debug, Serialize)]
pub struct RenderedSnippet<'r> {
    #[serde(flatten)]
    pub result: &'r SnippetResult,
    pub hl_lines: Option<String>,
}

impl<'r> RenderedSnippet<'r> {
    pub fn new<S: AsRef<str>>(result: &'r SnippetResult, tokens: &[S]) -> Self {
        Self {
            result,
            hl_lines: compute_highlight_lines(&result.snippet, tokens),
        }
    }

    /// A heading linking the example page, its description, and the fenced snippet.
    pub fn to_markdown(&self, shown: &Path) -> String {
        let result = self.result;
        let mut out = String::new();
        let _ = writeln!(out, "### [{}]({}.md)", result.title, result.id);
        out.push('\n');
        if !result.description.is_empty() {
            let _ = writeln!(out, "{}", result.description);
            out.push('\n');
        }

        let _ = write!(out, "```{} title=\"{}\"", fence_language(&result.src), shown.display());
        if let Some(lines) = &self.hl_lines {
            let _ = write!(out, " hl_lines=\"{lines}\"");
        }
        out.push('\n');
        out.push_str(&result.snippet);
        if !result.snippet.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n");
        out
    }
}

/// Pretty JSON array of results with their highlighted lines.
pub fn render_json<S: AsRef<str>>(results: &[SnippetResult], tokens: &[S]) -> serde_json::Result<String> {
    let rendered: Vec<RenderedSnippet<'_>> = results
        .iter()
        .map(|result| RenderedSnippet::new(result, tokens))
        .collect();
    serde_json::to_string_pretty(&rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Example;
    use assert2::check;
    use rstest::rstest;
    use std::path::PathBuf;

    fn result(snippet: &str) -> SnippetResult {
        let example = Example {
            id: "button".to_string(),
            title: "Button".to_string(),
            description: "Clickable things".to_string(),
            category: "ui".to_string(),
            srcs: vec![PathBuf::from("button/src/main.cpp")],
        };
        SnippetResult::new(&example, Path::new("button/src/main.cpp"), snippet.to_string())
    }

    #[rstest]
    #[case("a/main.cpp", "cpp")]
    #[case("a/widget.H", "cpp")]
    #[case("a/CMakeLists.txt", "cmake")]
    #[case("a/build.py", "python")]
    #[case("a/noext", "cpp")]
    fn test_fence_language(#[case] path: &str, #[case] expected: &str) {
        check!(fence_language(Path::new(path)) == expected);
    }

    #[test]
    fn test_markdown_carries_highlights() {
        let result = result("auto b = _new<AButton>();\nb->setText(\"hi\");");
        let rendered = RenderedSnippet::new(&result, &["AButton::setText"]);
        let markdown = rendered.to_markdown(Path::new("button/src/main.cpp"));

        check!(markdown.starts_with("### [Button](button.md)\n\nClickable things\n\n"));
        check!(markdown.contains("```cpp title=\"button/src/main.cpp\" hl_lines=\"2\"\n"));
        check!(markdown.ends_with("b->setText(\"hi\");\n```\n"));
    }

    #[test]
    fn test_markdown_without_highlights() {
        let result = result("int x;");
        let markdown = RenderedSnippet::new(&result, &["render"]).to_markdown(Path::new("main.cpp"));
        check!(markdown.contains("```cpp title=\"main.cpp\"\n"));
    }

    #[test]
    fn test_json_flattens_result() {
        let results = vec![result("render();")];
        let json = render_json(&results, &["render"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        check!(value[0]["id"] == "button");
        check!(value[0]["hl_lines"] == "1");
        check!(value[0]["category"] == "ui");
    }
}
