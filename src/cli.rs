use crate::catalog::Manifest;
use crate::error::{Diagnostic, Result};
use crate::index::{TokenIndex, build_index};
use crate::render::{RenderedSnippet, render_json};
use crate::resolve::{Resolver, collect_macro_usage_blocks, filter_by_relevance};
use crate::source::SourceReader;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "symbol-examples")]
#[command(about = "Find example snippets that demonstrate a symbol", long_about = None)]
pub struct Cli {
    /// Catalog manifest listing the examples and their sources
    #[arg(short, long, global = true, default_value = "examples.toml")]
    pub manifest: String,

    /// Where to cache the token index between runs
    #[arg(long, global = true)]
    pub cache: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build (or load) the token index and print its size
    Index,
    /// List the examples that use any of the given symbols
    Examples {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the best snippets for the given symbols
    Snippets {
        #[arg(required = true)]
        names: Vec<String>,
        /// Require this receiver, type or `Type::member` near each match
        #[arg(short, long = "anchor")]
        anchors: Vec<String>,
        #[arg(long)]
        json: bool,
        /// Keep member matches whose owning type is not in sight
        #[arg(long)]
        no_strict: bool,
    },
    /// Print usage notes for every macro in the manifest
    Macros,
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// Runs one command against the manifest named on the command line.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let manifest_path = PathBuf::from(expand_tilde(&cli.manifest).as_ref());
    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to load catalog manifest {}", manifest_path.display()))?;
    let catalog = manifest.catalog();
    let sources = SourceReader::new(manifest.root.clone());

    let index = match &cli.cache {
        Some(path) => {
            let path = PathBuf::from(expand_tilde(path).as_ref());
            TokenIndex::load_or_build(&catalog, &sources, &path)
        }
        None => build_index(&catalog, &sources),
    };

    let resolver = Resolver::new(&catalog, &sources)
        .with_index(&index)
        .with_pages(&manifest.pages)
        .with_heuristics(manifest.heuristics.clone());

    match &cli.command {
        Commands::Index => {
            writeln!(
                out,
                "{} tokens across {} of {} examples",
                index.token_count(),
                index.example_count(),
                catalog.len()
            )?;
        }
        Commands::Examples { names } => {
            let resolved = resolver.resolve_symbol(names);
            report(&resolved.diagnostics);
            if resolved.value.is_empty() {
                suggest(&index, names, out)?;
            }
            for example in resolved.value {
                writeln!(out, "{}\t{}\t{}", example.id, example.category, example.title)?;
            }
        }
        Commands::Snippets {
            names,
            anchors,
            json,
            no_strict,
        } => {
            let resolved = resolver.resolve_symbol_with_snippets(names, anchors);
            report(&resolved.diagnostics);
            let searched = resolver.search_names(names).value;
            let results = filter_by_relevance(resolved.value, &searched, !no_strict, &sources);

            let tokens: Vec<&str> = searched.iter().chain(anchors).map(String::as_str).collect();
            if *json {
                let rendered = render_json(&results, &tokens).context("Failed to serialize snippets")?;
                writeln!(out, "{rendered}")?;
            } else {
                if results.is_empty() {
                    suggest(&index, names, out)?;
                }
                for result in &results {
                    let shown = sources.display_path(&result.src);
                    writeln!(out, "{}", RenderedSnippet::new(result, &tokens).to_markdown(&shown))?;
                }
            }
        }
        Commands::Macros => {
            let resolved = collect_macro_usage_blocks(&manifest.macros, &catalog, &sources);
            report(&resolved.diagnostics);
            for block in resolved.value {
                writeln!(out, "{block}")?;
            }
        }
    }
    Ok(())
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        tracing::warn!("{}", diagnostic);
    }
}

fn suggest(index: &TokenIndex, names: &[String], out: &mut dyn Write) -> Result<()> {
    for name in names {
        let suggestions = index.suggest(name, 5);
        if suggestions.is_empty() {
            writeln!(out, "No examples use '{name}'")?;
            continue;
        }
        let listed: Vec<&str> = suggestions.iter().map(|(token, _)| token.as_str()).collect();
        writeln!(out, "No examples use '{name}'. Did you mean: {}?", listed.join(", "))?;
    }
    Ok(())
}
