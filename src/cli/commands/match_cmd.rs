//! match command - Test paths against a glob

use anyhow::Result;
use serde::Serialize;

use crate::cli::Context;
use crate::core::glob::Glob;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct MatchReport<'a> {
    glob: &'a str,
    regex: &'a str,
    results: Vec<Verdict<'a>>,
}

#[derive(Debug, Serialize)]
struct Verdict<'a> {
    path: &'a str,
    accept: bool,
}

/// Print `accept` or `reject` for every path.
pub fn match_paths(ctx: &Context, glob: &str, paths: &[String]) -> Result<()> {
    let compiled = Glob::compile(glob);
    let results: Vec<Verdict> = paths
        .iter()
        .map(|path| Verdict {
            path,
            accept: compiled.matches(path),
        })
        .collect();

    if ctx.json {
        output::json(&MatchReport {
            glob,
            regex: compiled.compiled(),
            results,
        })?;
        return Ok(());
    }

    output::print(format!("glob {} => {}", compiled, compiled.compiled()), ctx.verbosity);
    for verdict in &results {
        output::result(format!(
            "{}\t{}",
            output::format_verdict(verdict.accept),
            verdict.path
        ));
    }
    Ok(())
}
