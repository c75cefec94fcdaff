//! edges command - Show the filters derived from a module descriptor

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::descriptor::ModuleDescriptor;
use crate::core::filter;
use crate::core::types::ServicesMode;
use crate::ui::output;

/// Label used for the platform dependency.
const SYSTEM_LABEL: &str = "<system>";

#[derive(Debug, Serialize)]
struct EdgesReport {
    dependencies: Vec<EdgeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<EdgeReport>,
}

#[derive(Debug, Serialize)]
struct EdgeReport {
    target: String,
    services: ServicesMode,
    optional: bool,
    import: String,
    export: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    paths: Vec<PathVerdict>,
}

#[derive(Debug, Serialize)]
struct PathVerdict {
    path: String,
    import: bool,
    export: bool,
}

/// Print the import and export filter of every dependency in a descriptor.
///
/// With `paths`, also print whether each path crosses each edge.
pub fn edges(ctx: &Context, descriptor: &Path, paths: &[String]) -> Result<()> {
    let module = ModuleDescriptor::load(descriptor)
        .with_context(|| format!("Invalid module descriptor '{}'", descriptor.display()))?;
    let resolved = module.resolve_all();

    let report = EdgesReport {
        dependencies: resolved
            .edges
            .iter()
            .map(|edge| EdgeReport {
                target: edge.target.to_string(),
                services: edge.services,
                optional: edge.optional,
                import: edge.import_filter.to_string(),
                export: edge.export_filter.to_string(),
                paths: verdicts(paths, |p| {
                    (edge.import_filter.accept(p), edge.export_filter.accept(p))
                }),
            })
            .collect(),
        system: resolved.system.as_ref().map(|edge| EdgeReport {
            target: SYSTEM_LABEL.to_string(),
            services: edge.services,
            optional: edge.optional,
            import: filter::in_set(edge.import_paths.iter().cloned()).to_string(),
            export: edge.export_filter.to_string(),
            paths: verdicts(paths, |p| (edge.can_import(p), edge.export_filter.accept(p))),
        }),
    };

    if ctx.json {
        output::json(&report)?;
        return Ok(());
    }

    if report.dependencies.is_empty() && report.system.is_none() {
        output::print("No dependencies declared", ctx.verbosity);
        return Ok(());
    }

    for edge in report.dependencies.iter().chain(report.system.as_ref()) {
        print_edge(edge);
    }
    Ok(())
}

fn verdicts(paths: &[String], check: impl Fn(&str) -> (bool, bool)) -> Vec<PathVerdict> {
    paths
        .iter()
        .map(|path| {
            let (import, export) = check(path);
            PathVerdict {
                path: path.clone(),
                import,
                export,
            }
        })
        .collect()
}

fn print_edge(edge: &EdgeReport) {
    let mut flags = vec![format!("services={}", edge.services)];
    if edge.optional {
        flags.push("optional".to_string());
    }
    output::result(format!("{} ({})", edge.target, flags.join(", ")));
    output::result(format!("  import: {}", edge.import));
    output::result(format!("  export: {}", edge.export));

    let lines: Vec<String> = edge
        .paths
        .iter()
        .map(|v| {
            format!(
                "{}: import={} export={}",
                v.path,
                output::format_verdict(v.import),
                output::format_verdict(v.export)
            )
        })
        .collect();
    if !lines.is_empty() {
        output::result(output::format_list(&lines, "  "));
    }
}
