//! path command - Resolve layered module roots into a search path

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::layers::LayeredPathResolver;
use crate::ui::output;

/// Print the resolved module path, one directory per line.
pub fn path(ctx: &Context, roots: &[PathBuf]) -> Result<()> {
    let layout = ctx.config.layout();
    tracing::debug!(roots = roots.len(), layers_dir = %layout.layers_dir, "resolving module path");

    let resolver = LayeredPathResolver::filesystem(layout);
    let path = resolver
        .resolve_layered_module_path(roots)
        .context("Failed to resolve layered module path")?;

    if ctx.json {
        output::json(&path)?;
        return Ok(());
    }

    for dir in &path {
        output::result(dir.display());
    }
    Ok(())
}
