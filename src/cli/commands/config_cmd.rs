//! config command - Print the effective configuration

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::layers::LayoutConfig;
use crate::ui::output;

/// Configuration after defaults and overrides are applied.
#[derive(Debug, Serialize)]
struct EffectiveConfig {
    layout: LayoutConfig,
    output: EffectiveOutput,
}

#[derive(Debug, Serialize)]
struct EffectiveOutput {
    json: bool,
}

/// Print the effective configuration as TOML (or JSON with `--json`).
pub fn config(ctx: &Context) -> Result<()> {
    let effective = EffectiveConfig {
        layout: ctx.config.layout(),
        output: EffectiveOutput {
            json: ctx.config.json_output(),
        },
    };

    if ctx.json {
        output::json(&effective)?;
        return Ok(());
    }

    let sources = [
        ("global", ctx.config.global_config_loaded_from()),
        ("explicit", ctx.config.explicit_config_loaded_from()),
    ];
    for (scope, path) in sources {
        let shown = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        output::print(format!("# {} config: {}", scope, shown), ctx.verbosity);
    }

    let rendered =
        toml::to_string_pretty(&effective).context("Failed to render configuration")?;
    output::result(rendered.trim_end());
    Ok(())
}
