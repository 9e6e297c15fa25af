//! Report rendering
//!
//! Renders comparison results as plain text, JSON, YAML or a table. The
//! table only lists releases with an update available; every other format
//! lists all of them.

mod table;

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{WhatupError, WhatupResult};
use crate::version::ChartVersionInfo;

/// Output encoding of the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
    Yaml,
    Table,
}

impl FromStr for OutputFormat {
    type Err = WhatupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            other => Err(WhatupError::InvalidFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Table => "table",
        };
        f.write_str(name)
    }
}

/// Write `results` to `out` in the requested format
pub fn render<W: Write>(
    results: &[ChartVersionInfo],
    format: OutputFormat,
    out: &mut W,
) -> WhatupResult<()> {
    tracing::debug!("Rendering {} results as {}", results.len(), format);

    match format {
        OutputFormat::Plain => render_plain(results, out),
        OutputFormat::Json => render_json(results, out),
        OutputFormat::Yaml => render_yaml(results, out),
        OutputFormat::Table => table::render_table(results, out),
    }
}

fn render_plain<W: Write>(results: &[ChartVersionInfo], out: &mut W) -> WhatupResult<()> {
    for info in results {
        if info.latest_version() != info.installed_version() {
            writeln!(
                out,
                "There is an update available for release {} ({})!",
                info.release_name(),
                info.chart_name()
            )?;
            writeln!(out, "Installed version: {}", info.installed_version())?;
            writeln!(out, "Available version: {}", info.latest_version())?;
        } else {
            writeln!(
                out,
                "Release {} ({}) is up to date.",
                info.release_name(),
                info.latest_version()
            )?;
        }
    }
    writeln!(out, "Done.")?;
    Ok(())
}

fn render_json<W: Write>(results: &[ChartVersionInfo], out: &mut W) -> WhatupResult<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    results
        .serialize(&mut serializer)
        .map_err(|e| WhatupError::Output(format!("could not encode JSON: {}", e)))?;

    out.write_all(&buf)?;
    writeln!(out)?;
    Ok(())
}

fn render_yaml<W: Write>(results: &[ChartVersionInfo], out: &mut W) -> WhatupResult<()> {
    let yaml = serde_yaml::to_string(results)
        .map_err(|e| WhatupError::Output(format!("could not encode YAML: {}", e)))?;

    out.write_all(yaml.as_bytes())?;
    Ok(())
}
