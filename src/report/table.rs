//! Tabular report

use std::io::Write;

use comfy_table::{Row, Table};

use crate::error::WhatupResult;
use crate::version::ChartVersionInfo;

/// Render one row per release with an update available
pub(super) fn render_table<W: Write>(results: &[ChartVersionInfo], out: &mut W) -> WhatupResult<()> {
    let mut table = Table::new();

    table.set_header(Row::from([
        "RELEASE",
        "CHART",
        "INSTALLED VERSION",
        "AVAILABLE VERSION",
    ]));

    for info in results
        .iter()
        .filter(|info| info.latest_version() != info.installed_version())
    {
        table.add_row(Row::from([
            info.release_name(),
            info.chart_name(),
            info.installed_version(),
            info.latest_version(),
        ]));
    }

    table.load_preset(comfy_table::presets::NOTHING);

    writeln!(out, "{}", table)?;
    Ok(())
}
