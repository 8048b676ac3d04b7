//! The `exograde zones` command.

use std::path::PathBuf;

use anyhow::Result;

use exograde_core::zones;

use super::score::load_submission;

pub fn execute(submission_path: PathBuf, format: String) -> Result<()> {
    let fields = load_submission(&submission_path)?;
    let resolution = zones::resolve(&fields);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        "text" => {
            use comfy_table::{Cell, Table};

            let mut table = Table::new();
            table.set_header(vec!["Id", "X", "Y", "Legend"]);
            for zone in &resolution.zones {
                table.add_row(vec![
                    Cell::new(zone.id),
                    Cell::new(zone.x),
                    Cell::new(zone.y),
                    Cell::new(&zone.legend),
                ]);
            }
            println!("{table}");
            println!("{} zone(s) recovered.", resolution.zones.len());

            for warning in &resolution.warnings {
                println!("  WARNING: {warning}");
            }
        }
        other => anyhow::bail!("unknown format: {other}"),
    }

    Ok(())
}
