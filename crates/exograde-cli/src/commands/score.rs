//! The `exograde score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use exograde_core::answers::SubmittedFields;
use exograde_core::config::GradingConfig;
use exograde_core::engine::Grader;
use exograde_core::report::{ScoreResult, ScoreStatus};
use exograde_core::schema::load_exercise;

pub fn execute(
    exercise_path: PathBuf,
    submission_path: PathBuf,
    config_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = GradingConfig::load_or_default(config_path.as_deref())?;
    let raw = load_exercise(&exercise_path)?;
    let fields = load_submission(&submission_path)?;

    let grader = Grader::new(config);
    let result = grader
        .grade(&raw, &fields)
        .with_context(|| format!("failed to score {}", exercise_path.display()))?;

    match format.as_str() {
        "markdown" | "md" => {
            print!("{}", result.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        "text" => print_summary(&result),
        other => anyhow::bail!("unknown format: {other}"),
    }

    if let Some(path) = output {
        result.save_json(&path)?;
        eprintln!("Result saved to {}", path.display());
    }

    Ok(())
}

pub(crate) fn load_submission(path: &std::path::Path) -> Result<SubmittedFields> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission: {}", path.display()))?;
    let fields = SubmittedFields::from_json_str(&text)
        .with_context(|| format!("failed to parse submission: {}", path.display()))?;
    tracing::debug!("{} field(s) in {}", fields.len(), path.display());
    Ok(fields)
}

fn print_summary(result: &ScoreResult) {
    use comfy_table::{Cell, Table};

    if result.status() == ScoreStatus::ReviewOnly {
        println!("{}: review only, not scored", result.exercise_type());
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Expected", "Given", "Result"]);

    for item in result.items() {
        let position = match item.location {
            Some(loc) => format!("{} (s{}.{})", item.index + 1, loc.sentence + 1, loc.local + 1),
            None => format!("{}", item.index + 1),
        };
        table.add_row(vec![
            Cell::new(position),
            Cell::new(&item.expected),
            Cell::new(item.given.as_deref().unwrap_or("(none)")),
            Cell::new(if item.correct { "ok" } else { "wrong" }),
        ]);
    }

    println!("{table}");
    println!(
        "{}: {}% ({}/{} correct, {} omitted)",
        result.exercise_type(),
        result.score(),
        result.correct_count(),
        result.total(),
        result.omitted_count()
    );
}
