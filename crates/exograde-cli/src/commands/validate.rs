//! The `exograde validate` command.

use std::path::PathBuf;

use anyhow::Result;

use exograde_core::schema::{lint_content, load_exercise, load_exercise_directory};

pub fn execute(exercise_path: PathBuf) -> Result<()> {
    let exercises = if exercise_path.is_dir() {
        load_exercise_directory(&exercise_path)?
    } else {
        vec![(exercise_path.clone(), load_exercise(&exercise_path)?)]
    };

    let mut total_warnings = 0;
    let mut invalid = 0;

    for (path, raw) in &exercises {
        let title = raw.title.as_deref().unwrap_or("untitled");
        match raw.parse() {
            Ok(content) => {
                println!(
                    "{}: {} \"{title}\" ({} items)",
                    path.display(),
                    content.kind(),
                    content.item_count()
                );
                let warnings = lint_content(&content);
                for w in &warnings {
                    let prefix = w
                        .item
                        .map(|i| format!("  [{i}]"))
                        .unwrap_or_else(|| "  ".to_string());
                    println!("{prefix} WARNING: {}", w.message);
                }
                total_warnings += warnings.len();
            }
            Err(e) => {
                println!("{}: {} \"{title}\"", path.display(), raw.exercise_type);
                println!("   INVALID: {e}");
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} of {} exercise(s) failed validation", exercises.len());
    }

    if total_warnings == 0 {
        println!("All exercises valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
