//! The `exograde init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("exograde.toml").exists() {
        println!("exograde.toml already exists, skipping.");
    } else {
        std::fs::write("exograde.toml", SAMPLE_CONFIG)?;
        println!("Created exograde.toml");
    }

    std::fs::create_dir_all("exercises")?;
    let example_path = std::path::Path::new("exercises/example.json");
    if example_path.exists() {
        println!("exercises/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_EXERCISE)?;
        println!("Created exercises/example.json");
    }

    std::fs::create_dir_all("submissions")?;
    let submission_path = std::path::Path::new("submissions/example.json");
    if submission_path.exists() {
        println!("submissions/example.json already exists, skipping.");
    } else {
        std::fs::write(submission_path, EXAMPLE_SUBMISSION)?;
        println!("Created submissions/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: exograde validate --exercise exercises/example.json");
    println!(
        "  2. Run: exograde score --exercise exercises/example.json --submission submissions/example.json"
    );

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# exograde configuration

# How words are matched in fill_in_blanks and word_placement:
#   "positional" - blank N must hold word N
#   "any_order"  - each submitted word consumes one matching expected word
blank_matching = "positional"

# Elided prefixes ignored when comparing underlined words.
elisions = ["l'", "d'", "n'", "m'", "t'", "s'", "c'", "j'", "qu'"]
"#;

const EXAMPLE_EXERCISE: &str = r#"{
  "title": "Le chat et la pomme",
  "exercise_type": "fill_in_blanks",
  "content": {
    "sentences": ["Le ___ mange une ___ rouge", "La ___ est belle"],
    "words": ["chat", "pomme", "maison", "voiture"]
  }
}
"#;

const EXAMPLE_SUBMISSION: &str = r#"{
  "answer_0": "chat",
  "answer_1": "pomme",
  "answer_2": "voiture"
}
"#;
