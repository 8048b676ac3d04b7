//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn exograde() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("exograde").unwrap()
}

fn score(exercise: &str, submission: &str) -> Command {
    let mut cmd = exograde();
    cmd.arg("score")
        .arg("--exercise")
        .arg(format!("../../fixtures/exercises/{exercise}"))
        .arg("--submission")
        .arg(format!("../../fixtures/submissions/{submission}"));
    cmd
}

#[test]
fn validate_single_exercise() {
    exograde()
        .arg("validate")
        .arg("--exercise")
        .arg("../../fixtures/exercises/qcm.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("qcm \"Calcul et géographie\" (2 items)"))
        .stdout(predicate::str::contains("All exercises valid"));
}

#[test]
fn validate_directory() {
    exograde()
        .arg("validate")
        .arg("--exercise")
        .arg("../../fixtures/exercises")
        .assert()
        .success()
        .stdout(predicate::str::contains("fill_in_blanks"))
        .stdout(predicate::str::contains("drag_and_drop"))
        .stdout(predicate::str::contains("legend"))
        .stdout(predicate::str::contains("flashcards"))
        .stdout(predicate::str::contains("word_search \"Animaux cachés\" (4 items)"))
        .stdout(predicate::str::contains("underline_words"))
        .stdout(predicate::str::contains("All exercises valid"));
}

#[test]
fn validate_reports_invalid_content() {
    exograde()
        .arg("validate")
        .arg("--exercise")
        .arg("../../fixtures/invalid")
        .assert()
        .failure()
        .stdout(predicate::str::contains("INVALID"))
        .stderr(predicate::str::contains("1 of 1 exercise(s) failed validation"));
}

#[test]
fn validate_prints_lint_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.json");
    std::fs::write(
        &path,
        r#"{"exercise_type": "word_placement",
            "content": {"sentences": ["Le ___ dort"], "words": ["chat", "chien"]}}"#,
    )
    .unwrap();

    exograde()
        .arg("validate")
        .arg("--exercise")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("distractors"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    exograde()
        .arg("validate")
        .arg("--exercise")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn score_qcm_text() {
    score("qcm.json", "qcm_half.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("qcm: 50% (1/2 correct, 0 omitted)"))
        .stdout(predicate::str::contains("Paris"));
}

#[test]
fn score_blanks_json() {
    let output = score("fill_in_blanks.json", "blanks_full.json")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["score"], 100);
    assert_eq!(result["total"], 3);
    assert_eq!(result["items"][1]["location"]["sentence"], 0);
    assert_eq!(result["items"][1]["location"]["local"], 1);
}

#[test]
fn score_ordering_markdown() {
    score("drag_and_drop.json", "ordering_swapped.json")
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("**drag_and_drop:** 50%"))
        .stdout(predicate::str::contains("| 1 | 0,08 | 0,8 | wrong |"));
}

#[test]
fn score_legend_by_element_id() {
    score("legend.json", "legend_placed.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("legend: 50% (1/2 correct, 0 omitted)"));
}

#[test]
fn score_word_search_ignores_repeats_and_strays() {
    score("word_search.json", "word_search_found.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("word_search: 50% (2/4 correct, 2 omitted)"));
}

#[test]
fn score_underline_parallel_layout() {
    score("underline_words.json", "underline_selected.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("underline_words: 50% (1/2 correct, 0 omitted)"));
}

#[test]
fn score_flashcards_is_review_only() {
    score("flashcards.json", "qcm_half.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("review only"));
}

#[test]
fn score_invalid_content_fails() {
    exograde()
        .arg("score")
        .arg("--exercise")
        .arg("../../fixtures/invalid/qcm_out_of_range.json")
        .arg("--submission")
        .arg("../../fixtures/submissions/qcm_half.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("correct index 5"));
}

#[test]
fn score_unknown_format_fails() {
    score("qcm.json", "qcm_half.json")
        .arg("--format")
        .arg("html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: html"));
}

#[test]
fn score_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("results/score.json");

    score("fill_in_blanks.json", "blanks_full.json")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Result saved"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved["exercise_type"], "fill_in_blanks");
    assert_eq!(saved["score"], 100);
}

#[test]
fn score_with_any_order_config() {
    let dir = TempDir::new().unwrap();
    let submission = dir.path().join("swapped.json");
    std::fs::write(
        &submission,
        r#"{"answer_0": "pomme", "answer_1": "chat", "answer_2": "maison"}"#,
    )
    .unwrap();
    let config = dir.path().join("exograde.toml");
    std::fs::write(&config, "blank_matching = \"any_order\"\n").unwrap();

    exograde()
        .arg("score")
        .arg("--exercise")
        .arg("../../fixtures/exercises/fill_in_blanks.json")
        .arg("--submission")
        .arg(&submission)
        .assert()
        .success()
        .stdout(predicate::str::contains("33%"));

    exograde()
        .arg("score")
        .arg("--exercise")
        .arg("../../fixtures/exercises/fill_in_blanks.json")
        .arg("--submission")
        .arg(&submission)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("100%"));
}

#[test]
fn score_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("exograde.toml");
    std::fs::write(&config, "blank_matching = \"fuzzy\"\n").unwrap();

    score("qcm.json", "qcm_half.json")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn zones_recovers_sparse_indices() {
    exograde()
        .arg("zones")
        .arg("--submission")
        .arg("../../fixtures/submissions/legend_form.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("racine"))
        .stdout(predicate::str::contains("2 zone(s) recovered"))
        .stdout(predicate::str::contains("zone_4: missing `y`, zone skipped"));
}

#[test]
fn zones_json_output() {
    let output = exograde()
        .arg("zones")
        .arg("--submission")
        .arg("../../fixtures/submissions/legend_form.json")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let resolution: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<u64> = resolution["zones"]
        .as_array()
        .unwrap()
        .iter()
        .map(|z| z["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 6]);
    assert_eq!(resolution["warnings"][0]["problem"], "missing_field");
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    exograde()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created exograde.toml"))
        .stdout(predicate::str::contains("Created exercises/example.json"))
        .stdout(predicate::str::contains("Created submissions/example.json"));

    assert!(dir.path().join("exograde.toml").exists());
    assert!(dir.path().join("exercises/example.json").exists());

    // The generated files work together.
    exograde()
        .current_dir(dir.path())
        .arg("score")
        .arg("--exercise")
        .arg("exercises/example.json")
        .arg("--submission")
        .arg("submissions/example.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("67%"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    exograde()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    exograde()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    exograde()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise content validation and scoring"));
}

#[test]
fn version_output() {
    exograde()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("exograde"));
}
