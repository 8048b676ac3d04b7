//! End-to-end grading tests over the fixture exercises.
//!
//! These go through the same path a deployment would: content fetched from a
//! directory, validated, scored and handed to a sink.

use exograde_core::answers::SubmittedFields;
use exograde_core::config::GradingConfig;
use exograde_core::engine::Grader;
use exograde_core::error::GradeError;
use exograde_core::model::ExerciseContent;
use exograde_core::report::{ScoreResult, ScoreStatus};
use exograde_core::schema::load_exercise;
use exograde_core::traits::{ContentSource, DirectorySource};

const EXERCISES: &str = "../../fixtures/exercises";

fn submission(name: &str) -> SubmittedFields {
    let path = format!("../../fixtures/submissions/{name}");
    SubmittedFields::from_json_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn grade_every_fixture() {
    let source = DirectorySource::new(EXERCISES);
    let grader = Grader::new(GradingConfig::default());
    let mut sink: Vec<(String, ScoreResult)> = Vec::new();

    let cases = [
        ("qcm", "qcm_half.json", 50),
        ("fill_in_blanks", "blanks_full.json", 100),
        ("drag_and_drop", "ordering_swapped.json", 50),
        ("legend", "legend_placed.json", 50),
    ];
    for (id, fields, expected) in cases {
        let result = grader
            .grade_from(&source, id, &submission(fields), &mut sink)
            .unwrap();
        assert_eq!(result.score(), expected, "{id}");
    }

    let ids: Vec<&str> = sink.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["qcm", "fill_in_blanks", "drag_and_drop", "legend"]);
}

#[test]
fn flashcards_never_scored() {
    let source = DirectorySource::new(EXERCISES);
    let mut sink: Vec<(String, ScoreResult)> = Vec::new();
    let result = Grader::default()
        .grade_from(&source, "flashcards", &submission("qcm_half.json"), &mut sink)
        .unwrap();
    assert_eq!(result.status(), ScoreStatus::ReviewOnly);
    assert_eq!(sink.len(), 1);
}

#[test]
fn missing_exercise_is_not_a_content_error() {
    let source = DirectorySource::new(EXERCISES);
    let mut sink: Vec<(String, ScoreResult)> = Vec::new();
    let err = Grader::default()
        .grade_from(&source, "absent", &SubmittedFields::new(), &mut sink)
        .unwrap_err();
    assert!(matches!(err, GradeError::ContentUnavailable { .. }));
    assert!(sink.is_empty());
}

#[test]
fn invalid_fixture_is_rejected_whole() {
    let source = DirectorySource::new("../../fixtures/invalid");
    let raw = source.fetch("qcm_out_of_range").unwrap();
    let err = Grader::default()
        .grade(&raw, &submission("qcm_half.json"))
        .unwrap_err();
    assert!(err.is_content_error());
}

#[test]
fn edit_then_grade_legend() {
    let grader = Grader::default();
    let raw = load_exercise(std::path::Path::new("../../fixtures/exercises/legend.json")).unwrap();
    let edit = grader.edit_legend(&raw, &submission("legend_form.json")).unwrap();

    let ids: Vec<u32> = edit.content.zones.iter().map(|z| z.id).collect();
    assert_eq!(ids, vec![1, 6]);
    assert_eq!(edit.warnings.len(), 1);
    assert_eq!(edit.content.main_image.as_deref(), Some("plante.png"));

    // Element ids follow the recovered zone ids.
    let content = ExerciseContent::Legend(edit.content);
    let fields: SubmittedFields = [("answer_0", "1"), ("answer_1", "6")].into_iter().collect();
    let result = grader.grade_content(&content, &fields);
    assert_eq!(result.score(), 100);
}

#[test]
fn saved_result_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score.json");
    let raw = load_exercise(std::path::Path::new("../../fixtures/exercises/fill_in_blanks.json")).unwrap();
    let result = Grader::default()
        .grade(&raw, &submission("blanks_full.json"))
        .unwrap();

    result.save_json(&path).unwrap();
    assert_eq!(ScoreResult::load_json(&path).unwrap(), result);
}
