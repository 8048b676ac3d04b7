//! Grading orchestrator.
//!
//! Runs one submission through validation, answer extraction and scoring.
//! A [`Grader`] only holds its configuration, so one instance can serve any
//! number of submissions from any number of threads.

use crate::answers::{self, LegendEdit, SubmittedFields};
use crate::config::GradingConfig;
use crate::error::GradeError;
use crate::model::ExerciseContent;
use crate::report::ScoreResult;
use crate::schema::RawExercise;
use crate::scoring;
use crate::traits::{ContentSource, ScoreSink};

/// Grades submissions against stored exercise content.
#[derive(Debug, Clone, Default)]
pub struct Grader {
    config: GradingConfig,
}

impl Grader {
    pub fn new(config: GradingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Validate `raw`, read the answers from `fields` and score them.
    ///
    /// Invalid content is an error and is never partially scored.
    pub fn grade(
        &self,
        raw: &RawExercise,
        fields: &SubmittedFields,
    ) -> Result<ScoreResult, GradeError> {
        let content = raw.parse().inspect_err(|e| {
            tracing::warn!("rejecting {} content: {e}", raw.exercise_type.trim());
        })?;
        Ok(self.grade_content(&content, fields))
    }

    /// Score against content that has already been validated.
    pub fn grade_content(&self, content: &ExerciseContent, fields: &SubmittedFields) -> ScoreResult {
        let kind = content.kind();
        let _span = tracing::info_span!("grade", kind = %kind).entered();

        let answers = answers::extract(content, fields);
        let result = scoring::score(content, &answers, &self.config);

        tracing::info!(
            "{kind}: {}% ({}/{})",
            result.score(),
            result.correct_count(),
            result.total()
        );
        result
    }

    /// Fetch exercise `id` from `source`, grade `fields` against it and hand
    /// the result to `sink`.
    pub fn grade_from(
        &self,
        source: &dyn ContentSource,
        id: &str,
        fields: &SubmittedFields,
        sink: &mut dyn ScoreSink,
    ) -> Result<ScoreResult, GradeError> {
        let raw = source
            .fetch(id)
            .map_err(|source| GradeError::ContentUnavailable {
                id: id.to_string(),
                source,
            })?;

        let result = self.grade(&raw, fields)?;

        sink.record(id, &result)
            .map_err(|source| GradeError::SinkFailed {
                id: id.to_string(),
                source,
            })?;
        Ok(result)
    }

    /// Rebuild legend zones from an editing-form submission.
    pub fn edit_legend(
        &self,
        raw: &RawExercise,
        fields: &SubmittedFields,
    ) -> Result<LegendEdit, GradeError> {
        match raw.parse()? {
            ExerciseContent::Legend(current) | ExerciseContent::ImageLabeling(current) => {
                let edit = answers::extract_legend_edit(&current, fields);
                tracing::info!(
                    "legend edit: {} zone(s), {} skipped",
                    edit.content.zones.len(),
                    edit.warnings.len()
                );
                Ok(edit)
            }
            other => Err(GradeError::NotALegend(other.kind().to_string())),
        }
    }
}
