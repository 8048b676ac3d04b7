//! Score results with per-item feedback and JSON persistence helpers.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::blanks::BlankLocation;
use crate::model::ExerciseKind;

/// Whether a grading pass applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Graded,
    /// Self-study content; nothing was compared.
    ReviewOnly,
}

/// Feedback for one gradable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFeedback {
    /// Position of the item (question, blank, drop zone, pair, zone, sentence).
    pub index: usize,
    /// What the item expected, in display form.
    pub expected: String,
    /// What the learner gave, in display form. `None` when nothing was
    /// submitted.
    pub given: Option<String>,
    pub correct: bool,
    /// Sentence and local position, for text-with-blanks items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<BlankLocation>,
}

impl ItemFeedback {
    pub fn new(index: usize, expected: impl Into<String>, given: Option<String>, correct: bool) -> Self {
        Self {
            index,
            expected: expected.into(),
            given,
            correct,
            location: None,
        }
    }

    pub fn at(mut self, location: Option<BlankLocation>) -> Self {
        self.location = location;
        self
    }

    pub fn is_omitted(&self) -> bool {
        self.given.is_none()
    }
}

/// Percentage of `correct` over `total`, rounded half away from zero.
/// Zero items score 0.
pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (correct.min(total) as f64 * 100.0 / total as f64).round();
    pct as u8
}

/// The outcome of grading one submission. Immutable once built.
///
/// Deserializing rebuilds the aggregate from the stored items and rejects
/// a record whose stored aggregate disagrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredScore")]
pub struct ScoreResult {
    exercise_type: ExerciseKind,
    status: ScoreStatus,
    score: u8,
    correct_count: usize,
    total: usize,
    items: Vec<ItemFeedback>,
}

/// Wire form of [`ScoreResult`], checked before it becomes one.
#[derive(Deserialize)]
struct StoredScore {
    exercise_type: ExerciseKind,
    status: ScoreStatus,
    score: u8,
    correct_count: usize,
    total: usize,
    #[serde(default)]
    items: Vec<ItemFeedback>,
}

impl TryFrom<StoredScore> for ScoreResult {
    type Error = String;

    fn try_from(stored: StoredScore) -> std::result::Result<Self, Self::Error> {
        let rebuilt = match stored.status {
            ScoreStatus::Graded => ScoreResult::graded(stored.exercise_type, stored.items),
            ScoreStatus::ReviewOnly if stored.items.is_empty() => {
                ScoreResult::review_only(stored.exercise_type)
            }
            ScoreStatus::ReviewOnly => {
                return Err(format!("review-only result carries {} item(s)", stored.items.len()));
            }
        };
        let aggregate = (stored.score, stored.correct_count, stored.total);
        if aggregate != (rebuilt.score, rebuilt.correct_count, rebuilt.total) {
            return Err(format!(
                "stored aggregate {}% ({}/{}) does not match items: {}% ({}/{})",
                stored.score,
                stored.correct_count,
                stored.total,
                rebuilt.score,
                rebuilt.correct_count,
                rebuilt.total
            ));
        }
        Ok(rebuilt)
    }
}

impl ScoreResult {
    /// Assemble a graded result. The aggregate is derived from `items`.
    pub fn graded(exercise_type: ExerciseKind, items: Vec<ItemFeedback>) -> Self {
        let total = items.len();
        let correct_count = items.iter().filter(|i| i.correct).count();
        Self {
            exercise_type,
            status: ScoreStatus::Graded,
            score: percentage(correct_count, total),
            correct_count,
            total,
            items,
        }
    }

    /// A result for content that is not scored.
    pub fn review_only(exercise_type: ExerciseKind) -> Self {
        Self {
            exercise_type,
            status: ScoreStatus::ReviewOnly,
            score: 0,
            correct_count: 0,
            total: 0,
            items: Vec::new(),
        }
    }

    pub fn exercise_type(&self) -> ExerciseKind {
        self.exercise_type
    }

    pub fn status(&self) -> ScoreStatus {
        self.status
    }

    /// Aggregate percentage, 0 to 100.
    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn items(&self) -> &[ItemFeedback] {
        &self.items
    }

    /// Correctness per item, in item order.
    pub fn correctness(&self) -> Vec<bool> {
        self.items.iter().map(|i| i.correct).collect()
    }

    pub fn omitted_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_omitted()).count()
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize score")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write score to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read score from {}", path.display()))?;
        let result: ScoreResult =
            serde_json::from_str(&content).context("failed to parse score JSON")?;
        Ok(result)
    }

    /// Format the result as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        if self.status == ScoreStatus::ReviewOnly {
            md.push_str(&format!(
                "**{}:** review only, not scored\n",
                self.exercise_type
            ));
            return md;
        }

        md.push_str(&format!(
            "**{}:** {}% ({}/{} correct, {} omitted)\n\n",
            self.exercise_type,
            self.score,
            self.correct_count,
            self.total,
            self.omitted_count()
        ));

        if !self.items.is_empty() {
            md.push_str("| # | Expected | Given | Result |\n");
            md.push_str("|---|----------|-------|--------|\n");
            for item in &self.items {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    item.index + 1,
                    item.expected,
                    item.given.as_deref().unwrap_or("(none)"),
                    if item.correct { "ok" } else { "wrong" }
                ));
            }
        }

        md
    }
}
