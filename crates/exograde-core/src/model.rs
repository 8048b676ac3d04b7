//! Typed exercise content.
//!
//! These are the canonical shapes the schema validator produces. Historical
//! key names and legacy layouts never reach this module; see
//! [`crate::schema`] for the normalization step.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::blanks;
use crate::error::ValidationError;

/// Every exercise type the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Qcm,
    FillInBlanks,
    WordPlacement,
    DragAndDrop,
    Pairs,
    ImageLabeling,
    Legend,
    Flashcards,
    UnderlineWords,
    WordSearch,
}

impl ExerciseKind {
    /// The tag as stored alongside the content.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Qcm => "qcm",
            ExerciseKind::FillInBlanks => "fill_in_blanks",
            ExerciseKind::WordPlacement => "word_placement",
            ExerciseKind::DragAndDrop => "drag_and_drop",
            ExerciseKind::Pairs => "pairs",
            ExerciseKind::ImageLabeling => "image_labeling",
            ExerciseKind::Legend => "legend",
            ExerciseKind::Flashcards => "flashcards",
            ExerciseKind::UnderlineWords => "underline_words",
            ExerciseKind::WordSearch => "word_search",
        }
    }

    /// Whether submissions of this kind produce a score.
    pub fn is_graded(&self) -> bool {
        !matches!(self, ExerciseKind::Flashcards)
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "qcm" => Ok(ExerciseKind::Qcm),
            "fill_in_blanks" => Ok(ExerciseKind::FillInBlanks),
            "word_placement" => Ok(ExerciseKind::WordPlacement),
            "drag_and_drop" => Ok(ExerciseKind::DragAndDrop),
            "pairs" => Ok(ExerciseKind::Pairs),
            "image_labeling" => Ok(ExerciseKind::ImageLabeling),
            "legend" => Ok(ExerciseKind::Legend),
            "flashcards" => Ok(ExerciseKind::Flashcards),
            "underline_words" => Ok(ExerciseKind::UnderlineWords),
            "word_search" => Ok(ExerciseKind::WordSearch),
            other => Err(ValidationError::UnsupportedType(other.to_string())),
        }
    }
}

/// Validated content of one exercise, one variant per exercise type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "exercise_type", content = "content", rename_all = "snake_case")]
pub enum ExerciseContent {
    Qcm(QcmContent),
    FillInBlanks(BlankContent),
    WordPlacement(BlankContent),
    DragAndDrop(OrderingContent),
    Pairs(PairsContent),
    ImageLabeling(LegendContent),
    Legend(LegendContent),
    Flashcards(FlashcardsContent),
    UnderlineWords(UnderlineContent),
    WordSearch(WordSearchContent),
}

impl ExerciseContent {
    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseContent::Qcm(_) => ExerciseKind::Qcm,
            ExerciseContent::FillInBlanks(_) => ExerciseKind::FillInBlanks,
            ExerciseContent::WordPlacement(_) => ExerciseKind::WordPlacement,
            ExerciseContent::DragAndDrop(_) => ExerciseKind::DragAndDrop,
            ExerciseContent::Pairs(_) => ExerciseKind::Pairs,
            ExerciseContent::ImageLabeling(_) => ExerciseKind::ImageLabeling,
            ExerciseContent::Legend(_) => ExerciseKind::Legend,
            ExerciseContent::Flashcards(_) => ExerciseKind::Flashcards,
            ExerciseContent::UnderlineWords(_) => ExerciseKind::UnderlineWords,
            ExerciseContent::WordSearch(_) => ExerciseKind::WordSearch,
        }
    }

    /// Number of gradable items (questions, blanks, drop zones, pairs,
    /// zones, sentences, hidden words). Flashcards have none.
    pub fn item_count(&self) -> usize {
        match self {
            ExerciseContent::Qcm(c) => c.questions.len(),
            ExerciseContent::FillInBlanks(c) | ExerciseContent::WordPlacement(c) => {
                c.total_blanks()
            }
            ExerciseContent::DragAndDrop(c) => c.correct_order.len(),
            ExerciseContent::Pairs(c) => c.left_items.len(),
            ExerciseContent::ImageLabeling(c) | ExerciseContent::Legend(c) => c.zones.len(),
            ExerciseContent::Flashcards(_) => 0,
            ExerciseContent::UnderlineWords(c) => c.sentences.len(),
            ExerciseContent::WordSearch(c) => c.words.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Multiple choice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QcmContent {
    pub questions: Vec<Question>,
    /// Opaque image reference, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub choices: Vec<String>,
    /// Index into `choices`.
    pub correct: usize,
}

impl Question {
    pub fn correct_choice(&self) -> &str {
        // Validated at construction.
        self.choices.get(self.correct).map(String::as_str).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Text with blanks
// ---------------------------------------------------------------------------

/// Shared schema of `fill_in_blanks` and `word_placement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlankContent {
    /// Sentence templates containing `___` markers.
    pub sentences: Vec<String>,
    /// Correct words in global blank order. May be longer than the blank
    /// count; trailing entries are distractors.
    pub words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl BlankContent {
    /// Total blank markers across all sentences. This is the only blank
    /// count used for scoring.
    pub fn total_blanks(&self) -> usize {
        blanks::total_blanks(&self.sentences)
    }

    /// Words offered to the learner beyond those needed to fill the blanks.
    pub fn distractors(&self) -> &[String] {
        let total = self.total_blanks().min(self.words.len());
        &self.words[total..]
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingContent {
    pub draggable_items: Vec<String>,
    /// `correct_order[i]` is the index of the item belonging in drop zone `i`.
    pub correct_order: Vec<usize>,
}

impl OrderingContent {
    pub fn item(&self, index: usize) -> Option<&str> {
        self.draggable_items.get(index).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Pairs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairsContent {
    /// `left_items[i]` pairs with `right_items[i]`.
    pub left_items: Vec<PairItem>,
    pub right_items: Vec<PairItem>,
}

/// One side of a pair: plain text or a typed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PairItem {
    Plain(String),
    Typed {
        #[serde(rename = "type", default)]
        kind: PairItemKind,
        content: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairItemKind {
    #[default]
    Text,
    Image,
}

impl PairItem {
    /// Text or image reference carried by the item.
    pub fn content(&self) -> &str {
        match self {
            PairItem::Plain(s) => s,
            PairItem::Typed { content, .. } => content,
        }
    }

    pub fn kind(&self) -> PairItemKind {
        match self {
            PairItem::Plain(_) => PairItemKind::Text,
            PairItem::Typed { kind, .. } => *kind,
        }
    }
}

impl fmt::Display for PairItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PairItemKind::Text => f.write_str(self.content()),
            PairItemKind::Image => write!(f, "[image: {}]", self.content()),
        }
    }
}

// ---------------------------------------------------------------------------
// Image labeling / legend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendMode {
    #[default]
    Classic,
    Grid,
    Spatial,
}

impl FromStr for LegendMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "" => Ok(LegendMode::Classic),
            "grid" => Ok(LegendMode::Grid),
            "spatial" => Ok(LegendMode::Spatial),
            other => Err(ValidationError::malformed(
                "mode",
                format!("unknown legend mode `{other}`"),
            )),
        }
    }
}

impl fmt::Display for LegendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegendMode::Classic => write!(f, "classic"),
            LegendMode::Grid => write!(f, "grid"),
            LegendMode::Spatial => write!(f, "spatial"),
        }
    }
}

/// A labelled point on the main image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Stable id. Unique, but not contiguous and not necessarily zero-based.
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub legend: String,
}

/// A draggable label; `id` matches exactly one zone id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(default)]
    pub mode: LegendMode,
    pub zones: Vec<Zone>,
    pub elements: Vec<Element>,
}

impl LegendContent {
    /// Build content from zones, deriving the element pool.
    pub fn new(main_image: Option<String>, mode: LegendMode, zones: Vec<Zone>) -> Self {
        let mut content = Self {
            main_image,
            mode,
            zones,
            elements: Vec::new(),
        };
        content.regenerate_elements();
        content
    }

    /// Rebuild `elements` one-to-one from `zones`.
    pub fn regenerate_elements(&mut self) {
        self.elements = self
            .zones
            .iter()
            .map(|z| Element {
                id: z.id,
                text: z.legend.clone(),
            })
            .collect();
    }

    /// Whether every zone has exactly one element with the same id, and no
    /// element is left over.
    pub fn elements_consistent(&self) -> bool {
        self.elements.len() == self.zones.len()
            && self
                .zones
                .iter()
                .all(|z| self.elements.iter().filter(|e| e.id == z.id).count() == 1)
    }

    pub fn element(&self, id: u32) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// The id a newly created zone would receive, or `None` when the
    /// largest id is already `u32::MAX`.
    pub fn next_zone_id(&self) -> Option<u32> {
        next_free_id(self.zones.iter().map(|z| z.id))
    }
}

/// One above the largest of `ids`, 0 when there are none. `None` when the
/// largest id cannot be incremented.
pub fn next_free_id(ids: impl IntoIterator<Item = u32>) -> Option<u32> {
    match ids.into_iter().max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardsContent {
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Underline words
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlineContent {
    pub sentences: Vec<UnderlineSentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlineSentence {
    pub text: String,
    pub words_to_underline: Vec<String>,
}

// ---------------------------------------------------------------------------
// Word search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSearchContent {
    /// Words hidden in the grid, each one a gradable item.
    pub words: Vec<String>,
    /// Generated letter grid, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<serde_json::Value>,
}
