//! Answer extraction from flat submission fields.
//!
//! The submission form posts one string per field, named by position
//! (`answer_0`, `answer_1`, ...). The extractor reads exactly as many fields
//! as the content has items and turns each into an [`Answer`]. A field that
//! was never posted becomes [`Answer::Missing`], which scores as incorrect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ExerciseContent, LegendContent, LegendMode};
use crate::zones::{self, ZoneParseWarning};

/// Flat field-name to value mapping of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittedFields(BTreeMap<String, String>);

impl SubmittedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a JSON object of field name to value. Numbers and booleans are
    /// accepted and kept in their textual form. An array stands for a
    /// multi-valued form field and is kept comma-joined.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(s)?;
        Ok(raw
            .into_iter()
            .filter_map(|(k, v)| match v {
                serde_json::Value::Array(values) => {
                    let joined: Vec<String> = values.into_iter().filter_map(scalar_text).collect();
                    Some((k, joined.join(",")))
                }
                other => scalar_text(other).map(|text| (k, text)),
            })
            .collect())
    }
}

fn scalar_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmittedFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Field holding the answer to item `index`.
pub fn answer_key(index: usize) -> String {
    format!("answer_{index}")
}

/// Field holding the underlined words of sentence `index`.
pub fn selected_words_key(index: usize) -> String {
    format!("selected_words_{index}")
}

/// Fields that may hold the words found in a word search, in lookup order.
pub const FOUND_WORDS_KEYS: &[&str] = &["found_words[]", "found_words"];

/// One learner answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Answer<T> {
    /// No field was submitted for this item. Distinct from an empty string.
    Missing,
    /// A value was submitted but could not be read as the expected type.
    Invalid(String),
    Given(T),
}

impl<T> Answer<T> {
    pub fn given(&self) -> Option<&T> {
        match self {
            Answer::Given(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Answer::Missing)
    }
}

impl<T: PartialEq> Answer<T> {
    /// Whether the answer was given and equals `expected`. Missing and
    /// invalid answers never match.
    pub fn matches(&self, expected: &T) -> bool {
        self.given() == Some(expected)
    }
}

/// Structured answers for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "answers", rename_all = "snake_case")]
pub enum AnswerSet {
    /// Chosen choice index per question.
    Choices(Vec<Answer<usize>>),
    /// Word per global blank.
    Words(Vec<Answer<String>>),
    /// Chosen item index per drop zone.
    Order(Vec<Answer<usize>>),
    /// Chosen right index per left item.
    Pairs(Vec<Answer<usize>>),
    /// Element id placed on each zone, zones in stored order.
    Placements(Vec<Answer<u32>>),
    /// Underlined words per sentence.
    Underlines(Vec<Answer<Vec<String>>>),
    /// Every word reported found in a word search, in submission order.
    FoundWords(Answer<Vec<String>>),
    /// Nothing to read (review-only content).
    Review,
}

impl AnswerSet {
    pub fn len(&self) -> usize {
        match self {
            AnswerSet::Choices(a) | AnswerSet::Order(a) | AnswerSet::Pairs(a) => a.len(),
            AnswerSet::Words(a) => a.len(),
            AnswerSet::Placements(a) => a.len(),
            AnswerSet::Underlines(a) => a.len(),
            AnswerSet::FoundWords(a) => a.given().map_or(0, Vec::len),
            AnswerSet::Review => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the answer set for `content` from the submitted fields.
pub fn extract(content: &ExerciseContent, fields: &SubmittedFields) -> AnswerSet {
    match content {
        ExerciseContent::Qcm(c) => AnswerSet::Choices(read_indices(fields, c.questions.len())),
        ExerciseContent::FillInBlanks(c) | ExerciseContent::WordPlacement(c) => {
            AnswerSet::Words(read_words(fields, c.total_blanks()))
        }
        ExerciseContent::DragAndDrop(c) => {
            AnswerSet::Order(read_indices(fields, c.correct_order.len()))
        }
        ExerciseContent::Pairs(c) => AnswerSet::Pairs(read_indices(fields, c.left_items.len())),
        ExerciseContent::ImageLabeling(c) | ExerciseContent::Legend(c) => {
            AnswerSet::Placements(read_indices(fields, c.zones.len()))
        }
        ExerciseContent::Flashcards(_) => AnswerSet::Review,
        ExerciseContent::UnderlineWords(c) => AnswerSet::Underlines(
            (0..c.sentences.len())
                .map(|i| match fields.get(&selected_words_key(i)) {
                    None => Answer::Missing,
                    Some(raw) => Answer::Given(split_word_list(raw)),
                })
                .collect(),
        ),
        ExerciseContent::WordSearch(_) => AnswerSet::FoundWords(
            match FOUND_WORDS_KEYS.iter().find_map(|key| fields.get(key)) {
                None => Answer::Missing,
                Some(raw) => Answer::Given(split_word_list(raw)),
            },
        ),
    }
}

fn read_words(fields: &SubmittedFields, count: usize) -> Vec<Answer<String>> {
    (0..count)
        .map(|i| match fields.get(&answer_key(i)) {
            None => Answer::Missing,
            Some(raw) => Answer::Given(raw.to_string()),
        })
        .collect()
}

fn read_indices<T: std::str::FromStr>(fields: &SubmittedFields, count: usize) -> Vec<Answer<T>> {
    (0..count)
        .map(|i| match fields.get(&answer_key(i)) {
            None => Answer::Missing,
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(v) => Answer::Given(v),
                Err(_) => {
                    tracing::debug!("answer_{i}: `{raw}` is not an index");
                    Answer::Invalid(raw.to_string())
                }
            },
        })
        .collect()
}

fn split_word_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Legend content rebuilt from an editing-form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEdit {
    pub content: LegendContent,
    pub warnings: Vec<ZoneParseWarning>,
}

/// Rebuild legend zones from the editing form.
///
/// Zones come from the zone resolver rather than a fixed-count read; the
/// element pool is regenerated from them. The image reference is kept and
/// `legend_mode`, when posted, overrides the stored mode.
pub fn extract_legend_edit(current: &LegendContent, fields: &SubmittedFields) -> LegendEdit {
    let resolution = zones::resolve(fields);
    let mode = match fields.get("legend_mode").map(str::parse::<LegendMode>) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            tracing::warn!("ignoring legend_mode: {e}");
            current.mode
        }
        None => current.mode,
    };
    LegendEdit {
        content: LegendContent::new(current.main_image.clone(), mode, resolution.zones),
        warnings: resolution.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn fields(pairs: &[(&str, &str)]) -> SubmittedFields {
        pairs.iter().copied().collect()
    }

    fn qcm(n: usize) -> ExerciseContent {
        ExerciseContent::Qcm(QcmContent {
            questions: (0..n)
                .map(|i| Question {
                    text: format!("q{i}"),
                    choices: vec!["a".into(), "b".into()],
                    correct: 0,
                })
                .collect(),
            image: None,
        })
    }

    #[test]
    fn missing_field_is_distinct_from_empty() {
        let content = ExerciseContent::FillInBlanks(BlankContent {
            sentences: vec!["___ et ___ et ___".into()],
            words: vec!["a".into(), "b".into(), "c".into()],
            image: None,
        });
        let set = extract(&content, &fields(&[("answer_0", "a"), ("answer_1", "")]));
        assert_eq!(
            set,
            AnswerSet::Words(vec![
                Answer::Given("a".into()),
                Answer::Given(String::new()),
                Answer::Missing,
            ])
        );
    }

    #[test]
    fn reads_only_as_many_fields_as_items() {
        let set = extract(
            &qcm(2),
            &fields(&[("answer_0", "1"), ("answer_1", "0"), ("answer_2", "1")]),
        );
        assert_eq!(
            set,
            AnswerSet::Choices(vec![Answer::Given(1), Answer::Given(0)])
        );
    }

    #[test]
    fn unparsable_index_is_invalid() {
        let set = extract(&qcm(3), &fields(&[("answer_0", " 1 "), ("answer_1", "-1")]));
        assert_eq!(
            set,
            AnswerSet::Choices(vec![
                Answer::Given(1),
                Answer::Invalid("-1".into()),
                Answer::Missing,
            ])
        );
    }

    #[test]
    fn answer_matching_ignores_missing_and_invalid() {
        assert!(Answer::Given(2usize).matches(&2));
        assert!(!Answer::<usize>::Missing.matches(&0));
        assert!(!Answer::<usize>::Invalid("x".into()).matches(&0));
    }

    #[test]
    fn underline_words_split_on_commas() {
        let content = ExerciseContent::UnderlineWords(UnderlineContent {
            sentences: vec![
                UnderlineSentence {
                    text: "Le chat dort.".into(),
                    words_to_underline: vec!["chat".into()],
                },
                UnderlineSentence {
                    text: "Il pleut.".into(),
                    words_to_underline: vec!["pleut".into()],
                },
            ],
        });
        let set = extract(&content, &fields(&[("selected_words_0", "chat, dort,,")]));
        assert_eq!(
            set,
            AnswerSet::Underlines(vec![
                Answer::Given(vec!["chat".into(), "dort".into()]),
                Answer::Missing,
            ])
        );
    }

    #[test]
    fn found_words_read_from_either_field_name() {
        let content = ExerciseContent::WordSearch(WordSearchContent {
            words: vec!["chat".into(), "chien".into()],
            grid: None,
        });
        let set = extract(&content, &fields(&[("found_words[]", "chat,loup")]));
        assert_eq!(
            set,
            AnswerSet::FoundWords(Answer::Given(vec!["chat".into(), "loup".into()]))
        );
        assert_eq!(set.len(), 2);

        let plain = extract(&content, &fields(&[("found_words", " chien ")]));
        assert_eq!(plain, AnswerSet::FoundWords(Answer::Given(vec!["chien".into()])));

        let none = extract(&content, &fields(&[("answer_0", "chat")]));
        assert_eq!(none, AnswerSet::FoundWords(Answer::Missing));
        assert!(none.is_empty());
    }

    #[test]
    fn submission_json_joins_arrays() {
        let parsed =
            SubmittedFields::from_json_str(r#"{"found_words[]": ["chat", "chien", null, 3]}"#)
                .unwrap();
        assert_eq!(parsed.get("found_words[]"), Some("chat,chien,3"));
    }

    #[test]
    fn flashcards_read_nothing() {
        let content = ExerciseContent::Flashcards(FlashcardsContent { cards: vec![] });
        let set = extract(&content, &fields(&[("answer_0", "x")]));
        assert_eq!(set, AnswerSet::Review);
        assert!(set.is_empty());
    }

    #[test]
    fn submission_json_accepts_numbers() {
        let parsed =
            SubmittedFields::from_json_str(r#"{"answer_0": 1, "answer_1": "chat", "x": null}"#)
                .unwrap();
        assert_eq!(parsed.get("answer_0"), Some("1"));
        assert_eq!(parsed.get("answer_1"), Some("chat"));
        assert_eq!(parsed.get("x"), None);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn legend_edit_rebuilds_zones_and_elements() {
        let current = LegendContent::new(
            Some("heart.png".into()),
            LegendMode::Classic,
            vec![Zone {
                id: 0,
                x: 1.0,
                y: 1.0,
                legend: "old".into(),
            }],
        );
        let edit = extract_legend_edit(
            &current,
            &fields(&[
                ("legend_mode", "spatial"),
                ("zone_1_x", "10"),
                ("zone_1_y", "20"),
                ("zone_1_legend", "aorte"),
                ("zone_4_x", "30"),
                ("zone_4_y", "40"),
                ("zone_4_legend", "ventricule"),
            ]),
        );
        assert!(edit.warnings.is_empty());
        assert_eq!(edit.content.main_image.as_deref(), Some("heart.png"));
        assert_eq!(edit.content.mode, LegendMode::Spatial);
        let ids: Vec<u32> = edit.content.zones.iter().map(|z| z.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(edit.content.elements_consistent());
    }

    #[test]
    fn legend_edit_keeps_mode_on_bad_value() {
        let current = LegendContent::new(None, LegendMode::Grid, vec![]);
        let edit = extract_legend_edit(&current, &fields(&[("legend_mode", "hexagonal")]));
        assert_eq!(edit.content.mode, LegendMode::Grid);
        assert!(edit.content.zones.is_empty());
    }
}
