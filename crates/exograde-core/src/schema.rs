//! Exercise content parsing and validation.
//!
//! Stored content is loosely typed JSON whose key names drifted over the
//! life of the platform. Parsing happens in two steps: a normalization pass
//! rewrites every known historical key or layout into the canonical one,
//! then the canonical object is deserialized into intermediate structs and
//! checked before the typed [`ExerciseContent`] is built.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::blanks;
use crate::error::ValidationError;
use crate::model::{
    next_free_id, BlankContent, Element, ExerciseContent, ExerciseKind, Flashcard,
    FlashcardsContent, LegendContent, LegendMode, OrderingContent, PairItem, PairsContent,
    QcmContent, Question, UnderlineContent, UnderlineSentence, WordSearchContent, Zone,
};

/// A stored exercise as handed over by the content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Exercise-type tag, e.g. `"qcm"`.
    pub exercise_type: String,
    /// Content object, or a string holding its JSON text.
    pub content: Value,
}

impl RawExercise {
    pub fn new(exercise_type: impl Into<String>, content: Value) -> Self {
        Self {
            title: None,
            exercise_type: exercise_type.into(),
            content,
        }
    }

    /// Parse and validate into typed content.
    pub fn parse(&self) -> Result<ExerciseContent, ValidationError> {
        parse_content(&self.exercise_type, &self.content)
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

const BLANK_ALIASES: &[(&str, &str)] = &[("available_words", "words")];
const QUESTION_ALIASES: &[(&str, &str)] = &[
    ("options", "choices"),
    ("correct_answer", "correct"),
    ("question", "text"),
];
const LEGACY_PAIR_ALIASES: &[(&str, &str)] = &[("first", "left"), ("second", "right")];
const LEGEND_ALIASES: &[(&str, &str)] = &[("legend_mode", "mode"), ("image", "main_image")];
const CARD_ALIASES: &[(&str, &str)] = &[("front", "question"), ("back", "answer")];
const UNDERLINE_ALIASES: &[(&str, &str)] = &[("words", "sentences")];

/// Move each historical key to its canonical name. When both are present
/// the canonical key wins and the historical one is dropped.
fn rename_keys(map: &mut Map<String, Value>, aliases: &[(&str, &str)]) {
    for &(old, canonical) in aliases {
        let Some(value) = map.remove(old) else {
            continue;
        };
        if map.contains_key(canonical) {
            tracing::warn!("both `{old}` and `{canonical}` present, keeping `{canonical}`");
        } else {
            map.insert(canonical.to_string(), value);
        }
    }
}

fn rename_keys_in_list(map: &mut Map<String, Value>, list: &str, aliases: &[(&str, &str)]) {
    if let Some(Value::Array(items)) = map.get_mut(list) {
        for item in items.iter_mut() {
            if let Value::Object(obj) = item {
                rename_keys(obj, aliases);
            }
        }
    }
}

/// Legacy text-with-blanks layouts:
/// - a single `text` string instead of `sentences` becomes one sentence;
/// - `text` alongside `sentences` is dropped, `sentences` is canonical;
/// - sentence objects `{text, answer}` become a template plus a word, the
///   words only being used when no word list is stored.
fn migrate_blank_layout(map: &mut Map<String, Value>) {
    rename_keys(map, BLANK_ALIASES);

    if let Some(text) = map.remove("text") {
        if map.contains_key("sentences") {
            tracing::warn!("content has both `text` and `sentences`; blank count taken from `sentences`");
        } else {
            map.insert("sentences".into(), Value::Array(vec![text]));
        }
    }

    let Some(Value::Array(sentences)) = map.get_mut("sentences") else {
        return;
    };
    let mut legacy_words = Vec::new();
    for sentence in sentences.iter_mut() {
        if let Value::Object(obj) = sentence {
            if let Some(answer) = obj.get("answer").cloned() {
                legacy_words.push(answer);
            }
            *sentence = obj.get("text").cloned().unwrap_or(Value::Null);
        }
    }
    if !legacy_words.is_empty() && !map.contains_key("words") {
        map.insert("words".into(), Value::Array(legacy_words));
    }
}

/// Legacy `pairs: [{left, right}]` becomes `left_items` / `right_items`.
fn migrate_pairs_layout(map: &mut Map<String, Value>) {
    if map.contains_key("left_items") || map.contains_key("right_items") {
        map.remove("pairs");
        return;
    }
    let Some(Value::Array(pairs)) = map.remove("pairs") else {
        return;
    };
    let mut left = Vec::with_capacity(pairs.len());
    let mut right = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Value::Object(mut obj) = pair else {
            continue;
        };
        rename_keys(&mut obj, LEGACY_PAIR_ALIASES);
        left.push(obj.remove("left").unwrap_or(Value::Null));
        right.push(obj.remove("right").unwrap_or(Value::Null));
    }
    map.insert("left_items".into(), Value::Array(left));
    map.insert("right_items".into(), Value::Array(right));
}

/// Underline content has been stored three ways:
/// - sentence objects `{text, words_to_underline}` (canonical);
/// - plain sentence strings with a parallel top-level `words_to_underline`
///   list, one entry per sentence, each a word list or a comma-separated
///   string;
/// - plain sentence strings with nothing to underline yet.
///
/// Plain strings are zipped with the parallel list, or given an empty list
/// when it runs short.
fn migrate_underline_layout(map: &mut Map<String, Value>) {
    rename_keys(map, UNDERLINE_ALIASES);

    let parallel = match map.remove("words_to_underline") {
        Some(Value::Array(lists)) => lists,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!("ignoring top-level `words_to_underline` of type {}", type_name(&other));
            Vec::new()
        }
    };
    let Some(Value::Array(sentences)) = map.get_mut("sentences") else {
        return;
    };
    if parallel.len() > sentences.len() {
        tracing::warn!(
            "{} underline list(s) for {} sentence(s), extra lists dropped",
            parallel.len(),
            sentences.len()
        );
    }
    let mut parallel = parallel.into_iter();
    for sentence in sentences.iter_mut() {
        if let Value::String(text) = sentence {
            let words = parallel.next().map(underline_word_list).unwrap_or_default();
            let mut obj = Map::new();
            obj.insert("text".into(), Value::String(std::mem::take(text)));
            obj.insert("words_to_underline".into(), Value::Array(words));
            *sentence = Value::Object(obj);
        }
    }
}

fn underline_word_list(entry: Value) -> Vec<Value> {
    let words: Vec<String> = match entry {
        Value::String(joined) => joined.split(',').map(str::to_string).collect(),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(word) => Some(word),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(|w| Value::String(w.to_string()))
        .collect()
}

/// Rewrite historical keys and layouts of `kind` into the canonical shape.
pub fn normalize(kind: ExerciseKind, map: &mut Map<String, Value>) {
    match kind {
        ExerciseKind::Qcm => rename_keys_in_list(map, "questions", QUESTION_ALIASES),
        ExerciseKind::FillInBlanks | ExerciseKind::WordPlacement => migrate_blank_layout(map),
        ExerciseKind::DragAndDrop => {}
        ExerciseKind::Pairs => migrate_pairs_layout(map),
        ExerciseKind::ImageLabeling | ExerciseKind::Legend => rename_keys(map, LEGEND_ALIASES),
        ExerciseKind::Flashcards => rename_keys_in_list(map, "cards", CARD_ALIASES),
        ExerciseKind::UnderlineWords => migrate_underline_layout(map),
        ExerciseKind::WordSearch => {}
    }
}

// ---------------------------------------------------------------------------
// Intermediate structures
// ---------------------------------------------------------------------------

/// An index stored either as a number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredIndex {
    Number(u64),
    Text(String),
}

impl StoredIndex {
    fn resolve(&self, field: &str) -> Result<usize, ValidationError> {
        match self {
            StoredIndex::Number(n) => usize::try_from(*n)
                .map_err(|_| ValidationError::malformed(field, format!("index {n} too large"))),
            StoredIndex::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ValidationError::malformed(field, format!("`{s}` is not an index"))),
        }
    }
}

/// A coordinate stored as a number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCoord {
    Number(f64),
    Text(String),
}

impl StoredCoord {
    fn resolve(&self, field: &str) -> Result<f64, ValidationError> {
        let value = match self {
            StoredCoord::Number(n) => Some(*n),
            StoredCoord::Text(s) => s.trim().parse().ok(),
        };
        value
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| ValidationError::malformed(field, "not a finite number"))
    }
}

#[derive(Debug, Deserialize)]
struct QcmRecord {
    questions: Vec<QuestionRecord>,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    #[serde(default)]
    text: String,
    choices: Vec<String>,
    correct: StoredIndex,
}

#[derive(Debug, Deserialize)]
struct BlankRecord {
    sentences: Vec<String>,
    words: Vec<String>,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderingRecord {
    draggable_items: Vec<String>,
    correct_order: Vec<StoredIndex>,
}

#[derive(Debug, Deserialize)]
struct PairsRecord {
    left_items: Vec<PairItem>,
    right_items: Vec<PairItem>,
}

#[derive(Debug, Deserialize)]
struct LegendRecord {
    #[serde(default)]
    main_image: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    zones: Vec<ZoneRecord>,
    #[serde(default)]
    elements: Vec<ElementRecord>,
}

#[derive(Debug, Deserialize)]
struct ZoneRecord {
    #[serde(default)]
    id: Option<u32>,
    x: StoredCoord,
    y: StoredCoord,
    #[serde(default)]
    legend: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ElementRecord {
    Structured { id: u32, text: String },
    Label(String),
}

#[derive(Debug, Deserialize)]
struct FlashcardsRecord {
    cards: Vec<Flashcard>,
}

#[derive(Debug, Deserialize)]
struct UnderlineRecord {
    sentences: Vec<UnderlineSentence>,
}

#[derive(Debug, Deserialize)]
struct WordSearchRecord {
    words: Vec<String>,
    #[serde(default)]
    grid: Option<Value>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Decode `content` into a JSON object, unwrapping a JSON-text string.
fn decode_object(content: &Value) -> Result<Map<String, Value>, ValidationError> {
    match content {
        Value::Object(map) => Ok(map.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ValidationError::NotAnObject(type_name(&other).into())),
            Err(e) => Err(ValidationError::NotAnObject(format!("invalid JSON text: {e}"))),
        },
        other => Err(ValidationError::NotAnObject(type_name(other).into())),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn require(map: &Map<String, Value>, field: &'static str) -> Result<(), ValidationError> {
    match map.get(field) {
        Some(Value::Null) | None => Err(ValidationError::MissingField(field)),
        Some(_) => Ok(()),
    }
}

fn from_map<T: DeserializeOwned>(
    kind: ExerciseKind,
    map: Map<String, Value>,
) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(map))
        .map_err(|e| ValidationError::malformed(kind.as_str(), e.to_string()))
}

/// Parse and validate stored content tagged with `exercise_type`.
///
/// Unknown tags fail with [`ValidationError::UnsupportedType`]; they are
/// never scored by a fallback.
pub fn parse_content(exercise_type: &str, content: &Value) -> Result<ExerciseContent, ValidationError> {
    let kind: ExerciseKind = exercise_type.parse()?;
    let mut map = decode_object(content)?;
    normalize(kind, &mut map);

    let parsed = match kind {
        ExerciseKind::Qcm => ExerciseContent::Qcm(parse_qcm(map)?),
        ExerciseKind::FillInBlanks => ExerciseContent::FillInBlanks(parse_blanks(kind, map)?),
        ExerciseKind::WordPlacement => ExerciseContent::WordPlacement(parse_blanks(kind, map)?),
        ExerciseKind::DragAndDrop => ExerciseContent::DragAndDrop(parse_ordering(map)?),
        ExerciseKind::Pairs => ExerciseContent::Pairs(parse_pairs(map)?),
        ExerciseKind::ImageLabeling => ExerciseContent::ImageLabeling(parse_legend(kind, map)?),
        ExerciseKind::Legend => ExerciseContent::Legend(parse_legend(kind, map)?),
        ExerciseKind::Flashcards => {
            require(&map, "cards")?;
            let record: FlashcardsRecord = from_map(kind, map)?;
            ExerciseContent::Flashcards(FlashcardsContent {
                cards: record.cards,
            })
        }
        ExerciseKind::UnderlineWords => {
            require(&map, "sentences")?;
            let record: UnderlineRecord = from_map(kind, map)?;
            ExerciseContent::UnderlineWords(UnderlineContent {
                sentences: record.sentences,
            })
        }
        ExerciseKind::WordSearch => {
            require(&map, "words")?;
            let record: WordSearchRecord = from_map(kind, map)?;
            ExerciseContent::WordSearch(WordSearchContent {
                words: record.words.iter().map(|w| w.trim().to_string()).collect(),
                grid: record.grid,
            })
        }
    };

    tracing::debug!("parsed {} content with {} item(s)", kind, parsed.item_count());
    Ok(parsed)
}

fn parse_qcm(map: Map<String, Value>) -> Result<QcmContent, ValidationError> {
    require(&map, "questions")?;
    let record: QcmRecord = from_map(ExerciseKind::Qcm, map)?;

    let questions = record
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let correct = q.correct.resolve(&format!("questions[{i}].correct"))?;
            if correct >= q.choices.len() {
                return Err(ValidationError::CorrectIndexOutOfRange {
                    question: i,
                    index: correct,
                    choices: q.choices.len(),
                });
            }
            Ok(Question {
                text: q.text,
                choices: q.choices,
                correct,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QcmContent {
        questions,
        image: record.image,
    })
}

fn parse_blanks(kind: ExerciseKind, map: Map<String, Value>) -> Result<BlankContent, ValidationError> {
    require(&map, "sentences")?;
    if !map.contains_key("words") {
        return Err(ValidationError::MissingAnswerKeys);
    }
    let record: BlankRecord = from_map(kind, map)?;

    let total = blanks::total_blanks(&record.sentences);
    if record.words.len() < total {
        return Err(ValidationError::BlankCountMismatch {
            blanks: total,
            words: record.words.len(),
        });
    }

    Ok(BlankContent {
        sentences: record.sentences,
        words: record.words,
        image: record.image,
    })
}

fn parse_ordering(map: Map<String, Value>) -> Result<OrderingContent, ValidationError> {
    require(&map, "draggable_items")?;
    require(&map, "correct_order")?;
    let record: OrderingRecord = from_map(ExerciseKind::DragAndDrop, map)?;

    let items = record.draggable_items.len();
    if record.correct_order.len() != items {
        return Err(ValidationError::InvalidOrder(format!(
            "{} entries for {} item(s)",
            record.correct_order.len(),
            items
        )));
    }

    let mut seen = HashSet::new();
    let correct_order = record
        .correct_order
        .iter()
        .enumerate()
        .map(|(zone, stored)| {
            let index = stored.resolve(&format!("correct_order[{zone}]"))?;
            if index >= items {
                return Err(ValidationError::InvalidOrder(format!(
                    "index {index} out of range for {items} item(s)"
                )));
            }
            if !seen.insert(index) {
                return Err(ValidationError::InvalidOrder(format!(
                    "index {index} used more than once"
                )));
            }
            Ok(index)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrderingContent {
        draggable_items: record.draggable_items,
        correct_order,
    })
}

fn parse_pairs(map: Map<String, Value>) -> Result<PairsContent, ValidationError> {
    require(&map, "left_items")?;
    require(&map, "right_items")?;
    let record: PairsRecord = from_map(ExerciseKind::Pairs, map)?;

    if record.left_items.len() != record.right_items.len() {
        return Err(ValidationError::UnevenPairs {
            left: record.left_items.len(),
            right: record.right_items.len(),
        });
    }

    Ok(PairsContent {
        left_items: record.left_items,
        right_items: record.right_items,
    })
}

fn parse_legend(kind: ExerciseKind, map: Map<String, Value>) -> Result<LegendContent, ValidationError> {
    require(&map, "zones")?;
    let record: LegendRecord = from_map(kind, map)?;

    let mode = match record.mode.as_deref() {
        Some(mode) => mode.parse::<LegendMode>()?,
        None => LegendMode::default(),
    };

    let mut ids = HashSet::new();
    for id in record.zones.iter().filter_map(|z| z.id) {
        if !ids.insert(id) {
            return Err(ValidationError::DuplicateZoneId(id));
        }
    }

    // Zones stored without an id get fresh ones above the current maximum.
    let mut next_id = next_free_id(ids.iter().copied());
    let zones = record
        .zones
        .into_iter()
        .enumerate()
        .map(|(i, z)| {
            let id = match z.id {
                Some(id) => id,
                None => {
                    let id = next_id.ok_or(ValidationError::ZoneIdExhausted(i))?;
                    next_id = id.checked_add(1);
                    id
                }
            };
            Ok(Zone {
                id,
                x: z.x.resolve(&format!("zones[{i}].x"))?,
                y: z.y.resolve(&format!("zones[{i}].y"))?,
                legend: z.legend,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let elements: Vec<Element> = record
        .elements
        .into_iter()
        .filter_map(|e| match e {
            ElementRecord::Structured { id, text } => Some(Element { id, text }),
            ElementRecord::Label(_) => None,
        })
        .collect();

    let mut content = LegendContent {
        main_image: record.main_image,
        mode,
        zones,
        elements,
    };
    if !content.elements_consistent() {
        tracing::debug!("regenerating legend elements from {} zone(s)", content.zones.len());
        content.regenerate_elements();
    }
    Ok(content)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read a stored exercise from a JSON file.
pub fn load_exercise(path: &Path) -> Result<RawExercise> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exercise file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse exercise JSON: {}", path.display()))
}

/// Recursively load every `.json` exercise under `dir`.
pub fn load_exercise_directory(dir: &Path) -> Result<Vec<(PathBuf, RawExercise)>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    let mut exercises = Vec::new();
    for path in entries {
        if path.is_dir() {
            exercises.extend(load_exercise_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match load_exercise(&path) {
                Ok(raw) => exercises.push((path, raw)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(exercises)
}

// ---------------------------------------------------------------------------
// Lint
// ---------------------------------------------------------------------------

/// A non-fatal content issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWarning {
    /// Item the warning is about (question, sentence, card...), if any.
    pub item: Option<usize>,
    pub message: String,
}

impl ContentWarning {
    fn at(item: usize, message: impl Into<String>) -> Self {
        Self {
            item: Some(item),
            message: message.into(),
        }
    }

    fn global(message: impl Into<String>) -> Self {
        Self {
            item: None,
            message: message.into(),
        }
    }
}

/// Check validated content for issues that do not prevent scoring.
pub fn lint_content(content: &ExerciseContent) -> Vec<ContentWarning> {
    let mut warnings = Vec::new();

    match content {
        ExerciseContent::Qcm(c) => {
            for (i, q) in c.questions.iter().enumerate() {
                if q.text.trim().is_empty() {
                    warnings.push(ContentWarning::at(i, "question text is empty"));
                }
                if q.choices.len() < 2 {
                    warnings.push(ContentWarning::at(i, "question has fewer than two choices"));
                }
            }
        }
        ExerciseContent::FillInBlanks(c) | ExerciseContent::WordPlacement(c) => {
            for (i, s) in c.sentences.iter().enumerate() {
                if blanks::count_blanks(s) == 0 {
                    warnings.push(ContentWarning::at(i, "sentence has no blank"));
                }
            }
            let extra = c.distractors().len();
            if extra > 0 {
                warnings.push(ContentWarning::global(format!(
                    "{extra} word(s) beyond the blank count act as distractors"
                )));
            }
        }
        ExerciseContent::DragAndDrop(c) => {
            if c.correct_order.iter().enumerate().all(|(i, &j)| i == j) && c.correct_order.len() > 1 {
                warnings.push(ContentWarning::global(
                    "correct order is the identity; items may be displayed already solved",
                ));
            }
        }
        ExerciseContent::Pairs(c) => {
            for (i, (l, r)) in c.left_items.iter().zip(&c.right_items).enumerate() {
                if l.content().trim().is_empty() || r.content().trim().is_empty() {
                    warnings.push(ContentWarning::at(i, "pair has an empty side"));
                }
            }
        }
        ExerciseContent::ImageLabeling(c) | ExerciseContent::Legend(c) => {
            if c.main_image.is_none() {
                warnings.push(ContentWarning::global("no main image"));
            }
            for (i, z) in c.zones.iter().enumerate() {
                if z.legend.trim().is_empty() {
                    warnings.push(ContentWarning::at(i, "zone has an empty legend"));
                }
            }
        }
        ExerciseContent::Flashcards(c) => {
            for (i, card) in c.cards.iter().enumerate() {
                if card.question.trim().is_empty() || card.answer.trim().is_empty() {
                    warnings.push(ContentWarning::at(i, "flashcard has an empty side"));
                }
            }
        }
        ExerciseContent::UnderlineWords(c) => {
            for (i, s) in c.sentences.iter().enumerate() {
                if s.words_to_underline.is_empty() {
                    warnings.push(ContentWarning::at(i, "sentence has no word to underline"));
                }
            }
        }
        ExerciseContent::WordSearch(c) => {
            let mut seen = HashSet::new();
            for (i, word) in c.words.iter().enumerate() {
                if word.is_empty() {
                    warnings.push(ContentWarning::at(i, "hidden word is empty"));
                } else if !seen.insert(word.to_lowercase()) {
                    warnings.push(ContentWarning::at(i, "hidden word appears more than once"));
                }
            }
        }
    }

    if content.kind().is_graded() && content.item_count() == 0 {
        warnings.push(ContentWarning::global("no gradable items; every submission scores 0"));
    }

    warnings
}
