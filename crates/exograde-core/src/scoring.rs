//! Per-type scoring.
//!
//! Each exercise type compares the extracted answers with the content and
//! produces one [`ItemFeedback`] per gradable item; the aggregate is derived
//! from those items by [`ScoreResult::graded`]. Text comparisons are on
//! trimmed, lowercased strings; index comparisons are exact.

use std::collections::BTreeSet;

use crate::answers::{self, Answer, AnswerSet, SubmittedFields};
use crate::blanks;
use crate::config::{BlankMatching, GradingConfig};
use crate::model::{
    BlankContent, ExerciseContent, LegendContent, OrderingContent, PairsContent, QcmContent,
    UnderlineContent, WordSearchContent,
};
use crate::report::{ItemFeedback, ScoreResult};

/// Normalized form used for text comparison.
pub fn normalize_text(s: &str) -> String {
    s.trim().to_lowercase()
}

const WORD_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}', '«', '»',
];

/// Normalized form of an underlined word: lowercase, surrounding
/// punctuation removed, leading elision (`l'`, `qu'`...) stripped.
pub fn normalize_word(word: &str, elisions: &[String]) -> String {
    let lowered = word.trim().to_lowercase().replace('\u{2019}', "'");
    let trimmed = lowered.trim_matches(|c: char| WORD_PUNCTUATION.contains(&c) || c.is_whitespace());
    for prefix in elisions {
        if let Some(rest) = trimmed.strip_prefix(prefix.as_str()) {
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    trimmed.to_string()
}

fn answer_at<T>(answers: &[Answer<T>], index: usize) -> &Answer<T> {
    answers.get(index).unwrap_or(&Answer::Missing)
}

/// Score `answers` against `content`.
///
/// Flashcards produce a review-only result. If `answers` does not belong to
/// the content's type, every item is treated as unanswered.
pub fn score(content: &ExerciseContent, answers: &AnswerSet, config: &GradingConfig) -> ScoreResult {
    let kind = content.kind();
    let items = match (content, answers) {
        (ExerciseContent::Flashcards(_), _) => return ScoreResult::review_only(kind),
        (ExerciseContent::Qcm(c), AnswerSet::Choices(a)) => score_qcm(c, a),
        (
            ExerciseContent::FillInBlanks(c) | ExerciseContent::WordPlacement(c),
            AnswerSet::Words(a),
        ) => score_blanks(c, a, config.blank_matching),
        (ExerciseContent::DragAndDrop(c), AnswerSet::Order(a)) => score_ordering(c, a),
        (ExerciseContent::Pairs(c), AnswerSet::Pairs(a)) => score_pairs(c, a),
        (
            ExerciseContent::ImageLabeling(c) | ExerciseContent::Legend(c),
            AnswerSet::Placements(a),
        ) => score_legend(c, a),
        (ExerciseContent::UnderlineWords(c), AnswerSet::Underlines(a)) => {
            score_underlines(c, a, &config.elisions)
        }
        (ExerciseContent::WordSearch(c), AnswerSet::FoundWords(a)) => score_word_search(c, a),
        (content, _) => {
            tracing::warn!("answer set does not match {kind} content, scoring as unanswered");
            let empty = answers::extract(content, &SubmittedFields::new());
            return score(content, &empty, config);
        }
    };
    ScoreResult::graded(kind, items)
}

fn score_qcm(content: &QcmContent, answers: &[Answer<usize>]) -> Vec<ItemFeedback> {
    content
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answer = answer_at(answers, i);
            let given = match answer {
                Answer::Missing => None,
                Answer::Invalid(raw) => Some(raw.clone()),
                Answer::Given(choice) => Some(
                    question
                        .choices
                        .get(*choice)
                        .cloned()
                        .unwrap_or_else(|| format!("#{choice}")),
                ),
            };
            let correct = answer.matches(&question.correct);
            tracing::debug!("question {i}: given {answer:?}, expected {}, correct={correct}", question.correct);
            ItemFeedback::new(i, question.correct_choice(), given, correct)
        })
        .collect()
}

fn score_blanks(
    content: &BlankContent,
    answers: &[Answer<String>],
    matching: BlankMatching,
) -> Vec<ItemFeedback> {
    // Single source for both the loop bound and the denominator.
    let total = content.total_blanks();

    let mut remaining: Vec<String> = content
        .words
        .iter()
        .take(total)
        .map(|w| normalize_text(w))
        .collect();

    (0..total)
        .map(|g| {
            let location = blanks::locate(&content.sentences, g);
            let expected = content.words.get(g);
            let given = answer_at(answers, g).given();

            let correct = match (matching, expected, given) {
                (_, None, _) | (_, _, None) => false,
                (BlankMatching::Positional, Some(expected), Some(given)) => {
                    normalize_text(given) == normalize_text(expected)
                }
                (BlankMatching::AnyOrder, Some(_), Some(given)) => {
                    let given = normalize_text(given);
                    match remaining.iter().position(|w| *w == given) {
                        Some(pos) => {
                            remaining.swap_remove(pos);
                            true
                        }
                        None => false,
                    }
                }
            };
            tracing::debug!("blank {g} at {location:?}: given {given:?}, correct={correct}");

            ItemFeedback::new(
                g,
                expected.cloned().unwrap_or_default(),
                given.cloned(),
                correct,
            )
            .at(location)
        })
        .collect()
}

fn score_ordering(content: &OrderingContent, answers: &[Answer<usize>]) -> Vec<ItemFeedback> {
    content
        .correct_order
        .iter()
        .enumerate()
        .map(|(zone, &expected)| {
            let answer = answer_at(answers, zone);
            let given = match answer {
                Answer::Missing => None,
                Answer::Invalid(raw) => Some(raw.clone()),
                Answer::Given(idx) => Some(
                    content
                        .item(*idx)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("#{idx}")),
                ),
            };
            ItemFeedback::new(
                zone,
                content.item(expected).unwrap_or_default(),
                given,
                answer.matches(&expected),
            )
        })
        .collect()
}

fn score_pairs(content: &PairsContent, answers: &[Answer<usize>]) -> Vec<ItemFeedback> {
    content
        .left_items
        .iter()
        .enumerate()
        .map(|(i, left)| {
            let answer = answer_at(answers, i);
            let given = match answer {
                Answer::Missing => None,
                Answer::Invalid(raw) => Some(raw.clone()),
                Answer::Given(right) => Some(
                    content
                        .right_items
                        .get(*right)
                        .map(|item| format!("{left} = {item}"))
                        .unwrap_or_else(|| format!("#{right}")),
                ),
            };
            let expected = content
                .right_items
                .get(i)
                .map(|right| format!("{left} = {right}"))
                .unwrap_or_default();
            ItemFeedback::new(i, expected, given, answer.matches(&i))
        })
        .collect()
}

fn score_legend(content: &LegendContent, answers: &[Answer<u32>]) -> Vec<ItemFeedback> {
    let label = |id: u32| {
        content
            .element(id)
            .map(|e| e.text.clone())
            .unwrap_or_else(|| format!("#{id}"))
    };

    content
        .zones
        .iter()
        .enumerate()
        .map(|(i, zone)| {
            let answer = answer_at(answers, i);
            let given = match answer {
                Answer::Missing => None,
                Answer::Invalid(raw) => Some(raw.clone()),
                Answer::Given(id) => Some(label(*id)),
            };
            ItemFeedback::new(i, label(zone.id), given, answer.matches(&zone.id))
        })
        .collect()
}

fn score_underlines(
    content: &UnderlineContent,
    answers: &[Answer<Vec<String>>],
    elisions: &[String],
) -> Vec<ItemFeedback> {
    let normalized = |words: &[String]| -> BTreeSet<String> {
        words
            .iter()
            .map(|w| normalize_word(w, elisions))
            .filter(|w| !w.is_empty())
            .collect()
    };
    let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(", ");

    content
        .sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let expected = normalized(&sentence.words_to_underline);
            let selected = answer_at(answers, i).given().map(|words| normalized(words));
            let correct = selected.as_ref() == Some(&expected);
            ItemFeedback::new(i, join(&expected), selected.as_ref().map(join), correct)
        })
        .collect()
}

/// One item per hidden word. A found word credits the first hidden word
/// it matches that is not credited yet; words matching nothing left,
/// repeats included, earn nothing.
fn score_word_search(
    content: &WordSearchContent,
    answer: &Answer<Vec<String>>,
) -> Vec<ItemFeedback> {
    let targets: Vec<String> = content.words.iter().map(|w| normalize_text(w)).collect();
    let mut found = vec![false; targets.len()];

    for word in answer.given().map(Vec::as_slice).unwrap_or_default() {
        let word = normalize_text(word);
        match (0..targets.len()).find(|&i| !found[i] && targets[i] == word) {
            Some(i) => found[i] = true,
            None => tracing::debug!("found word `{word}` is not hidden or was already counted"),
        }
    }

    content
        .words
        .iter()
        .zip(found)
        .enumerate()
        .map(|(i, (word, hit))| {
            ItemFeedback::new(i, word.clone(), hit.then(|| word.clone()), hit)
        })
        .collect()
}
