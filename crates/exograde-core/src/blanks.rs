//! Blank-location resolution for text-with-blanks content.
//!
//! A global blank index counts blanks left to right across all sentences.
//! Resolving it walks the sentences with a running count so that sentences
//! holding several blanks are attributed correctly.

use serde::{Deserialize, Serialize};

/// Placeholder marking a fill-in position inside a sentence template.
pub const BLANK_MARKER: &str = "___";

/// Where a global blank index lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlankLocation {
    /// Index of the sentence containing the blank.
    pub sentence: usize,
    /// Position of the blank among the blanks of that sentence.
    pub local: usize,
}

/// Count non-overlapping blank markers in one sentence.
///
/// A run of six underscores is two blanks.
pub fn count_blanks(sentence: &str) -> usize {
    sentence.matches(BLANK_MARKER).count()
}

/// Total blank markers across all sentences.
pub fn total_blanks<S: AsRef<str>>(sentences: &[S]) -> usize {
    sentences.iter().map(|s| count_blanks(s.as_ref())).sum()
}

/// Resolve global blank `index` to its sentence and local position.
///
/// Returns `None` when `index` is at or beyond the total blank count; the
/// caller must treat that as "no correct answer available".
pub fn locate<S: AsRef<str>>(sentences: &[S], index: usize) -> Option<BlankLocation> {
    let mut consumed = 0usize;
    for (sentence, text) in sentences.iter().enumerate() {
        let here = count_blanks(text.as_ref());
        if index < consumed + here {
            return Some(BlankLocation {
                sentence,
                local: index - consumed,
            });
        }
        consumed += here;
    }
    None
}

/// Locations of every blank, in global order.
pub fn locate_all<S: AsRef<str>>(sentences: &[S]) -> Vec<BlankLocation> {
    sentences
        .iter()
        .enumerate()
        .flat_map(|(sentence, text)| {
            (0..count_blanks(text.as_ref())).map(move |local| BlankLocation { sentence, local })
        })
        .collect()
}
