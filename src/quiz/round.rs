use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::quiz::{Level, Word};

/// Picks the word the player has to translate.
pub fn pick_target<'a, R: Rng + ?Sized>(
    rng: &mut R,
    level: Level,
    words: &'a [Word],
) -> Result<&'a Word, QuizError> {
    words.choose(rng).ok_or(QuizError::EmptyCollection(level))
}

/// Builds the answer options for `target`: up to `option_count - 1` distractors
/// drawn from `words` plus the target itself, in random order.
///
/// A short word list yields fewer options; options are always unique by id and
/// contain the target exactly once.
pub fn pick_options<R: Rng + ?Sized>(
    rng: &mut R,
    target: &Word,
    words: &[Word],
    option_count: usize,
) -> Vec<Word> {
    let mut distractors: Vec<&Word> = words.iter().filter(|w| w.id != target.id).collect();
    // Unique by id even if a caller hands us a list with repeated ids.
    distractors.sort_by_key(|w| w.id);
    distractors.dedup_by_key(|w| w.id);

    distractors.shuffle(rng);
    distractors.truncate(option_count.saturating_sub(1));

    let mut options: Vec<Word> = distractors.into_iter().cloned().collect();
    options.push(target.clone());

    // Second pass so the target does not sit at the end.
    options.shuffle(rng);
    options
}

/// A target word together with its options.
#[derive(Debug, Clone)]
pub struct Round {
    pub word: Word,
    pub options: Vec<Word>,
}

impl Round {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        level: Level,
        words: &[Word],
        option_count: usize,
    ) -> Result<Self, QuizError> {
        let word = pick_target(rng, level, words)?.clone();
        let options = pick_options(rng, &word, words, option_count);
        log::debug!(
            "New round on {}: '{}' with {} options",
            level,
            word.source_text,
            options.len()
        );
        Ok(Self { word, options })
    }
}
