//! Word sources for the search orchestrator

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Produces words to feed the oracle.
pub trait WordSource {
    /// `count` words, each of `length` characters when a length is given.
    fn generate(&mut self, length: Option<usize>, count: usize) -> Vec<String>;
}

const WORDS: &[&str] = &[
    "which", "apple", "chemical", "beautiful", "fell", "broken", "scientist", "party", "farm",
    "sit", "likely", "basic", "solid", "mud", "buried", "though", "diameter", "mad", "origin",
    "elephant", "brush", "stiff", "environment", "chosen", "tank", "stick", "amount",
    "development", "officer", "offer", "fully", "poet", "water", "swim", "aloud", "pond",
    "shape", "tales", "dirty", "battle", "lunch", "sitting", "eager", "twelve", "stone",
    "finger", "once", "bag", "short", "hearing", "desk", "composition", "asleep", "rear",
    "slowly", "hardly", "save", "quietly", "extra", "mostly", "everything", "top", "different",
    "plane", "vegetable", "helpful", "exactly", "trade", "diagram", "tool", "fence", "rest",
    "sweet", "blank", "live", "you", "age", "date", "wolf", "wrote", "try", "football", "box",
    "late", "war", "increase", "state", "gulf", "system", "after", "half", "far", "worse",
    "his", "brass", "modern", "kitten", "mitten", "sunday", "saturday", "banana", "ananas",
];

/// Offline, reproducible word source.
///
/// Picks from a fixed list, preferring words of the requested length. When
/// no listed word has that length a random lowercase word is built instead.
#[derive(Debug, Clone)]
pub struct OfflineWords {
    rng: ChaCha8Rng,
}

impl OfflineWords {
    /// Seeded from `seed`, or from OS entropy when `None`
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn random_word(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| self.rng.random_range(b'a'..=b'z') as char)
            .collect()
    }

    fn one(&mut self, length: Option<usize>) -> String {
        let Some(length) = length else {
            return WORDS.choose(&mut self.rng).copied().unwrap_or("word").to_string();
        };
        let matching: Vec<&str> = WORDS
            .iter()
            .copied()
            .filter(|word| word.chars().count() == length)
            .collect();
        match matching.choose(&mut self.rng) {
            Some(word) => word.to_string(),
            None => self.random_word(length),
        }
    }
}

impl WordSource for OfflineWords {
    fn generate(&mut self, length: Option<usize>, count: usize) -> Vec<String> {
        (0..count).map(|_| self.one(length)).collect()
    }
}
