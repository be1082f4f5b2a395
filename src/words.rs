//! Goal words and where they come from.
//!
//! Word lists are JSON arrays of `{ "word", "pos", "pron", "def" }` objects,
//! one file per difficulty: `dict-easy.json`, `dict-normal.json`,
//! `dict-hard.json`.

use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Difficulty;
use crate::error::WordError;

/// A dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawWordInfo")]
pub struct WordInfo {
    pub word: String,
    pub part_of_speech: String,
    pub pronunciation: String,
    pub definition: String,
}

#[derive(Deserialize)]
struct RawWordInfo {
    word: String,
    #[serde(default)]
    pos: String,
    #[serde(default)]
    pron: String,
    #[serde(default)]
    def: String,
}

impl From<RawWordInfo> for WordInfo {
    fn from(raw: RawWordInfo) -> Self {
        WordInfo::with_details(&raw.word, &raw.pos, &raw.pron, &raw.def)
    }
}

impl WordInfo {
    pub fn new(word: &str) -> Self {
        Self::with_details(word, "", "", "")
    }

    pub fn with_details(word: &str, part_of_speech: &str, pronunciation: &str, definition: &str) -> Self {
        Self {
            word: word.trim().to_lowercase(),
            part_of_speech: part_of_speech.to_lowercase(),
            pronunciation: pronunciation.to_string(),
            definition: definition.to_lowercase(),
        }
    }
}

/// Supplies goal words for a difficulty tier.
pub trait WordSource {
    fn random_word(&self, difficulty: Difficulty, rng: &mut dyn rand::RngCore) -> Result<WordInfo, WordError>;

    /// Picks a word with exactly `length` letters.
    ///
    /// The default draws once and rejects a word of the wrong length.
    fn random_word_of_length(
        &self,
        difficulty: Difficulty,
        length: usize,
        rng: &mut dyn rand::RngCore,
    ) -> Result<WordInfo, WordError> {
        let info = self.random_word(difficulty, rng)?;
        if info.word.chars().count() == length {
            Ok(info)
        } else {
            Err(WordError::NoWordOfLength {
                difficulty: difficulty.to_string(),
                length,
            })
        }
    }
}

/// Word lists per difficulty tier.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    banks: [Vec<WordInfo>; 3],
}

const BUILTIN_EASY: &[&str] = &["cat", "sun", "map", "owl", "ink", "fog", "jam", "kit"];
const BUILTIN_NORMAL: &[&str] = &["word", "cube", "lamp", "fern", "moon", "gust", "plum", "tide"];
const BUILTIN_HARD: &[&str] = &["level", "prism", "quilt", "ember", "haiku", "vivid", "otter", "sonar"];

const FILE_NAMES: [&str; 3] = ["dict-easy.json", "dict-normal.json", "dict-hard.json"];

impl WordBank {
    /// A small list of words bundled with the crate.
    pub fn builtin() -> Self {
        let bank = |words: &[&str]| words.iter().map(|word| WordInfo::new(word)).collect();
        Self {
            banks: [bank(BUILTIN_EASY), bank(BUILTIN_NORMAL), bank(BUILTIN_HARD)],
        }
    }

    /// Replaces one tier with the entries of a JSON word list.
    ///
    /// Entries that are not purely alphabetic are skipped.
    pub fn load_json(&mut self, difficulty: Difficulty, text: &str) -> Result<usize, WordError> {
        let entries: Vec<WordInfo> = serde_json::from_str(text)?;
        let total = entries.len();
        let words: Vec<WordInfo> = entries
            .into_iter()
            .filter(|entry| !entry.word.is_empty() && entry.word.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();
        if words.len() < total {
            warn!(%difficulty, skipped = total - words.len(), "skipped non-alphabetic words");
        }
        let count = words.len();
        self.banks[difficulty.index()] = words;
        Ok(count)
    }

    /// Loads every tier from `dir`, keeping the built-in list for missing files.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, WordError> {
        let dir = dir.as_ref();
        let mut bank = Self::builtin();
        for difficulty in Difficulty::ALL {
            let path = dir.join(FILE_NAMES[difficulty.index()]);
            if !path.exists() {
                continue;
            }
            let text = std::fs::read_to_string(&path)?;
            let count = bank.load_json(difficulty, &text)?;
            info!(%difficulty, count, "loaded word list");
        }
        Ok(bank)
    }

    pub fn words(&self, difficulty: Difficulty) -> &[WordInfo] {
        &self.banks[difficulty.index()]
    }
}

impl WordSource for WordBank {
    fn random_word(&self, difficulty: Difficulty, rng: &mut dyn rand::RngCore) -> Result<WordInfo, WordError> {
        let words = self.words(difficulty);
        if words.is_empty() {
            return Err(WordError::EmptyBank(difficulty.to_string()));
        }
        Ok(words[rng.random_range(0..words.len())].clone())
    }

    fn random_word_of_length(
        &self,
        difficulty: Difficulty,
        length: usize,
        rng: &mut dyn rand::RngCore,
    ) -> Result<WordInfo, WordError> {
        let words = self.words(difficulty);
        if words.is_empty() {
            return Err(WordError::EmptyBank(difficulty.to_string()));
        }
        let fitting: Vec<&WordInfo> = words
            .iter()
            .filter(|info| info.word.chars().count() == length)
            .collect();
        if fitting.is_empty() {
            return Err(WordError::NoWordOfLength {
                difficulty: difficulty.to_string(),
                length,
            });
        }
        Ok(fitting[rng.random_range(0..fitting.len())].clone())
    }
}
