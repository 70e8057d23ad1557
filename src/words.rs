use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::collections::HashSet;
use std::error::Error;
use std::fmt;

static WORDLIST_DIR: Dir = include_dir!("src/wordlists");

/// How many permutations to try before accepting a scramble that equals
/// the original. Near-degenerate words (e.g. two distinct characters with
/// many repeats) have very few distinct permutations.
pub const RESHUFFLE_MAX_ATTEMPTS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordsError {
    /// Every word in the vocabulary is excluded. A configuration error:
    /// the round count exceeds the vocabulary size.
    ExhaustedVocabulary,
}

impl fmt::Display for WordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordsError::ExhaustedVocabulary => {
                write!(f, "every word in the vocabulary has already been used")
            }
        }
    }
}

impl Error for WordsError {}

#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordList {
    pub fn new(file_name: String) -> Self {
        read_word_list_from_file(format!("{file_name}.json")).unwrap()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn read_word_list_from_file(file_name: String) -> Result<WordList, Box<dyn Error>> {
    let file = WORDLIST_DIR
        .get_file(file_name)
        .expect("Word list file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let list = from_str(file_as_str).expect("Unable to deserialize word list json");

    Ok(list)
}

/// A word as presented to the player: the answer and its scrambled form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub original: String,
    pub scrambled: String,
}

/// Supplies non-repeating word picks and scrambled forms for one session.
#[derive(Debug, Clone)]
pub struct WordSource {
    list: WordList,
}

impl WordSource {
    pub fn new(list: WordList) -> Self {
        Self { list }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.list.len()
    }

    /// Picks a word uniformly at random from the vocabulary, skipping any
    /// whose lowercase form is in `excluding`, and scrambles it.
    pub fn pick_next(&self, excluding: &HashSet<String>) -> Result<Word, WordsError> {
        let eligible: Vec<&String> = self
            .list
            .words
            .iter()
            .filter(|w| !excluding.contains(&w.to_lowercase()))
            .collect();

        let original = eligible
            .choose(&mut rand::thread_rng())
            .ok_or(WordsError::ExhaustedVocabulary)?
            .to_lowercase();

        let scrambled = scramble(&original);
        Ok(Word {
            original,
            scrambled,
        })
    }

    /// Re-scrambles `word` without changing the answer. Words with a single
    /// distinct character ("aaa") come back unchanged: no distinct
    /// permutation exists, so this is a no-op rather than a failure.
    pub fn reshuffle(&self, word: &Word) -> Word {
        Word {
            original: word.original.clone(),
            scrambled: scramble(&word.original),
        }
    }
}

/// Uniform random permutation of `original`'s characters (Fisher-Yates via
/// `SliceRandom::shuffle`), retried up to `RESHUFFLE_MAX_ATTEMPTS` times so
/// the result differs from the original whenever that is achievable. After
/// the last attempt whatever permutation was produced is accepted.
fn scramble(original: &str) -> String {
    if original.chars().all_equal() {
        return original.to_string();
    }

    let mut rng = rand::thread_rng();
    let mut chars: Vec<char> = original.chars().collect();
    let mut scrambled = String::new();

    for _ in 0..RESHUFFLE_MAX_ATTEMPTS {
        chars.shuffle(&mut rng);
        scrambled = chars.iter().collect();
        if scrambled != original {
            break;
        }
    }

    scrambled
}
