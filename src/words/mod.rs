use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;
use std::fmt;

static WORDS_DIR: Dir = include_dir!("src/words");

/// Candidate word list embedded in the binary.
#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordList {
    pub fn new(file_name: &str) -> Self {
        read_word_list(&format!("{}.json", file_name)).unwrap()
    }
}

fn read_word_list(file_name: &str) -> Result<WordList, Box<dyn Error>> {
    let file = WORDS_DIR
        .get_file(file_name)
        .expect("Word list file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let list = from_str(file_as_str).expect("Unable to deserialize word list json");

    Ok(list)
}

/// A maximum-length filter left no candidate words. The filter is rejected
/// and the previous pool stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyPoolError {
    pub max_word_length: usize,
}

impl fmt::Display for EmptyPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no words of {} letters or fewer in the word list",
            self.max_word_length
        )
    }
}

impl Error for EmptyPoolError {}

/// Candidate pool with an optional maximum-length filter. The unfiltered
/// list is retained so the filter can be relaxed again later. A constructed
/// pool is never empty, so `pick` always yields a word.
#[derive(Debug, Clone)]
pub struct WordPool {
    all: Vec<String>,
    filtered: Vec<String>,
    max_word_length: Option<usize>,
}

impl WordPool {
    pub fn new(list: WordList, max_word_length: Option<usize>) -> Result<Self, EmptyPoolError> {
        let mut pool = Self {
            filtered: list.words.clone(),
            all: list.words,
            max_word_length: None,
        };
        if max_word_length.is_some() {
            pool.set_max_word_length(max_word_length)?;
        }
        Ok(pool)
    }

    pub fn max_word_length(&self) -> Option<usize> {
        self.max_word_length
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.filtered.iter().any(|w| w == word)
    }

    /// Re-filters synchronously. A filter that would empty the pool is
    /// rejected: the error is returned and the previous pool stays active.
    pub fn set_max_word_length(&mut self, limit: Option<usize>) -> Result<(), EmptyPoolError> {
        let filtered: Vec<String> = match limit {
            Some(max) => self
                .all
                .iter()
                .filter(|w| w.chars().count() <= max)
                .cloned()
                .collect(),
            None => self.all.clone(),
        };

        if filtered.is_empty() {
            return Err(EmptyPoolError {
                max_word_length: limit.unwrap_or(0),
            });
        }

        self.filtered = filtered;
        self.max_word_length = limit;
        Ok(())
    }

    /// Uniformly random word from the filtered pool.
    pub fn pick(&self) -> &str {
        let mut rng = rand::thread_rng();
        self.filtered
            .choose(&mut rng)
            .map(|w| w.as_str())
            .expect("word pool is never empty")
    }
}
