use chrono::{DateTime, Local};

use crate::util::mean;

/// Record of a correctly answered receptive round. Never mutated after
/// creation; accumulates for the lifetime of the app session.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedWord {
    pub word: String,
    pub speed: f64,
    pub completed_at: DateTime<Local>,
}

impl CompletedWord {
    pub fn new(word: impl Into<String>, speed: f64) -> Self {
        Self {
            word: word.into(),
            speed,
            completed_at: Local::now(),
        }
    }
}

/// Per-session statistics, fed fire-and-forget by the orchestrator.
#[derive(Debug)]
pub struct GameStats {
    receptive: Vec<CompletedWord>,
    expressive: Vec<String>,
    started_at: DateTime<Local>,
}

impl GameStats {
    pub fn new() -> Self {
        Self {
            receptive: Vec::new(),
            expressive: Vec::new(),
            started_at: Local::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn record_receptive(&mut self, word: CompletedWord) {
        self.receptive.push(word);
    }

    pub fn record_expressive(&mut self, word: impl Into<String>) {
        self.expressive.push(word.into());
    }

    pub fn receptive_score(&self) -> usize {
        self.receptive.len()
    }

    pub fn expressive_score(&self) -> usize {
        self.expressive.len()
    }

    pub fn receptive_words(&self) -> &[CompletedWord] {
        &self.receptive
    }

    pub fn expressive_words(&self) -> &[String] {
        &self.expressive
    }

    pub fn longest_receptive_word(&self) -> Option<&str> {
        self.receptive
            .iter()
            .max_by_key(|c| c.word.chars().count())
            .map(|c| c.word.as_str())
    }

    pub fn average_receptive_length(&self) -> Option<f64> {
        let lengths: Vec<f64> = self
            .receptive
            .iter()
            .map(|c| c.word.chars().count() as f64)
            .collect();
        mean(&lengths)
    }

    pub fn top_speed(&self) -> Option<f64> {
        self.receptive.iter().map(|c| c.speed).reduce(f64::max)
    }

    pub fn average_speed(&self) -> Option<f64> {
        let speeds: Vec<f64> = self.receptive.iter().map(|c| c.speed).collect();
        mean(&speeds)
    }

    pub fn longest_expressive_word(&self) -> Option<&str> {
        self.expressive
            .iter()
            .max_by_key(|w| w.chars().count())
            .map(|w| w.as_str())
    }

    pub fn average_expressive_length(&self) -> Option<f64> {
        let lengths: Vec<f64> = self
            .expressive
            .iter()
            .map(|w| w.chars().count() as f64)
            .collect();
        mean(&lengths)
    }
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}
