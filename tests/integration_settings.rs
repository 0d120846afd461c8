// Settings persistence and pool re-filtering across the settings boundary.

use assert_matches::assert_matches;
use tempfile::tempdir;

use fspell::config::{FileSettingsStore, Settings, SettingsStore};
use fspell::round::RoundOrchestrator;
use fspell::words::{EmptyPoolError, WordList, WordPool};

fn word_list(words: &[&str]) -> WordList {
    WordList {
        name: "test".to_string(),
        size: words.len() as u32,
        words: words.iter().map(|w| w.to_string()).collect(),
    }
}

#[test]
fn settings_survive_a_store_roundtrip() {
    let dir = tempdir().unwrap();
    let store = FileSettingsStore::with_path(dir.path().join("settings.json"));

    let mut settings = Settings::default();
    settings.set_speed(7.0);
    settings.max_word_length = Some(5);

    store.save(&settings).unwrap();
    assert_eq!(store.load(), settings);
}

#[test]
fn embedded_list_supports_every_offered_length_step() {
    let list = WordList::new("english");

    for step in fspell::config::WORD_LENGTH_STEPS {
        let pool = WordPool::new(list.clone(), Some(step));
        assert!(pool.is_ok(), "length step {} must leave words to drill", step);
    }
}

#[test]
fn length_change_forces_a_conforming_word() {
    let pool = WordPool::new(word_list(&["cat", "dog", "turkey", "penguin"]), None).unwrap();
    let mut orch = RoundOrchestrator::new(pool, Settings::default());

    orch.set_max_word_length(Some(3)).unwrap();

    for _ in 0..20 {
        let word = orch.playback().current_word().to_string();
        assert!(word.chars().count() <= 3, "{} exceeds the filter", word);
        orch.on_next_word(std::time::Instant::now());
    }
}

#[test]
fn rejected_filter_changes_nothing() {
    let pool = WordPool::new(word_list(&["turkey", "penguin"]), None).unwrap();
    let mut orch = RoundOrchestrator::new(pool, Settings::default());
    let word_before = orch.playback().current_word().to_string();

    let result = orch.set_max_word_length(Some(3));

    assert_matches!(result, Err(EmptyPoolError { max_word_length: 3 }));
    assert_eq!(orch.settings().max_word_length, None);
    assert_eq!(orch.playback().current_word(), word_before);
    assert_eq!(orch.pool().len(), 2);
}

#[test]
fn relaxing_the_filter_brings_long_words_back() {
    let pool = WordPool::new(word_list(&["cat", "turkey"]), Some(3)).unwrap();
    let mut orch = RoundOrchestrator::new(pool, Settings::default());
    assert_eq!(orch.pool().len(), 1);

    orch.set_max_word_length(None).unwrap();
    assert_eq!(orch.pool().len(), 2);
}
