use std::time::Instant;

use crate::clock::{letter_period, IntervalClock};
use crate::words::WordPool;

/// Letter-by-letter playback of the current word.
///
/// States: stopped, playing, pending-next-word. Playing ends either when the
/// clock walks past the last letter or on an explicit `stop`. Pending marks
/// the deliberate pause between a finished round and the next word's
/// playback; the orchestrator's replay delay exits it by calling `play`.
#[derive(Debug)]
pub struct PlaybackSession {
    current_word: String,
    letter_index: usize,
    is_playing: bool,
    has_played: bool,
    is_pending_next_word: bool,
    clock: IntervalClock,
}

impl PlaybackSession {
    pub fn new(pool: &WordPool) -> Self {
        Self {
            current_word: pool.pick().to_string(),
            letter_index: 0,
            is_playing: false,
            has_played: false,
            is_pending_next_word: false,
            clock: IntervalClock::new(),
        }
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn letter_index(&self) -> usize {
        self.letter_index
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// True once any playback has completed starting at least once; drives
    /// the onboarding copy in the display layer.
    pub fn has_played(&self) -> bool {
        self.has_played
    }

    pub fn is_pending_next_word(&self) -> bool {
        self.is_pending_next_word
    }

    pub fn is_active(&self) -> bool {
        self.is_playing || self.is_pending_next_word
    }

    pub fn current_letter(&self) -> Option<char> {
        self.current_word.chars().nth(self.letter_index)
    }

    /// True when the current letter equals the one before it. The display
    /// layer nudges repeated letters sideways so double letters read as two
    /// distinct signs.
    pub fn is_repeated_letter(&self) -> bool {
        if self.letter_index == 0 {
            return false;
        }
        let letters: Vec<char> = self.current_word.chars().collect();
        match (
            letters.get(self.letter_index - 1),
            letters.get(self.letter_index),
        ) {
            (Some(prev), Some(cur)) => prev == cur,
            _ => false,
        }
    }

    /// Starts playback from the first letter at the given speed.
    pub fn play(&mut self, now: Instant, speed: f64) {
        self.letter_index = 0;
        self.is_playing = true;
        self.is_pending_next_word = false;
        self.has_played = true;
        self.clock.start(now, letter_period(speed));
    }

    /// Cancels the clock and returns to the stopped state. Idempotent.
    pub fn stop(&mut self) {
        self.clock.cancel();
        self.letter_index = 0;
        self.is_playing = false;
        self.is_pending_next_word = false;
    }

    /// One clock tick: step to the next letter, or finish on the last one.
    pub fn advance_letter(&mut self) {
        let len = self.current_word.chars().count();
        if self.letter_index + 1 >= len {
            self.is_playing = false;
            self.clock.cancel();
        } else {
            self.letter_index += 1;
        }
    }

    /// Replaces the current word without touching the playing state.
    pub fn set_next_word(&mut self, pool: &WordPool) {
        self.current_word = pool.pick().to_string();
    }

    pub fn set_next_word_pending(&mut self, pool: &WordPool) {
        self.set_next_word(pool);
        self.is_pending_next_word = true;
    }

    pub fn reset(&mut self, pool: &WordPool) {
        self.stop();
        self.set_next_word(pool);
        self.has_played = false;
    }

    /// Re-shows the onboarding copy; used when a settings change swaps the
    /// word out from under a player who has not interacted yet.
    pub fn clear_has_played(&mut self) {
        self.has_played = false;
    }

    /// Applies every letter advance due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for _ in 0..self.clock.poll(now) {
            if !self.is_playing {
                break;
            }
            self.advance_letter();
        }
    }

    #[cfg(test)]
    pub(crate) fn set_current_word_for_test(&mut self, word: &str) {
        self.current_word = word.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::{WordList, WordPool};
    use std::time::Duration;

    fn single_word_pool(word: &str) -> WordPool {
        let list = WordList {
            name: "test".to_string(),
            size: 1,
            words: vec![word.to_string()],
        };
        WordPool::new(list, None).unwrap()
    }

    #[test]
    fn test_new_session_is_stopped() {
        let pool = single_word_pool("cat");
        let playback = PlaybackSession::new(&pool);

        assert_eq!(playback.current_word(), "cat");
        assert_eq!(playback.letter_index(), 0);
        assert!(!playback.is_playing());
        assert!(!playback.has_played());
        assert!(!playback.is_pending_next_word());
        assert!(!playback.is_active());
    }

    #[test]
    fn test_play_resets_index_and_arms_clock() {
        let pool = single_word_pool("cat");
        let mut playback = PlaybackSession::new(&pool);
        let t0 = Instant::now();

        playback.play(t0, 2.0);

        assert!(playback.is_playing());
        assert!(playback.has_played());
        assert!(playback.is_active());
        assert_eq!(playback.letter_index(), 0);
        assert_eq!(playback.current_letter(), Some('c'));
    }

    #[test]
    fn test_exactly_n_advances_finish_an_n_letter_word() {
        let pool = single_word_pool("heavy");
        let mut playback = PlaybackSession::new(&pool);
        playback.play(Instant::now(), 3.0);

        // exactly n advances take an n-letter word from playing to stopped
        for nth in 1..=5usize {
            assert!(playback.is_playing(), "still playing before advance {}", nth);
            playback.advance_letter();
            assert!(playback.letter_index() <= 4, "index never exceeds n-1");
        }

        assert!(!playback.is_playing());
        assert_eq!(playback.letter_index(), 4);
    }

    #[test]
    fn test_single_letter_word_finishes_on_first_advance() {
        let pool = single_word_pool("cat");
        let mut playback = PlaybackSession::new(&pool);
        playback.set_current_word_for_test("a");
        playback.play(Instant::now(), 3.0);

        playback.advance_letter();
        assert!(!playback.is_playing());
        assert_eq!(playback.letter_index(), 0);
    }

    #[test]
    fn test_tick_advances_per_period() {
        let pool = single_word_pool("turkey");
        let mut playback = PlaybackSession::new(&pool);
        let t0 = Instant::now();

        // speed 2.0 -> one letter per second
        playback.play(t0, 2.0);
        assert_eq!(playback.letter_index(), 0);

        playback.tick(t0 + Duration::from_millis(900));
        assert_eq!(playback.letter_index(), 0);

        playback.tick(t0 + Duration::from_secs(1));
        assert_eq!(playback.letter_index(), 1);

        playback.tick(t0 + Duration::from_secs(3));
        assert_eq!(playback.letter_index(), 3);
    }

    #[test]
    fn test_tick_finishes_playback_and_goes_quiet() {
        let pool = single_word_pool("cat");
        let mut playback = PlaybackSession::new(&pool);
        let t0 = Instant::now();

        playback.play(t0, 2.0);
        playback.tick(t0 + Duration::from_secs(10));

        assert!(!playback.is_playing());
        // finished playback leaves no running clock behind
        playback.tick(t0 + Duration::from_secs(20));
        assert!(!playback.is_playing());
        assert_eq!(playback.letter_index(), 2);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let pool = single_word_pool("cat");
        let mut playback = PlaybackSession::new(&pool);

        playback.play(Instant::now(), 3.0);
        playback.stop();
        assert!(!playback.is_playing());
        assert_eq!(playback.letter_index(), 0);

        playback.stop();
        assert!(!playback.is_playing());
        assert!(!playback.is_pending_next_word());
    }

    #[test]
    fn test_pending_next_word() {
        let pool = single_word_pool("cat");
        let mut playback = PlaybackSession::new(&pool);

        playback.set_next_word_pending(&pool);
        assert!(playback.is_pending_next_word());
        assert!(playback.is_active());
        assert!(!playback.is_playing());

        // play exits the pending state
        playback.play(Instant::now(), 3.0);
        assert!(!playback.is_pending_next_word());
        assert!(playback.is_playing());
    }

    #[test]
    fn test_reset_clears_has_played() {
        let pool = single_word_pool("cat");
        let mut playback = PlaybackSession::new(&pool);

        playback.play(Instant::now(), 3.0);
        assert!(playback.has_played());

        playback.reset(&pool);
        assert!(!playback.has_played());
        assert!(!playback.is_playing());
        assert_eq!(playback.current_word(), "cat");
    }

    #[test]
    fn test_repeated_letter_detection() {
        let pool = single_word_pool("cat");
        let mut playback = PlaybackSession::new(&pool);
        playback.set_current_word_for_test("ball");
        playback.play(Instant::now(), 3.0);

        assert!(!playback.is_repeated_letter()); // b
        playback.advance_letter();
        assert!(!playback.is_repeated_letter()); // a
        playback.advance_letter();
        assert!(!playback.is_repeated_letter()); // first l
        playback.advance_letter();
        assert!(playback.is_repeated_letter()); // second l
    }
}
