use std::time::{Duration, Instant};

use crate::clock::OneShot;
use crate::config::Settings;
use crate::feedback::FeedbackSession;
use crate::playback::PlaybackSession;
use crate::stats::{CompletedWord, GameStats};
use crate::words::{EmptyPoolError, WordPool};

/// Wait after a correct submission or a reveal before moving on.
pub const POST_SUBMIT_DELAY: Duration = Duration::from_millis(2000);
/// Deliberate pause between rounds before the new word plays.
pub const NEXT_WORD_DELAY: Duration = Duration::from_millis(1000);
/// How long incorrect feedback stays up before the player may retry.
pub const INCORRECT_HIDE_DELAY: Duration = Duration::from_millis(500);
/// How long the expressive score indicator stays highlighted.
pub const SCORE_HIGHLIGHT_DELAY: Duration = Duration::from_millis(1000);

/// Tri-state submission signal for the haptics/visual collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Correct,
    AlmostCorrect,
    Incorrect,
}

/// Receives one cue per submission. The terminal front-end rings the bell
/// on the two negative cues; tests record what they were sent.
pub trait CueSink {
    fn cue(&mut self, cue: Cue);
}

/// Sink for callers that do not surface cues.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn cue(&mut self, _cue: Cue) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameMode {
    Receptive,
    Expressive,
}

/// Sequences user commands into the playback and feedback state machines
/// and owns every delayed transition between rounds.
///
/// Three one-shot timers cover the receptive flow: `hide_timer` takes
/// incorrect feedback down, `advance_timer` moves to the next word after a
/// correct answer or a reveal, and `replay_timer` starts the new word's
/// playback after the inter-word pause. They are independent; `on_stop`
/// cancels all of them plus the playback clock so nothing stale fires.
pub struct RoundOrchestrator {
    playback: PlaybackSession,
    feedback: FeedbackSession,
    pool: WordPool,
    settings: Settings,
    stats: GameStats,
    hide_timer: OneShot,
    advance_timer: OneShot,
    replay_timer: OneShot,
    highlight_timer: OneShot,
    is_highlighting_score: bool,
}

impl RoundOrchestrator {
    pub fn new(pool: WordPool, settings: Settings) -> Self {
        let playback = PlaybackSession::new(&pool);
        Self {
            playback,
            feedback: FeedbackSession::new(),
            pool,
            settings,
            stats: GameStats::new(),
            hide_timer: OneShot::new(),
            advance_timer: OneShot::new(),
            replay_timer: OneShot::new(),
            highlight_timer: OneShot::new(),
            is_highlighting_score: false,
        }
    }

    pub fn playback(&self) -> &PlaybackSession {
        &self.playback
    }

    pub fn feedback(&self) -> &FeedbackSession {
        &self.feedback
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn is_highlighting_score(&self) -> bool {
        self.is_highlighting_score
    }

    // Answer editing, forwarded so the input widget never touches the
    // session directly.

    pub fn push_answer_char(&mut self, c: char) {
        if !self.feedback.should_disable_controls() {
            self.feedback.push_answer_char(c);
        }
    }

    pub fn pop_answer_char(&mut self) {
        if !self.feedback.should_disable_controls() {
            self.feedback.pop_answer_char();
        }
    }

    // Commands

    pub fn on_play(&mut self, now: Instant) {
        self.playback.play(now, self.settings.speed);
        self.feedback.hide();
    }

    /// Stops playback and invalidates every pending delayed transition.
    pub fn on_stop(&mut self) {
        self.hide_timer.cancel();
        self.advance_timer.cancel();
        self.replay_timer.cancel();
        self.playback.stop();
        self.feedback.hide();
    }

    pub fn on_submit(&mut self, raw_answer: &str, now: Instant, cues: &mut dyn CueSink) {
        // A held return key must not double-score the round.
        if self.feedback.has_correct_answer() {
            return;
        }

        self.feedback.set_answer(raw_answer);
        self.feedback.show();

        if self.feedback.is_answer_correct(self.playback.current_word()) {
            self.on_stop();
            self.feedback.mark_correct();
            cues.cue(Cue::Correct);
            self.stats.record_receptive(CompletedWord::new(
                self.playback.current_word(),
                self.settings.speed,
            ));
            self.advance_timer.schedule(now, POST_SUBMIT_DELAY);
        } else {
            let cue = if self
                .feedback
                .is_almost_correct(self.playback.current_word(), self.settings.almost_threshold)
            {
                Cue::AlmostCorrect
            } else {
                Cue::Incorrect
            };
            self.feedback.mark_incorrect();
            cues.cue(cue);
            // feedback comes down shortly and the round continues
            self.hide_timer.schedule(now, INCORRECT_HIDE_DELAY);
        }
    }

    /// Gives up on the current word. Ignored while the word is playing.
    pub fn on_reveal(&mut self, now: Instant) {
        if self.playback.is_playing() {
            return;
        }
        // a pending replay or feedback-hide must not fire into the reveal
        // window
        self.hide_timer.cancel();
        self.replay_timer.cancel();
        self.playback.stop();
        self.feedback.reveal();
        self.advance_timer.schedule(now, POST_SUBMIT_DELAY);
    }

    /// Moves to the next word and schedules its playback after the
    /// inter-word pause.
    pub fn on_next_word(&mut self, now: Instant) {
        self.playback.set_next_word_pending(&self.pool);
        self.feedback.reset();
        self.replay_timer.schedule(now, NEXT_WORD_DELAY);
    }

    /// Drives playback and fires due delayed transitions. Called once per
    /// main-loop tick; every transition happens on that single thread.
    pub fn tick(&mut self, now: Instant) {
        self.playback.tick(now);

        if self.hide_timer.fire(now) {
            self.feedback.hide();
        }
        if self.advance_timer.fire(now) {
            self.feedback.hide();
            self.on_next_word(now);
        }
        if self.replay_timer.fire(now) {
            self.on_play(now);
        }
        if self.highlight_timer.fire(now) {
            self.is_highlighting_score = false;
        }
    }

    // Expressive mode

    pub fn reveal_spelling(&mut self) {
        self.feedback.reveal();
    }

    pub fn hide_spelling(&mut self) {
        self.feedback.hide();
    }

    /// "Next word" in expressive mode: only offered once the spelling has
    /// been revealed. Scores the finished word and moves on immediately;
    /// there is no playback to wait for.
    pub fn next_expressive_word(&mut self, now: Instant) {
        if !self.feedback.has_revealed() {
            return;
        }
        self.stats
            .record_expressive(self.playback.current_word().to_string());
        self.playback.set_next_word(&self.pool);
        self.feedback.reset();
        self.is_highlighting_score = true;
        self.highlight_timer.schedule(now, SCORE_HIGHLIGHT_DELAY);
    }

    // Settings application

    pub fn set_speed(&mut self, speed: f64) {
        self.settings.set_speed(speed);
    }

    pub fn adjust_speed(&mut self, delta: f64) {
        self.set_speed(self.settings.speed + delta);
    }

    /// Applies a new length filter. The pool is re-filtered synchronously
    /// and the current word replaced so it always satisfies the filter. A
    /// filter that would empty the pool is rejected and nothing changes.
    pub fn set_max_word_length(&mut self, limit: Option<usize>) -> Result<(), EmptyPoolError> {
        self.pool.set_max_word_length(limit)?;
        self.settings.max_word_length = limit;
        self.playback.set_next_word(&self.pool);
        if !self.feedback.has_submitted() {
            // the player never saw the old word; restart onboarding
            self.playback.clear_has_played();
        }
        self.feedback.reset();
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn playback_mut_for_test(&mut self) -> &mut PlaybackSession {
        &mut self.playback
    }
}
