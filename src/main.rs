mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    time::{Duration, Instant},
};

use fspell::config::{FileSettingsStore, SettingsStore};
use fspell::round::{Cue, CueSink, GameMode, RoundOrchestrator};
use fspell::runtime::{AppEvent, CrosstermEventSource, Runner};
use fspell::words::{WordList, WordPool};
use fspell::TICK_RATE_MS;

/// Handshape reference the stats screen can open, since a terminal cannot
/// show the signs themselves.
const HANDSHAPE_CHART_URL: &str = "https://en.wikipedia.org/wiki/American_manual_alphabet";

/// terminal fingerspelling trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal fingerspelling trainer. Receptive mode plays a word letter by letter for you to type back; expressive mode shows a word for you to fingerspell and check yourself."
)]
pub struct Cli {
    /// game mode to start in
    #[clap(short = 'm', long, value_enum, default_value_t = CliMode::Receptive)]
    mode: CliMode,

    /// playback speed (1-11; letters advance at speed/2 per second)
    #[clap(short = 's', long)]
    speed: Option<f64>,

    /// only practice words of at most this many letters
    #[clap(short = 'l', long)]
    max_word_length: Option<usize>,

    /// print the embedded word list and exit
    #[clap(long)]
    list_words: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
enum CliMode {
    Receptive,
    Expressive,
}

impl From<CliMode> for GameMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Receptive => GameMode::Receptive,
            CliMode::Expressive => GameMode::Expressive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Game,
    Stats,
}

pub struct App {
    pub mode: GameMode,
    pub screen: Screen,
    pub orchestrator: RoundOrchestrator,
    /// Transient message shown when a length filter was rejected.
    pub pool_error: Option<String>,
}

impl App {
    pub fn new(mode: GameMode, orchestrator: RoundOrchestrator) -> Self {
        Self {
            mode,
            screen: Screen::Game,
            orchestrator,
            pool_error: None,
        }
    }

    /// Handles one key event; returns true when the app should exit.
    fn handle_key(&mut self, key: KeyEvent, cues: &mut dyn CueSink) -> bool {
        let now = Instant::now();

        match key.code {
            KeyCode::Esc => {
                if self.screen == Screen::Stats {
                    self.screen = Screen::Game;
                    return false;
                }
                return true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return true;
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.orchestrator.on_stop();
                self.screen = match self.screen {
                    Screen::Stats => Screen::Game,
                    Screen::Game => Screen::Stats,
                };
                return false;
            }
            KeyCode::Tab => {
                self.orchestrator.on_stop();
                self.mode = match self.mode {
                    GameMode::Receptive => GameMode::Expressive,
                    GameMode::Expressive => GameMode::Receptive,
                };
                return false;
            }
            _ => {}
        }

        match self.screen {
            Screen::Stats => self.handle_stats_key(key),
            Screen::Game => match self.mode {
                GameMode::Receptive => self.handle_receptive_key(key, now, cues),
                GameMode::Expressive => self.handle_expressive_key(key, now),
            },
        }

        false
    }

    fn handle_stats_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('o') {
            let _ = webbrowser::open(HANDSHAPE_CHART_URL);
        }
    }

    fn handle_receptive_key(&mut self, key: KeyEvent, now: Instant, cues: &mut dyn CueSink) {
        let orchestrator = &mut self.orchestrator;
        match key.code {
            KeyCode::Enter => {
                if !orchestrator.feedback().should_disable_controls() {
                    let answer = orchestrator.feedback().answer().to_string();
                    orchestrator.on_submit(&answer, now, cues);
                }
            }
            KeyCode::Backspace => orchestrator.pop_answer_char(),
            KeyCode::Char(' ') => {
                if orchestrator.feedback().should_disable_controls() {
                    return;
                }
                if orchestrator.playback().is_active() {
                    orchestrator.on_stop();
                } else {
                    orchestrator.on_play(now);
                }
            }
            KeyCode::Char('?') => {
                if !orchestrator.feedback().should_disable_controls() {
                    orchestrator.on_reveal(now);
                }
            }
            // the speed slider is locked while a word is playing
            KeyCode::Left if !orchestrator.playback().is_playing() => {
                orchestrator.adjust_speed(-1.0);
            }
            KeyCode::Right if !orchestrator.playback().is_playing() => {
                orchestrator.adjust_speed(1.0);
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let next = orchestrator.settings().next_max_word_length();
                self.pool_error = match orchestrator.set_max_word_length(next) {
                    Ok(()) => None,
                    Err(err) => Some(err.to_string()),
                };
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                orchestrator.push_answer_char(c.to_ascii_uppercase());
            }
            _ => {}
        }
    }

    fn handle_expressive_key(&mut self, key: KeyEvent, now: Instant) {
        let orchestrator = &mut self.orchestrator;
        match key.code {
            KeyCode::Char('r') => orchestrator.reveal_spelling(),
            KeyCode::Char('h') => orchestrator.hide_spelling(),
            KeyCode::Char('n') | KeyCode::Enter => orchestrator.next_expressive_word(now),
            _ => {}
        }
    }
}

/// Rings the terminal bell on the two negative cues; correct answers stay
/// silent.
struct TerminalBell;

impl CueSink for TerminalBell {
    fn cue(&mut self, cue: Cue) {
        match cue {
            Cue::Correct => {}
            Cue::AlmostCorrect | Cue::Incorrect => {
                let mut out = io::stdout();
                let _ = out.write_all(b"\x07");
                let _ = out.flush();
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_words {
        let list = WordList::new("english");
        for word in list
            .words
            .iter()
            .sorted_by_key(|w| (w.chars().count(), w.as_str()))
        {
            println!("{}", word);
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileSettingsStore::new();
    let mut settings = store.load();
    if let Some(speed) = cli.speed {
        settings.set_speed(speed);
    }
    if let Some(limit) = cli.max_word_length {
        settings.max_word_length = Some(limit);
    }

    let list = WordList::new("english");
    // A persisted or flag-given filter that empties the pool falls back to
    // the unrestricted list instead of refusing to start.
    let pool = match WordPool::new(list.clone(), settings.max_word_length) {
        Ok(pool) => pool,
        Err(_) => {
            settings.max_word_length = None;
            WordPool::new(list, None)?
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli.mode.into(), RoundOrchestrator::new(pool, settings));
    let res = run_app(&mut terminal, &mut app, &store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &FileSettingsStore,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let mut bell = TerminalBell;

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => app.orchestrator.tick(Instant::now()),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.handle_key(key, &mut bell) {
                    break;
                }
            }
        }
    }

    store.save(app.orchestrator.settings())?;
    Ok(())
}
