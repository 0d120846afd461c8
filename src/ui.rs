use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use time_humanize::{Accuracy, HumanTime, Tense};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use fspell::feedback::FeedbackSession;
use fspell::playback::PlaybackSession;
use fspell::round::GameMode;

use crate::{App, Screen};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Stats => render_stats(self, area, buf),
            Screen::Game => match self.mode {
                GameMode::Receptive => render_receptive(self, area, buf),
                GameMode::Expressive => render_expressive(self, area, buf),
            },
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn status_line(app: &App) -> Line<'static> {
    let orchestrator = &app.orchestrator;
    let is_highlighted = match app.mode {
        GameMode::Receptive => orchestrator.feedback().has_correct_answer(),
        GameMode::Expressive => orchestrator.is_highlighting_score(),
    };
    let score_style = if is_highlighted {
        bold().fg(Color::Green)
    } else {
        bold()
    };
    let score = match app.mode {
        GameMode::Receptive => orchestrator.stats().receptive_score(),
        GameMode::Expressive => orchestrator.stats().expressive_score(),
    };

    Line::from(vec![
        Span::styled(app.mode.to_string().to_lowercase(), bold()),
        Span::styled("  ·  score ", dim()),
        Span::styled(score.to_string(), score_style),
        Span::styled("  ·  speed ", dim()),
        Span::styled(orchestrator.settings().speed_display(), bold()),
        Span::styled("  ·  ", dim()),
        Span::styled(orchestrator.settings().max_word_length_display(), bold()),
    ])
}

/// The word spelled out as spaced uppercase letters, shown after a correct
/// answer or a reveal.
fn spelled_word(word: &str) -> String {
    word.to_uppercase().chars().join(" ")
}

fn game_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1), // status bar
                Constraint::Length(1), // padding
                Constraint::Length(2), // word display
                Constraint::Min(5),    // main display
                Constraint::Length(1), // answer input
                Constraint::Length(1), // message
                Constraint::Length(1), // padding
                Constraint::Length(1), // controls hint
            ]
            .as_ref(),
        )
        .split(area)
}

fn render_receptive(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = game_layout(area);
    let playback = app.orchestrator.playback();
    let feedback = app.orchestrator.feedback();

    Paragraph::new(status_line(app)).render(chunks[0], buf);

    // the solved or revealed word, spelled out
    if feedback.has_correct_answer() || feedback.is_revealed() {
        let spelled = spelled_word(playback.current_word());
        // fall back to the compact form when the terminal is too narrow
        let word = if spelled.width() as u16 > chunks[2].width {
            playback.current_word().to_uppercase()
        } else {
            spelled
        };
        Paragraph::new(Span::styled(word, bold().fg(Color::Cyan)))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }

    let main = main_display(playback, feedback);
    Paragraph::new(main)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    // answer input; hidden once controls are disabled
    if !feedback.should_disable_controls() {
        let input = if feedback.answer().is_empty() {
            Span::styled("WORD", dim())
        } else {
            Span::styled(format!("{}▏", feedback.answer()), bold())
        };
        Paragraph::new(input)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }

    if let Some(ref message) = app.pool_error {
        Paragraph::new(Span::styled(message.clone(), Style::default().fg(Color::Yellow)))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }

    Paragraph::new(Span::styled(
        "space play/stop · enter submit · ? reveal · ←/→ speed · ^L length · tab mode · ^T stats · esc quit",
        dim(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[7], buf);
}

fn main_display(playback: &PlaybackSession, feedback: &FeedbackSession) -> Vec<Line<'static>> {
    if playback.is_playing() {
        let letter = playback
            .current_letter()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or(' ');
        // repeated letters are nudged sideways so doubles read as two signs
        let rendered = if playback.is_repeated_letter() {
            format!("  {}", letter)
        } else {
            letter.to_string()
        };
        return vec![
            Line::from(""),
            Line::from(Span::styled(
                rendered,
                bold().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
            )),
        ];
    }

    let mut lines = vec![Line::from("")];

    if playback.is_pending_next_word() {
        lines.push(Line::from(Span::styled("···", dim())));
        return lines;
    }

    if !feedback.has_submitted() {
        // onboarding copy, shown until the first interaction
        let copy = if !playback.has_played() {
            "Press space to play a word."
        } else {
            "Type the word you saw."
        };
        lines.push(Line::from(Span::styled(copy.to_string(), dim())));
    }

    if feedback.has_correct_answer() {
        lines.push(Line::from(Span::styled(
            "✓ correct",
            bold().fg(Color::Green),
        )));
    } else if feedback.is_shown() {
        lines.push(Line::from(Span::styled(
            "✗ not quite, try again",
            bold().fg(Color::Red),
        )));
    }

    lines
}

fn render_expressive(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = game_layout(area);
    let playback = app.orchestrator.playback();
    let feedback = app.orchestrator.feedback();

    Paragraph::new(status_line(app)).render(chunks[0], buf);

    Paragraph::new(Span::styled(
        playback.current_word().to_uppercase(),
        bold().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let center = if feedback.is_revealed() {
        Span::styled(spelled_word(playback.current_word()), bold())
    } else if !feedback.has_revealed() {
        Span::styled("Fingerspell the word above.".to_string(), dim())
    } else {
        Span::raw("")
    };
    Paragraph::new(vec![Line::from(""), Line::from(center)])
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    let controls = if feedback.has_revealed() {
        "r reveal · h hide · n next word · tab mode · ^T stats · esc quit"
    } else {
        "r reveal · tab mode · ^T stats · esc quit"
    };
    Paragraph::new(Span::styled(controls, dim()))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);
}

fn render_stats(app: &App, area: Rect, buf: &mut Buffer) {
    let stats = app.orchestrator.stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Min(8),    // body
                Constraint::Length(1), // controls hint
            ]
            .as_ref(),
        )
        .split(area);

    let elapsed = (chrono::Local::now() - stats.started_at())
        .to_std()
        .unwrap_or_default();
    let started = HumanTime::from(elapsed).to_text_en(Accuracy::Rough, Tense::Past);

    Paragraph::new(Line::from(vec![
        Span::styled("session stats", bold()),
        Span::styled(format!("  ·  started {}", started), dim()),
    ]))
    .render(chunks[0], buf);

    let fmt_len = |value: Option<f64>| {
        value
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "–".to_string())
    };

    let recent: String = stats
        .receptive_words()
        .iter()
        .rev()
        .take(8)
        .map(|c| c.word.as_str())
        .join(", ");

    let mut body = vec![
        Line::from(Span::styled("receptive", bold().fg(Color::Cyan))),
        stat_line("words completed", stats.receptive_score().to_string()),
        stat_line(
            "longest word",
            stats.longest_receptive_word().unwrap_or("–").to_string(),
        ),
        stat_line("average length", fmt_len(stats.average_receptive_length())),
        stat_line("top speed", fmt_len(stats.top_speed())),
        stat_line("average speed", fmt_len(stats.average_speed())),
        Line::from(""),
        Line::from(Span::styled("expressive", bold().fg(Color::Cyan))),
        stat_line("words completed", stats.expressive_score().to_string()),
        stat_line(
            "longest word",
            stats.longest_expressive_word().unwrap_or("–").to_string(),
        ),
        stat_line("average length", fmt_len(stats.average_expressive_length())),
    ];

    if !recent.is_empty() {
        body.push(Line::from(""));
        body.push(stat_line("recent words", recent));
    }

    Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    let hint = if Browser::is_available() {
        "o open handshape chart · ^T back · esc back"
    } else {
        "^T back · esc back"
    };
    Paragraph::new(Span::styled(hint, dim()))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    // pad labels to a fixed column so the values line up
    let padded = format!("{:<18}", label);
    Line::from(vec![Span::styled(padded, dim()), Span::styled(value, bold())])
}
