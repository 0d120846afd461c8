// Library surface for headless/integration tests and reuse.
// The TUI front-end (ui.rs) is bin-only and stays out of this surface.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod feedback;
pub mod playback;
pub mod round;
pub mod runtime;
pub mod stats;
pub mod util;
pub mod words;

/// Main-loop tick interval. The playback clock and all delay timers are
/// polled at this granularity.
pub const TICK_RATE_MS: u64 = 100;
