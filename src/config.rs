use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MIN_SPEED: f64 = 1.0;
pub const MAX_SPEED: f64 = 11.0;
pub const DEFAULT_SPEED: f64 = 3.0;

/// Near-miss edit-distance bound. Answers within this distance of the word
/// get the softer "almost" cue instead of the hard incorrect one.
pub const DEFAULT_ALMOST_THRESHOLD: usize = 3;

/// Word-length limits offered by the length toggle, cycled in order and
/// followed by "any length".
pub const WORD_LENGTH_STEPS: [usize; 4] = [3, 4, 5, 6];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub speed: f64,
    pub max_word_length: Option<usize>,
    pub almost_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            max_word_length: None,
            almost_threshold: DEFAULT_ALMOST_THRESHOLD,
        }
    }
}

impl Settings {
    /// Clamps into the supported range. The playback clock never sees a
    /// non-positive speed; out-of-range input is corrected here, at the
    /// settings boundary.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn speed_display(&self) -> String {
        format!("{:.0}", self.speed)
    }

    pub fn max_word_length_display(&self) -> String {
        match self.max_word_length {
            Some(limit) => format!("{} letters", limit),
            None => "any length".to_string(),
        }
    }

    /// The next length limit in the cycle 3, 4, 5, 6, any.
    pub fn next_max_word_length(&self) -> Option<usize> {
        match self.max_word_length {
            None => Some(WORD_LENGTH_STEPS[0]),
            Some(current) => WORD_LENGTH_STEPS
                .iter()
                .find(|&&step| step > current)
                .copied(),
        }
    }

    /// Re-clamps fields that may have been hand-edited into invalid ranges.
    fn sanitized(mut self) -> Self {
        self.set_speed(self.speed);
        if self.almost_threshold == 0 {
            self.almost_threshold = DEFAULT_ALMOST_THRESHOLD;
        }
        self
    }
}

pub trait SettingsStore {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = crate::app_dirs::AppDirs::settings_path()
            .unwrap_or_else(|| PathBuf::from("fspell_settings.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(settings) = serde_json::from_slice::<Settings>(&bytes) {
                return settings.sanitized();
            }
        }
        Settings::default()
    }

    fn save(&self, settings: &Settings) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(settings).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        let settings = Settings::default();
        store.save(&settings).unwrap();
        let loaded = store.load();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn save_and_load_custom_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        let settings = Settings {
            speed: 8.0,
            max_word_length: Some(4),
            almost_threshold: 2,
        };
        store.save(&settings).unwrap();
        let loaded = store.load();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn load_sanitizes_out_of_range_speed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"speed": 0.0, "max_word_length": null, "almost_threshold": 0}"#,
        )
        .unwrap();

        let loaded = FileSettingsStore::with_path(&path).load();
        assert_eq!(loaded.speed, MIN_SPEED);
        assert_eq!(loaded.almost_threshold, DEFAULT_ALMOST_THRESHOLD);
    }

    #[test]
    fn set_speed_clamps() {
        let mut settings = Settings::default();

        settings.set_speed(0.0);
        assert_eq!(settings.speed, MIN_SPEED);

        settings.set_speed(-3.0);
        assert_eq!(settings.speed, MIN_SPEED);

        settings.set_speed(99.0);
        assert_eq!(settings.speed, MAX_SPEED);

        settings.set_speed(5.0);
        assert_eq!(settings.speed, 5.0);
    }

    #[test]
    fn max_word_length_cycle() {
        let mut settings = Settings::default();
        assert_eq!(settings.next_max_word_length(), Some(3));

        settings.max_word_length = Some(3);
        assert_eq!(settings.next_max_word_length(), Some(4));

        settings.max_word_length = Some(6);
        assert_eq!(settings.next_max_word_length(), None);
    }

    #[test]
    fn display_strings() {
        let mut settings = Settings::default();
        assert_eq!(settings.speed_display(), "3");
        assert_eq!(settings.max_word_length_display(), "any length");

        settings.max_word_length = Some(4);
        assert_eq!(settings.max_word_length_display(), "4 letters");
    }
}
