use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn settings_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let config_dir = PathBuf::from(home).join(".config").join("fspell");
            Some(config_dir.join("settings.json"))
        } else {
            ProjectDirs::from("", "", "fspell")
                .map(|proj_dirs| proj_dirs.config_dir().join("settings.json"))
        }
    }
}
