use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Session configuration, loaded from `config.toml` next to the binary.
/// Missing file or fields fall back to defaults.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Restart listening automatically when the speech engine ends a
    /// session.
    #[serde(default)]
    pub continuous: bool,
    /// How many history entries to show per render.
    #[serde(default = "default_history_display")]
    pub history_display: usize,
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            continuous: false,
            history_display: default_history_display(),
            prompt: default_prompt(),
        }
    }
}

fn default_history_display() -> usize {
    20
}

fn default_prompt() -> String {
    "> ".into()
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        fs::read_to_string(path)
            .ok()
            .and_then(|s| match toml::from_str(&s) {
                Ok(config) => Some(config),
                Err(e) => {
                    eprintln!("Warning: ignoring malformed {}: {e}", path.display());
                    None
                }
            })
            .unwrap_or_default()
    }
}
