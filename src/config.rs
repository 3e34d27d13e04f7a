use crate::training::TestType;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub test_type: TestType,
    pub rounds_per_session: usize,
    pub answers_per_round: usize,
    /// Restrict listening drills to words with a sound reference
    #[serde(default = "default_strict_listening")]
    pub strict_listening: bool,
}

fn default_strict_listening() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_type: TestType::WordToTranslation,
            rounds_per_session: 10,
            answers_per_round: 5,
            strict_listening: true,
        }
    }
}

impl From<&Config> for crate::session::SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            test_type: cfg.test_type,
            requested_rounds: cfg.rounds_per_session,
            answers_per_round: cfg.answers_per_round,
            strict_listening: cfg.strict_listening,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "lexdrill") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("lexdrill_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
