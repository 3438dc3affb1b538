//! Settings file and ParaTranz connection parameters.
//!
//! The settings file is TOML:
//!
//! ```toml
//! [translation]
//! gt_lang_relpath = "GregTech_US.lang"
//! concurrency = 10
//!
//! [translation.locales]
//! source = "en_US"
//! target = "ja_JP"
//!
//! [paratranz]
//! project_id = 4964
//! cache_dir = ".cache/paratranz"
//! ```
//!
//! Flags and environment variables override the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use gtnh_translation::{Cache, Config};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://paratranz.cn/api";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub translation: Config,
    pub paratranz: ParatranzSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParatranzSettings {
    pub project_id: Option<u64>,
    pub token: Option<String>,
    pub base_url: String,
    pub cache_dir: Option<PathBuf>,
}

impl Default for ParatranzSettings {
    fn default() -> Self {
        Self {
            project_id: None,
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: None,
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project_id: Option<u64>,
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub no_cache: bool,
}

impl Settings {
    /// Reads the settings file, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
        Self::from_toml(&text).map_err(|e| format!("Error in {}: {}", path.display(), e))
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        let settings: Settings = toml::from_str(text).map_err(|e| e.to_string())?;
        settings.translation.validate().map_err(|e| e.to_string())?;
        Ok(settings)
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        let p = &mut self.paratranz;
        if overrides.project_id.is_some() {
            p.project_id = overrides.project_id;
        }
        if overrides.token.is_some() {
            p.token = overrides.token;
        }
        if let Some(base_url) = overrides.base_url {
            p.base_url = base_url;
        }
        if overrides.cache_dir.is_some() {
            p.cache_dir = overrides.cache_dir;
        }
        if overrides.no_cache {
            p.cache_dir = None;
        }
        self
    }

    pub fn cache(&self) -> Option<Cache> {
        self.paratranz.cache_dir.as_ref().map(Cache::new)
    }
}
