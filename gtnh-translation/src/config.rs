//! Settings shared by the filetypes, the converter and the sync operations.
//!
//! Nothing here reads the environment; the CLI builds a [`Config`] and passes
//! it down explicitly.

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, filetypes::FiletypeKind};

/// The locale tags used in lang file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locales {
    /// Locale the mods ship with, e.g. `en_US`.
    pub source: String,
    /// Locale being translated into, e.g. `ja_JP`.
    pub target: String,
}

impl Default for Locales {
    fn default() -> Self {
        Self {
            source: "en_US".to_string(),
            target: "ja_JP".to_string(),
        }
    }
}

impl Locales {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Project-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locales: Locales,
    /// Relpath of the GregTech lang file, in its source-language form.
    pub gt_lang_relpath: String,
    /// Relpath of the quest book lang file, in its source-language form.
    pub quest_book_relpath: String,
    /// Local directory that replaces the `resources/` prefix of lang files on pull.
    pub forceload_prefix: String,
    /// Upper bound on concurrent service calls.
    pub concurrency: usize,
    /// Where a pulled GregTech lang file is written, e.g. `GregTech_ja_JP.lang`.
    /// Kept at the translated relpath when unset.
    pub gt_lang_output_relpath: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: Locales::default(),
            gt_lang_relpath: "GregTech_US.lang".to_string(),
            quest_book_relpath: "config/txloader/load/betterquesting/lang/en_US.lang".to_string(),
            forceload_prefix: "config/txloader/forceload".to_string(),
            concurrency: 10,
            gt_lang_output_relpath: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locales(mut self, locales: Locales) -> Self {
        self.locales = locales;
        self
    }

    pub fn with_gt_lang_relpath(mut self, relpath: impl Into<String>) -> Self {
        self.gt_lang_relpath = relpath.into();
        self
    }

    pub fn with_quest_book_relpath(mut self, relpath: impl Into<String>) -> Self {
        self.quest_book_relpath = relpath.into();
        self
    }

    pub fn with_gt_lang_output_relpath(mut self, relpath: impl Into<String>) -> Self {
        self.gt_lang_output_relpath = Some(relpath.into());
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Checks that the locale tags parse and differ and that the pool is non-empty.
    pub fn validate(&self) -> Result<(), Error> {
        let source = parse_locale(&self.locales.source)?;
        let target = parse_locale(&self.locales.target)?;
        if source == target {
            return Err(Error::Config(format!(
                "source and target locale are both `{}`",
                self.locales.source
            )));
        }
        if self.concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Maps a pulled relpath to where it lives in the local tree.
    ///
    /// Lang files are kept under `resources/` on the service but are loaded
    /// from the forceload directory in game. The GregTech file goes to
    /// `gt_lang_output_relpath` when one is configured.
    pub fn local_relpath(&self, kind: FiletypeKind, relpath: &str) -> String {
        if kind == FiletypeKind::GtLang
            && let Some(output) = &self.gt_lang_output_relpath
        {
            return output.clone();
        }
        match relpath.strip_prefix("resources/") {
            Some(rest) => format!("{}/{}", self.forceload_prefix.trim_end_matches('/'), rest),
            None => relpath.to_string(),
        }
    }
}

// Minecraft writes locales as `en_US`; BCP 47 wants `en-US`.
fn parse_locale(tag: &str) -> Result<LanguageIdentifier, Error> {
    tag.replace('_', "-")
        .parse::<LanguageIdentifier>()
        .map_err(|e| Error::Config(format!("invalid locale `{}`: {}", tag, e)))
}
