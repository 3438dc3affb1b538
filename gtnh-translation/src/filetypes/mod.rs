//! All supported translation file formats.
//!
//! Each format lives in its own module with a `Format` type implementing
//! [`Filetype`]. [`AnyFiletype`] wraps them for code that handles files of
//! mixed kinds, and [`FiletypeKind`] names a format without holding a file.

pub mod gt_lang;
pub mod lang;

use std::{
    fmt::{Display, Formatter},
    fs::File,
    io::Read,
    path::Path,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

pub use gt_lang::Format as GtLangFormat;
pub use lang::Format as LangFormat;

use crate::{
    config::Locales,
    error::Error,
    property::{Property, PropertyMap},
    traits::Filetype,
};

/// Which side of the translation a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// The language the game ships with (`en_US`).
    Source,
    /// The language being translated into.
    Target,
}

impl Language {
    /// The locale tag for this side.
    pub fn tag<'a>(&self, locales: &'a Locales) -> &'a str {
        match self {
            Language::Source => &locales.source,
            Language::Target => &locales.target,
        }
    }
}

/// Names a file format without holding a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiletypeKind {
    /// Flat `key=value` lang file.
    Lang,
    /// GregTech lang file with a `languagefile { ... }` block.
    GtLang,
}

/// Implements [`std::fmt::Display`] for [`FiletypeKind`].
///
/// ```rust
/// use gtnh_translation::FiletypeKind;
/// assert_eq!(FiletypeKind::Lang.to_string(), "lang");
/// assert_eq!(FiletypeKind::GtLang.to_string(), "gt-lang");
/// ```
impl Display for FiletypeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FiletypeKind::Lang => write!(f, "lang"),
            FiletypeKind::GtLang => write!(f, "gt-lang"),
        }
    }
}

/// Accepts `lang` and `gt-lang` (also `gtlang`, `gt_lang`), case-insensitively.
///
/// Returns [`crate::error::Error::UnknownFiletype`] for anything else.
impl FromStr for FiletypeKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "lang" => Ok(FiletypeKind::Lang),
            "gt-lang" | "gtlang" | "gt_lang" => Ok(FiletypeKind::GtLang),
            other => Err(Error::UnknownFiletype(other.to_string())),
        }
    }
}

impl FiletypeKind {
    /// The prefix this format puts in front of every property key.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            FiletypeKind::Lang => lang::KEY_PREFIX,
            FiletypeKind::GtLang => gt_lang::KEY_PREFIX,
        }
    }
}

/// Any supported file, dispatching [`Filetype`] to the concrete format.
#[derive(Debug, Clone)]
pub enum AnyFiletype {
    Lang(LangFormat),
    GtLang(GtLangFormat),
}

impl AnyFiletype {
    /// Builds a file of the given kind. Only lang files use `locales`.
    pub fn new(
        kind: FiletypeKind,
        relpath: impl Into<String>,
        content: impl Into<String>,
        language: Language,
        locales: Locales,
    ) -> Self {
        match kind {
            FiletypeKind::Lang => {
                AnyFiletype::Lang(LangFormat::new(relpath, content, language, locales))
            }
            FiletypeKind::GtLang => {
                AnyFiletype::GtLang(GtLangFormat::new(relpath, content, language))
            }
        }
    }

    pub fn kind(&self) -> FiletypeKind {
        match self {
            AnyFiletype::Lang(_) => FiletypeKind::Lang,
            AnyFiletype::GtLang(_) => FiletypeKind::GtLang,
        }
    }

    fn inner(&self) -> &dyn Filetype {
        match self {
            AnyFiletype::Lang(f) => f,
            AnyFiletype::GtLang(f) => f,
        }
    }
}

impl Filetype for AnyFiletype {
    fn relpath(&self) -> &str {
        self.inner().relpath()
    }

    fn content(&self) -> &str {
        self.inner().content()
    }

    fn language(&self) -> Language {
        self.inner().language()
    }

    fn properties(&self) -> &PropertyMap {
        self.inner().properties()
    }

    fn source_relpath(&self) -> String {
        self.inner().source_relpath()
    }

    fn target_relpath(&self) -> String {
        self.inner().target_relpath()
    }
}

/// Splits a line on its first `=` into a namespaced property.
///
/// Returns `None` for lines without `=`; further `=` belong to the value.
pub(crate) fn split_property(prefix: &str, line: &str, line_end: usize) -> Option<Property> {
    let (key, value) = line.split_once('=')?;
    Some(Property::from_line(
        format!("{}{}", prefix, key),
        value,
        line,
        line_end,
    ))
}

/// Reads a file as text.
///
/// A byte order mark selects the encoding (and is dropped); everything else is
/// decoded as UTF-8 with invalid sequences replaced by U+FFFD.
pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let file = File::open(path).map_err(Error::Io)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding_rs::UTF_8))
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
    Ok(decoded)
}
