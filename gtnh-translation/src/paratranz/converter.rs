//! Conversion between local filetypes and ParaTranz records.
//!
//! This is the only place that turns a [`Filetype`] into a [`ParatranzFile`]
//! or a record back into a local file.

use std::{cmp::Reverse, collections::HashMap};

use tracing::debug;

use crate::{
    config::Config,
    error::Error,
    filetypes::{AnyFiletype, FiletypeKind, Language, gt_lang},
    line_iterator::normalize_line_endings,
    paratranz::types::{ParatranzFile, ParatranzItem, TranslationFile},
    property::Property,
    traits::Filetype,
};

/// Converts files in both directions using the project [`Config`].
///
/// Conversions are pure functions of their inputs, so one converter can be
/// shared by any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Infers the filetype from a source-language relpath.
    pub fn kind_of(&self, relpath: &str) -> Result<FiletypeKind, Error> {
        if relpath == self.config.gt_lang_relpath {
            Ok(FiletypeKind::GtLang)
        } else if relpath.ends_with(".lang") {
            Ok(FiletypeKind::Lang)
        } else {
            Err(Error::UnknownFiletype(relpath.to_string()))
        }
    }

    /// Builds a local file of the given kind.
    pub fn filetype(
        &self,
        kind: FiletypeKind,
        relpath: impl Into<String>,
        content: impl Into<String>,
        language: Language,
    ) -> AnyFiletype {
        AnyFiletype::new(kind, relpath, content, language, self.config.locales.clone())
    }

    /// Builds a local file, inferring its kind from the relpath.
    pub fn filetype_for(
        &self,
        relpath: impl Into<String>,
        content: impl Into<String>,
        language: Language,
    ) -> Result<AnyFiletype, Error> {
        let relpath = relpath.into();
        let kind = self.kind_of(&relpath)?;
        Ok(self.filetype(kind, relpath, content, language))
    }

    /// Parses a translated file back into a filetype.
    pub fn translated_filetype(&self, file: &TranslationFile) -> AnyFiletype {
        self.filetype(
            file.kind,
            file.relpath.clone(),
            file.content.clone(),
            file.language,
        )
    }

    /// Turns a local file into the record uploaded to ParaTranz.
    ///
    /// Keys keep their namespace prefix and values are copied verbatim.
    pub fn to_paratranz_file(&self, file: &AnyFiletype) -> Result<ParatranzFile, Error> {
        check_format_markers(file)?;

        let items = file
            .properties()
            .iter()
            .map(|property| ParatranzItem {
                key: property.key.clone(),
                original: property.value.clone(),
                translation: String::new(),
                context: Some(property.full.clone()),
                stage: 0,
            })
            .collect();

        Ok(ParatranzFile {
            name: ParatranzFile::name_for(&file.source_relpath()),
            items,
        })
    }

    /// Applies the translations of a record to the source file it was made from.
    ///
    /// Every property with a non-empty translation gets its value replaced in
    /// place; all other bytes of the source are kept. GregTech lang files also
    /// get their `UseThisFileAsLanguageFile` flag switched on.
    pub fn to_translation_file(
        &self,
        record: &ParatranzFile,
        source_content: &str,
    ) -> Result<TranslationFile, Error> {
        let kind = self.kind_of(record.relpath()?)?;
        self.to_translation_file_as(kind, record, source_content)
    }

    /// Like [`Converter::to_translation_file`], with the kind given instead
    /// of inferred from the record name.
    pub fn to_translation_file_as(
        &self,
        kind: FiletypeKind,
        record: &ParatranzFile,
        source_content: &str,
    ) -> Result<TranslationFile, Error> {
        let relpath = record.relpath()?;
        let normalized = normalize_line_endings(source_content);
        let source = self.filetype(kind, relpath, normalized.as_ref(), Language::Source);
        check_format_markers(&source)?;

        let translations: HashMap<&str, &str> = record
            .items
            .iter()
            .filter(|item| !item.translation.is_empty())
            .map(|item| (item.key.as_str(), item.translation.as_str()))
            .collect();

        let mut content = source.content().to_string();
        let mut applied = 0;
        for property in by_descending_offset(source.properties().iter()) {
            if let Some(translation) = translations.get(property.key.as_str()) {
                content.replace_range(property.start..property.end, &escape_newlines(translation));
                applied += 1;
            }
        }
        debug!(
            relpath,
            applied,
            unused = translations.len() - applied,
            "applied translations"
        );

        if kind == FiletypeKind::GtLang {
            content = gt_lang::enable_language_file(&content);
        }

        Ok(TranslationFile {
            kind,
            relpath: source.target_relpath(),
            content,
            language: Language::Target,
        })
    }
}

fn check_format_markers(file: &AnyFiletype) -> Result<(), Error> {
    match file {
        AnyFiletype::Lang(f) => {
            if f.has_locale_tag() {
                Ok(())
            } else {
                Err(Error::missing_marker(f.relpath(), f.locale_tag()))
            }
        }
        AnyFiletype::GtLang(f) => {
            if f.has_language_block() {
                Ok(())
            } else {
                Err(Error::missing_marker(f.relpath(), gt_lang::BLOCK_OPENER))
            }
        }
    }
}

// Splicing back to front keeps the offsets of the remaining properties valid.
fn by_descending_offset<'a>(properties: impl Iterator<Item = &'a Property>) -> Vec<&'a Property> {
    let mut sorted: Vec<_> = properties.collect();
    sorted.sort_by_key(|p| Reverse(p.start));
    sorted
}

// A raw line break would end the lang line early, and a lone carriage return
// is stripped when the file is read back. Both become a `\n` escape.
fn escape_newlines(translation: &str) -> String {
    translation
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}
