//! Support for `GregTech.lang`, the Forge-config-style lang file of GregTech.
//!
//! Only lines inside the `languagefile { ... }` block are translatable. The
//! sibling `enablelangfile` block holds the `UseThisFileAsLanguageFile` flag,
//! which the converter switches on when writing a translated file.
//!
//! The file names do not carry a locale tag: the source file is
//! `GregTech_US.lang` and the translated one is `GregTech.lang`.

use std::{borrow::Cow, sync::OnceLock};

use crate::{
    filetypes::{Language, split_property},
    line_iterator::{LineIterator, into_normalized},
    property::PropertyMap,
    traits::Filetype,
};

pub const KEY_PREFIX: &str = "gt-lang|";
pub const BLOCK_OPENER: &str = "languagefile {";
pub const BLOCK_CLOSER: &str = "}";
pub const SOURCE_TOKEN: &str = "GregTech_US";
pub const TARGET_TOKEN: &str = "GregTech";
pub const FLAG_DISABLED: &str = "B:UseThisFileAsLanguageFile=false";
pub const FLAG_ENABLED: &str = "B:UseThisFileAsLanguageFile=true";

#[derive(Debug, Clone)]
pub struct Format {
    relpath: String,
    content: String,
    language: Language,
    properties: OnceLock<PropertyMap>,
}

impl Format {
    pub fn new(
        relpath: impl Into<String>,
        content: impl Into<String>,
        language: Language,
    ) -> Self {
        Format {
            relpath: relpath.into(),
            content: into_normalized(content.into()),
            language,
            properties: OnceLock::new(),
        }
    }

    /// Whether the content has a `languagefile {` line at all.
    pub fn has_language_block(&self) -> bool {
        has_language_block(&self.content)
    }
}

pub fn has_language_block(content: &str) -> bool {
    LineIterator::new(content)
        .iter()
        .any(|line| line.text.starts_with(BLOCK_OPENER))
}

/// Extracts the properties of the first `languagefile` block.
pub fn extract(content: &str) -> PropertyMap {
    let lines = LineIterator::new(content);
    let mut properties = PropertyMap::new();
    let mut in_block = false;

    for line in lines.iter() {
        if !in_block {
            in_block = line.text.starts_with(BLOCK_OPENER);
            continue;
        }
        if line.text.starts_with(BLOCK_CLOSER) {
            break;
        }
        if let Some(property) = split_property(KEY_PREFIX, line.text, line.end) {
            properties.insert(property);
        }
    }

    properties
}

/// Switches the `UseThisFileAsLanguageFile` flag on.
///
/// Only lines consisting of exactly the disabled flag (plus indentation) are
/// rewritten; values that merely contain the literal stay as they are.
pub fn enable_language_file(content: &str) -> String {
    content
        .split_inclusive('\n')
        .map(|line| {
            if line.trim() == FLAG_DISABLED {
                Cow::Owned(line.replacen(FLAG_DISABLED, FLAG_ENABLED, 1))
            } else {
                Cow::Borrowed(line)
            }
        })
        .collect()
}

impl Filetype for Format {
    fn relpath(&self) -> &str {
        &self.relpath
    }

    // Stored without carriage returns, so property offsets index it directly.
    fn content(&self) -> &str {
        &self.content
    }

    fn language(&self) -> Language {
        self.language
    }

    fn properties(&self) -> &PropertyMap {
        self.properties.get_or_init(|| extract(&self.content))
    }

    // The substitution direction depends on the declared language, not on
    // the path: `GregTech` is a prefix of `GregTech_US`.
    fn source_relpath(&self) -> String {
        match self.language {
            Language::Source => self.relpath.clone(),
            Language::Target => self.relpath.replace(TARGET_TOKEN, SOURCE_TOKEN),
        }
    }

    fn target_relpath(&self) -> String {
        match self.language {
            Language::Target => self.relpath.clone(),
            Language::Source => self.relpath.replace(SOURCE_TOKEN, TARGET_TOKEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;

    const EN_US_RELPATH: &str = "GregTech_US.lang";
    const EN_US_CONTENT: &str = "# Configuration file\n\nenablelangfile {\n    B:UseThisFileAsLanguageFile=false\n}\n\n\nlanguagefile {\n    S:test=test\n}\n";
    const JA_JP_RELPATH: &str = "GregTech.lang";
    const JA_JP_CONTENT: &str = "# Configuration file\n\nenablelangfile {\n    S:Language=en_US\n    B:UseThisFileAsLanguageFile=true\n}\n\n\nlanguagefile {\n    S:test=テスト\n}\n";

    fn en_us() -> Format {
        Format::new(EN_US_RELPATH, EN_US_CONTENT, Language::Source)
    }

    fn ja_jp() -> Format {
        Format::new(JA_JP_RELPATH, JA_JP_CONTENT, Language::Target)
    }

    #[test]
    fn test_relpath_and_content() {
        assert_eq!(en_us().relpath(), EN_US_RELPATH);
        assert_eq!(ja_jp().content(), JA_JP_CONTENT);
    }

    #[test]
    fn test_properties_only_inside_language_block() {
        let file = en_us();
        let props: Vec<_> = file.properties().iter().cloned().collect();
        assert_eq!(
            props,
            vec![Property {
                key: "gt-lang|    S:test".to_string(),
                value: "test".to_string(),
                full: "    S:test=test".to_string(),
                start: 107,
                end: 111,
            }]
        );
    }

    #[test]
    fn test_properties_ja_jp() {
        let file = ja_jp();
        let p = file.properties().get("gt-lang|    S:test").unwrap();
        assert_eq!(p.value, "テスト");
        assert_eq!((p.start, p.end), (127, 136));
        assert_eq!(&JA_JP_CONTENT[p.start..p.end], "テスト");
        assert_eq!(file.properties().len(), 1);
    }

    #[test]
    fn test_lines_after_block_close_ignored() {
        let props = extract("languagefile {\n    S:a=1\n}\n    S:b=2\nlanguagefile {\n    S:c=3\n}\n");
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["gt-lang|    S:a"]);
    }

    #[test]
    fn test_no_block_yields_nothing() {
        assert!(extract("S:a=1\nS:b=2\n").is_empty());
        assert!(extract("").is_empty());
        assert!(!has_language_block("enablelangfile {\n}\n"));
    }

    #[test]
    fn test_en_us_relpath_derivation_is_asymmetric() {
        assert_eq!(en_us().source_relpath(), EN_US_RELPATH);
        assert_eq!(en_us().target_relpath(), JA_JP_RELPATH);
    }

    #[test]
    fn test_ja_jp_relpath_derivation_is_asymmetric() {
        assert_eq!(ja_jp().source_relpath(), EN_US_RELPATH);
        assert_eq!(ja_jp().target_relpath(), JA_JP_RELPATH);
    }

    #[test]
    fn test_crlf_content_offsets_index_content() {
        let file = Format::new(
            EN_US_RELPATH,
            JA_JP_CONTENT.replace('\n', "\r\n"),
            Language::Target,
        );
        assert_eq!(file.content(), JA_JP_CONTENT);
        let p = file.properties().get("gt-lang|    S:test").unwrap();
        assert_eq!(&file.content()[p.start..p.end], "テスト");
    }

    #[test]
    fn test_enable_language_file_only_touches_exact_literal() {
        let content = "    B:UseThisFileAsLanguageFile=false\n    S:note=B:UseThisFileAsLanguageFile=falsey\n    B:Other=false\n";
        let enabled = enable_language_file(content);
        assert!(enabled.starts_with("    B:UseThisFileAsLanguageFile=true\n"));
        assert!(enabled.contains("S:note=B:UseThisFileAsLanguageFile=falsey\n"));
        assert!(enabled.contains("    B:Other=false"));
    }
}
