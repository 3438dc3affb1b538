//! Support for the flat Minecraft `.lang` format.
//!
//! One `key=value` pair per line, `#` starts a comment line. Lines without `=`
//! are ignored rather than reported.

use std::sync::OnceLock;

use crate::{
    config::Locales,
    filetypes::{Language, split_property},
    line_iterator::{LineIterator, into_normalized},
    property::PropertyMap,
    traits::Filetype,
};

pub const KEY_PREFIX: &str = "lang|";

/// A `.lang` file, such as `resources/gregtech/lang/en_US.lang`.
#[derive(Debug, Clone)]
pub struct Format {
    relpath: String,
    content: String,
    language: Language,
    locales: Locales,
    properties: OnceLock<PropertyMap>,
}

impl Format {
    pub fn new(
        relpath: impl Into<String>,
        content: impl Into<String>,
        language: Language,
        locales: Locales,
    ) -> Self {
        Format {
            relpath: relpath.into(),
            content: into_normalized(content.into()),
            language,
            locales,
            properties: OnceLock::new(),
        }
    }

    /// The locale tag of the declared language, e.g. `en_US`.
    pub fn locale_tag(&self) -> &str {
        self.language.tag(&self.locales)
    }

    /// Whether the relpath carries the locale tag of the declared language.
    pub fn has_locale_tag(&self) -> bool {
        self.relpath.contains(self.locale_tag())
    }
}

/// Extracts all properties of a `.lang` file.
pub fn extract(content: &str) -> PropertyMap {
    let lines = LineIterator::new(content);
    lines
        .iter()
        .filter(|line| !line.text.starts_with('#'))
        .filter_map(|line| split_property(KEY_PREFIX, line.text, line.end))
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

    fn source_relpath(&self) -> String {
        match self.language {
            Language::Source => self.relpath.clone(),
            Language::Target => self
                .relpath
                .replace(&self.locales.target, &self.locales.source),
        }
    }

    fn target_relpath(&self) -> String {
        match self.language {
            Language::Target => self.relpath.clone(),
            Language::Source => self
                .relpath
                .replace(&self.locales.source, &self.locales.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;

    const EN_US_RELPATH: &str = "test/x/en_US.lang";
    const EN_US_CONTENT: &str = "#test\ntest=test\n\ntest2=test2=test2\ntest3";
    const JA_JP_RELPATH: &str = "test/x/ja_JP.lang";
    const JA_JP_CONTENT: &str = "#test\ntest=テスト\n\ntest2=テスト2=テスト2\ntest3";

    fn en_us() -> Format {
        Format::new(EN_US_RELPATH, EN_US_CONTENT, Language::Source, Locales::default())
    }

    fn ja_jp() -> Format {
        Format::new(JA_JP_RELPATH, JA_JP_CONTENT, Language::Target, Locales::default())
    }

    fn property(key: &str, value: &str, full: &str, start: usize, end: usize) -> Property {
        Property {
            key: key.to_string(),
            value: value.to_string(),
            full: full.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_relpath_and_content() {
        assert_eq!(en_us().relpath(), EN_US_RELPATH);
        assert_eq!(ja_jp().relpath(), JA_JP_RELPATH);
        assert_eq!(en_us().content(), EN_US_CONTENT);
        assert_eq!(ja_jp().content(), JA_JP_CONTENT);
    }

    #[test]
    fn test_properties_en_us() {
        let file = en_us();
        let props: Vec<_> = file.properties().iter().cloned().collect();
        assert_eq!(
            props,
            vec![
                property("lang|test", "test", "test=test", 11, 15),
                property("lang|test2", "test2=test2", "test2=test2=test2", 23, 34),
            ]
        );
    }

    #[test]
    fn test_properties_ja_jp_use_byte_offsets() {
        let file = ja_jp();
        let props: Vec<_> = file.properties().iter().cloned().collect();
        assert_eq!(
            props,
            vec![
                property("lang|test", "テスト", "test=テスト", 11, 20),
                property("lang|test2", "テスト2=テスト2", "test2=テスト2=テスト2", 28, 49),
            ]
        );
        for p in &props {
            assert_eq!(&JA_JP_CONTENT[p.start..p.end], p.value);
        }
    }

    #[test]
    fn test_comment_and_key_only_lines_skipped() {
        let props = extract("#a=b\nkey-only\n=empty key\n");
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["lang|"]);
    }

    #[test]
    fn test_empty_content() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_properties_memoized() {
        let file = en_us();
        assert!(std::ptr::eq(file.properties(), file.properties()));
    }

    #[test]
    fn test_source_relpath() {
        assert_eq!(en_us().source_relpath(), EN_US_RELPATH);
        assert_eq!(ja_jp().source_relpath(), EN_US_RELPATH);
    }

    #[test]
    fn test_target_relpath() {
        assert_eq!(en_us().target_relpath(), JA_JP_RELPATH);
        assert_eq!(ja_jp().target_relpath(), JA_JP_RELPATH);
    }

    #[test]
    fn test_crlf_content_offsets_index_content() {
        let file = Format::new(
            "resources/a/lang/en_US.lang",
            "a=1\r\nb=テスト\r\n",
            Language::Source,
            Locales::default(),
        );
        assert_eq!(file.content(), "a=1\nb=テスト\n");
        for p in file.properties().iter() {
            assert_eq!(&file.content()[p.start..p.end], p.value);
        }
        let b = file.properties().get("lang|b").unwrap();
        assert_eq!((b.start, b.end), (6, 15));
    }

    #[test]
    fn test_relpath_without_locale_tag_is_unchanged() {
        let file = Format::new("foo/bar.lang", "", Language::Source, Locales::default());
        assert_eq!(file.target_relpath(), "foo/bar.lang");
        assert!(!file.has_locale_tag());
    }
}
