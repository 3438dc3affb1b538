//! Traits for format-agnostic access to parsed translation files.

use crate::{filetypes::Language, property::PropertyMap};

/// A translation file parsed into namespaced properties.
///
/// Implementors are immutable: a new instance is built for every revision of
/// a file, and [`Filetype::properties`] is computed at most once per instance.
///
/// # Example
///
/// ```rust
/// use gtnh_translation::{Filetype, Language, Locales, filetypes::lang};
///
/// let file = lang::Format::new(
///     "resources/foo/lang/en_US.lang",
///     "item.foo.name=Foo\n",
///     Language::Source,
///     Locales::default(),
/// );
/// assert_eq!(file.properties().get("lang|item.foo.name").unwrap().value, "Foo");
/// assert_eq!(file.target_relpath(), "resources/foo/lang/ja_JP.lang");
/// ```
pub trait Filetype {
    /// Slash-separated path of the file inside the source tree.
    fn relpath(&self) -> &str;

    /// The file content with carriage returns removed.
    ///
    /// Property offsets index this text.
    fn content(&self) -> &str;

    /// The language this instance was declared with.
    fn language(&self) -> Language;

    /// Extracted properties, keyed by namespaced key.
    fn properties(&self) -> &PropertyMap;

    /// Relpath of the source-language counterpart.
    fn source_relpath(&self) -> String;

    /// Relpath of the target-language counterpart.
    fn target_relpath(&self) -> String;
}
