#![forbid(unsafe_code)]
//! Lang file parsing and ParaTranz conversion for GregTech: New Horizons translations.
//!
//! Files are parsed into namespaced, position-tracked properties, turned into
//! ParaTranz records for upload, and translated records are spliced back into
//! the source files byte for byte.
//!
//! # Quick Start
//!
//! ```rust
//! use gtnh_translation::{Config, Converter, Filetype, Language, ParatranzFile};
//!
//! let converter = Converter::new(Config::default());
//! let source = converter.filetype_for(
//!     "resources/IC2/lang/en_US.lang",
//!     "item.wrench.name=Wrench\n",
//!     Language::Source,
//! )?;
//!
//! let mut record: ParatranzFile = converter.to_paratranz_file(&source)?;
//! record.items[0].translation = "レンチ".to_string();
//!
//! let translated = converter.to_translation_file(&record, source.content())?;
//! assert_eq!(translated.relpath, "resources/IC2/lang/ja_JP.lang");
//! assert_eq!(translated.content, "item.wrench.name=レンチ\n");
//! # Ok::<(), gtnh_translation::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **Lang**: flat `key=value` Minecraft lang files, including the quest book
//! - **GT lang**: `GregTech.lang`, where only the `languagefile { ... }` block is translatable

pub mod config;
pub mod error;
pub mod filetypes;
pub mod line_iterator;
pub mod paratranz;
pub mod property;
pub mod sync;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Config, Locales},
    error::Error,
    filetypes::{AnyFiletype, FiletypeKind, Language},
    paratranz::{
        Cache, Client, Converter, ParatranzFile, ParatranzItem, RemoteFile, TranslationFile,
    },
    property::{Property, PropertyMap},
    sync::{PullTarget, PushReport, pull, push, snapshot, write_translation_files},
    traits::Filetype,
};
