//! The ParaTranz side: service records, the client contract, the converter
//! between records and local files, and the conversion cache.

pub mod cache;
pub mod client;
pub mod converter;
pub mod types;

pub use cache::{Cache, fingerprint};
pub use client::Client;
pub use converter::Converter;
pub use types::{ParatranzFile, ParatranzItem, RemoteFile, TranslationFile};
