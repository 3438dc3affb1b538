//! CLI library for testing purposes

pub mod debug;
pub mod modpack;
pub mod paratranz_http;
pub mod settings;
pub mod sync;
pub mod translate;

pub use settings::{Overrides, Settings};
