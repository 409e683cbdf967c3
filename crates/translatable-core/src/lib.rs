//! # translatable-core
//!
//! Core types, traits, configuration, and error handling for Translatable,
//! plus the [`Translations`] service that binds an entity to its stored
//! translations.

pub mod config;
pub mod error;
pub mod locale;
pub mod record;
pub mod traits;
pub mod translations;

pub use config::shellexpand;
pub use translations::Translations;
