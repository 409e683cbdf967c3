//! # translatable-store
//!
//! Persistent translation record store for Translatable (SQLite-backed).

pub mod store;

pub use store::Store;
