//! Foundation types for QUILL.
//!
//! This crate contains the types shared by every QUILL crate: the error
//! taxonomy and the plugin descriptor loaded from `plugin.toml`.

pub mod config;
pub mod error;
