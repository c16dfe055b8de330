//! i18n-check - i18n key consistency checker for web projects
//!
//! Checks that the keys of a flat JSON source locale file are well formed,
//! named after the files that use them, used, unique, sorted and translated,
//! and fixes what can be fixed mechanically.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, fix actions, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Project loading, file scanning, key indexing and ideal key synthesis
//! - `issues`: Issue type definitions and reporting
//! - `json_editor`: Formatting-preserving edits of locale files
//! - `logging`: Diagnostic logging setup
//! - `rules`: One detection rule per check
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod json_editor;
pub mod logging;
pub mod rules;
pub mod utils;
