//! Core analysis engine.
//!
//! Leaves first: the tokenizer finds quoted keys in source text, the file
//! scanner snapshots the source tree, the indexer maps keys to the files using
//! them and the synthesizer infers where each key should live.
//! [`CheckContext`] ties them to a loaded configuration.

pub mod context;
pub mod data;
pub mod file_scanner;
pub mod indexer;
pub mod parsers;
pub mod synthesizer;
pub mod tokenizer;

pub use context::{CheckContext, LocaleFiles};
pub use data::{LocaleFile, MessageContext, MessageLocation, SourceDictionary, display_value};
