//! Core data types shared by the scanner, the rules and the fixes.
//!
//! - `message`: locale file types (LocaleFile, MessageContext, MessageLocation)

pub mod message;

pub use message::{
    LocaleFile, MessageContext, MessageLocation, SourceDictionary, display_value,
};
