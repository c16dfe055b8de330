//! Actions for fixing i18n issues.
//!
//! Actions convert Issues into Operations and execute them.
//!
//! ## Architecture
//!
//! ```text
//! Issue (problem detected)
//!     ↓
//! Action (Issue → Operation conversion)
//!     ↓
//! Operation (one file edit)
//!     ↓
//! execute (file modification)
//! ```
//!
//! ## Actions
//!
//! - [`AddKey`]: Add nonexistent keys to the i18n-src file, prompting for values (nonexistent-keys)
//! - [`RewriteValue`]: Rewrite alt text and aria label values (alt-texts, aria-labels)
//! - [`RenameKey`]: Rename misnamed keys in locale files and source files (invalid-keys)
//! - [`SortKeys`]: Sort the top-level keys of locale files (ordered-keys)

mod add_key;
mod operation;
mod rename_key;
mod rewrite_value;
mod sort_keys;
mod traits;

pub use add_key::AddKey;
pub use operation::Operation;
pub use rename_key::RenameKey;
pub use rewrite_value::RewriteValue;
pub use sort_keys::SortKeys;
pub use traits::{Action, ActionStats};
