//! Changelog model and the parser for `sscm cc` exports.
//!
//! The export is line oriented. The first line is a `total-N` summary and is
//! always skipped; each following line is seven `<…>` framed fields:
//!
//! ```text
//! total-2
//! <src><A.txt><1><add><20240101><initial><alice>
//! <src><B.txt><2><edit><20240102><fix><bob>
//! ```

pub mod entry;
pub mod parser;
pub mod scanner;
pub mod set;

pub use entry::{Author, ChangeEntry, EditType};
pub use parser::ChangelogParser;
pub use set::ChangeSet;
