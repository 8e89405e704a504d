//! Module walker: reads source files, extracts import specifiers and follows
//! file imports until only package references remain.

pub mod extract;
pub mod module_walker;
pub mod source_fs;

pub use extract::extract_specifiers;
pub use module_walker::ModuleWalker;
pub use source_fs::{OsFs, ReadFailure, SourceFs};
