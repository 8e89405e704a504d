//! Reduced module resolution: which specifiers are files, packages or
//! builtins, and which paths to retry when a read fails.

pub mod builtins;
pub mod path;
pub mod policy;

pub use builtins::NODE_BUILTINS;
pub use path::normalize;
pub use policy::{Fallback, ResolutionPolicy, SpecifierKind};
