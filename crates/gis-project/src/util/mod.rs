//! Utility modules.

pub mod path;

pub use path::{normalize, resolve_reference};
