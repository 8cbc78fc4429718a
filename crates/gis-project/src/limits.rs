//! Decoding limits.
//!
//! Descriptors are small in practice; these bounds keep a hostile or
//! corrupt document from driving unbounded allocation. [`DecodeOptions`]
//! can tighten or relax the first two per call.
//!
//! [`DecodeOptions`]: crate::codec::DecodeOptions

/// Largest accepted descriptor, in bytes.
pub const MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

/// Most recordsets one project may hold.
pub const MAX_RECORDSETS: usize = 100_000;

/// Most entries one units map may hold.
pub const MAX_UNITS_PER_MAP: usize = 100_000;
