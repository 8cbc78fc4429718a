//! GIS project descriptors: decoding, encoding and path resolution.
//!
//! A project descriptor is a JSON document listing the data layers
//! ("recordsets") of a 3D GIS scene, their sources, and the symbology used
//! to draw them. This crate turns a descriptor into a typed [`Project`] tree,
//! resolves every relative resource reference in it against a base
//! directory, and writes the tree back out.
//!
//! # Quick Start
//!
//! ```rust
//! use std::path::PathBuf;
//!
//! use gis_project::{decode_project, encode_project, SchemaVersion};
//!
//! let mut project = decode_project(r#"{
//!     "version": "2.0.0",
//!     "name": "Quarry",
//!     "recordsets": [
//!         {"datatype": "Raster", "source": "terrain/dem.tif", "properties": {}}
//!     ]
//! }"#).unwrap();
//! assert_eq!(project.version, SchemaVersion::V2_0);
//!
//! // Resolve references against the directory the descriptor came from
//! project.set_base_path("/data/quarry");
//! assert_eq!(
//!     project.recordsets[0].source_path(),
//!     Some(PathBuf::from("/data/quarry/terrain/dem.tif"))
//! );
//!
//! // Encode back; the base path is host context and is not written
//! let json = encode_project(&project).unwrap();
//! let reread = decode_project(&json).unwrap();
//! assert_eq!(reread.recordsets[0].source, project.recordsets[0].source);
//! assert_eq!(reread.base_path(), None);
//! ```
//!
//! # Modules
//!
//! - [`model`]: The project tree (Project, RecordSet, Properties, Unit, ...)
//! - [`codec`]: JSON encoding/decoding for all three schema generations
//! - [`resolve`]: Base-path cascade and absolute reference resolution
//! - [`validate`]: Version representability checks
//! - [`error`]: Error types
//! - [`limits`]: Decoding limits
//!
//! # Schema generations
//!
//! Descriptors come in three generations, selected by the root `version`
//! tag (absent for the oldest). They differ in which fields exist and where
//! symbology units live; see [`SchemaVersion::supports`]. Unknown tags are
//! rejected rather than mapped to a nearby generation.
//!
//! The crate performs no I/O. Reading the descriptor and opening the files
//! its references point at is left to the host.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod resolve;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    decode_project, decode_project_value, decode_project_value_with_options,
    decode_project_with_options, encode_project, encode_project_value,
    encode_project_with_options, DecodeOptions, EncodeOptions,
};
pub use error::{DecodeError, EncodeError, ErrorKind, ValidationError};
pub use model::{
    BoreholeData, Color, ColorMode, DataUnit, GeoPoint, Legend, Project, ProjectBuilder,
    Properties, Quaternion, RecordSet, RecordSetDataType, SchemaVersion, Shape, SourceType,
    Symbol, Transform, Unit, Units, Vector3,
};
pub use resolve::{set_base_path, Resolvable, ResolvedReference};
pub use validate::validate_project;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
