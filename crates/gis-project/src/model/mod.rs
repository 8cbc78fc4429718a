//! Data model for GIS project descriptors.
//!
//! This module contains the typed project tree:
//! - Schema generations and their field availability
//! - Symbolic enums (datatypes, source types, shapes, color modes)
//! - Values (vectors, rotations, colors, points)
//! - Recordsets and their properties, borehole data and units
//! - Builders (ergonomic construction)

pub mod builder;
pub mod project;
pub mod recordset;
pub mod symbols;
pub mod value;
pub mod version;

pub use builder::{ProjectBuilder, PropertiesBuilder, RecordSetBuilder, UnitBuilder};
pub use project::Project;
pub use recordset::{
    BoreholeData, DataUnit, Properties, RecordSet, Unit, Units, DEFAULT_ELEVATION_LAYER_TYPE,
    DEFAULT_ELEVATION_SOURCE_TYPE, DEFAULT_IMAGERY_SOURCE_TYPE,
};
pub use symbols::{ColorMode, RecordSetDataType, Shape, SourceType, Symbol};
pub use value::{Color, GeoPoint, Legend, Quaternion, Transform, Vector3};
pub use version::{SchemaVersion, VersionedField};
