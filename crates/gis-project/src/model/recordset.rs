//! Layer types: recordsets and the configuration they own.
//!
//! Every node that stores a relative resource reference also carries a
//! base-path slot. The slot is filled by [`crate::resolve::set_base_path`]
//! and is never serialized; absolute paths are computed on demand.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::model::{Color, ColorMode, GeoPoint, Legend, RecordSetDataType, Shape, SourceType, Transform};
use crate::util::path::resolve_reference;

/// Symbology units keyed by name.
pub type Units = BTreeMap<String, Unit>;

/// Default for `elevation_source_type`.
pub const DEFAULT_ELEVATION_SOURCE_TYPE: &str = "MapboxTerrain";
/// Default for `elevation_layer_type`.
pub const DEFAULT_ELEVATION_LAYER_TYPE: &str = "FlatTerrain";
/// Default for `imagery_source_type`.
pub const DEFAULT_IMAGERY_SOURCE_TYPE: &str = "MapboxOutdoors";

/// One data layer of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub datatype: RecordSetDataType,
    /// Data source, relative to the project base path unless absolute.
    pub source: Option<String>,
    pub position: Option<GeoPoint>,
    pub transform: Option<Transform>,
    /// Projection override for this layer.
    pub proj4: Option<String>,
    pub visible: bool,
    pub properties: Properties,
    /// Symbology units (newest generation; older ones keep them in `properties`).
    pub units: Units,
    /// Composite data-unit symbology (newest generation).
    pub data_units: Vec<DataUnit>,
    pub(crate) base_path: Option<PathBuf>,
}

impl RecordSet {
    /// Creates a visible recordset with default properties.
    pub fn new(datatype: RecordSetDataType) -> Self {
        Self {
            id: None,
            display_name: None,
            datatype,
            source: None,
            position: None,
            transform: None,
            proj4: None,
            visible: true,
            properties: Properties::default(),
            units: Units::new(),
            data_units: Vec::new(),
            base_path: None,
        }
    }

    /// Absolute location of `source`.
    pub fn source_path(&self) -> Option<PathBuf> {
        resolve_reference(self.base_path.as_deref(), self.source.as_deref())
    }

    /// Every unit this recordset owns: properties units, own units, then
    /// data-unit units, each map in key order.
    pub fn all_units(&self) -> impl Iterator<Item = (&str, &Unit)> {
        self.properties
            .units
            .iter()
            .chain(self.units.iter())
            .chain(self.data_units.iter().flat_map(|du| du.units.iter()))
            .map(|(name, unit)| (name.as_str(), unit))
    }
}

/// Per-layer configuration (`properties` on the wire).
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    /// DEM or DTM to drape this layer onto.
    pub dem: Option<String>,
    /// Property names raster bands map to when converted to point clouds.
    pub header_string: Option<String>,
    /// Oldest and middle generations only; populated with the default on decode.
    pub color_mode: Option<ColorMode>,
    /// Oldest and middle generations only.
    pub color_interp: Option<Map<String, Value>>,
    /// Filter pipeline stages, passed through untouched.
    pub filter: Vec<Map<String, Value>>,
    pub bbox: Option<[f64; 4]>,
    pub source_type: SourceType,
    pub read_only: bool,
    pub map_scale: i32,
    pub map_size: i32,
    pub elevation_source_type: String,
    pub elevation_layer_type: String,
    pub imagery_source_type: String,
    /// Folder holding cross-section images.
    pub image_folder: Option<String>,
    pub bh_data: Option<BoreholeData>,
    /// Symbology units (oldest and middle generations).
    pub units: Units,
    pub hide_sublayers: Option<Vec<String>>,
    pub(crate) base_path: Option<PathBuf>,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            dem: None,
            header_string: None,
            color_mode: None,
            color_interp: None,
            filter: Vec::new(),
            bbox: None,
            source_type: SourceType::File,
            read_only: false,
            map_scale: 0,
            map_size: 0,
            elevation_source_type: DEFAULT_ELEVATION_SOURCE_TYPE.to_string(),
            elevation_layer_type: DEFAULT_ELEVATION_LAYER_TYPE.to_string(),
            imagery_source_type: DEFAULT_IMAGERY_SOURCE_TYPE.to_string(),
            image_folder: None,
            bh_data: None,
            units: Units::new(),
            hide_sublayers: None,
            base_path: None,
        }
    }
}

impl Properties {
    pub fn dem_path(&self) -> Option<PathBuf> {
        resolve_reference(self.base_path.as_deref(), self.dem.as_deref())
    }

    pub fn image_folder_path(&self) -> Option<PathBuf> {
        resolve_reference(self.base_path.as_deref(), self.image_folder.as_deref())
    }
}

/// Maps columns of an external borehole table to their roles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoreholeData {
    pub x_field: Option<String>,
    pub y_field: Option<String>,
    pub z_field: Option<String>,
    pub id_field: Option<String>,
    pub inc_field: Option<String>,
    pub azi_field: Option<String>,
    pub from_field: Option<String>,
    pub to_field: Option<String>,
    pub data_field: Option<String>,
    pub data_source: Option<String>,
    pub log_id_field: Option<String>,
    pub legend: Option<Legend>,
    /// End-of-hole depth column.
    pub eoh_field: Option<String>,
    pub(crate) base_path: Option<PathBuf>,
}

impl BoreholeData {
    pub fn data_source_path(&self) -> Option<PathBuf> {
        resolve_reference(self.base_path.as_deref(), self.data_source.as_deref())
    }
}

/// One symbology definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Unit {
    /// Oldest generation only.
    pub color: Option<Color>,
    pub shape: Option<Shape>,
    /// Oldest generation only.
    pub transform: Option<Transform>,
    /// Feature field used as label. Oldest generation only.
    pub label: Option<String>,
    pub texture_image: Option<String>,
    pub(crate) base_path: Option<PathBuf>,
}

impl Unit {
    pub fn texture_image_path(&self) -> Option<PathBuf> {
        resolve_reference(self.base_path.as_deref(), self.texture_image.as_deref())
    }
}

/// A named group of units (newest generation).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataUnit {
    pub name: Option<String>,
    pub units: Units,
}

macro_rules! base_path_accessor {
    ($($ty:ty),*) => {
        $(impl $ty {
            /// Base path assigned by the last `set_base_path`, if any.
            pub fn base_path(&self) -> Option<&Path> {
                self.base_path.as_deref()
            }
        })*
    };
}

base_path_accessor!(RecordSet, Properties, BoreholeData, Unit);
