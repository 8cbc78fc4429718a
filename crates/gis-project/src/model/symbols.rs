//! Symbolic enums carried as case-sensitive strings on the wire.

use std::fmt;

use crate::model::SchemaVersion;

/// An enum whose wire form is one of a fixed set of names.
pub trait Symbol: Sized + Copy + 'static {
    /// Every accepted name, in declaration order.
    const NAMES: &'static [&'static str];

    /// Exact, case-sensitive lookup.
    fn from_name(name: &str) -> Option<Self>;

    /// Wire name of this value.
    fn name(self) -> &'static str;
}

/// Kind of data a recordset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordSetDataType {
    MapBox,
    Vector,
    Raster,
    PointCloud,
    Mesh,
    Mdal,
    Point,
    Line,
    Polygon,
    Dem,
    Graph,
    XSect,
    BoreHole,
    Voxel,
    /// Newest generation only.
    Data,
}

const DATATYPE_NAMES: &[&str] = &[
    "MapBox",
    "Vector",
    "Raster",
    "PointCloud",
    "Mesh",
    "Mdal",
    "Point",
    "Line",
    "Polygon",
    "DEM",
    "Graph",
    "XSect",
    "BoreHole",
    "Voxel",
    "Data",
];

impl RecordSetDataType {
    /// Names accepted by `version`. `Data` is only valid in the newest generation.
    pub fn names_for(version: SchemaVersion) -> &'static [&'static str] {
        if version.supports(crate::model::VersionedField::DataTypeData) {
            DATATYPE_NAMES
        } else {
            &DATATYPE_NAMES[..DATATYPE_NAMES.len() - 1]
        }
    }

    /// Version-aware lookup.
    pub fn from_name_in(name: &str, version: SchemaVersion) -> Option<Self> {
        Self::from_name(name).filter(|dt| dt.is_supported_by(version))
    }

    /// Whether `version` accepts this datatype.
    pub fn is_supported_by(self, version: SchemaVersion) -> bool {
        self != RecordSetDataType::Data
            || version.supports(crate::model::VersionedField::DataTypeData)
    }
}

impl Symbol for RecordSetDataType {
    const NAMES: &'static [&'static str] = DATATYPE_NAMES;

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "MapBox" => RecordSetDataType::MapBox,
            "Vector" => RecordSetDataType::Vector,
            "Raster" => RecordSetDataType::Raster,
            "PointCloud" => RecordSetDataType::PointCloud,
            "Mesh" => RecordSetDataType::Mesh,
            "Mdal" => RecordSetDataType::Mdal,
            "Point" => RecordSetDataType::Point,
            "Line" => RecordSetDataType::Line,
            "Polygon" => RecordSetDataType::Polygon,
            "DEM" => RecordSetDataType::Dem,
            "Graph" => RecordSetDataType::Graph,
            "XSect" => RecordSetDataType::XSect,
            "BoreHole" => RecordSetDataType::BoreHole,
            "Voxel" => RecordSetDataType::Voxel,
            "Data" => RecordSetDataType::Data,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            RecordSetDataType::MapBox => "MapBox",
            RecordSetDataType::Vector => "Vector",
            RecordSetDataType::Raster => "Raster",
            RecordSetDataType::PointCloud => "PointCloud",
            RecordSetDataType::Mesh => "Mesh",
            RecordSetDataType::Mdal => "Mdal",
            RecordSetDataType::Point => "Point",
            RecordSetDataType::Line => "Line",
            RecordSetDataType::Polygon => "Polygon",
            RecordSetDataType::Dem => "DEM",
            RecordSetDataType::Graph => "Graph",
            RecordSetDataType::XSect => "XSect",
            RecordSetDataType::BoreHole => "BoreHole",
            RecordSetDataType::Voxel => "Voxel",
            RecordSetDataType::Data => "Data",
        }
    }
}

/// Where a layer's data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceType {
    #[default]
    File,
    Wfs,
    Oapif,
    Wms,
    Wcs,
    Pg,
    Aws,
    Gcs,
    Azure,
    Alibaba,
    Openstack,
    Tcp,
}

impl Symbol for SourceType {
    const NAMES: &'static [&'static str] = &[
        "File", "WFS", "OAPIF", "WMS", "WCS", "PG", "AWS", "GCS", "Azure", "Alibaba", "Openstack",
        "TCP",
    ];

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "File" => SourceType::File,
            "WFS" => SourceType::Wfs,
            "OAPIF" => SourceType::Oapif,
            "WMS" => SourceType::Wms,
            "WCS" => SourceType::Wcs,
            "PG" => SourceType::Pg,
            "AWS" => SourceType::Aws,
            "GCS" => SourceType::Gcs,
            "Azure" => SourceType::Azure,
            "Alibaba" => SourceType::Alibaba,
            "Openstack" => SourceType::Openstack,
            "TCP" => SourceType::Tcp,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            SourceType::File => "File",
            SourceType::Wfs => "WFS",
            SourceType::Oapif => "OAPIF",
            SourceType::Wms => "WMS",
            SourceType::Wcs => "WCS",
            SourceType::Pg => "PG",
            SourceType::Aws => "AWS",
            SourceType::Gcs => "GCS",
            SourceType::Azure => "Azure",
            SourceType::Alibaba => "Alibaba",
            SourceType::Openstack => "Openstack",
            SourceType::Tcp => "TCP",
        }
    }
}

/// Geometry used to draw a unit of symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Spheroid,
    Cuboid,
    Cylinder,
}

impl Symbol for Shape {
    const NAMES: &'static [&'static str] = &["Spheroid", "Cuboid", "Cylinder"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Spheroid" => Some(Shape::Spheroid),
            "Cuboid" => Some(Shape::Cuboid),
            "Cylinder" => Some(Shape::Cylinder),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Shape::Spheroid => "Spheroid",
            Shape::Cuboid => "Cuboid",
            Shape::Cylinder => "Cylinder",
        }
    }
}

/// How raster bands are mapped to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    MultibandColor,
    SinglebandColor,
    #[default]
    SinglebandGrey,
}

impl Symbol for ColorMode {
    const NAMES: &'static [&'static str] = &["MultibandColor", "SinglebandColor", "SinglebandGrey"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "MultibandColor" => Some(ColorMode::MultibandColor),
            "SinglebandColor" => Some(ColorMode::SinglebandColor),
            "SinglebandGrey" => Some(ColorMode::SinglebandGrey),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ColorMode::MultibandColor => "MultibandColor",
            ColorMode::SinglebandColor => "SinglebandColor",
            ColorMode::SinglebandGrey => "SinglebandGrey",
        }
    }
}

macro_rules! display_symbol {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        })*
    };
}

display_symbol!(RecordSetDataType, SourceType, Shape, ColorMode);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_names_roundtrip<S: Symbol + PartialEq + fmt::Debug>() {
        for name in S::NAMES {
            let value = S::from_name(name).unwrap();
            assert_eq!(value.name(), *name);
        }
    }

    #[test]
    fn test_names_roundtrip() {
        assert_names_roundtrip::<RecordSetDataType>();
        assert_names_roundtrip::<SourceType>();
        assert_names_roundtrip::<Shape>();
        assert_names_roundtrip::<ColorMode>();
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(RecordSetDataType::from_name("raster"), None);
        assert_eq!(RecordSetDataType::from_name("Dem"), None);
        assert_eq!(RecordSetDataType::from_name("DEM"), Some(RecordSetDataType::Dem));
        assert_eq!(SourceType::from_name("file"), None);
        assert_eq!(Shape::from_name("Sphere"), None);
    }

    #[test]
    fn test_data_only_in_newest() {
        assert_eq!(RecordSetDataType::from_name_in("Data", SchemaVersion::V1_1), None);
        assert_eq!(
            RecordSetDataType::from_name_in("Data", SchemaVersion::V2_0),
            Some(RecordSetDataType::Data)
        );
        assert!(!RecordSetDataType::names_for(SchemaVersion::V1_0).contains(&"Data"));
        assert!(RecordSetDataType::names_for(SchemaVersion::V2_0).contains(&"Data"));
        assert_eq!(RecordSetDataType::names_for(SchemaVersion::V1_0).len(), 14);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SourceType::default(), SourceType::File);
        assert_eq!(ColorMode::default(), ColorMode::SinglebandGrey);
    }
}
