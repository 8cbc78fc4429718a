//! Schema generations of the project descriptor.
//!
//! The descriptor went through three incompatible generations. They share
//! one model in this crate; what differs is which fields a generation can
//! carry, tracked by [`SchemaVersion::supports`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Producer prefix some writers put in front of the version tag.
pub const TAG_PREFIX: &str = "Runette:";

/// A descriptor schema generation (oldest to newest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// Oldest generation. Documents of this generation may carry no tag.
    #[serde(rename = "1.0.0")]
    V1_0,
    /// Middle generation: units lose color, transform and label.
    #[serde(rename = "1.1.0")]
    V1_1,
    /// Newest generation: adds the `Data` datatype and data units, moves
    /// units onto the recordset, drops color-mode and colorinterp.
    #[serde(rename = "2.0.0")]
    #[default]
    V2_0,
}

impl SchemaVersion {
    /// All generations, oldest first.
    pub const ALL: [SchemaVersion; 3] = [SchemaVersion::V1_0, SchemaVersion::V1_1, SchemaVersion::V2_0];

    /// The newest generation.
    pub const LATEST: SchemaVersion = SchemaVersion::V2_0;

    /// Version string of this generation.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V1_0 => "1.0.0",
            SchemaVersion::V1_1 => "1.1.0",
            SchemaVersion::V2_0 => "2.0.0",
        }
    }

    /// Tag written by the encoder. The oldest generation predates the tag.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            SchemaVersion::V1_0 => None,
            other => Some(other.as_str()),
        }
    }

    /// Parses a version tag, with or without the producer prefix.
    ///
    /// Returns `None` for anything that is not a known generation; callers
    /// must not coerce unknown tags to a nearby version.
    pub fn from_tag(tag: &str) -> Option<SchemaVersion> {
        let bare = tag.strip_prefix(TAG_PREFIX).unwrap_or(tag);
        SchemaVersion::ALL.into_iter().find(|v| v.as_str() == bare)
    }

    /// Whether this generation can carry `field`.
    pub fn supports(self, field: VersionedField) -> bool {
        use SchemaVersion::*;
        use VersionedField::*;

        match field {
            UnitShape | UnitTexture => true,
            UnitColor | UnitTransform | UnitLabel => self == V1_0,
            ColorMode | ColorInterp | PropertiesUnits => self < V2_0,
            RecordSetUnits | DataUnits | DataTypeData => self == V2_0,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields whose presence depends on the schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionedField {
    UnitColor,
    UnitShape,
    UnitTransform,
    UnitLabel,
    UnitTexture,
    ColorMode,
    ColorInterp,
    /// `units` under `properties`.
    PropertiesUnits,
    /// `units` directly on the recordset.
    RecordSetUnits,
    DataUnits,
    /// The `Data` member of the recordset datatype set.
    DataTypeData,
}

impl VersionedField {
    /// Key used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            VersionedField::UnitColor => "color",
            VersionedField::UnitShape => "shape",
            VersionedField::UnitTransform => "transform",
            VersionedField::UnitLabel => "label",
            VersionedField::UnitTexture => "texture-image",
            VersionedField::ColorMode => "color-mode",
            VersionedField::ColorInterp => "colorinterp",
            VersionedField::PropertiesUnits | VersionedField::RecordSetUnits => "units",
            VersionedField::DataUnits => "data_units",
            VersionedField::DataTypeData => "datatype",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(SchemaVersion::from_tag("1.0.0"), Some(SchemaVersion::V1_0));
        assert_eq!(SchemaVersion::from_tag("1.1.0"), Some(SchemaVersion::V1_1));
        assert_eq!(SchemaVersion::from_tag("2.0.0"), Some(SchemaVersion::V2_0));
        assert_eq!(SchemaVersion::from_tag("Runette:2.0.0"), Some(SchemaVersion::V2_0));
        assert_eq!(SchemaVersion::from_tag("2.0.1"), None);
        assert_eq!(SchemaVersion::from_tag("Other:2.0.0"), None);
        assert_eq!(SchemaVersion::from_tag(""), None);
    }

    #[test]
    fn test_oldest_has_no_tag() {
        assert_eq!(SchemaVersion::V1_0.tag(), None);
        assert_eq!(SchemaVersion::V1_1.tag(), Some("1.1.0"));
        assert_eq!(SchemaVersion::V2_0.tag(), Some("2.0.0"));
    }

    #[test]
    fn test_field_table() {
        use VersionedField::*;

        assert!(SchemaVersion::V1_0.supports(UnitColor));
        assert!(!SchemaVersion::V1_1.supports(UnitColor));
        assert!(!SchemaVersion::V2_0.supports(UnitTransform));
        assert!(SchemaVersion::V1_1.supports(UnitShape));
        assert!(SchemaVersion::V1_1.supports(ColorMode));
        assert!(!SchemaVersion::V2_0.supports(ColorMode));
        assert!(SchemaVersion::V1_1.supports(PropertiesUnits));
        assert!(!SchemaVersion::V1_1.supports(RecordSetUnits));
        assert!(SchemaVersion::V2_0.supports(DataUnits));
        assert!(!SchemaVersion::V1_0.supports(DataTypeData));
    }

    #[test]
    fn test_ordering() {
        assert!(SchemaVersion::V1_0 < SchemaVersion::V1_1);
        assert!(SchemaVersion::V1_1 < SchemaVersion::LATEST);
    }
}
