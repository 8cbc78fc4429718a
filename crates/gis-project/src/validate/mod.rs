//! Version representability checks for project trees.
//!
//! Decoding only ever produces trees their generation can carry. Trees
//! built or edited in code can hold fields their generation has no key
//! for; encoding such a tree would silently drop data, so the encoder
//! runs [`validate_project`] first and refuses instead.
//!
//! Empty collections are always representable. An unset `color-mode` in an
//! older generation is fine too: it decodes back to its default.

use crate::codec::primitives::{field_path, index_path};
use crate::error::ValidationError;
use crate::model::{Project, RecordSet, SchemaVersion, Symbol, Unit, Units, VersionedField};

/// Checks that every populated field of `project` exists in its version.
///
/// Returns the first offending field in document order.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    let version = project.version;
    for (i, rs) in project.recordsets.iter().enumerate() {
        validate_recordset(rs, &index_path("recordsets", i), version)?;
    }
    Ok(())
}

/// Checks one recordset against `version`.
pub fn validate_recordset(
    rs: &RecordSet,
    path: &str,
    version: SchemaVersion,
) -> Result<(), ValidationError> {
    if !rs.datatype.is_supported_by(version) {
        return Err(ValidationError::DataTypeNotInVersion {
            path: field_path(path, "datatype"),
            datatype: rs.datatype.name(),
            version,
        });
    }

    let props_path = field_path(path, "properties");
    let props = &rs.properties;
    require(props.color_mode.is_none(), VersionedField::ColorMode, &props_path, version)?;
    require(props.color_interp.is_none(), VersionedField::ColorInterp, &props_path, version)?;
    require(props.units.is_empty(), VersionedField::PropertiesUnits, &props_path, version)?;
    require(rs.units.is_empty(), VersionedField::RecordSetUnits, path, version)?;
    require(rs.data_units.is_empty(), VersionedField::DataUnits, path, version)?;

    validate_units(&props.units, &field_path(&props_path, "units"), version)?;
    validate_units(&rs.units, &field_path(path, "units"), version)?;
    for (i, du) in rs.data_units.iter().enumerate() {
        let du_path = index_path(&field_path(path, "data_units"), i);
        validate_units(&du.units, &field_path(&du_path, "units"), version)?;
    }
    Ok(())
}

fn validate_units(units: &Units, path: &str, version: SchemaVersion) -> Result<(), ValidationError> {
    for (name, unit) in units {
        validate_unit(unit, &field_path(path, name), version)?;
    }
    Ok(())
}

fn validate_unit(unit: &Unit, path: &str, version: SchemaVersion) -> Result<(), ValidationError> {
    require(unit.color.is_none(), VersionedField::UnitColor, path, version)?;
    require(unit.transform.is_none(), VersionedField::UnitTransform, path, version)?;
    require(unit.label.is_none(), VersionedField::UnitLabel, path, version)
}

/// Fails when a field is populated (`empty` is false) but `version` lacks it.
fn require(
    empty: bool,
    field: VersionedField,
    path: &str,
    version: SchemaVersion,
) -> Result<(), ValidationError> {
    if empty || version.supports(field) {
        return Ok(());
    }
    Err(ValidationError::FieldNotInVersion {
        path: path.to_string(),
        field: field.wire_name(),
        version,
    })
}
