//! Recordset encoding/decoding.
//!
//! Field layout and defaulting depend on the schema generation; see
//! [`SchemaVersion::supports`]. Keys a generation does not define are
//! ignored on decode and never written on encode.

use serde_json::Value;

use crate::codec::list::{decode_list, encode_list, ListShape};
use crate::codec::primitives::{expect_symbol, ObjectReader, ObjectWriter};
use crate::codec::value::{
    decode_bbox, decode_color, decode_legend, decode_point, decode_transform, encode_bbox,
    encode_color, encode_legend, encode_point, encode_transform,
};
use crate::error::DecodeError;
use crate::limits::MAX_UNITS_PER_MAP;
use crate::model::{
    BoreholeData, ColorMode, DataUnit, Properties, RecordSet, RecordSetDataType, SchemaVersion,
    SourceType, Unit, Units, VersionedField, DEFAULT_ELEVATION_LAYER_TYPE,
    DEFAULT_ELEVATION_SOURCE_TYPE, DEFAULT_IMAGERY_SOURCE_TYPE,
};

const RECORDSET_KEYS: &[&str] = &[
    "id",
    "display-name",
    "datatype",
    "source",
    "position",
    "transform",
    "proj4",
    "visible",
    "properties",
];

const PROPERTIES_KEYS: &[&str] = &[
    "dem",
    "header-string",
    "filter",
    "bbox",
    "source-type",
    "read-only",
    "mapscale",
    "map_size",
    "elevation_source_type",
    "elevation_layer_type",
    "imagery_source_type",
    "image_folder",
    "bh-data",
    "hide-sublayers",
];

const BH_DATA_KEYS: &[&str] = &[
    "x-field",
    "y-field",
    "z-field",
    "id-field",
    "inc-field",
    "azi-field",
    "from-field",
    "to-field",
    "data-field",
    "data-source",
    "log-id-field",
    "legend",
    "eoh-field",
];

/// Unit keys with the field each depends on.
const UNIT_KEYS: &[(VersionedField, &str)] = &[
    (VersionedField::UnitColor, "color"),
    (VersionedField::UnitShape, "shape"),
    (VersionedField::UnitTransform, "transform"),
    (VersionedField::UnitLabel, "label"),
    (VersionedField::UnitTexture, "texture-image"),
];

/// Base keys plus every versioned key the generation supports.
fn known_keys<'k>(
    base: &[&'k str],
    versioned: &[(VersionedField, &'k str)],
    version: SchemaVersion,
) -> Vec<&'k str> {
    let mut keys = base.to_vec();
    keys.extend(
        versioned
            .iter()
            .filter(|(field, _)| version.supports(*field))
            .map(|(_, key)| *key),
    );
    keys
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes one recordset.
pub fn decode_recordset(
    value: &Value,
    path: String,
    version: SchemaVersion,
) -> Result<RecordSet, DecodeError> {
    let obj = ObjectReader::new(value, path)?;

    let datatype = expect_symbol(
        obj.required("datatype")?,
        &obj.field_path("datatype"),
        RecordSetDataType::names_for(version),
        |name| RecordSetDataType::from_name_in(name, version),
    )?;

    let mut recordset = RecordSet::new(datatype);
    recordset.id = obj.read_str("id")?;
    recordset.display_name = obj.read_str("display-name")?;
    recordset.source = obj.read_str("source")?;
    recordset.position = obj
        .get("position")
        .map(|v| decode_point(v, &obj.field_path("position")))
        .transpose()?;
    recordset.transform = obj
        .get("transform")
        .map(|v| decode_transform(v, &obj.field_path("transform")))
        .transpose()?;
    recordset.proj4 = obj.read_str("proj4")?;
    recordset.visible = obj.read_bool_or("visible", true)?;
    recordset.properties = decode_properties(&obj.read_required_object("properties")?, version)?;

    if version.supports(VersionedField::RecordSetUnits) {
        recordset.units = decode_units(obj.get("units"), &obj.field_path("units"), version)?;
    }
    if version.supports(VersionedField::DataUnits) {
        let path = obj.field_path("data_units");
        recordset.data_units = match obj.get("data_units") {
            Some(v) => decode_list(v, &path, ListShape::ArrayOnly, |item, p| {
                decode_data_unit(item, p, version)
            })?,
            None => Vec::new(),
        };
    }

    obj.trace_unknown(&known_keys(
        RECORDSET_KEYS,
        &[
            (VersionedField::RecordSetUnits, "units"),
            (VersionedField::DataUnits, "data_units"),
        ],
        version,
    ));
    Ok(recordset)
}

/// Decodes a properties block, populating defaults for absent fields.
pub fn decode_properties(
    obj: &ObjectReader<'_>,
    version: SchemaVersion,
) -> Result<Properties, DecodeError> {
    let mut props = Properties {
        dem: obj.read_str("dem")?,
        header_string: obj.read_str("header-string")?,
        filter: obj.read_map_list("filter")?,
        bbox: obj
            .get("bbox")
            .map(|v| decode_bbox(v, &obj.field_path("bbox")))
            .transpose()?,
        source_type: obj.read_enum_or("source-type", SourceType::File)?,
        read_only: obj.read_bool_or("read-only", false)?,
        map_scale: obj.read_i32_or("mapscale", 0)?,
        map_size: obj.read_i32_or("map_size", 0)?,
        elevation_source_type: obj
            .read_str_or("elevation_source_type", DEFAULT_ELEVATION_SOURCE_TYPE)?,
        elevation_layer_type: obj.read_str_or("elevation_layer_type", DEFAULT_ELEVATION_LAYER_TYPE)?,
        imagery_source_type: obj.read_str_or("imagery_source_type", DEFAULT_IMAGERY_SOURCE_TYPE)?,
        image_folder: obj.read_str("image_folder")?,
        bh_data: obj
            .read_object("bh-data")?
            .map(|bh| decode_bh_data(&bh))
            .transpose()?,
        hide_sublayers: obj.read_str_list("hide-sublayers")?,
        ..Properties::default()
    };

    if version.supports(VersionedField::ColorMode) {
        props.color_mode = Some(obj.read_enum_or("color-mode", ColorMode::SinglebandGrey)?);
    }
    if version.supports(VersionedField::ColorInterp) {
        props.color_interp = obj.read_map("colorinterp")?;
    }
    if version.supports(VersionedField::PropertiesUnits) {
        props.units = decode_units(obj.get("units"), &obj.field_path("units"), version)?;
    }

    obj.trace_unknown(&known_keys(
        PROPERTIES_KEYS,
        &[
            (VersionedField::ColorMode, "color-mode"),
            (VersionedField::ColorInterp, "colorinterp"),
            (VersionedField::PropertiesUnits, "units"),
        ],
        version,
    ));
    Ok(props)
}

/// Decodes a borehole column mapping.
pub fn decode_bh_data(obj: &ObjectReader<'_>) -> Result<BoreholeData, DecodeError> {
    let bh = BoreholeData {
        x_field: obj.read_str("x-field")?,
        y_field: obj.read_str("y-field")?,
        z_field: obj.read_str("z-field")?,
        id_field: obj.read_str("id-field")?,
        inc_field: obj.read_str("inc-field")?,
        azi_field: obj.read_str("azi-field")?,
        from_field: obj.read_str("from-field")?,
        to_field: obj.read_str("to-field")?,
        data_field: obj.read_str("data-field")?,
        data_source: obj.read_str("data-source")?,
        log_id_field: obj.read_str("log-id-field")?,
        legend: obj
            .get("legend")
            .map(|v| decode_legend(v, &obj.field_path("legend")))
            .transpose()?,
        eoh_field: obj.read_str("eoh-field")?,
        base_path: None,
    };
    obj.trace_unknown(BH_DATA_KEYS);
    Ok(bh)
}

/// Decodes a name-to-unit map. Absent or `null` is empty.
pub fn decode_units(
    value: Option<&Value>,
    path: &str,
    version: SchemaVersion,
) -> Result<Units, DecodeError> {
    let Some(value) = value else {
        return Ok(Units::new());
    };
    let obj = ObjectReader::new(value, path)?;
    if obj.len() > MAX_UNITS_PER_MAP {
        return Err(DecodeError::LimitExceeded {
            field: "units",
            len: obj.len(),
            max: MAX_UNITS_PER_MAP,
        });
    }
    let mut units = Units::new();
    for (name, unit) in obj.entries() {
        units.insert(name.clone(), decode_unit(unit, obj.field_path(name), version)?);
    }
    Ok(units)
}

/// Decodes one unit of symbology.
pub fn decode_unit(value: &Value, path: String, version: SchemaVersion) -> Result<Unit, DecodeError> {
    let obj = ObjectReader::new(value, path)?;
    let mut unit = Unit {
        shape: obj.read_enum("shape")?,
        texture_image: obj.read_str("texture-image")?,
        ..Unit::default()
    };

    if version.supports(VersionedField::UnitColor) {
        unit.color = obj
            .get("color")
            .map(|v| decode_color(v, &obj.field_path("color")))
            .transpose()?;
    }
    if version.supports(VersionedField::UnitTransform) {
        unit.transform = obj
            .get("transform")
            .map(|v| decode_transform(v, &obj.field_path("transform")))
            .transpose()?;
    }
    if version.supports(VersionedField::UnitLabel) {
        unit.label = obj.read_str("label")?;
    }

    obj.trace_unknown(&known_keys(&[], UNIT_KEYS, version));
    Ok(unit)
}

/// Decodes one data unit.
pub fn decode_data_unit(
    value: &Value,
    path: String,
    version: SchemaVersion,
) -> Result<DataUnit, DecodeError> {
    let obj = ObjectReader::new(value, path)?;
    let data_unit = DataUnit {
        name: obj.read_str("name")?,
        units: decode_units(obj.get("units"), &obj.field_path("units"), version)?,
    };
    obj.trace_unknown(&["name", "units"]);
    Ok(data_unit)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes one recordset in the layout of `version`.
///
/// Callers validate first; fields the generation cannot carry are skipped.
pub fn encode_recordset(recordset: &RecordSet, version: SchemaVersion) -> Value {
    let mut w = ObjectWriter::new();
    w.put_str("id", recordset.id.as_deref());
    w.put_str("display-name", recordset.display_name.as_deref());
    w.put_symbol("datatype", recordset.datatype);
    w.put_str("source", recordset.source.as_deref());
    w.put_opt("position", recordset.position.as_ref().map(encode_point));
    w.put_opt("transform", recordset.transform.as_ref().map(encode_transform));
    w.put_str("proj4", recordset.proj4.as_deref());
    w.put_unless_default("visible", recordset.visible, true);
    w.put("properties", encode_properties(&recordset.properties, version));

    if version.supports(VersionedField::RecordSetUnits) && !recordset.units.is_empty() {
        w.put("units", encode_units(&recordset.units, version));
    }
    if version.supports(VersionedField::DataUnits) && !recordset.data_units.is_empty() {
        w.put(
            "data_units",
            encode_list(&recordset.data_units, |du| encode_data_unit(du, version)),
        );
    }
    w.into_value()
}

/// Encodes a properties block. Defaulted fields equal to their default are omitted.
pub fn encode_properties(props: &Properties, version: SchemaVersion) -> Value {
    let mut w = ObjectWriter::new();
    w.put_str("dem", props.dem.as_deref());
    w.put_str("header-string", props.header_string.as_deref());
    if version.supports(VersionedField::ColorMode) {
        if let Some(mode) = props.color_mode {
            w.put_symbol("color-mode", mode);
        }
    }
    if version.supports(VersionedField::ColorInterp) {
        w.put_opt("colorinterp", props.color_interp.clone().map(Value::Object));
    }
    w.put_array(
        "filter",
        props.filter.iter().cloned().map(Value::Object).collect(),
    );
    w.put_opt("bbox", props.bbox.as_ref().map(encode_bbox));
    if props.source_type != SourceType::File {
        w.put_symbol("source-type", props.source_type);
    }
    w.put_unless_default("read-only", props.read_only, false);
    w.put_unless_default("mapscale", props.map_scale, 0);
    w.put_unless_default("map_size", props.map_size, 0);
    w.put_unless_default(
        "elevation_source_type",
        props.elevation_source_type.as_str(),
        DEFAULT_ELEVATION_SOURCE_TYPE,
    );
    w.put_unless_default(
        "elevation_layer_type",
        props.elevation_layer_type.as_str(),
        DEFAULT_ELEVATION_LAYER_TYPE,
    );
    w.put_unless_default(
        "imagery_source_type",
        props.imagery_source_type.as_str(),
        DEFAULT_IMAGERY_SOURCE_TYPE,
    );
    w.put_str("image_folder", props.image_folder.as_deref());
    w.put_opt("bh-data", props.bh_data.as_ref().map(encode_bh_data));
    if version.supports(VersionedField::PropertiesUnits) && !props.units.is_empty() {
        w.put("units", encode_units(&props.units, version));
    }
    w.put_opt(
        "hide-sublayers",
        props
            .hide_sublayers
            .as_ref()
            .map(|names| names.iter().map(|n| Value::from(n.as_str())).collect::<Vec<_>>()),
    );
    w.into_value()
}

/// Encodes a borehole column mapping.
pub fn encode_bh_data(bh: &BoreholeData) -> Value {
    let mut w = ObjectWriter::new();
    w.put_str("x-field", bh.x_field.as_deref());
    w.put_str("y-field", bh.y_field.as_deref());
    w.put_str("z-field", bh.z_field.as_deref());
    w.put_str("id-field", bh.id_field.as_deref());
    w.put_str("inc-field", bh.inc_field.as_deref());
    w.put_str("azi-field", bh.azi_field.as_deref());
    w.put_str("from-field", bh.from_field.as_deref());
    w.put_str("to-field", bh.to_field.as_deref());
    w.put_str("data-field", bh.data_field.as_deref());
    w.put_str("data-source", bh.data_source.as_deref());
    w.put_str("log-id-field", bh.log_id_field.as_deref());
    w.put_opt("legend", bh.legend.as_ref().map(encode_legend));
    w.put_str("eoh-field", bh.eoh_field.as_deref());
    w.into_value()
}

/// Encodes a name-to-unit map.
pub fn encode_units(units: &Units, version: SchemaVersion) -> Value {
    Value::Object(
        units
            .iter()
            .map(|(name, unit)| (name.clone(), encode_unit(unit, version)))
            .collect(),
    )
}

/// Encodes one unit in the layout of `version`.
pub fn encode_unit(unit: &Unit, version: SchemaVersion) -> Value {
    let mut w = ObjectWriter::new();
    if version.supports(VersionedField::UnitColor) {
        w.put_opt("color", unit.color.map(encode_color));
    }
    if let Some(shape) = unit.shape {
        w.put_symbol("shape", shape);
    }
    if version.supports(VersionedField::UnitTransform) {
        w.put_opt("transform", unit.transform.as_ref().map(encode_transform));
    }
    if version.supports(VersionedField::UnitLabel) {
        w.put_str("label", unit.label.as_deref());
    }
    w.put_str("texture-image", unit.texture_image.as_deref());
    w.into_value()
}

/// Encodes one data unit.
pub fn encode_data_unit(data_unit: &DataUnit, version: SchemaVersion) -> Value {
    let mut w = ObjectWriter::new();
    w.put_str("name", data_unit.name.as_deref());
    w.put("units", encode_units(&data_unit.units, version));
    w.into_value()
}
