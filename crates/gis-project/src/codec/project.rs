//! Project encoding/decoding.
//!
//! Decoding reads the version tag first and then decodes the rest of the
//! document with that generation's field layout. A document either decodes
//! completely or not at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::list::{decode_list, encode_list, ListShape};
use crate::codec::primitives::{expect_str, number, ObjectReader, ObjectWriter};
use crate::codec::recordset::{decode_recordset, encode_recordset};
use crate::codec::value::{decode_point, encode_point};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_DOCUMENT_SIZE, MAX_RECORDSETS};
use crate::model::{Project, SchemaVersion};
use crate::validate::validate_project;

const PROJECT_KEYS: &[&str] = &[
    "version",
    "name",
    "origin",
    "scales",
    "default_proj",
    "grid-scale",
    "cameras",
    "recordsets",
];

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Largest accepted document, in bytes.
    pub max_document_size: usize,
    /// Most recordsets accepted.
    pub max_recordsets: usize,
    /// Generation assumed for documents without a version tag. Tagged
    /// documents always use their tag.
    pub version_override: Option<SchemaVersion>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_document_size: MAX_DOCUMENT_SIZE,
            max_recordsets: MAX_RECORDSETS,
            version_override: None,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assumes `version` for untagged documents.
    pub fn with_version(mut self, version: SchemaVersion) -> Self {
        self.version_override = Some(version);
        self
    }
}

/// Options for encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Indent the output instead of writing it on one line.
    pub pretty: bool,
}

impl EncodeOptions {
    /// Creates default (compact) encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates indented encoding options.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a project descriptor from UTF-8 JSON text.
///
/// ```rust
/// use gis_project::{decode_project, RecordSetDataType, SchemaVersion};
///
/// let project = decode_project(r#"{
///     "version": "2.0.0",
///     "recordsets": [{"datatype": "Raster", "source": "dem.tif", "properties": {}}]
/// }"#).unwrap();
///
/// assert_eq!(project.version, SchemaVersion::V2_0);
/// assert_eq!(project.recordsets[0].datatype, RecordSetDataType::Raster);
/// ```
pub fn decode_project(input: impl AsRef<[u8]>) -> Result<Project, DecodeError> {
    decode_project_with_options(input, &DecodeOptions::default())
}

/// Decodes a project descriptor with the given options.
pub fn decode_project_with_options(
    input: impl AsRef<[u8]>,
    options: &DecodeOptions,
) -> Result<Project, DecodeError> {
    let input = input.as_ref();
    if input.len() > options.max_document_size {
        return Err(DecodeError::LimitExceeded {
            field: "document",
            len: input.len(),
            max: options.max_document_size,
        });
    }
    let value: Value = serde_json::from_slice(input)?;
    decode_project_value_with_options(&value, options)
}

/// Decodes a project from an already parsed JSON value.
pub fn decode_project_value(value: &Value) -> Result<Project, DecodeError> {
    decode_project_value_with_options(value, &DecodeOptions::default())
}

/// Decodes a project from an already parsed JSON value with the given options.
pub fn decode_project_value_with_options(
    value: &Value,
    options: &DecodeOptions,
) -> Result<Project, DecodeError> {
    let root = ObjectReader::new(value, "")?;
    let version = read_version(&root, options)?;
    tracing::debug!(%version, "decoding project");

    let recordsets_path = root.field_path("recordsets");
    let recordsets = root.required("recordsets")?;
    if let Value::Array(items) = recordsets {
        if items.len() > options.max_recordsets {
            return Err(DecodeError::LimitExceeded {
                field: "recordsets",
                len: items.len(),
                max: options.max_recordsets,
            });
        }
    }

    let mut project = Project::new(version);
    project.name = root.read_str("name")?;
    project.origin = root
        .get("origin")
        .map(|v| decode_point(v, &root.field_path("origin")))
        .transpose()?;
    project.scales = root.read_f64_list("scales")?;
    project.default_proj = root.read_str("default_proj")?;
    project.grid_scale = root.read_f64("grid-scale")?;
    project.cameras = match root.get("cameras") {
        Some(v) => decode_list(v, &root.field_path("cameras"), ListShape::ArrayOnly, |item, p| {
            decode_point(item, &p)
        })?,
        None => Vec::new(),
    };
    project.recordsets = decode_list(
        recordsets,
        &recordsets_path,
        recordset_list_shape(version),
        |item, p| decode_recordset(item, p, version),
    )?;

    root.trace_unknown(PROJECT_KEYS);
    tracing::debug!(
        %version,
        recordsets = project.recordsets.len(),
        "decoded project"
    );
    Ok(project)
}

/// Older generations allow a lone recordset object in place of the array.
fn recordset_list_shape(version: SchemaVersion) -> ListShape {
    match version {
        SchemaVersion::V1_0 | SchemaVersion::V1_1 => ListShape::ArrayOrObject,
        SchemaVersion::V2_0 => ListShape::ArrayOnly,
    }
}

fn read_version(root: &ObjectReader<'_>, options: &DecodeOptions) -> Result<SchemaVersion, DecodeError> {
    let Some(tag) = root.get("version") else {
        return Ok(options.version_override.unwrap_or(SchemaVersion::V1_0));
    };
    let tag = expect_str(tag, &root.field_path("version"))?;
    SchemaVersion::from_tag(tag).ok_or_else(|| DecodeError::UnsupportedVersion {
        version: tag.to_string(),
    })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a project to compact JSON text.
///
/// The tree is validated against its version first.
pub fn encode_project(project: &Project) -> Result<String, EncodeError> {
    encode_project_with_options(project, EncodeOptions::default())
}

/// Encodes a project to JSON text with the given options.
pub fn encode_project_with_options(
    project: &Project,
    options: EncodeOptions,
) -> Result<String, EncodeError> {
    let value = encode_project_value(project)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

/// Encodes a project to a JSON value.
///
/// Always writes `recordsets` as an array, and omits optional fields that
/// are absent and defaulted fields that hold their default.
pub fn encode_project_value(project: &Project) -> Result<Value, EncodeError> {
    validate_project(project)?;
    let version = project.version;

    let mut w = ObjectWriter::new();
    w.put_opt("version", version.tag());
    w.put_str("name", project.name.as_deref());
    w.put_opt("origin", project.origin.as_ref().map(encode_point));
    w.put_array("scales", project.scales.iter().copied().map(number).collect());
    w.put_str("default_proj", project.default_proj.as_deref());
    w.put_opt("grid-scale", project.grid_scale.map(number));
    w.put_array("cameras", project.cameras.iter().map(encode_point).collect());
    w.put(
        "recordsets",
        encode_list(&project.recordsets, |rs| encode_recordset(rs, version)),
    );

    tracing::debug!(%version, recordsets = project.recordsets.len(), "encoded project");
    Ok(w.into_value())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{RecordSetDataType, Unit};

    #[test]
    fn test_version_dispatch() {
        let cases = [
            (json!({"recordsets": []}), SchemaVersion::V1_0),
            (json!({"version": "1.0.0", "recordsets": []}), SchemaVersion::V1_0),
            (json!({"version": "1.1.0", "recordsets": []}), SchemaVersion::V1_1),
            (json!({"version": "2.0.0", "recordsets": []}), SchemaVersion::V2_0),
            (json!({"version": "Runette:2.0.0", "recordsets": []}), SchemaVersion::V2_0),
        ];
        for (doc, expected) in cases {
            assert_eq!(decode_project_value(&doc).unwrap().version, expected);
        }
    }

    #[test]
    fn test_unsupported_version() {
        let err = decode_project_value(&json!({"version": "1.5.0", "recordsets": []})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnsupportedVersion {
                version: "1.5.0".to_string()
            }
        );
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);

        let err = decode_project_value(&json!({"version": 2, "recordsets": []})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_version_override_only_for_untagged() {
        let options = DecodeOptions::new().with_version(SchemaVersion::V1_1);
        let project =
            decode_project_value_with_options(&json!({"recordsets": []}), &options).unwrap();
        assert_eq!(project.version, SchemaVersion::V1_1);

        let project = decode_project_value_with_options(
            &json!({"version": "2.0.0", "recordsets": []}),
            &options,
        )
        .unwrap();
        assert_eq!(project.version, SchemaVersion::V2_0);
    }

    #[test]
    fn test_recordsets_shapes() {
        let project = decode_project_value(&json!({"recordsets": null})).unwrap();
        assert!(project.recordsets.is_empty());

        let single = json!({"version": "1.1.0", "recordsets": {"datatype": "Mesh", "properties": {}}});
        assert_eq!(decode_project_value(&single).unwrap().recordsets.len(), 1);

        let single = json!({"version": "2.0.0", "recordsets": {"datatype": "Mesh", "properties": {}}});
        let err = decode_project_value(&single).unwrap_err();
        assert_eq!(err.path(), Some("recordsets"));

        let err = decode_project_value(&json!({"name": "x"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                path: String::new(),
                field: "recordsets",
            }
        );
    }

    #[test]
    fn test_limits() {
        let doc = br#"{"recordsets": [{"datatype": "Vector", "properties": {}}, {"datatype": "Vector", "properties": {}}]}"#;
        let options = DecodeOptions {
            max_recordsets: 1,
            ..DecodeOptions::default()
        };
        assert!(matches!(
            decode_project_with_options(doc, &options),
            Err(DecodeError::LimitExceeded { field: "recordsets", len: 2, max: 1 })
        ));

        let options = DecodeOptions {
            max_document_size: 8,
            ..DecodeOptions::default()
        };
        assert!(matches!(
            decode_project_with_options(doc, &options),
            Err(DecodeError::LimitExceeded { field: "document", .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_project("{\"recordsets\": [").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_root_fields() {
        let doc = json!({
            "version": "2.0.0",
            "name": "Site",
            "origin": [1.5, 2.5, 3.0],
            "scales": [1, 2.5],
            "default_proj": "EPSG:4326",
            "grid-scale": 10,
            "cameras": [{"type": "Point", "coordinates": [0, 0, 100]}],
            "recordsets": []
        });
        let project = decode_project_value(&doc).unwrap();
        assert_eq!(project.name.as_deref(), Some("Site"));
        assert_eq!(project.origin.unwrap().z, Some(3.0));
        assert_eq!(project.scales, vec![1.0, 2.5]);
        assert_eq!(project.grid_scale, Some(10.0));
        assert_eq!(project.cameras[0].z, Some(100.0));

        let encoded = encode_project_value(&project).unwrap();
        assert_eq!(encoded["version"], json!("2.0.0"));
        assert_eq!(encoded["origin"], json!({"type": "Point", "coordinates": [1.5, 2.5, 3.0]}));
        assert_eq!(decode_project_value(&encoded).unwrap(), project);
    }

    #[test]
    fn test_oldest_generation_omits_tag() {
        let project = Project::new(SchemaVersion::V1_0);
        let encoded = encode_project_value(&project).unwrap();
        assert_eq!(encoded, json!({"recordsets": []}));
    }

    #[test]
    fn test_encode_rejects_unrepresentable() {
        let mut project = Project::new(SchemaVersion::V1_1);
        let mut rs = crate::model::RecordSet::new(RecordSetDataType::Point);
        rs.properties.units.insert(
            "u".to_string(),
            Unit {
                label: Some("name".to_string()),
                ..Unit::default()
            },
        );
        project.recordsets.push(rs);
        assert!(matches!(encode_project(&project), Err(EncodeError::Invalid(_))));
    }

    #[test]
    fn test_pretty_output() {
        let project = Project::new(SchemaVersion::V2_0);
        let compact = encode_project(&project).unwrap();
        let pretty = encode_project_with_options(&project, EncodeOptions::pretty()).unwrap();
        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert_eq!(decode_project(&pretty).unwrap(), decode_project(&compact).unwrap());
    }

    #[test]
    fn test_options_serde() {
        let options: DecodeOptions =
            serde_json::from_str(r#"{"max_recordsets": 10, "version_override": "1.1.0"}"#).unwrap();
        assert_eq!(options.max_recordsets, 10);
        assert_eq!(options.max_document_size, MAX_DOCUMENT_SIZE);
        assert_eq!(options.version_override, Some(SchemaVersion::V1_1));
    }
}
