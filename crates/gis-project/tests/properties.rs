//! Property-based tests for descriptor encoding and path resolution.
//!
//! These tests verify that:
//! 1. Any tree valid for its generation survives encode -> decode unchanged
//! 2. Re-encoding a decoded document is a fixed point
//! 3. Absolute paths are the normalized join of base and reference
//! 4. Colors in either JSON form decode to the same quantized value, and
//!    any color a file can hold either fails to decode or re-encodes stably

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use gis_project::util::normalize;
use gis_project::{
    decode_project, decode_project_value, encode_project, encode_project_value, BoreholeData,
    Color, ColorMode, DataUnit, DecodeError, GeoPoint, Project, Quaternion, RecordSet,
    RecordSetDataType, SchemaVersion, Shape, SourceType, Transform, Unit, Units, Vector3,
};

// Strategy helpers

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}".prop_map(|s| s.to_string())
}

/// Absent, empty, or a plain identifier.
fn opt_ident() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(String::new())),
        4 => ident_strategy().prop_map(Some),
    ]
}

fn rel_file_strategy() -> impl Strategy<Value = String> {
    (prop::collection::vec(ident_strategy(), 0..3), ident_strategy())
        .prop_map(|(dirs, file)| {
            let mut parts = dirs;
            parts.push(format!("{file}.dat"));
            parts.join("/")
        })
}

/// Absent, empty, or a relative file reference.
fn opt_rel_file() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        2 => Just(None),
        1 => Just(Some(String::new())),
        4 => rel_file_strategy().prop_map(Some),
    ]
}

fn finite_f64() -> impl Strategy<Value = f64> {
    // Values that survive JSON text exactly.
    prop_oneof![
        Just(0.0),
        Just(1.0),
        Just(-1.0),
        (-10000i32..10000).prop_map(|x| x as f64),
        (-1000i32..1000).prop_map(|x| x as f64 / 4.0),
        (-1000i32..1000).prop_map(|x| x as f64 / 10.0),
    ]
}

fn point_strategy() -> impl Strategy<Value = GeoPoint> {
    (finite_f64(), finite_f64(), proptest::option::of(finite_f64()))
        .prop_map(|(x, y, z)| GeoPoint { x, y, z })
}

fn vector_strategy() -> impl Strategy<Value = Vector3> {
    (finite_f64(), finite_f64(), finite_f64()).prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

fn transform_strategy() -> impl Strategy<Value = Transform> {
    (
        vector_strategy(),
        (finite_f64(), finite_f64(), finite_f64(), finite_f64()),
        vector_strategy(),
    )
        .prop_map(|(translate, (x, y, z, w), scale)| Transform {
            translate,
            rotate: Quaternion::new(x, y, z, w),
            scale,
        })
}

fn byte_channel() -> impl Strategy<Value = u8> {
    prop_oneof![
        1 => 0u8..=2,
        3 => any::<u8>(),
    ]
}

fn color_strategy() -> impl Strategy<Value = Color> {
    (byte_channel(), byte_channel(), byte_channel(), byte_channel())
        .prop_map(|(r, g, b, a)| Color::from_rgba8(r, g, b, a))
}

fn json_map_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(ident_strategy(), (-100i64..100).prop_map(Value::from), 0..3)
        .prop_map(|m| m.into_iter().collect())
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop_oneof![Just(Shape::Spheroid), Just(Shape::Cuboid), Just(Shape::Cylinder)]
}

fn source_type_strategy() -> impl Strategy<Value = SourceType> {
    prop_oneof![
        Just(SourceType::File),
        Just(SourceType::Wfs),
        Just(SourceType::Oapif),
        Just(SourceType::Pg),
        Just(SourceType::Azure),
        Just(SourceType::Tcp),
    ]
}

fn color_mode_strategy() -> impl Strategy<Value = ColorMode> {
    prop_oneof![
        Just(ColorMode::MultibandColor),
        Just(ColorMode::SinglebandColor),
        Just(ColorMode::SinglebandGrey),
    ]
}

fn datatype_strategy(version: SchemaVersion) -> impl Strategy<Value = RecordSetDataType> {
    let base = prop_oneof![
        Just(RecordSetDataType::MapBox),
        Just(RecordSetDataType::Vector),
        Just(RecordSetDataType::Raster),
        Just(RecordSetDataType::PointCloud),
        Just(RecordSetDataType::Mesh),
        Just(RecordSetDataType::Mdal),
        Just(RecordSetDataType::Point),
        Just(RecordSetDataType::Line),
        Just(RecordSetDataType::Polygon),
        Just(RecordSetDataType::Dem),
        Just(RecordSetDataType::Graph),
        Just(RecordSetDataType::XSect),
        Just(RecordSetDataType::BoreHole),
        Just(RecordSetDataType::Voxel),
    ];
    if version == SchemaVersion::V2_0 {
        prop_oneof![4 => base, 1 => Just(RecordSetDataType::Data)].boxed()
    } else {
        base.boxed()
    }
}

fn unit_strategy(version: SchemaVersion) -> impl Strategy<Value = Unit> {
    let legacy = version == SchemaVersion::V1_0;
    (
        proptest::option::of(color_strategy()),
        proptest::option::of(shape_strategy()),
        proptest::option::of(transform_strategy()),
        opt_ident(),
        opt_rel_file(),
    )
        .prop_map(move |(color, shape, transform, label, texture_image)| {
            let mut unit = Unit::default();
            unit.shape = shape;
            unit.texture_image = texture_image;
            if legacy {
                unit.color = color;
                unit.transform = transform;
                unit.label = label;
            }
            unit
        })
}

fn units_strategy(version: SchemaVersion) -> impl Strategy<Value = Units> {
    prop::collection::btree_map(ident_strategy(), unit_strategy(version), 0..3)
}

fn bh_data_strategy() -> impl Strategy<Value = BoreholeData> {
    (
        (opt_ident(), opt_ident(), opt_ident(), opt_ident()),
        (opt_ident(), opt_ident(), opt_ident(), opt_ident()),
        (opt_ident(), opt_rel_file(), opt_ident(), opt_ident()),
        proptest::option::of(prop::collection::btree_map(ident_strategy(), color_strategy(), 0..3)),
    )
        .prop_map(
            |((x, y, z, id), (inc, azi, from, to), (data, source, log_id, eoh), legend)| {
                let mut bh = BoreholeData::default();
                bh.x_field = x;
                bh.y_field = y;
                bh.z_field = z;
                bh.id_field = id;
                bh.inc_field = inc;
                bh.azi_field = azi;
                bh.from_field = from;
                bh.to_field = to;
                bh.data_field = data;
                bh.data_source = source;
                bh.log_id_field = log_id;
                bh.legend = legend;
                bh.eoh_field = eoh;
                bh
            },
        )
}

fn recordset_strategy(version: SchemaVersion) -> impl Strategy<Value = RecordSet> {
    let older = version < SchemaVersion::V2_0;
    let header = (
        datatype_strategy(version),
        opt_ident(),
        opt_ident(),
        opt_rel_file(),
        proptest::option::of(point_strategy()),
        proptest::option::of(transform_strategy()),
        opt_ident(),
        any::<bool>(),
    );
    let props = (
        (
            opt_rel_file(),
            opt_ident(),
            color_mode_strategy(),
            proptest::option::of(json_map_strategy()),
            prop::collection::vec(json_map_strategy(), 0..2),
            proptest::option::of((finite_f64(), finite_f64(), finite_f64(), finite_f64())),
        ),
        (
            source_type_strategy(),
            any::<bool>(),
            -100i32..100000,
            0i32..4096,
            proptest::option::of(ident_strategy()),
            opt_rel_file(),
            proptest::option::of(bh_data_strategy()),
            proptest::option::of(prop::collection::vec(ident_strategy(), 0..3)),
        ),
    );
    let units = (
        units_strategy(version),
        prop::collection::vec(
            (opt_ident(), units_strategy(version)).prop_map(|(name, units)| DataUnit { name, units }),
            0..2,
        ),
    );

    (header, props, units).prop_map(
        move |(
            (datatype, id, display_name, source, position, transform, proj4, visible),
            (
                (dem, header_string, color_mode, color_interp, filter, bbox),
                (source_type, read_only, map_scale, map_size, imagery, image_folder, bh_data, hide),
            ),
            (units, data_units),
        )| {
            let mut rs = RecordSet::new(datatype);
            rs.id = id;
            rs.display_name = display_name;
            rs.source = source;
            rs.position = position;
            rs.transform = transform;
            rs.proj4 = proj4;
            rs.visible = visible;

            let p = &mut rs.properties;
            p.dem = dem;
            p.header_string = header_string;
            p.filter = filter;
            p.bbox = bbox.map(|(a, b, c, d)| [a, b, c, d]);
            p.source_type = source_type;
            p.read_only = read_only;
            p.map_scale = map_scale;
            p.map_size = map_size;
            if let Some(imagery) = imagery {
                p.imagery_source_type = imagery;
            }
            p.image_folder = image_folder;
            p.bh_data = bh_data;
            p.hide_sublayers = hide;

            if older {
                p.color_mode = Some(color_mode);
                p.color_interp = color_interp;
                p.units = units;
            } else {
                rs.units = units;
                rs.data_units = data_units;
            }
            rs
        },
    )
}

fn project_strategy() -> impl Strategy<Value = Project> {
    prop_oneof![
        Just(SchemaVersion::V1_0),
        Just(SchemaVersion::V1_1),
        Just(SchemaVersion::V2_0),
    ]
    .prop_flat_map(|version| {
        (
            opt_ident(),
            proptest::option::of(point_strategy()),
            prop::collection::vec(finite_f64(), 0..3),
            opt_ident(),
            proptest::option::of(finite_f64()),
            prop::collection::vec(point_strategy(), 0..2),
            prop::collection::vec(recordset_strategy(version), 0..4),
        )
            .prop_map(
                move |(name, origin, scales, default_proj, grid_scale, cameras, recordsets)| {
                    let mut project = Project::new(version);
                    project.name = name;
                    project.origin = origin;
                    project.scales = scales;
                    project.default_proj = default_proj;
                    project.grid_scale = grid_scale;
                    project.cameras = cameras;
                    project.recordsets = recordsets;
                    project
                },
            )
    })
}

fn path_component() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => ident_strategy(),
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn channel_strategy() -> impl Strategy<Value = f64> {
    (0u32..=1000).prop_map(|x| x as f64 / 1000.0)
}

/// Channels as they appear in hand-written files: normalized floats,
/// 0-255 integers, and the occasional fractional value above 1.
fn raw_channel_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        channel_strategy(),
        (0u32..=255).prop_map(f64::from),
        (0u32..=2600).prop_map(|x| x as f64 / 10.0),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn encode_decode_roundtrip(project in project_strategy()) {
        let encoded = encode_project(&project).unwrap();
        let decoded = decode_project(&encoded).unwrap();
        prop_assert_eq!(decoded, project);
    }

    #[test]
    fn reencode_is_fixed_point(project in project_strategy()) {
        let first = decode_project_value(&encode_project_value(&project).unwrap()).unwrap();
        let second = decode_project_value(&encode_project_value(&first).unwrap()).unwrap();
        prop_assert_eq!(second, first);
    }

    #[test]
    fn upgrade_keeps_encodable(project in project_strategy()) {
        let mut upgraded = project.clone();
        upgraded.upgrade_to(SchemaVersion::LATEST).unwrap();
        let decoded = decode_project(encode_project(&upgraded).unwrap()).unwrap();
        prop_assert_eq!(decoded.version, SchemaVersion::LATEST);
        prop_assert_eq!(decoded.recordsets.len(), project.recordsets.len());
        prop_assert_eq!(decoded, upgraded);
    }

    #[test]
    fn absolute_is_normalized_join(
        base in prop::collection::vec(ident_strategy(), 0..4),
        reference in prop::collection::vec(path_component(), 1..5),
    ) {
        let base = PathBuf::from(format!("/{}", base.join("/")));
        let reference = reference.join("/");

        let mut project = Project::new(SchemaVersion::V2_0);
        let mut rs = RecordSet::new(RecordSetDataType::Vector);
        rs.source = Some(reference.clone());
        project.recordsets.push(rs);
        project.set_base_path(&base);

        prop_assert_eq!(
            project.recordsets[0].source_path(),
            Some(normalize(&base.join(&reference)))
        );
    }

    #[test]
    fn absent_reference_stays_absent(base in "[a-z/]{1,20}") {
        let mut project = Project::new(SchemaVersion::V1_0);
        project.recordsets.push(RecordSet::new(RecordSetDataType::Raster));
        project.set_base_path(Path::new(&base));
        prop_assert_eq!(project.recordsets[0].source_path(), None);
        prop_assert!(project.resolved_references().is_empty());
    }

    #[test]
    fn color_forms_decode_alike(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let decode_color = |color: Value| {
            let doc = json!({"recordsets": [{
                "datatype": "Point",
                "properties": {"units": {"u": {"color": color}}}
            }]});
            decode_project_value(&doc).unwrap().recordsets[0].properties.units["u"].color.unwrap()
        };
        // An integer triple reads as normalized when no channel exceeds 1.
        prop_assume!(r > 1 || g > 1 || b > 1);
        let from_ints = decode_color(json!([r, g, b]));
        let from_floats = decode_color(json!([
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0
        ]));
        prop_assert_eq!(from_ints, from_floats);
        prop_assert_eq!(from_ints.to_rgba8(), [r, g, b, 255]);
    }

    #[test]
    fn raw_color_is_rejected_or_stable(
        channels in prop::collection::vec(raw_channel_strategy(), 3..=4),
    ) {
        let doc = json!({"recordsets": [{
            "datatype": "BoreHole",
            "properties": {"bh-data": {"legend": {"sand": channels}}}
        }]});
        match decode_project_value(&doc) {
            Ok(first) => {
                let second = decode_project(encode_project(&first).unwrap()).unwrap();
                prop_assert_eq!(second, first);
            }
            Err(err) => {
                let rejected = matches!(err, DecodeError::ValueOutOfRange { .. });
                prop_assert!(rejected, "unexpected error: {}", err);
            }
        }
    }

    #[test]
    fn normalized_color_is_stable(r in channel_strategy(), g in channel_strategy(), b in channel_strategy()) {
        let doc = json!({"recordsets": [{
            "datatype": "Point",
            "properties": {"units": {"u": {"color": [r, g, b]}}}
        }]});
        let first = decode_project_value(&doc).unwrap();
        let second = decode_project(encode_project(&first).unwrap()).unwrap();
        prop_assert_eq!(second, first);
    }
}
