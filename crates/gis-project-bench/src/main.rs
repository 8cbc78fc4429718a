//! Benchmark for project descriptor encoding and decoding.
//!
//! Builds a large synthetic project per schema generation with the builder
//! API and times encode, parse-only and full decode.
//!
//! Usage: `bench-project [RECORDSETS]` (default 20000).

use std::time::{Duration, Instant};

use gis_project::{
    decode_project, decode_project_value, encode_project, encode_project_with_options,
    BoreholeData, Color, EncodeOptions, GeoPoint, Project, ProjectBuilder, RecordSetDataType,
    SchemaVersion, Shape, SourceType, Transform, Vector3,
};
use uuid::Uuid;

const DEFAULT_RECORDSETS: usize = 20_000;
const DECODE_ITERS: u32 = 10;

const DATATYPES: [RecordSetDataType; 6] = [
    RecordSetDataType::Raster,
    RecordSetDataType::Vector,
    RecordSetDataType::Point,
    RecordSetDataType::BoreHole,
    RecordSetDataType::PointCloud,
    RecordSetDataType::Mesh,
];

/// Builds a project with `count` recordsets cycling through common datatypes.
fn synthetic_project(version: SchemaVersion, count: usize) -> Project {
    let mut builder = ProjectBuilder::new(version)
        .name("Synthetic survey")
        .origin(GeoPoint::with_z(-1.5, 52.0, 0.0))
        .default_proj("EPSG:27700")
        .scale(1.0)
        .scale(10.0)
        .grid_scale(100.0)
        .camera(GeoPoint::with_z(-1.5, 51.9, 500.0));

    for i in 0..count {
        let datatype = DATATYPES[i % DATATYPES.len()];
        let id = Uuid::new_v4().to_string();
        builder = builder.recordset(datatype, |rs| {
            let rs = rs
                .id(id)
                .display_name(format!("Layer {i}"))
                .source(format!("data/layer_{i}.geojson"))
                .visible(i % 7 != 0)
                .properties(|p| {
                    let p = p
                        .source_type(if i % 3 == 0 { SourceType::Wfs } else { SourceType::File })
                        .bbox([-2.0, 51.0, -1.0, 53.0])
                        .map_scale(1000);
                    if datatype == RecordSetDataType::BoreHole {
                        p.bh_data(borehole_columns(i))
                    } else {
                        p
                    }
                });
            let rs = rs.unit("default", |u| {
                u.shape(Shape::Cylinder)
                    .texture_image(format!("tex/{}.png", i % 16))
            });
            if version == SchemaVersion::V1_0 {
                rs.unit("labelled", |u| {
                    u.color(Color::from_rgba8((i % 256) as u8, 128, 64, 255))
                        .transform(Transform {
                            scale: Vector3::new(2.0, 2.0, 2.0),
                            ..Transform::default()
                        })
                        .label("name")
                })
            } else {
                rs
            }
        });
    }
    builder.build()
}

fn borehole_columns(i: usize) -> BoreholeData {
    let mut bh = BoreholeData::default();
    bh.x_field = Some("X".to_string());
    bh.y_field = Some("Y".to_string());
    bh.z_field = Some("Z".to_string());
    bh.id_field = Some("HOLE_ID".to_string());
    bh.data_source = Some(format!("logs/holes_{i}.csv"));
    bh
}

fn throughput(bytes: usize, time: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / time.as_secs_f64()
}

fn bench_version(version: SchemaVersion, count: usize) {
    println!("\n=== Schema {version} ===");

    let build_start = Instant::now();
    let project = synthetic_project(version, count);
    println!(
        "Built {} recordsets in {:?}",
        project.recordsets.len(),
        build_start.elapsed()
    );

    let encode_start = Instant::now();
    let encoded = encode_project(&project).expect("Failed to encode");
    let encode_time = encode_start.elapsed();
    println!("\nEncode (compact): {} bytes in {:?}", encoded.len(), encode_time);
    println!("  Throughput: {:.2} MB/s", throughput(encoded.len(), encode_time));

    let pretty = encode_project_with_options(&project, EncodeOptions::pretty())
        .expect("Failed to encode pretty");
    println!(
        "Encode (pretty): {} bytes ({:.1}x compact)",
        pretty.len(),
        pretty.len() as f64 / encoded.len() as f64
    );

    // Warmup
    for _ in 0..3 {
        let _ = decode_project(&encoded).expect("Failed to decode");
    }

    let parse_start = Instant::now();
    let mut parsed = None;
    for _ in 0..DECODE_ITERS {
        parsed = Some(serde_json::from_str::<serde_json::Value>(&encoded).expect("Failed to parse"));
    }
    let parse_time = parse_start.elapsed() / DECODE_ITERS;
    let parsed = parsed.expect("at least one iteration");
    println!(
        "\nParse only: {:?} (avg of {} iterations)",
        parse_time, DECODE_ITERS
    );

    let tree_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        let decoded = decode_project_value(&parsed).expect("Failed to decode value");
        assert_eq!(decoded.recordsets.len(), project.recordsets.len());
    }
    let tree_time = tree_start.elapsed() / DECODE_ITERS;
    println!("Tree decode from value: {:?}", tree_time);

    let decode_start = Instant::now();
    let mut decoded = None;
    for _ in 0..DECODE_ITERS {
        decoded = Some(decode_project(&encoded).expect("Failed to decode"));
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;
    let mut decoded = decoded.expect("at least one iteration");
    println!(
        "Full decode: {:?} (avg of {} iterations)",
        decode_time, DECODE_ITERS
    );
    println!("  Throughput: {:.2} MB/s", throughput(encoded.len(), decode_time));
    assert_eq!(decoded, project, "round trip should be lossless");

    let resolve_start = Instant::now();
    decoded.set_base_path("/srv/projects/synthetic");
    let references = decoded.resolved_references();
    println!(
        "\nResolved {} references in {:?}",
        references.len(),
        resolve_start.elapsed()
    );
}

fn main() {
    let count = std::env::args()
        .nth(1)
        .map(|arg| arg.parse().expect("RECORDSETS must be a number"))
        .unwrap_or(DEFAULT_RECORDSETS);

    println!("Benchmarking {count} recordsets per schema version");
    for version in SchemaVersion::ALL {
        bench_version(version, count);
    }
}
