//! Builds a small legacy project, upgrades it, and prints both encodings.

use gis_project::{
    encode_project_with_options, Color, EncodeOptions, GeoPoint, ProjectBuilder,
    RecordSetDataType, SchemaVersion, Shape, SourceType,
};

fn main() {
    let mut project = ProjectBuilder::new(SchemaVersion::V1_0)
        .name("Quarry survey")
        .origin(GeoPoint::with_z(-1.52, 52.41, 0.0))
        .default_proj("EPSG:27700")
        .recordset(RecordSetDataType::Raster, |rs| {
            rs.id("dem")
                .source("terrain/dem.tif")
                .properties(|p| p.read_only(true))
        })
        .recordset(RecordSetDataType::Point, |rs| {
            rs.id("wells")
                .source("wells.geojson")
                .properties(|p| p.source_type(SourceType::Wfs).dem("terrain/dem.tif"))
                .unit("well", |u| {
                    u.shape(Shape::Cylinder)
                        .color(Color::from_rgba8(30, 90, 200, 255))
                        .label("WELL_NAME")
                })
        })
        .build();

    let pretty = EncodeOptions::pretty();
    println!("=== {} ===", project.version);
    println!("{}", encode_project_with_options(&project, pretty).expect("encode legacy"));

    project.upgrade_to(SchemaVersion::LATEST).expect("upgrade");
    println!("\n=== {} ===", project.version);
    println!("{}", encode_project_with_options(&project, pretty).expect("encode upgraded"));

    project.set_base_path("/data/quarry");
    println!("\n=== References ===");
    for r in project.resolved_references() {
        println!("{}.{} -> {}", r.owner, r.field, r.path.display());
    }
}
