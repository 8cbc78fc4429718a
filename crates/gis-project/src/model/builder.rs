//! Builder API for ergonomic Project construction.
//!
//! Provides a fluent interface for building projects layer by layer.
//! Units are placed where the project's schema generation keeps them.
//!
//! # Example
//!
//! ```rust
//! use gis_project::model::builder::ProjectBuilder;
//! use gis_project::{RecordSetDataType, SchemaVersion, Shape, SourceType};
//!
//! let project = ProjectBuilder::new(SchemaVersion::V2_0)
//!     .name("Quarry survey")
//!     .default_proj("EPSG:27700")
//!     .recordset(RecordSetDataType::Raster, |rs| rs
//!         .id("dem")
//!         .source("terrain/dem.tif")
//!         .properties(|p| p.source_type(SourceType::File).read_only(true))
//!     )
//!     .recordset(RecordSetDataType::Point, |rs| rs
//!         .id("wells")
//!         .source("wells.geojson")
//!         .unit("well", |u| u.shape(Shape::Cylinder).texture_image("tex/well.png"))
//!     )
//!     .build();
//!
//! assert_eq!(project.recordsets.len(), 2);
//! assert!(project.recordsets[1].units.contains_key("well"));
//! ```

use serde_json::{Map, Value};

use crate::model::{
    BoreholeData, Color, ColorMode, DataUnit, GeoPoint, Project, Properties, RecordSet,
    RecordSetDataType, SchemaVersion, Shape, SourceType, Transform, Unit, Units, VersionedField,
};

/// Builder for constructing a Project with recordsets.
#[derive(Debug, Clone)]
pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    /// Creates a new ProjectBuilder for the given schema generation.
    pub fn new(version: SchemaVersion) -> Self {
        Self {
            project: Project::new(version),
        }
    }

    /// Sets the project name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.project.name = Some(name.into());
        self
    }

    /// Sets the spatial origin.
    pub fn origin(mut self, origin: GeoPoint) -> Self {
        self.project.origin = Some(origin);
        self
    }

    /// Adds a scale factor.
    pub fn scale(mut self, scale: f64) -> Self {
        self.project.scales.push(scale);
        self
    }

    /// Sets the default projection string.
    pub fn default_proj(mut self, proj: impl Into<String>) -> Self {
        self.project.default_proj = Some(proj.into());
        self
    }

    /// Sets the grid scale.
    pub fn grid_scale(mut self, grid_scale: f64) -> Self {
        self.project.grid_scale = Some(grid_scale);
        self
    }

    /// Adds a saved camera position.
    pub fn camera(mut self, camera: GeoPoint) -> Self {
        self.project.cameras.push(camera);
        self
    }

    /// Adds a recordset using a builder function.
    pub fn recordset<F>(mut self, datatype: RecordSetDataType, f: F) -> Self
    where
        F: FnOnce(RecordSetBuilder) -> RecordSetBuilder,
    {
        let builder = f(RecordSetBuilder::new(self.project.version, datatype));
        self.project.recordsets.push(builder.build());
        self
    }

    /// Adds an already built recordset.
    pub fn push_recordset(mut self, recordset: RecordSet) -> Self {
        self.project.recordsets.push(recordset);
        self
    }

    /// Returns the number of recordsets added so far.
    pub fn recordset_count(&self) -> usize {
        self.project.recordsets.len()
    }

    /// Builds the final Project.
    pub fn build(self) -> Project {
        self.project
    }
}

/// Builder for one recordset.
#[derive(Debug, Clone)]
pub struct RecordSetBuilder {
    version: SchemaVersion,
    recordset: RecordSet,
}

impl RecordSetBuilder {
    /// Creates a builder for a recordset of the given generation and datatype.
    ///
    /// Older generations get the required-with-default color mode.
    pub fn new(version: SchemaVersion, datatype: RecordSetDataType) -> Self {
        let mut recordset = RecordSet::new(datatype);
        if version.supports(VersionedField::ColorMode) {
            recordset.properties.color_mode = Some(ColorMode::default());
        }
        Self { version, recordset }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.recordset.id = Some(id.into());
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.recordset.display_name = Some(name.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.recordset.source = Some(source.into());
        self
    }

    pub fn position(mut self, position: GeoPoint) -> Self {
        self.recordset.position = Some(position);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.recordset.transform = Some(transform);
        self
    }

    pub fn proj4(mut self, proj4: impl Into<String>) -> Self {
        self.recordset.proj4 = Some(proj4.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.recordset.visible = visible;
        self
    }

    /// Configures the properties block.
    pub fn properties<F>(mut self, f: F) -> Self
    where
        F: FnOnce(PropertiesBuilder) -> PropertiesBuilder,
    {
        let properties = std::mem::take(&mut self.recordset.properties);
        self.recordset.properties = f(PropertiesBuilder { properties }).properties;
        self
    }

    /// Adds a unit of symbology, under `properties` or on the recordset
    /// depending on the generation.
    pub fn unit<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(UnitBuilder) -> UnitBuilder,
    {
        let unit = f(UnitBuilder::default()).build();
        self.units_mut().insert(name.into(), unit);
        self
    }

    /// Adds a named data unit (newest generation).
    pub fn data_unit(mut self, name: impl Into<String>, units: Units) -> Self {
        self.recordset.data_units.push(DataUnit {
            name: Some(name.into()),
            units,
        });
        self
    }

    fn units_mut(&mut self) -> &mut Units {
        if self.version.supports(VersionedField::PropertiesUnits) {
            &mut self.recordset.properties.units
        } else {
            &mut self.recordset.units
        }
    }

    /// Builds the final RecordSet.
    pub fn build(self) -> RecordSet {
        self.recordset
    }
}

/// Builder for a properties block.
#[derive(Debug, Clone, Default)]
pub struct PropertiesBuilder {
    properties: Properties,
}

impl PropertiesBuilder {
    pub fn dem(mut self, dem: impl Into<String>) -> Self {
        self.properties.dem = Some(dem.into());
        self
    }

    pub fn header_string(mut self, header: impl Into<String>) -> Self {
        self.properties.header_string = Some(header.into());
        self
    }

    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.properties.color_mode = Some(mode);
        self
    }

    pub fn color_interp(mut self, interp: Map<String, Value>) -> Self {
        self.properties.color_interp = Some(interp);
        self
    }

    /// Appends a filter stage.
    pub fn filter(mut self, stage: Map<String, Value>) -> Self {
        self.properties.filter.push(stage);
        self
    }

    pub fn bbox(mut self, bbox: [f64; 4]) -> Self {
        self.properties.bbox = Some(bbox);
        self
    }

    pub fn source_type(mut self, source_type: SourceType) -> Self {
        self.properties.source_type = source_type;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.properties.read_only = read_only;
        self
    }

    pub fn map_scale(mut self, map_scale: i32) -> Self {
        self.properties.map_scale = map_scale;
        self
    }

    pub fn map_size(mut self, map_size: i32) -> Self {
        self.properties.map_size = map_size;
        self
    }

    pub fn image_folder(mut self, folder: impl Into<String>) -> Self {
        self.properties.image_folder = Some(folder.into());
        self
    }

    pub fn bh_data(mut self, bh_data: BoreholeData) -> Self {
        self.properties.bh_data = Some(bh_data);
        self
    }

    pub fn hide_sublayer(mut self, name: impl Into<String>) -> Self {
        self.properties
            .hide_sublayers
            .get_or_insert_with(Vec::new)
            .push(name.into());
        self
    }
}

/// Builder for a unit of symbology.
#[derive(Debug, Clone, Default)]
pub struct UnitBuilder {
    unit: Unit,
}

impl UnitBuilder {
    pub fn color(mut self, color: Color) -> Self {
        self.unit.color = Some(color);
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.unit.shape = Some(shape);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.unit.transform = Some(transform);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.unit.label = Some(label.into());
        self
    }

    pub fn texture_image(mut self, texture: impl Into<String>) -> Self {
        self.unit.texture_image = Some(texture.into());
        self
    }

    /// Builds the final Unit.
    pub fn build(self) -> Unit {
        self.unit
    }
}
