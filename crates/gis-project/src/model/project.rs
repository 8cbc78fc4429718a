//! Project root.
//!
//! A project owns its recordsets by value; nothing in the tree is shared.

use std::path::{Path, PathBuf};

use crate::error::ValidationError;
use crate::model::{GeoPoint, RecordSet, RecordSetDataType, SchemaVersion, Units, VersionedField};

/// The root of a decoded project descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Generation the tree was decoded from and will be encoded as.
    pub version: SchemaVersion,
    pub name: Option<String>,
    pub origin: Option<GeoPoint>,
    pub scales: Vec<f64>,
    pub default_proj: Option<String>,
    pub grid_scale: Option<f64>,
    /// Saved camera positions.
    pub cameras: Vec<GeoPoint>,
    /// Layers in document order. May be empty.
    pub recordsets: Vec<RecordSet>,
    pub(crate) base_path: Option<PathBuf>,
}

impl Project {
    /// Creates an empty project of the given generation.
    pub fn new(version: SchemaVersion) -> Self {
        Self {
            version,
            name: None,
            origin: None,
            scales: Vec::new(),
            default_proj: None,
            grid_scale: None,
            cameras: Vec::new(),
            recordsets: Vec::new(),
            base_path: None,
        }
    }

    /// Base path assigned by the last `set_base_path`, if any.
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Assigns `path` as the resolution context of every node in the tree.
    ///
    /// See [`crate::resolve::set_base_path`].
    pub fn set_base_path(&mut self, path: impl Into<PathBuf>) {
        crate::resolve::set_base_path(self, path);
    }

    /// First recordset with the given id.
    pub fn recordset(&self, id: &str) -> Option<&RecordSet> {
        self.recordsets.iter().find(|rs| rs.id.as_deref() == Some(id))
    }

    /// Mutable access to the first recordset with the given id.
    pub fn recordset_mut(&mut self, id: &str) -> Option<&mut RecordSet> {
        self.recordsets
            .iter_mut()
            .find(|rs| rs.id.as_deref() == Some(id))
    }

    /// Recordsets of one datatype, in document order.
    pub fn recordsets_of(&self, datatype: RecordSetDataType) -> impl Iterator<Item = &RecordSet> {
        self.recordsets.iter().filter(move |rs| rs.datatype == datatype)
    }

    /// Migrates the tree to a newer generation in place.
    ///
    /// Fields the target generation cannot carry are dropped; units move to
    /// where the target generation keeps them. The base-path context is
    /// preserved. Moving to an older generation is refused.
    pub fn upgrade_to(&mut self, target: SchemaVersion) -> Result<(), ValidationError> {
        if target < self.version {
            return Err(ValidationError::Downgrade {
                from: self.version,
                to: target,
            });
        }
        if target == self.version {
            return Ok(());
        }
        tracing::debug!(from = %self.version, to = %target, "upgrading project");

        for rs in &mut self.recordsets {
            if !target.supports(VersionedField::UnitColor) {
                for unit in rs.properties.units.values_mut() {
                    unit.color = None;
                    unit.transform = None;
                    unit.label = None;
                }
            }
            if !target.supports(VersionedField::PropertiesUnits) {
                rs.properties.color_mode = None;
                rs.properties.color_interp = None;
                let moved: Units = std::mem::take(&mut rs.properties.units);
                rs.units.extend(moved);
            }
        }
        self.version = target;
        Ok(())
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(SchemaVersion::LATEST)
    }
}
