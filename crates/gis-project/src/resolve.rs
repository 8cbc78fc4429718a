//! Base-path context for resource references.
//!
//! A decoded tree has no notion of where it came from. The host that read
//! the descriptor calls [`set_base_path`] once, and from then on every node
//! holding a relative reference resolves it against that directory. Nothing
//! is cached: absolute paths are computed from the stored slot on every call,
//! so a second `set_base_path` takes effect everywhere at once.

use std::path::{Path, PathBuf};

use crate::codec::primitives::{field_path, index_path};
use crate::model::{BoreholeData, Project, Properties, RecordSet, Unit, Units};
use crate::util::path::resolve_reference;

/// A node that resolves relative references against a base path.
pub trait Resolvable {
    /// Base path assigned by the last [`set_base_path`], if any.
    fn base_path(&self) -> Option<&Path>;

    /// Resolves `reference` against this node's base path.
    ///
    /// Returns `None` when `reference` is absent or empty.
    fn absolute(&self, reference: Option<&str>) -> Option<PathBuf> {
        resolve_reference(self.base_path(), reference)
    }
}

impl Resolvable for Project {
    fn base_path(&self) -> Option<&Path> {
        Project::base_path(self)
    }
}

macro_rules! resolvable {
    ($($ty:ty),*) => {
        $(impl Resolvable for $ty {
            fn base_path(&self) -> Option<&Path> {
                <$ty>::base_path(self)
            }
        })*
    };
}

resolvable!(RecordSet, Properties, BoreholeData, Unit);

/// Assigns `path` to the context slot of every node in the tree.
///
/// Visits the project, then for each recordset: the recordset, its
/// properties, its borehole data, the units under properties, the units on
/// the recordset, and the units of every data unit.
pub fn set_base_path(project: &mut Project, path: impl Into<PathBuf>) {
    let path = path.into();
    let mut slots = 0usize;
    for_each_slot(project, |slot| {
        *slot = Some(path.clone());
        slots += 1;
    });
    tracing::debug!(base = %path.display(), slots, "set base path");
}

/// Calls `f` on every context slot, in cascade order.
fn for_each_slot(project: &mut Project, mut f: impl FnMut(&mut Option<PathBuf>)) {
    f(&mut project.base_path);
    for rs in &mut project.recordsets {
        f(&mut rs.base_path);
        f(&mut rs.properties.base_path);
        if let Some(bh) = &mut rs.properties.bh_data {
            f(&mut bh.base_path);
        }
        let data_units = rs.data_units.iter_mut().map(|du| &mut du.units);
        for units in [&mut rs.properties.units, &mut rs.units].into_iter().chain(data_units) {
            for unit in units.values_mut() {
                f(&mut unit.base_path);
            }
        }
    }
}

/// One resource reference of a tree, resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// JSON path of the node holding the reference.
    pub owner: String,
    /// Wire name of the reference field.
    pub field: &'static str,
    /// Absolute location.
    pub path: PathBuf,
}

/// Lists every non-empty reference in the tree, in cascade order.
pub fn resolved_references(project: &Project) -> Vec<ResolvedReference> {
    let mut out = Vec::new();
    let mut push = |owner: &str, field: &'static str, path: Option<PathBuf>| {
        if let Some(path) = path {
            out.push(ResolvedReference {
                owner: owner.to_string(),
                field,
                path,
            });
        }
    };

    for (i, rs) in project.recordsets.iter().enumerate() {
        let rs_path = index_path("recordsets", i);
        push(&rs_path, "source", rs.source_path());

        let props_path = field_path(&rs_path, "properties");
        push(&props_path, "dem", rs.properties.dem_path());
        push(&props_path, "image_folder", rs.properties.image_folder_path());
        if let Some(bh) = &rs.properties.bh_data {
            push(&field_path(&props_path, "bh-data"), "data-source", bh.data_source_path());
        }

        let mut unit_maps: Vec<(String, &Units)> = vec![
            (field_path(&props_path, "units"), &rs.properties.units),
            (field_path(&rs_path, "units"), &rs.units),
        ];
        for (j, du) in rs.data_units.iter().enumerate() {
            let du_path = index_path(&field_path(&rs_path, "data_units"), j);
            unit_maps.push((field_path(&du_path, "units"), &du.units));
        }
        for (map_path, units) in unit_maps {
            for (name, unit) in units {
                push(&field_path(&map_path, name), "texture-image", unit.texture_image_path());
            }
        }
    }
    out
}

impl Project {
    /// Every non-empty resource reference in the tree with its absolute path.
    ///
    /// See [`resolved_references`].
    pub fn resolved_references(&self) -> Vec<ResolvedReference> {
        resolved_references(self)
    }
}
