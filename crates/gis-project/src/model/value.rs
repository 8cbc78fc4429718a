//! Typed values decoded from compact JSON shapes.
//!
//! Values are the leaves of the project tree: vectors, rotations, colors
//! and geographic points.

use std::collections::BTreeMap;

/// A three-component vector (position or scale).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const ONE: Vector3 = Vector3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// An orientation quaternion, stored `x, y, z, w` as on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Translate, rotate, scale. All three parts are required on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vector3,
    pub rotate: Quaternion,
    pub scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vector3::ZERO,
            rotate: Quaternion::IDENTITY,
            scale: Vector3::ONE,
        }
    }
}

/// An RGBA color with channels normalized to `[0, 1]`.
///
/// Channels are kept on the 1/255 grid. The wire form written by the
/// encoder is always the 0-255 integer array, so a color decoded from
/// floats such as `[0.3, 0.3, 0.3]` comes back as `[77, 77, 77, 255]`:
/// the representation changes, the displayed color does not.
///
/// A byte pattern whose channels are all 0 or 1 (`[1, 0, 0, 1]`) is
/// indistinguishable from the normalized form on the wire, so such a color
/// is stored as transparent black.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Builds a color from 0-255 channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let [r, g, b, a] = unambiguous_rgba8([r, g, b, a]);
        Self {
            r: channel_from_u8(r),
            g: channel_from_u8(g),
            b: channel_from_u8(b),
            a: channel_from_u8(a),
        }
    }

    /// Builds a color from normalized channels, snapping them to the 1/255 grid.
    ///
    /// Out-of-range input is clamped.
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_rgba8(
            channel_to_u8(r),
            channel_to_u8(g),
            channel_to_u8(b),
            channel_to_u8(a),
        )
    }

    /// Opaque color from normalized channels.
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::from_rgba(r, g, b, 1.0)
    }

    /// 0-255 channels, `[r, g, b, a]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        unambiguous_rgba8([
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ])
    }
}

fn unambiguous_rgba8(channels: [u8; 4]) -> [u8; 4] {
    if channels.iter().all(|c| *c <= 1) {
        [0; 4]
    } else {
        channels
    }
}

fn channel_from_u8(v: u8) -> f32 {
    v as f32 / 255.0
}

fn channel_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Named colors used for borehole log visualization.
pub type Legend = BTreeMap<String, Color>;

/// A geographic point: `[x, y]`, `[x, y, z]` or a GeoJSON `Point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl GeoPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Coordinates in GeoJSON order.
    pub fn coordinates(&self) -> Vec<f64> {
        let mut coords = vec![self.x, self.y];
        coords.extend(self.z);
        coords
    }
}
