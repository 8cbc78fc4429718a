//! Value converters between compact JSON shapes and typed values.
//!
//! Each converter is a decode/encode pair. Decoding is strict about arity
//! and token kinds; encoding always writes the canonical shape.

use serde_json::{Map, Value};

use crate::codec::primitives::{expect_array, expect_f64, expect_symbol, index_path, number, unexpected, ObjectReader, ObjectWriter};
use crate::error::DecodeError;
use crate::model::{Color, GeoPoint, Legend, Quaternion, Transform, Vector3};

// =============================================================================
// DECODING
// =============================================================================

/// Reads an array of exactly `N` numbers.
fn decode_fixed<const N: usize>(
    value: &Value,
    path: &str,
    expected: &'static str,
) -> Result<[f64; N], DecodeError> {
    let items = expect_array(value, path)?;
    if items.len() != N {
        return Err(DecodeError::ArityMismatch {
            path: path.to_string(),
            expected,
            actual: items.len(),
        });
    }
    let mut out = [0.0; N];
    for (i, item) in items.iter().enumerate() {
        out[i] = expect_f64(item, &index_path(path, i))?;
    }
    Ok(out)
}

/// Reads an array of numbers whose length must be one of `lens`.
fn decode_numbers(
    value: &Value,
    path: &str,
    lens: &[usize],
    expected: &'static str,
) -> Result<Vec<f64>, DecodeError> {
    let items = expect_array(value, path)?;
    if !lens.contains(&items.len()) {
        return Err(DecodeError::ArityMismatch {
            path: path.to_string(),
            expected,
            actual: items.len(),
        });
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| expect_f64(item, &index_path(path, i)))
        .collect()
}

/// `[x, y, z]`.
pub fn decode_vector3(value: &Value, path: &str) -> Result<Vector3, DecodeError> {
    let [x, y, z] = decode_fixed::<3>(value, path, "3")?;
    Ok(Vector3::new(x, y, z))
}

/// `[x, y, z, w]`.
pub fn decode_quaternion(value: &Value, path: &str) -> Result<Quaternion, DecodeError> {
    let [x, y, z, w] = decode_fixed::<4>(value, path, "4")?;
    Ok(Quaternion::new(x, y, z, w))
}

/// `[min_x, min_y, max_x, max_y]`.
pub fn decode_bbox(value: &Value, path: &str) -> Result<[f64; 4], DecodeError> {
    decode_fixed::<4>(value, path, "4")
}

/// `[r, g, b]` or `[r, g, b, a]`.
///
/// If every channel is within `[0, 1]` the channels are taken as normalized
/// floats; otherwise as 0-255 integers and divided by 255. `[255, 0, 0]`
/// and `[1.0, 0.0, 0.0]` therefore decode to the same red. In the 0-255
/// form every channel must be integral.
pub fn decode_color(value: &Value, path: &str) -> Result<Color, DecodeError> {
    let channels = decode_numbers(value, path, &[3, 4], "3 or 4")?;

    if let Some(&neg) = channels.iter().find(|c| **c < 0.0) {
        return Err(DecodeError::ValueOutOfRange {
            path: path.to_string(),
            value: neg,
            reason: "negative color channel",
        });
    }

    let normalized = channels.iter().all(|c| *c <= 1.0);
    let scale = if normalized {
        1.0
    } else {
        if let Some(&big) = channels.iter().find(|c| **c > 255.0) {
            return Err(DecodeError::ValueOutOfRange {
                path: path.to_string(),
                value: big,
                reason: "color channel above 255",
            });
        }
        if let Some(&frac) = channels.iter().find(|c| c.fract() != 0.0) {
            return Err(DecodeError::ValueOutOfRange {
                path: path.to_string(),
                value: frac,
                reason: "non-integer color channel",
            });
        }
        255.0
    };

    let ch = |i: usize| (channels[i] / scale) as f32;
    let alpha = if channels.len() == 4 { ch(3) } else { 1.0 };
    Ok(Color::from_rgba(ch(0), ch(1), ch(2), alpha))
}

/// Object of name to color.
pub fn decode_legend(value: &Value, path: &str) -> Result<Legend, DecodeError> {
    let obj = ObjectReader::new(value, path)?;
    let mut legend = Legend::new();
    for (name, color) in obj.entries() {
        legend.insert(name.clone(), decode_color(color, &obj.field_path(name))?);
    }
    Ok(legend)
}

/// `[x, y]`, `[x, y, z]` or `{"type": "Point", "coordinates": [...]}`.
pub fn decode_point(value: &Value, path: &str) -> Result<GeoPoint, DecodeError> {
    match value {
        Value::Array(_) => point_from_coords(value, path),
        Value::Object(_) => {
            let obj = ObjectReader::new(value, path)?;
            if let Some(kind) = obj.get("type") {
                expect_symbol(kind, &obj.field_path("type"), &["Point"], |s| (s == "Point").then_some(()))?;
            }
            let coords = obj.required("coordinates")?;
            point_from_coords(coords, &obj.field_path("coordinates"))
        }
        other => Err(unexpected(path, "array or object", other)),
    }
}

fn point_from_coords(value: &Value, path: &str) -> Result<GeoPoint, DecodeError> {
    let coords = decode_numbers(value, path, &[2, 3], "2 or 3")?;
    Ok(GeoPoint {
        x: coords[0],
        y: coords[1],
        z: coords.get(2).copied(),
    })
}

/// `{"translate": [..3], "rotate": [..4], "scale": [..3]}`, all required.
pub fn decode_transform(value: &Value, path: &str) -> Result<Transform, DecodeError> {
    let obj = ObjectReader::new(value, path)?;
    let translate = decode_vector3(obj.required("translate")?, &obj.field_path("translate"))?;
    let rotate = decode_quaternion(obj.required("rotate")?, &obj.field_path("rotate"))?;
    let scale = decode_vector3(obj.required("scale")?, &obj.field_path("scale"))?;
    obj.trace_unknown(&["translate", "rotate", "scale"]);
    Ok(Transform {
        translate,
        rotate,
        scale,
    })
}

// =============================================================================
// ENCODING
// =============================================================================

fn numbers(values: &[f64]) -> Value {
    Value::Array(values.iter().copied().map(number).collect())
}

pub fn encode_vector3(v: Vector3) -> Value {
    numbers(&v.to_array())
}

pub fn encode_quaternion(q: Quaternion) -> Value {
    numbers(&q.to_array())
}

pub fn encode_bbox(bbox: &[f64; 4]) -> Value {
    numbers(bbox)
}

/// Always the 0-255 integer form with alpha: `[r, g, b, a]`.
pub fn encode_color(color: Color) -> Value {
    Value::Array(color.to_rgba8().iter().map(|c| Value::from(*c)).collect())
}

pub fn encode_legend(legend: &Legend) -> Value {
    let map: Map<String, Value> = legend
        .iter()
        .map(|(name, color)| (name.clone(), encode_color(*color)))
        .collect();
    Value::Object(map)
}

/// Always the GeoJSON point object.
pub fn encode_point(point: &GeoPoint) -> Value {
    let mut w = ObjectWriter::new();
    w.put("type", "Point");
    w.put("coordinates", numbers(&point.coordinates()));
    w.into_value()
}

pub fn encode_transform(transform: &Transform) -> Value {
    let mut w = ObjectWriter::new();
    w.put("translate", encode_vector3(transform.translate));
    w.put("rotate", encode_quaternion(transform.rotate));
    w.put("scale", encode_vector3(transform.scale));
    w.into_value()
}
