//! Polymorphic list decoding.
//!
//! Older descriptors let a list field hold `null`, a single object, or an
//! array of objects. All three normalize to an ordered `Vec`. Encoding
//! always writes an array.

use serde_json::Value;

use crate::codec::primitives::{index_path, unexpected};
use crate::error::DecodeError;

/// Which shapes a list field accepts besides an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// `null` or an array.
    ArrayOnly,
    /// `null`, an array, or a single object standing for a one-element list.
    ArrayOrObject,
}

/// Decodes a list field, preserving source order.
///
/// Any element failing to decode fails the whole list. Scalars and strings
/// are rejected with an error naming their token kind.
pub fn decode_list<T, F>(
    value: &Value,
    path: &str,
    shape: ListShape,
    mut decode_item: F,
) -> Result<Vec<T>, DecodeError>
where
    F: FnMut(&Value, String) -> Result<T, DecodeError>,
{
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_item(item, index_path(path, i)))
            .collect(),
        Value::Object(_) if shape == ListShape::ArrayOrObject => {
            Ok(vec![decode_item(value, index_path(path, 0))?])
        }
        other => {
            let expected = match shape {
                ListShape::ArrayOnly => "null or array",
                ListShape::ArrayOrObject => "null, object or array",
            };
            Err(unexpected(path, expected, other))
        }
    }
}

/// Encodes a list as an array.
pub fn encode_list<T>(items: &[T], encode_item: impl Fn(&T) -> Value) -> Value {
    Value::Array(items.iter().map(encode_item).collect())
}
