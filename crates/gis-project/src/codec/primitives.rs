//! Primitive decoding/encoding over JSON objects.
//!
//! Every read goes through an [`ObjectReader`] that knows its own JSON path,
//! so each error names the node that caused it.

use serde_json::{Map, Number, Value};

use crate::error::DecodeError;
use crate::model::Symbol;

// =============================================================================
// DECODING
// =============================================================================

/// Name of a JSON token kind, as used in error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Joins an object path and a key.
pub fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Joins an array path and an index.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Builds the error for a token of the wrong kind.
pub fn unexpected(path: impl Into<String>, expected: &'static str, found: &Value) -> DecodeError {
    DecodeError::UnexpectedType {
        path: path.into(),
        expected,
        found: kind_name(found),
    }
}

/// Reads a number.
pub fn expect_f64(value: &Value, path: &str) -> Result<f64, DecodeError> {
    value.as_f64().ok_or_else(|| unexpected(path, "number", value))
}

/// Reads a string.
pub fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, DecodeError> {
    value.as_str().ok_or_else(|| unexpected(path, "string", value))
}

/// Reads an array.
pub fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, DecodeError> {
    value.as_array().ok_or_else(|| unexpected(path, "array", value))
}

/// Reads a symbolic value from a string token.
///
/// `allowed` is reported on failure and should list what `lookup` accepts.
pub fn expect_symbol<S>(
    value: &Value,
    path: &str,
    allowed: &'static [&'static str],
    lookup: impl Fn(&str) -> Option<S>,
) -> Result<S, DecodeError> {
    let name = expect_str(value, path)?;
    lookup(name).ok_or_else(|| DecodeError::UnknownEnumValue {
        path: path.to_string(),
        value: name.to_string(),
        allowed,
    })
}

/// Read access to one JSON object with path-aware errors.
///
/// `null` members are treated as absent by every optional read.
#[derive(Debug, Clone)]
pub struct ObjectReader<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> ObjectReader<'a> {
    /// Wraps `value`, which must be an object.
    pub fn new(value: &'a Value, path: impl Into<String>) -> Result<Self, DecodeError> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(unexpected(path, "object", other)),
        }
    }

    /// JSON path of this object (empty for the document root).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON path of a member of this object.
    pub fn field_path(&self, key: &str) -> String {
        field_path(&self.path, key)
    }

    /// Member value, `None` if missing or `null`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Raw member value, `null` included.
    pub fn get_raw(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    /// Member that must be present. `null` is returned as-is so the caller
    /// can report it as a wrongly-typed value.
    pub fn required(&self, key: &'static str) -> Result<&'a Value, DecodeError> {
        self.map.get(key).ok_or_else(|| DecodeError::MissingField {
            path: self.path.clone(),
            field: key,
        })
    }

    /// Optional string.
    pub fn read_str(&self, key: &str) -> Result<Option<String>, DecodeError> {
        self.get(key)
            .map(|v| expect_str(v, &self.field_path(key)).map(str::to_string))
            .transpose()
    }

    /// String that must be present and non-null.
    pub fn read_required_str(&self, key: &'static str) -> Result<String, DecodeError> {
        let value = self.required(key)?;
        Ok(expect_str(value, &self.field_path(key))?.to_string())
    }

    /// String with a default when absent.
    pub fn read_str_or(&self, key: &str, default: &str) -> Result<String, DecodeError> {
        Ok(self.read_str(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Boolean with a default when absent.
    pub fn read_bool_or(&self, key: &str, default: bool) -> Result<bool, DecodeError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(unexpected(self.field_path(key), "bool", other)),
        }
    }

    /// Optional number.
    pub fn read_f64(&self, key: &str) -> Result<Option<f64>, DecodeError> {
        self.get(key)
            .map(|v| expect_f64(v, &self.field_path(key)))
            .transpose()
    }

    /// 32-bit integer with a default when absent.
    ///
    /// Integral floats (`2.0`) are accepted; fractions and values outside
    /// the `i32` range are not.
    pub fn read_i32_or(&self, key: &str, default: i32) -> Result<i32, DecodeError> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        let path = self.field_path(key);
        if let Some(i) = value.as_i64() {
            return i32::try_from(i).map_err(|_| DecodeError::ValueOutOfRange {
                path,
                value: i as f64,
                reason: "not a 32-bit integer",
            });
        }
        let f = expect_f64(value, &path)?;
        if f.fract() != 0.0 || f < i32::MIN as f64 || f > i32::MAX as f64 {
            return Err(DecodeError::ValueOutOfRange {
                path,
                value: f,
                reason: "not a 32-bit integer",
            });
        }
        Ok(f as i32)
    }

    /// Optional symbolic value from the type's full name set.
    pub fn read_enum<S: Symbol>(&self, key: &str) -> Result<Option<S>, DecodeError> {
        self.get(key)
            .map(|v| expect_symbol(v, &self.field_path(key), S::NAMES, S::from_name))
            .transpose()
    }

    /// Symbolic value with a default when absent.
    pub fn read_enum_or<S: Symbol>(&self, key: &str, default: S) -> Result<S, DecodeError> {
        Ok(self.read_enum(key)?.unwrap_or(default))
    }

    /// Optional nested object.
    pub fn read_object(&self, key: &str) -> Result<Option<ObjectReader<'a>>, DecodeError> {
        self.get(key)
            .map(|v| ObjectReader::new(v, self.field_path(key)))
            .transpose()
    }

    /// Nested object that must be present and non-null.
    pub fn read_required_object(&self, key: &'static str) -> Result<ObjectReader<'a>, DecodeError> {
        let value = self.required(key)?;
        ObjectReader::new(value, self.field_path(key))
    }

    /// Optional object kept as raw JSON.
    pub fn read_map(&self, key: &str) -> Result<Option<Map<String, Value>>, DecodeError> {
        Ok(self.read_object(key)?.map(|obj| obj.map.clone()))
    }

    /// Optional array of strings.
    pub fn read_str_list(&self, key: &str) -> Result<Option<Vec<String>>, DecodeError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let path = self.field_path(key);
        expect_array(value, &path)?
            .iter()
            .enumerate()
            .map(|(i, v)| expect_str(v, &index_path(&path, i)).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Array of numbers; absent is empty.
    pub fn read_f64_list(&self, key: &str) -> Result<Vec<f64>, DecodeError> {
        let Some(value) = self.get(key) else {
            return Ok(Vec::new());
        };
        let path = self.field_path(key);
        expect_array(value, &path)?
            .iter()
            .enumerate()
            .map(|(i, v)| expect_f64(v, &index_path(&path, i)))
            .collect()
    }

    /// Array of objects kept as raw JSON; absent is empty.
    pub fn read_map_list(&self, key: &str) -> Result<Vec<Map<String, Value>>, DecodeError> {
        let Some(value) = self.get(key) else {
            return Ok(Vec::new());
        };
        let path = self.field_path(key);
        expect_array(value, &path)?
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Value::Object(map) => Ok(map.clone()),
                other => Err(unexpected(index_path(&path, i), "object", other)),
            })
            .collect()
    }

    /// Members in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + use<'a> {
        self.map.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the object has no members.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Logs members not in `known`. They are ignored, not rejected.
    pub fn trace_unknown(&self, known: &[&str]) {
        for key in self.map.keys().filter(|k| !known.contains(&k.as_str())) {
            tracing::trace!(path = %self.path, key = %key, "ignoring unrecognized key");
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for one JSON object.
///
/// Optional members that are absent are omitted rather than written as `null`.
#[derive(Debug, Clone, Default)]
pub struct ObjectWriter {
    map: Map<String, Value>,
}

impl ObjectWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { map: Map::new() }
    }

    /// Writes a member.
    pub fn put(&mut self, key: &str, value: impl Into<Value>) {
        self.map.insert(key.to_string(), value.into());
    }

    /// Writes a member if present.
    pub fn put_opt<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.put(key, value);
        }
    }

    /// Writes a string member if present. An empty string is written as `""`.
    pub fn put_str(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.put(key, value);
        }
    }

    /// Writes a member unless it equals its default.
    pub fn put_unless_default<V: Into<Value> + PartialEq>(&mut self, key: &str, value: V, default: V) {
        if value != default {
            self.put(key, value);
        }
    }

    /// Writes a symbolic value.
    pub fn put_symbol<S: Symbol>(&mut self, key: &str, value: S) {
        self.put(key, value.name());
    }

    /// Writes an array member unless it is empty.
    pub fn put_array(&mut self, key: &str, values: Vec<Value>) {
        if !values.is_empty() {
            self.put(key, Value::Array(values));
        }
    }

    /// Writes an object member unless it is empty.
    pub fn put_object(&mut self, key: &str, value: Map<String, Value>) {
        if !value.is_empty() {
            self.put(key, Value::Object(value));
        }
    }

    /// Returns true if no members have been written.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the written members.
    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    /// Returns the written object.
    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

/// Encodes an `f64` as a JSON number. Non-finite values become `null`.
pub fn number(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}
