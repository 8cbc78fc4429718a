//! JSON encoding/decoding for project descriptors.
//!
//! Decoding works on `serde_json` values and dispatches on the schema
//! generation; encoding writes the layout of the tree's own generation.

pub mod list;
pub mod primitives;
pub mod project;
pub mod recordset;
pub mod value;

pub use list::{decode_list, encode_list, ListShape};
pub use primitives::{ObjectReader, ObjectWriter};
pub use project::{
    decode_project, decode_project_value, decode_project_value_with_options,
    decode_project_with_options, encode_project, encode_project_value,
    encode_project_with_options, DecodeOptions, EncodeOptions,
};
pub use recordset::{decode_recordset, encode_recordset};
pub use value::{decode_color, decode_legend, encode_color, encode_legend};
