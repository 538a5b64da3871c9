//! BSON value conversion helpers shared by the formatters
//!
//! [`JsonConverter`] maps BSON onto plain JSON: ObjectIds and dates become
//! strings, Int64 stays numeric, binary becomes base64. The free functions
//! cover the bits the shell and table formatters need.

use mongodb::bson::{Binary, Bson, DateTime, Document, spec::BinarySubtype};
use serde_json::Value as JsonValue;

/// Converts BSON to simplified (non-extended) JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl JsonConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert a BSON value to a JSON value
    pub fn convert(&self, value: &Bson) -> JsonValue {
        match value {
            Bson::String(s) => JsonValue::String(s.clone()),
            Bson::Int32(n) => JsonValue::Number((*n).into()),
            Bson::Int64(n) => JsonValue::Number((*n).into()),
            Bson::Double(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Bson::Boolean(b) => JsonValue::Bool(*b),
            Bson::Null | Bson::Undefined => JsonValue::Null,
            Bson::ObjectId(oid) => JsonValue::String(oid.to_string()),
            Bson::DateTime(dt) => JsonValue::String(datetime_to_iso_string(dt)),
            Bson::Decimal128(d) => {
                let s = d.to_string();
                s.parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(JsonValue::Number)
                    .unwrap_or(JsonValue::String(s))
            }
            Bson::Array(arr) => JsonValue::Array(arr.iter().map(|v| self.convert(v)).collect()),
            Bson::Document(doc) => self.convert_document(doc),
            Bson::Binary(bin) => JsonValue::String(binary_to_base64(bin)),
            Bson::RegularExpression(regex) => {
                JsonValue::String(format!("/{}/{}", regex.pattern, regex.options))
            }
            Bson::Timestamp(ts) => {
                let millis = (ts.time as i64) * 1000 + (ts.increment as i64);
                JsonValue::Number(millis.into())
            }
            Bson::MinKey => JsonValue::String("MinKey".to_string()),
            Bson::MaxKey => JsonValue::String("MaxKey".to_string()),
            _ => JsonValue::String(format!("{:?}", value)),
        }
    }

    /// Convert a document to a JSON object, preserving key order
    pub fn convert_document(&self, doc: &Document) -> JsonValue {
        let map = doc
            .iter()
            .map(|(key, value)| (key.clone(), self.convert(value)))
            .collect::<serde_json::Map<_, _>>();
        JsonValue::Object(map)
    }
}

/// Convert DateTime to ISO 8601 string, falling back to epoch millis
pub fn datetime_to_iso_string(dt: &DateTime) -> String {
    dt.try_to_rfc3339_string()
        .unwrap_or_else(|_| format!("{}", dt.timestamp_millis()))
}

pub fn binary_to_hex(bin: &Binary) -> String {
    hex::encode(&bin.bytes)
}

pub fn binary_to_base64(bin: &Binary) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(&bin.bytes)
}

/// Numeric representation of a binary subtype
pub fn binary_subtype_to_u8(subtype: BinarySubtype) -> u8 {
    match subtype {
        BinarySubtype::Generic => 0,
        BinarySubtype::Function => 1,
        BinarySubtype::BinaryOld => 2,
        BinarySubtype::UuidOld => 3,
        BinarySubtype::Uuid => 4,
        BinarySubtype::Md5 => 5,
        BinarySubtype::Encrypted => 6,
        BinarySubtype::Column => 7,
        BinarySubtype::Sensitive => 8,
        BinarySubtype::UserDefined(n) => n,
        _ => 0,
    }
}

/// Whole doubles print without a fractional part
pub fn format_double_smart(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e10 {
        format!("{:.0}", f)
    } else {
        format!("{}", f)
    }
}
