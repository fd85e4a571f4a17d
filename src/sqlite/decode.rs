use base64::Engine;
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteValueRef;
use sqlx::{TypeInfo, Value, ValueRef};
use time::PrimitiveDateTime;

use crate::{Error, Result};

/// Convert a SQLite value to JSON according to its storage class.
///
/// BLOBs become base64 text. Booleans are stored as INTEGER and come back as
/// numbers; map them with [`int_bool`](crate::int_bool).
pub(crate) fn to_json(value: SqliteValueRef) -> Result<JsonValue> {
   if value.is_null() {
      return Ok(JsonValue::Null);
   }

   let owned = value.to_owned();
   let type_name = value.type_info().name().to_string();

   let decoded = match type_name.as_str() {
      "INTEGER" | "NUMERIC" => owned.try_decode::<i64>().ok().map(JsonValue::from),
      "REAL" => owned.try_decode::<f64>().ok().map(JsonValue::from),
      "BOOLEAN" => owned.try_decode::<bool>().ok().map(JsonValue::Bool),
      "DATETIME" => owned
         .try_decode::<PrimitiveDateTime>()
         .map(|dt| dt.to_string())
         .or_else(|_| owned.try_decode::<String>())
         .ok()
         .map(JsonValue::String),
      "BLOB" => owned
         .try_decode::<Vec<u8>>()
         .ok()
         .map(|blob| JsonValue::String(base64_encode(&blob))),
      "NULL" => Some(JsonValue::Null),
      // TEXT, DATE, TIME and declared types SQLite does not know
      _ => match owned.try_decode::<String>() {
         Ok(text) => Some(JsonValue::String(text)),
         Err(_) => return Err(Error::UnsupportedDatatype(type_name)),
      },
   };

   Ok(decoded.unwrap_or(JsonValue::Null))
}

fn base64_encode(data: &[u8]) -> String {
   base64::engine::general_purpose::STANDARD.encode(data)
}
