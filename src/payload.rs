//! Column extraction for create and update payloads

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{Error, Result};

/// Serialize `payload` into `(column, value)` pairs in field declaration order.
///
/// Fails with a usage error if the payload is not a set of named fields or has
/// none. Fields skipped by serde (e.g. `skip_serializing_if = "Option::is_none"`)
/// are not written; fields serialized as `null` are written as NULL.
pub(crate) fn columns<P>(
   payload: &P,
   table: &str,
   operation: &'static str,
) -> Result<Vec<(String, JsonValue)>>
where
   P: Serialize + ?Sized,
{
   let fields = match serde_json::to_value(payload)? {
      JsonValue::Object(fields) => fields,
      other => {
         return Err(Error::PayloadNotFields {
            table: table.to_string(),
            operation,
            kind: kind_of(&other),
         });
      }
   };

   if fields.is_empty() {
      return Err(Error::EmptyPayload {
         table: table.to_string(),
         operation,
      });
   }

   Ok(fields.into_iter().collect())
}

fn kind_of(value: &JsonValue) -> &'static str {
   match value {
      JsonValue::Null => "null",
      JsonValue::Bool(_) => "boolean",
      JsonValue::Number(_) => "number",
      JsonValue::String(_) => "string",
      JsonValue::Array(_) => "array",
      JsonValue::Object(_) => "object",
   }
}
