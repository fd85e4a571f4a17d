//! Serde adapter for booleans stored as SQLite integers
//!
//! SQLite has no boolean storage class, so `true`/`false` come back from a
//! `SELECT` as `1`/`0`. Use with `#[serde(with = "sqlite_record::int_bool")]`.
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!    #[serde(with = "sqlite_record::int_bool")]
//!    active: bool,
//! }
//!
//! let user: User = serde_json::from_value(serde_json::json!({ "active": 1 })).unwrap();
//! assert!(user.active);
//! ```

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value as JsonValue;

pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
   S: Serializer,
{
   serializer.serialize_i64(i64::from(*value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
   D: Deserializer<'de>,
{
   match JsonValue::deserialize(deserializer)? {
      JsonValue::Bool(b) => Ok(b),
      JsonValue::Number(n) => match n.as_i64() {
         Some(0) => Ok(false),
         Some(1) => Ok(true),
         _ => Err(D::Error::custom(format!("expected 0 or 1, found {n}"))),
      },
      other => Err(D::Error::custom(format!(
         "expected a boolean or 0/1, found {other}"
      ))),
   }
}
