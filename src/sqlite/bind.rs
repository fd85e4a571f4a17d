use serde_json::Value as JsonValue;
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

/// Bind a JSON value to a SQLx query as the closest SQLite storage class.
///
/// Booleans become INTEGER 0/1. Arrays and objects are bound as JSON text.
pub fn bind_value<'a>(
   query: Query<'a, Sqlite, SqliteArguments<'a>>,
   value: JsonValue,
) -> Query<'a, Sqlite, SqliteArguments<'a>> {
   match value {
      JsonValue::Null => query.bind(None::<i64>),
      JsonValue::Bool(b) => query.bind(i64::from(b)),
      JsonValue::Number(number) => {
         if let Some(int_val) = number.as_i64() {
            query.bind(int_val)
         } else if let Some(uint_val) = number.as_u64() {
            // Above i64::MAX: SQLite INTEGER cannot hold it, fall back to REAL
            query.bind(uint_val as f64)
         } else {
            query.bind(number.as_f64().unwrap_or_default())
         }
      }
      JsonValue::String(s) => query.bind(s),
      other => query.bind(other),
   }
}
