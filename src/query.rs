//! Pending query state and SQL text compilation
//!
//! Identifiers (table and column names) are trusted structural text and are spliced
//! into the SQL directly. Every value travels separately in
//! [`CompiledQuery::params`], in the same order as the `?` placeholders appear.

use serde_json::Value as JsonValue;

/// SQL text plus the positional values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
   pub sql: String,
   pub params: Vec<JsonValue>,
}

/// One conjunct of a WHERE clause: raw predicate text and its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
   pub text: String,
   pub params: Vec<JsonValue>,
}

/// Filters, ordering and pagination accumulated by a model's chaining calls.
///
/// The zero value is the empty state. Models take the whole value out with
/// `std::mem::take` before executing, which leaves the empty state behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingQuery {
   pub conditions: Vec<Condition>,
   pub order_by: Option<String>,
   pub limit: Option<u64>,
   pub offset: Option<u64>,
}

/// How many rows a SELECT may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowCap {
   /// Always `LIMIT 1`, ignoring any limit or offset the caller set.
   One,
   /// Whatever limit and offset the caller set, if any.
   Requested,
}

impl PendingQuery {
   /// Returns true when no chaining call has armed this state.
   pub fn is_empty(&self) -> bool {
      *self == Self::default()
   }

   /// Compile a `SELECT * FROM <table>` over this state.
   pub(crate) fn compile_select(self, table: &str, cap: RowCap) -> CompiledQuery {
      let mut sql = format!("SELECT * FROM {table}");
      let mut params = Vec::new();

      if !self.conditions.is_empty() {
         let mut texts = Vec::with_capacity(self.conditions.len());
         for condition in self.conditions {
            texts.push(condition.text);
            params.extend(condition.params);
         }
         sql.push_str(" WHERE ");
         sql.push_str(&texts.join(" AND "));
      }

      if let Some(order_by) = self.order_by {
         sql.push_str(" ORDER BY ");
         sql.push_str(&order_by);
      }

      match cap {
         RowCap::One => sql.push_str(" LIMIT 1"),
         RowCap::Requested => {
            // OFFSET is only valid SQL after a LIMIT, so an offset alone is dropped
            if let Some(limit) = self.limit {
               sql.push_str(&format!(" LIMIT {limit}"));
               if let Some(offset) = self.offset {
                  sql.push_str(&format!(" OFFSET {offset}"));
               }
            }
         }
      }

      CompiledQuery { sql, params }
   }
}

pub(crate) fn select_by_key(table: &str, key: &str, id: i64) -> CompiledQuery {
   CompiledQuery {
      sql: format!("SELECT * FROM {table} WHERE {key} = ?"),
      params: vec![JsonValue::from(id)],
   }
}

/// `columns` must be non-empty.
pub(crate) fn insert(table: &str, columns: Vec<(String, JsonValue)>) -> CompiledQuery {
   let (names, params): (Vec<String>, Vec<JsonValue>) = columns.into_iter().unzip();
   let placeholders = vec!["?"; names.len()].join(", ");

   CompiledQuery {
      sql: format!(
         "INSERT INTO {table} ({}) VALUES ({placeholders}) RETURNING *",
         names.join(", ")
      ),
      params,
   }
}

/// `columns` must be non-empty.
pub(crate) fn update(
   table: &str,
   key: &str,
   id: i64,
   columns: Vec<(String, JsonValue)>,
) -> CompiledQuery {
   let (names, mut params): (Vec<String>, Vec<JsonValue>) = columns.into_iter().unzip();
   let sets = names
      .iter()
      .map(|name| format!("{name} = ?"))
      .collect::<Vec<_>>()
      .join(", ");
   params.push(JsonValue::from(id));

   CompiledQuery {
      sql: format!("UPDATE {table} SET {sets} WHERE {key} = ?"),
      params,
   }
}

pub(crate) fn delete(table: &str, key: &str, id: i64) -> CompiledQuery {
   CompiledQuery {
      sql: format!("DELETE FROM {table} WHERE {key} = ?"),
      params: vec![JsonValue::from(id)],
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use serde_json::json;

   fn condition(text: &str, params: Vec<JsonValue>) -> Condition {
      Condition {
         text: text.into(),
         params,
      }
   }

   #[test]
   fn test_empty_state_selects_everything() {
      let state = PendingQuery::default();
      assert!(state.is_empty());

      let compiled = state.compile_select("users", RowCap::Requested);
      assert_eq!(compiled.sql, "SELECT * FROM users");
      assert!(compiled.params.is_empty());
   }

   #[test]
   fn test_conditions_conjoin_in_order() {
      let state = PendingQuery {
         conditions: vec![
            condition("age > ?", vec![json!(18)]),
            condition("active = ?", vec![json!(1)]),
         ],
         ..Default::default()
      };

      let compiled = state.compile_select("users", RowCap::One);
      assert_eq!(
         compiled.sql,
         "SELECT * FROM users WHERE age > ? AND active = ? LIMIT 1"
      );
      assert_eq!(compiled.params, vec![json!(18), json!(1)]);
   }

   #[test]
   fn test_multi_param_conditions_flatten() {
      let state = PendingQuery {
         conditions: vec![
            condition("age BETWEEN ? AND ?", vec![json!(18), json!(30)]),
            condition("deleted_at IS NULL", vec![]),
            condition("name = ?", vec![json!("Ada")]),
         ],
         ..Default::default()
      };

      let compiled = state.compile_select("users", RowCap::Requested);
      assert_eq!(
         compiled.sql,
         "SELECT * FROM users WHERE age BETWEEN ? AND ? AND deleted_at IS NULL AND name = ?"
      );
      assert_eq!(compiled.params, vec![json!(18), json!(30), json!("Ada")]);
   }

   #[test]
   fn test_pagination_with_ordering() {
      let state = PendingQuery {
         conditions: vec![condition("active = ?", vec![json!(1)])],
         order_by: Some("id DESC".into()),
         limit: Some(10),
         offset: Some(20),
      };

      let compiled = state.compile_select("users", RowCap::Requested);
      assert_eq!(
         compiled.sql,
         "SELECT * FROM users WHERE active = ? ORDER BY id DESC LIMIT 10 OFFSET 20"
      );
      assert_eq!(compiled.params, vec![json!(1)]);
   }

   #[test]
   fn test_offset_without_limit_is_dropped() {
      let state = PendingQuery {
         offset: Some(5),
         ..Default::default()
      };
      assert!(!state.is_empty());

      let compiled = state.compile_select("users", RowCap::Requested);
      assert_eq!(compiled.sql, "SELECT * FROM users");
   }

   #[test]
   fn test_row_cap_one_ignores_requested_pagination() {
      let state = PendingQuery {
         order_by: Some("name".into()),
         limit: Some(50),
         offset: Some(100),
         ..Default::default()
      };

      let compiled = state.compile_select("users", RowCap::One);
      assert_eq!(compiled.sql, "SELECT * FROM users ORDER BY name LIMIT 1");
   }

   #[test]
   fn test_insert_names_every_column() {
      let compiled = insert(
         "users",
         vec![
            ("name".into(), json!("Ada")),
            ("email".into(), json!("ada@example.com")),
         ],
      );
      assert_eq!(
         compiled.sql,
         "INSERT INTO users (name, email) VALUES (?, ?) RETURNING *"
      );
      assert_eq!(compiled.params, vec![json!("Ada"), json!("ada@example.com")]);
   }

   #[test]
   fn test_update_binds_key_last() {
      let compiled = update(
         "users",
         "id",
         7,
         vec![("name".into(), json!("Bob")), ("active".into(), json!(0))],
      );
      assert_eq!(
         compiled.sql,
         "UPDATE users SET name = ?, active = ? WHERE id = ?"
      );
      assert_eq!(compiled.params, vec![json!("Bob"), json!(0), json!(7)]);
   }

   #[test]
   fn test_key_statements() {
      assert_eq!(
         select_by_key("users", "id", 3),
         CompiledQuery {
            sql: "SELECT * FROM users WHERE id = ?".into(),
            params: vec![json!(3)],
         }
      );
      assert_eq!(
         delete("users", "id", 3),
         CompiledQuery {
            sql: "DELETE FROM users WHERE id = ?".into(),
            params: vec![json!(3)],
         }
      );
   }
}
