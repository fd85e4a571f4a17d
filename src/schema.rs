//! Typed field sets and the `CREATE TABLE` text derived from them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Semantic scalar type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
   Integer,
   Text,
   /// Stored as INTEGER 0/1.
   Boolean,
   Float,
}

impl FieldType {
   /// Map a type name (`integer`, `string`, `boolean`, `float`) to a field type.
   ///
   /// Unrecognized names are treated as text.
   pub fn from_name(name: &str) -> Self {
      match name.to_ascii_lowercase().as_str() {
         "integer" | "int" => Self::Integer,
         "boolean" | "bool" => Self::Boolean,
         "float" | "real" => Self::Float,
         _ => Self::Text,
      }
   }

   /// SQLite column type used in DDL.
   pub fn sql_type(self) -> &'static str {
      match self {
         Self::Integer | Self::Boolean => "INTEGER",
         Self::Text => "TEXT",
         Self::Float => "REAL",
      }
   }
}

/// One non-key field of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
   pub name: String,
   pub field_type: FieldType,
}

impl FieldSpec {
   pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
      Self {
         name: name.into(),
         field_type,
      }
   }
}

/// Parses `name:type`, e.g. `age:integer`. A missing type means text.
impl FromStr for FieldSpec {
   type Err = Error;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      let (name, type_name) = s.split_once(':').unwrap_or((s, ""));
      let name = name.trim();

      if !is_identifier(name) {
         return Err(Error::Other(format!("invalid field name in '{s}'")));
      }

      Ok(Self::new(name, FieldType::from_name(type_name.trim())))
   }
}

impl fmt::Display for FieldSpec {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{} {}", self.name, self.field_type.sql_type())
   }
}

/// A table name plus its ordered non-key fields.
///
/// Every table also has an `id INTEGER PRIMARY KEY AUTOINCREMENT` column, which
/// is not listed in `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
   pub table: String,
   pub fields: Vec<FieldSpec>,
}

impl TableSchema {
   pub fn new(table: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
      Self {
         table: table.into(),
         fields,
      }
   }

   /// Build a schema for `model_name` from `name:type` specs, naming the table
   /// with [`table_name_for`].
   pub fn from_specs<'a>(
      model_name: &str,
      specs: impl IntoIterator<Item = &'a str>,
   ) -> Result<Self, Error> {
      let fields = specs
         .into_iter()
         .map(str::parse)
         .collect::<Result<Vec<FieldSpec>, _>>()?;
      Ok(Self::new(table_name_for(model_name), fields))
   }

   pub fn field_names(&self) -> impl Iterator<Item = &str> {
      self.fields.iter().map(|field| field.name.as_str())
   }

   /// `CREATE TABLE IF NOT EXISTS` text for this schema.
   pub fn create_table_sql(&self) -> String {
      let mut columns = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
      columns.extend(self.fields.iter().map(ToString::to_string));

      format!(
         "CREATE TABLE IF NOT EXISTS {} (\n  {}\n);",
         self.table,
         columns.join(",\n  ")
      )
   }
}

/// Conventional table name for a model: lowercased, with an `s` appended.
pub fn table_name_for(model_name: &str) -> String {
   format!("{}s", model_name.to_lowercase())
}

fn is_identifier(name: &str) -> bool {
   let mut chars = name.chars();
   match chars.next() {
      Some(c) if c.is_ascii_alphabetic() || c == '_' => {
         chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
      }
      _ => false,
   }
}
