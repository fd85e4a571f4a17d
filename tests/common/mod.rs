#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use sqlite_record::{Database, Error, PreparedStatement, Record, Result, Row, RunResult};

/// How a statement was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
   First,
   All,
   Run,
}

/// One statement the mock store was asked to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
   pub sql: String,
   pub params: Vec<JsonValue>,
   pub call: Call,
}

#[derive(Default)]
struct MockState {
   executed: Vec<Executed>,
   failing: Vec<(String, String)>,
   rows: Vec<Row>,
}

/// In-memory store that records every execution and returns canned rows.
///
/// Clones share their recording, like clones of a real single-session store.
#[derive(Clone, Default)]
pub struct RecordingDatabase {
   state: Arc<Mutex<MockState>>,
}

impl RecordingDatabase {
   pub fn new() -> Self {
      Self::default()
   }

   /// Rows returned by `all()`; the first one is returned by `first()`.
   pub fn with_rows(rows: Vec<JsonValue>) -> Self {
      let db = Self::new();
      db.state.lock().unwrap().rows = rows.into_iter().map(to_row).collect();
      db
   }

   /// Make every execution of exactly `sql` fail with `message`.
   pub fn fail_on(&self, sql: &str, message: &str) {
      self
         .state
         .lock()
         .unwrap()
         .failing
         .push((sql.to_string(), message.to_string()));
   }

   pub fn executed(&self) -> Vec<Executed> {
      self.state.lock().unwrap().executed.clone()
   }

   pub fn queries(&self) -> Vec<String> {
      self.executed().into_iter().map(|e| e.sql).collect()
   }

   pub fn last(&self) -> Executed {
      self.executed().pop().expect("no statement executed")
   }

   fn record(&self, statement: MockStatement, call: Call) -> Result<Vec<Row>> {
      let mut state = self.state.lock().unwrap();
      state.executed.push(Executed {
         sql: statement.sql.clone(),
         params: statement.params,
         call,
      });

      if let Some((_, message)) = state.failing.iter().find(|(sql, _)| *sql == statement.sql) {
         return Err(Error::Other(message.clone()));
      }
      Ok(state.rows.clone())
   }
}

impl Database for RecordingDatabase {
   type Statement = MockStatement;

   fn prepare(&self, query: &str) -> MockStatement {
      MockStatement {
         db: self.clone(),
         sql: query.to_string(),
         params: Vec::new(),
      }
   }
}

pub struct MockStatement {
   db: RecordingDatabase,
   sql: String,
   params: Vec<JsonValue>,
}

#[async_trait]
impl PreparedStatement for MockStatement {
   fn bind(mut self, values: Vec<JsonValue>) -> Self {
      self.params = values;
      self
   }

   async fn first(self) -> Result<Option<Row>> {
      let db = self.db.clone();
      Ok(db.record(self, Call::First)?.into_iter().next())
   }

   async fn all(self) -> Result<Vec<Row>> {
      let db = self.db.clone();
      db.record(self, Call::All)
   }

   async fn run(self) -> Result<RunResult> {
      let db = self.db.clone();
      db.record(self, Call::Run)?;
      Ok(RunResult::default())
   }
}

pub fn to_row(value: JsonValue) -> Row {
   serde_json::from_value(value).expect("row must be a JSON object")
}

// ============================================================================
// A typed record used across tests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
   pub id: i64,
   pub name: String,
   pub email: String,
   #[serde(with = "sqlite_record::int_bool")]
   pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
   pub name: String,
   pub email: String,
   pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserChanges {
   #[serde(skip_serializing_if = "Option::is_none")]
   pub name: Option<String>,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub email: Option<String>,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub active: Option<bool>,
}

impl Record for User {
   type Create = NewUser;
   type Update = UserChanges;
}

pub fn new_user(name: &str) -> NewUser {
   NewUser {
      name: name.to_string(),
      email: format!("{}@example.com", name.to_lowercase()),
      active: true,
   }
}

pub fn user_row(id: i64, name: &str) -> JsonValue {
   json!({
      "id": id,
      "name": name,
      "email": format!("{}@example.com", name.to_lowercase()),
      "active": 1,
   })
}
