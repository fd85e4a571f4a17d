//! Table-bound query builder with CRUD mapping

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::payload;
use crate::query::{self, CompiledQuery, Condition, PendingQuery, RowCap};
use crate::store::{Database, PreparedStatement, Row};
use crate::{Error, Result};

/// Empty parameter list for predicates without placeholders.
pub const NO_PARAMS: [JsonValue; 0] = [];

/// The typed shape of one table.
///
/// Rows are mapped onto `Self` through serde, so a non-optional primary key field
/// rejects rows whose key is null. `Create` and `Update` are separate field sets:
/// `Create` omits the primary key (or makes it optional), `Update` usually marks
/// each field `Option` with `skip_serializing_if = "Option::is_none"` so any
/// subset can be written.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use sqlite_record::Record;
///
/// #[derive(Deserialize)]
/// struct User {
///    id: i64,
///    name: String,
/// }
///
/// #[derive(Serialize)]
/// struct NewUser {
///    name: String,
/// }
///
/// #[derive(Serialize, Default)]
/// struct UserChanges {
///    #[serde(skip_serializing_if = "Option::is_none")]
///    name: Option<String>,
/// }
///
/// impl Record for User {
///    type Create = NewUser;
///    type Update = UserChanges;
/// }
/// ```
pub trait Record: DeserializeOwned + Send {
   /// Fields accepted by [`Model::create`].
   type Create: Serialize + Sync;
   /// Fields accepted by [`Model::update`].
   type Update: Serialize + Sync;

   /// Primary key column, an INTEGER assigned by the store.
   const PRIMARY_KEY: &'static str = "id";
}

/// Untyped rows: any column map can be written or read.
impl Record for Row {
   type Create = Row;
   type Update = Row;
}

/// A query builder bound to one table.
///
/// Chaining calls ([`and_where`](Self::and_where), [`order_by`](Self::order_by),
/// [`limit`](Self::limit), [`offset`](Self::offset)) accumulate pending state.
/// Every executing call clears that state before touching the store, whether the
/// call then succeeds or fails, so the next query always starts empty. Calls that
/// address a row by key ([`find`](Self::find), [`create`](Self::create),
/// [`update`](Self::update), [`delete`](Self::delete)) discard pending filters
/// instead of combining with them.
///
/// All calls take `&mut self`, so one model instance serves one logical caller at
/// a time. Create one model per unit of work rather than sharing one across tasks.
///
/// # Example
///
/// ```no_run
/// # use sqlite_record::{Model, Row, SqliteStore};
/// # async fn example(store: SqliteStore) -> sqlite_record::Result<()> {
/// let mut users: Model<_, Row> = Model::new("users", store);
///
/// let adults = users
///    .and_where("age > ?", [18])
///    .and_where("active = ?", [1])
///    .order_by("id DESC")
///    .limit(10)
///    .all()
///    .await?;
/// # Ok(())
/// # }
/// ```
pub struct Model<D, T> {
   table: String,
   db: D,
   pending: PendingQuery,
   _record: PhantomData<fn() -> T>,
}

impl<D, T> Model<D, T>
where
   D: Database,
   T: Record,
{
   /// Bind a model to `table` on the store behind `db`.
   ///
   /// `table` is spliced into SQL text verbatim and must never come from user input.
   pub fn new(table: impl Into<String>, db: D) -> Self {
      Self {
         table: table.into(),
         db,
         pending: PendingQuery::default(),
         _record: PhantomData,
      }
   }

   pub fn table(&self) -> &str {
      &self.table
   }

   pub fn db(&self) -> &D {
      &self.db
   }

   /// State accumulated by chaining calls since the last execution.
   pub fn pending(&self) -> &PendingQuery {
      &self.pending
   }

   /// Add a condition, joined to earlier ones with `AND`.
   ///
   /// `condition` is trusted SQL text with one `?` per value in `params`; it is
   /// spliced into the query as-is and must never contain user input. Only
   /// `params` are bound safely. A placeholder/value count mismatch is reported
   /// by the store when the query runs.
   pub fn and_where<I>(&mut self, condition: &str, params: I) -> &mut Self
   where
      I: IntoIterator,
      I::Item: Into<JsonValue>,
   {
      self.pending.conditions.push(Condition {
         text: condition.to_string(),
         params: params.into_iter().map(Into::into).collect(),
      });
      self
   }

   /// Set the ORDER BY clause (trusted SQL text), replacing any earlier one.
   pub fn order_by(&mut self, clause: &str) -> &mut Self {
      self.pending.order_by = Some(clause.to_string());
      self
   }

   /// Cap the rows returned by [`all`](Self::all), replacing any earlier cap.
   pub fn limit(&mut self, n: u64) -> &mut Self {
      self.pending.limit = Some(n);
      self
   }

   /// Skip rows in [`all`](Self::all), replacing any earlier offset.
   ///
   /// Ignored unless a [`limit`](Self::limit) is also set.
   pub fn offset(&mut self, n: u64) -> &mut Self {
      self.pending.offset = Some(n);
      self
   }

   /// First row matching the pending state, always with `LIMIT 1`.
   pub async fn first(&mut self) -> Result<Option<T>> {
      let compiled = self.take_pending().compile_select(&self.table, RowCap::One);
      self.fetch_first(compiled).await
   }

   /// Every row matching the pending state, honoring limit and offset.
   pub async fn all(&mut self) -> Result<Vec<T>> {
      let compiled = self
         .take_pending()
         .compile_select(&self.table, RowCap::Requested);
      debug!("{} params={:?}", compiled.sql, compiled.params);

      let rows = self
         .db
         .prepare(&compiled.sql)
         .bind(compiled.params)
         .all()
         .await?;

      rows.into_iter().map(map_row).collect()
   }

   /// Row with primary key `id`.
   pub async fn find(&mut self, id: i64) -> Result<Option<T>> {
      self.take_pending();
      let compiled = query::select_by_key(&self.table, T::PRIMARY_KEY, id);
      self.fetch_first(compiled).await
   }

   /// Insert a row and return it as stored, including its assigned key.
   ///
   /// A payload without fields is rejected before the store is called.
   pub async fn create(&mut self, payload: &T::Create) -> Result<T> {
      self.take_pending();
      let columns = payload::columns(payload, &self.table, "create")?;
      let compiled = query::insert(&self.table, columns);

      self
         .fetch_first(compiled)
         .await?
         .ok_or_else(|| Error::MissingCreatedRow(self.table.clone()))
   }

   /// Write the payload's fields to the row with primary key `id`.
   ///
   /// Fields absent from the payload are left untouched. A payload without fields
   /// is rejected before the store is called.
   pub async fn update(&mut self, id: i64, payload: &T::Update) -> Result<()> {
      self.take_pending();
      let columns = payload::columns(payload, &self.table, "update")?;
      let compiled = query::update(&self.table, T::PRIMARY_KEY, id, columns);
      self.run(compiled).await
   }

   /// Delete the row with primary key `id`.
   pub async fn delete(&mut self, id: i64) -> Result<()> {
      self.take_pending();
      let compiled = query::delete(&self.table, T::PRIMARY_KEY, id);
      self.run(compiled).await
   }

   fn take_pending(&mut self) -> PendingQuery {
      std::mem::take(&mut self.pending)
   }

   async fn fetch_first(&self, compiled: CompiledQuery) -> Result<Option<T>> {
      debug!("{} params={:?}", compiled.sql, compiled.params);

      let row = self
         .db
         .prepare(&compiled.sql)
         .bind(compiled.params)
         .first()
         .await?;

      row.map(map_row).transpose()
   }

   async fn run(&self, compiled: CompiledQuery) -> Result<()> {
      debug!("{} params={:?}", compiled.sql, compiled.params);

      self
         .db
         .prepare(&compiled.sql)
         .bind(compiled.params)
         .run()
         .await?;
      Ok(())
   }
}

fn map_row<T: DeserializeOwned>(row: Row) -> Result<T> {
   let object = row.into_iter().collect::<serde_json::Map<_, _>>();
   Ok(serde_json::from_value(JsonValue::Object(object))?)
}
