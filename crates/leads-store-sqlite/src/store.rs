//! [`SqliteStore`] — the SQLite implementation of [`LeadStore`].

use std::path::Path;

use leads_core::store::{
  Collection, Document, Filter, Inserted, LeadStore, RawRecord,
};

use crate::{
  Error, Result,
  encode::{RawDocument, encode_body, encode_dt, new_record_id, now},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for SqliteStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteStore").finish_non_exhaustive()
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Build the `SELECT` for a query. Every filter condition becomes a
/// parameterised `json_each` lookup, so field names never reach the SQL text.
fn select_sql(filter: &Filter) -> String {
  let mut sql = String::from(
    "SELECT record_id, body, created_at
     FROM documents d
     WHERE d.collection = ?1",
  );
  for i in 0..filter.conditions().len() {
    let key = 2 + 2 * i;
    let value = key + 1;
    sql.push_str(&format!(
      "
       AND EXISTS (
         SELECT 1 FROM json_each(d.body) j
         WHERE j.key = ?{key} AND j.type = 'text' AND j.value = ?{value}
       )"
    ));
  }
  let limit = 2 + 2 * filter.conditions().len();
  sql.push_str(&format!(
    "
     ORDER BY d.created_at DESC, d.seq DESC
     LIMIT ?{limit}"
  ));
  sql
}

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for SqliteStore {
  type Error = Error;

  #[tracing::instrument(level = "debug", skip(self, record))]
  async fn insert(&self, collection: Collection, record: Document) -> Result<Inserted> {
    let id         = new_record_id();
    let created_at = now();

    let id_str     = id.to_string();
    let coll_str   = collection.name().to_owned();
    let body_str   = encode_body(record)?;
    let at_str     = encode_dt(created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (record_id, collection, body, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, coll_str, body_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(%id, "document inserted");
    Ok(Inserted { id, created_at: Some(created_at) })
  }

  #[tracing::instrument(level = "debug", skip(self))]
  async fn query(
    &self,
    collection: Collection,
    filter:     &Filter,
    limit:      usize,
  ) -> Result<Vec<RawRecord>> {
    let sql = select_sql(filter);

    let mut params: Vec<rusqlite::types::Value> =
      vec![collection.name().to_owned().into()];
    for (field, value) in filter.conditions() {
      params.push(field.clone().into());
      params.push(value.clone().into());
    }
    params.push(i64::try_from(limit).unwrap_or(i64::MAX).into());

    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawDocument {
              record_id:  row.get(0)?,
              body:       row.get(1)?,
              created_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_record).collect()
  }
}
