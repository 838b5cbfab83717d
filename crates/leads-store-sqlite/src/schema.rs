//! SQL schema for the SQLite document store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout version.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Documents are append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS documents (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    record_id   TEXT NOT NULL UNIQUE,  -- hyphenated UUID v4; store-assigned
    collection  TEXT NOT NULL,         -- e.g. 'lead'
    body        TEXT NOT NULL,         -- JSON object, without _id/created_at
    created_at  TEXT NOT NULL,         -- RFC 3339 UTC, fixed width; store-assigned
    CHECK (json_valid(body) AND json_type(body) = 'object')
);

CREATE INDEX IF NOT EXISTS documents_recent_idx
    ON documents(collection, created_at DESC, seq DESC);

PRAGMA user_version = 1;
";
