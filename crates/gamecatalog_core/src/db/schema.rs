//! Catalog schema bootstrap.
//!
//! # Responsibility
//! - Create the six catalog tables when they are absent.
//!
//! # Invariants
//! - Applying the schema is idempotent and never drops existing data.
//! - `games` column order stays `id, title, studio, edition, description,
//!   availability`; the repository read path maps rows by position.
//! - No version tracking: this is table creation, not a migration runner.

use super::DbResult;
use log::info;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables the catalog repository reads and writes.
pub const CATALOG_TABLES: [&str; 6] = [
    "games",
    "genres",
    "game_genres",
    "platforms",
    "game_platforms",
    "ratings",
];

/// Creates any missing catalog tables and indexes in one transaction.
pub fn create_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.commit()?;
    info!(
        "event=schema_bootstrap module=db status=ok tables={}",
        CATALOG_TABLES.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{create_schema, CATALOG_TABLES};
    use rusqlite::Connection;

    fn table_exists(conn: &Connection, table: &str) -> bool {
        let exists: i64 = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1
                    FROM sqlite_master
                    WHERE type = 'table' AND name = ?1
                );",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        exists == 1
    }

    #[test]
    fn create_schema_creates_every_catalog_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        create_schema(&mut conn).unwrap();
        for table in CATALOG_TABLES {
            assert!(table_exists(&conn, table), "table {table} does not exist");
        }
    }

    #[test]
    fn create_schema_is_idempotent_and_keeps_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        create_schema(&mut conn).unwrap();
        conn.execute("INSERT INTO genres (name) VALUES ('RPG');", [])
            .unwrap();

        create_schema(&mut conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM genres;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn games_columns_keep_positional_order() {
        let mut conn = Connection::open_in_memory().unwrap();
        create_schema(&mut conn).unwrap();
        let mut stmt = conn.prepare("PRAGMA table_info(games);").unwrap();
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            columns,
            [
                "id",
                "title",
                "studio",
                "edition",
                "description",
                "availability"
            ]
        );
    }
}
