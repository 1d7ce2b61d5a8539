//! Catalog repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map the `Game` aggregate onto `games`, the genre/platform lookup and
//!   junction tables, and `ratings`.
//! - Own every SQL statement and transaction boundary of the catalog.
//!
//! # Invariants
//! - `save` and `rate` are all-or-nothing: any failed statement rolls back
//!   every row written in the same call.
//! - Genre/platform names are resolved by find-or-create and never duplicated.
//! - Read paths degrade storage faults to empty results and log them.
//! - Junction and rating rows are only written in the transaction that
//!   inserted or confirmed their parent game.

use crate::db::{ConnectionManager, DbError};
use crate::model::game::{Game, Rating};
use log::{error, info, warn};
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const GAME_SELECT_SQL: &str = "SELECT
    id,
    title,
    studio,
    edition,
    description,
    availability
FROM games";

// Positional columns of `GAME_SELECT_SQL`.
const COL_ID: usize = 0;
const COL_TITLE: usize = 1;
const COL_STUDIO: usize = 2;
const COL_EDITION: usize = 3;
const COL_DESCRIPTION: usize = 4;
const COL_AVAILABILITY: usize = 5;

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure reported by catalog write operations.
#[derive(Debug)]
pub enum RepoError {
    /// The store could not execute a statement or could not be opened.
    Db(DbError),
    /// Find-or-create produced no usable lookup id.
    LookupUnresolved { table: &'static str, name: String },
    /// No stored game carries this title.
    NotFound(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::LookupUnresolved { table, name } => {
                write!(f, "could not resolve `{name}` in {table}")
            }
            Self::NotFound(title) => write!(f, "game not found: {title}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::LookupUnresolved { .. } => None,
            Self::NotFound(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Catalog operations consumed by console/menu callers.
pub trait CatalogRepository {
    /// Returns every stored game in insertion order; empty on storage faults.
    fn list_all(&self) -> Vec<Game>;
    /// Returns the game with `title`; `None` when absent or on storage faults.
    fn find_by_title(&self, title: &str) -> Option<Game>;
    /// Persists a new game with its genres, platforms and initial ratings.
    fn save(&self, game: &Game) -> RepoResult<()>;
    /// Appends one rating to an already stored game.
    fn rate(&self, game: &Game, score: i32) -> RepoResult<()>;
}

impl<R: CatalogRepository + ?Sized> CatalogRepository for &R {
    fn list_all(&self) -> Vec<Game> {
        (**self).list_all()
    }

    fn find_by_title(&self, title: &str) -> Option<Game> {
        (**self).find_by_title(title)
    }

    fn save(&self, game: &Game) -> RepoResult<()> {
        (**self).save(game)
    }

    fn rate(&self, game: &Game, score: i32) -> RepoResult<()> {
        (**self).rate(game, score)
    }
}

/// SQLite-backed catalog repository.
///
/// Every call opens its own connection through the [`ConnectionManager`]
/// and drops it before returning.
#[derive(Debug, Clone)]
pub struct SqliteCatalogRepository {
    connections: ConnectionManager,
}

impl SqliteCatalogRepository {
    pub fn new(connections: ConnectionManager) -> Self {
        Self { connections }
    }

    fn query_games(&self, title: Option<&str>) -> RepoResult<Vec<Game>> {
        let conn = self.connections.open()?;
        let mut games = Vec::new();

        let mut stmt = match title {
            Some(_) => conn.prepare(&format!("{GAME_SELECT_SQL} WHERE title = ?1;"))?,
            None => conn.prepare(&format!("{GAME_SELECT_SQL} ORDER BY id ASC;"))?,
        };
        let mut rows = match title {
            Some(title) => stmt.query([title])?,
            None => stmt.query([])?,
        };

        while let Some(row) = rows.next()? {
            let (game_id, mut game) = parse_game_row(row)?;
            hydrate(&conn, game_id, &mut game);
            games.push(game);
        }

        Ok(games)
    }
}

impl CatalogRepository for SqliteCatalogRepository {
    fn list_all(&self) -> Vec<Game> {
        let started_at = Instant::now();
        match self.query_games(None) {
            Ok(games) => {
                info!(
                    "event=game_list module=repo status=ok count={} duration_ms={}",
                    games.len(),
                    started_at.elapsed().as_millis()
                );
                games
            }
            Err(err) => {
                error!(
                    "event=game_list module=repo status=degraded duration_ms={} error_code=game_list_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn find_by_title(&self, title: &str) -> Option<Game> {
        let started_at = Instant::now();
        match self.query_games(Some(title)) {
            Ok(games) => {
                let found = games.into_iter().next();
                info!(
                    "event=game_find module=repo status=ok found={} duration_ms={}",
                    found.is_some(),
                    started_at.elapsed().as_millis()
                );
                found
            }
            Err(err) => {
                error!(
                    "event=game_find module=repo status=degraded duration_ms={} error_code=game_find_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                None
            }
        }
    }

    fn save(&self, game: &Game) -> RepoResult<()> {
        let started_at = Instant::now();
        let mut conn = self.connections.open()?;
        let tx = conn.transaction()?;
        let outcome = write_game(&tx, game);
        let result = finish_transaction(tx, outcome);

        match &result {
            Ok(()) => info!(
                "event=game_save module=repo status=ok genres={} platforms={} ratings={} duration_ms={}",
                game.genres().len(),
                game.platforms().len(),
                game.ratings().len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=game_save module=repo status=error duration_ms={} error_code=game_save_failed error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn rate(&self, game: &Game, score: i32) -> RepoResult<()> {
        let started_at = Instant::now();
        let mut conn = self.connections.open()?;
        let tx = conn.transaction()?;
        let outcome = match game_id_by_title(&tx, &game.title) {
            Ok(Some(game_id)) => insert_rating(&tx, game_id, score),
            Ok(None) => Err(RepoError::NotFound(game.title.clone())),
            Err(err) => Err(err),
        };
        let result = finish_transaction(tx, outcome);

        match &result {
            Ok(()) => info!(
                "event=game_rate module=repo status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=game_rate module=repo status=error duration_ms={} error_code=game_rate_failed error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// Genre/platform lookup tables sharing the find-or-create pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Genre,
    Platform,
}

impl Lookup {
    fn table(self) -> &'static str {
        match self {
            Self::Genre => "genres",
            Self::Platform => "platforms",
        }
    }

    fn select_id_sql(self) -> &'static str {
        match self {
            Self::Genre => "SELECT id FROM genres WHERE name = ?1;",
            Self::Platform => "SELECT id FROM platforms WHERE name = ?1;",
        }
    }

    fn insert_sql(self) -> &'static str {
        match self {
            Self::Genre => "INSERT INTO genres (name) VALUES (?1);",
            Self::Platform => "INSERT INTO platforms (name) VALUES (?1);",
        }
    }

    fn link_sql(self) -> &'static str {
        match self {
            Self::Genre => "INSERT INTO game_genres (game_id, genre_id) VALUES (?1, ?2);",
            Self::Platform => {
                "INSERT INTO game_platforms (game_id, platform_id) VALUES (?1, ?2);"
            }
        }
    }

    fn names_for_game_sql(self) -> &'static str {
        match self {
            Self::Genre => {
                "SELECT g.name
                 FROM game_genres gg
                 INNER JOIN genres g ON g.id = gg.genre_id
                 WHERE gg.game_id = ?1
                 ORDER BY gg.rowid ASC;"
            }
            Self::Platform => {
                "SELECT p.name
                 FROM game_platforms gp
                 INNER JOIN platforms p ON p.id = gp.platform_id
                 WHERE gp.game_id = ?1
                 ORDER BY gp.rowid ASC;"
            }
        }
    }
}

fn parse_game_row(row: &Row<'_>) -> RepoResult<(i64, Game)> {
    let game_id: i64 = row.get(COL_ID)?;
    let description: Option<String> = row.get(COL_DESCRIPTION)?;
    let game = Game::with_availability(
        row.get::<_, String>(COL_TITLE)?,
        row.get::<_, String>(COL_STUDIO)?,
        row.get::<_, String>(COL_EDITION)?,
        row.get::<_, bool>(COL_AVAILABILITY)?,
    )
    .described(description.unwrap_or_default());
    Ok((game_id, game))
}

/// Loads genres, platforms and ratings for one game row.
///
/// Each part is best-effort: a failed sub-query is logged and leaves only
/// that collection short.
fn hydrate(conn: &Connection, game_id: i64, game: &mut Game) {
    if let Err(err) = load_column(
        conn,
        Lookup::Genre.names_for_game_sql(),
        game_id,
        |name: String| game.add_genre(name),
    ) {
        warn!("event=game_hydrate module=repo status=degraded part=genres error={err}");
    }

    if let Err(err) = load_column(
        conn,
        Lookup::Platform.names_for_game_sql(),
        game_id,
        |name: String| game.add_platform(name),
    ) {
        warn!("event=game_hydrate module=repo status=degraded part=platforms error={err}");
    }

    if let Err(err) = load_column(
        conn,
        "SELECT score FROM ratings WHERE game_id = ?1 ORDER BY id ASC;",
        game_id,
        |score: i32| game.add_rating(Rating::new(score)),
    ) {
        warn!("event=game_hydrate module=repo status=degraded part=ratings error={err}");
    }
}

fn load_column<T: FromSql>(
    conn: &Connection,
    sql: &str,
    game_id: i64,
    mut push: impl FnMut(T),
) -> RepoResult<()> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([game_id])?;
    while let Some(row) = rows.next()? {
        push(row.get(0)?);
    }
    Ok(())
}

fn write_game(tx: &Transaction<'_>, game: &Game) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO games (
            title,
            studio,
            edition,
            description,
            availability
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            game.title.as_str(),
            game.studio.as_str(),
            game.edition.as_str(),
            game.description.as_str(),
            game.is_available(),
        ],
    )?;
    let game_id = tx.last_insert_rowid();

    link_names(tx, Lookup::Genre, game_id, game.genres())?;
    link_names(tx, Lookup::Platform, game_id, game.platforms())?;
    for rating in game.ratings() {
        insert_rating(tx, game_id, rating.score)?;
    }

    Ok(())
}

fn link_names(conn: &Connection, lookup: Lookup, game_id: i64, names: &[String]) -> RepoResult<()> {
    for name in names {
        let lookup_id = find_or_create(conn, lookup, name)?;
        conn.execute(lookup.link_sql(), params![game_id, lookup_id])?;
    }
    Ok(())
}

/// Resolves a lookup id by name, inserting the name when it is new.
///
/// Select-then-insert is only race-free under a single writer.
fn find_or_create(conn: &Connection, lookup: Lookup, name: &str) -> RepoResult<i64> {
    let existing = conn
        .query_row(lookup.select_id_sql(), [name], |row| row.get::<_, i64>(0))
        .optional()?;

    let lookup_id = match existing {
        Some(id) => id,
        None => match conn.execute(lookup.insert_sql(), [name])? {
            1 => conn.last_insert_rowid(),
            _ => 0,
        },
    };

    // Row ids handed out by the schema start at 1.
    if lookup_id <= 0 {
        return Err(RepoError::LookupUnresolved {
            table: lookup.table(),
            name: name.to_string(),
        });
    }
    Ok(lookup_id)
}

fn game_id_by_title(conn: &Connection, title: &str) -> RepoResult<Option<i64>> {
    let game_id = conn
        .query_row("SELECT id FROM games WHERE title = ?1;", [title], |row| {
            row.get::<_, i64>(0)
        })
        .optional()?;
    Ok(game_id)
}

fn insert_rating(conn: &Connection, game_id: i64, score: i32) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO ratings (game_id, score) VALUES (?1, ?2);",
        params![game_id, score],
    )?;
    Ok(())
}

/// Commits on success, rolls back on failure, and returns the outcome.
fn finish_transaction<T>(tx: Transaction<'_>, outcome: RepoResult<T>) -> RepoResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                error!(
                    "event=tx_rollback module=repo status=error error_code=rollback_failed error={rollback_err}"
                );
            }
            Err(err)
        }
    }
}
