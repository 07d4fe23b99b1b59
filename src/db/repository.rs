//! Database repository for games and their guesses.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRecord, GuessRecord, NewGameRecord, TurnUpdate, schema};

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Database repository for game operations.
///
/// Each call opens its own connection, so the repository is cheap to clone
/// and safe to share across threads.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Path or URL of the database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })?;
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}; PRAGMA foreign_keys = ON;"
        ))?;
        Ok(conn)
    }

    /// Applies any migrations not yet run.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Inserts a new game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, game))]
    pub fn create_game(&self, game: NewGameRecord) -> Result<GameRecord, DbError> {
        debug!("Creating game");
        let mut conn = self.connection()?;

        let record = diesel::insert_into(schema::games::table)
            .values(&game)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = record.id(), "Game created");
        Ok(record)
    }

    /// Lists all games, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameRecord>, DbError> {
        debug!("Listing all games");
        let mut conn = self.connection()?;

        let games = schema::games::table
            .order(schema::games::id.asc())
            .select(GameRecord::as_select())
            .load(&mut conn)?;

        info!(count = games.len(), "Games loaded");
        Ok(games)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_game(&self, game_id: i32) -> Result<Option<GameRecord>, DbError> {
        let mut conn = self.connection()?;
        Ok(Self::load_game(&mut conn, game_id)?)
    }

    /// Gets a game's guesses ordered by attempt number.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_guesses(&self, game_id: i32) -> Result<Vec<GuessRecord>, DbError> {
        let mut conn = self.connection()?;
        Ok(Self::load_guesses(&mut conn, game_id)?)
    }

    /// Gets a game together with its guesses in one read transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_game_with_guesses(
        &self,
        game_id: i32,
    ) -> Result<Option<(GameRecord, Vec<GuessRecord>)>, DbError> {
        let mut conn = self.connection()?;
        let found = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let Some(game) = Self::load_game(conn, game_id)? else {
                return Ok(None);
            };
            let guesses = Self::load_guesses(conn, game_id)?;
            Ok(Some((game, guesses)))
        })?;
        debug!(game_id, found = found.is_some(), "Game lookup");
        Ok(found)
    }

    /// Plays one turn of a game inside an immediate transaction.
    ///
    /// The write lock is taken before the game is read, so two turns on the
    /// same game never both see it in progress. `turn` receives the current
    /// rows and returns the update to write plus a value passed back to the
    /// caller. Returns `Ok(None)` if the game does not exist; an error from
    /// `turn` rolls the transaction back.
    ///
    /// # Errors
    ///
    /// Returns whatever `turn` fails with, or a storage error.
    #[instrument(skip(self, turn))]
    pub fn play_turn<T, E, F>(&self, game_id: i32, turn: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&GameRecord, &[GuessRecord]) -> Result<(TurnUpdate, T), E>,
        E: From<DbError> + From<diesel::result::Error>,
    {
        let mut conn = self.connection()?;

        conn.immediate_transaction(|conn| {
            let Some(game) = Self::load_game(conn, game_id)? else {
                debug!(game_id, "Game not found");
                return Ok(None);
            };
            let guesses = Self::load_guesses(conn, game_id)?;

            let (update, value) = turn(&game, &guesses)?;

            diesel::update(schema::games::table.find(game_id))
                .set((
                    schema::games::attempts.eq(update.attempts()),
                    schema::games::status.eq(update.status()),
                ))
                .execute(conn)?;
            diesel::insert_into(schema::game_guesses::table)
                .values(update.guess())
                .execute(conn)?;

            info!(
                game_id,
                attempt = update.guess().attempt_number(),
                status = %update.status(),
                "Turn recorded"
            );
            Ok(Some(value))
        })
    }

    /// Deletes a game and all of its guesses.
    ///
    /// Returns `false` if there was no such game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_game(&self, game_id: i32) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let (guesses, games) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let guesses = diesel::delete(
                schema::game_guesses::table.filter(schema::game_guesses::game_id.eq(game_id)),
            )
            .execute(conn)?;
            let games = diesel::delete(schema::games::table.find(game_id)).execute(conn)?;
            Ok((guesses, games))
        })?;

        info!(game_id, guesses, deleted = games > 0, "Game delete");
        Ok(games > 0)
    }

    fn load_game(
        conn: &mut SqliteConnection,
        game_id: i32,
    ) -> Result<Option<GameRecord>, diesel::result::Error> {
        schema::games::table
            .find(game_id)
            .select(GameRecord::as_select())
            .first(conn)
            .optional()
    }

    fn load_guesses(
        conn: &mut SqliteConnection,
        game_id: i32,
    ) -> Result<Vec<GuessRecord>, diesel::result::Error> {
        schema::game_guesses::table
            .filter(schema::game_guesses::game_id.eq(game_id))
            .order(schema::game_guesses::attempt_number.asc())
            .select(GuessRecord::as_select())
            .load(conn)
    }
}
