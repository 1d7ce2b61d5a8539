//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide list/detail/register/rate entry points for console callers.
//! - Resolve titles to stored games before rating them.
//!
//! # Invariants
//! - Service APIs never bypass repository transactions.
//! - Availability does not gate rating here; that policy is left to callers.

use crate::model::game::Game;
use crate::repo::catalog_repo::{CatalogRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogServiceError {
    /// Title is empty or whitespace only.
    InvalidTitle(String),
    /// No stored game carries this title.
    GameNotFound(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but read-back did not return the game.
    InconsistentState(&'static str),
}

impl Display for CatalogServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(value) => write!(f, "invalid game title: `{value}`"),
            Self::GameNotFound(title) => write!(f, "game not found: {title}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent catalog state: {details}"),
        }
    }
}

impl Error for CatalogServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(title) => Self::GameNotFound(title),
            other => Self::Repo(other),
        }
    }
}

/// Catalog service facade over repository implementations.
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists the whole catalog in insertion order.
    pub fn catalog(&self) -> Vec<Game> {
        self.repo.list_all()
    }

    /// Gets one fully hydrated game by title.
    pub fn game_details(&self, title: &str) -> Option<Game> {
        self.repo.find_by_title(title)
    }

    /// Stores a new game and returns it as read back from storage.
    pub fn register_game(&self, game: &Game) -> Result<Game, CatalogServiceError> {
        if game.title.trim().is_empty() {
            return Err(CatalogServiceError::InvalidTitle(game.title.clone()));
        }

        self.repo.save(game)?;
        self.repo
            .find_by_title(&game.title)
            .ok_or(CatalogServiceError::InconsistentState(
                "saved game not found in read-back",
            ))
    }

    /// Adds one score to the game stored under `title`.
    ///
    /// Returns the game with its refreshed rating list.
    pub fn rate_game(&self, title: &str, score: i32) -> Result<Game, CatalogServiceError> {
        let game = self
            .repo
            .find_by_title(title)
            .ok_or_else(|| CatalogServiceError::GameNotFound(title.to_string()))?;

        self.repo.rate(&game, score)?;
        let rated = self
            .repo
            .find_by_title(title)
            .ok_or(CatalogServiceError::InconsistentState(
                "rated game not found in read-back",
            ))?;
        info!(
            "event=game_rated module=service status=ok ratings={}",
            rated.ratings().len()
        );
        Ok(rated)
    }
}
