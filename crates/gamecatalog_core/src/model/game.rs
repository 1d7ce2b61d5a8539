//! Game aggregate model.
//!
//! # Responsibility
//! - Hold catalog metadata together with genre, platform and rating lists.
//! - Derive the average rating shown to catalog users.
//!
//! # Invariants
//! - `title` is the natural key; uniqueness is enforced by storage, not here.
//! - `available` is fixed at construction time.
//! - Genre and platform lists keep caller order and are not deduplicated.

use serde::{Deserialize, Serialize};

/// One user score attached to a game.
///
/// No bounds are enforced; range checks belong to the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub score: i32,
}

impl Rating {
    pub fn new(score: i32) -> Self {
        Self { score }
    }
}

/// In-memory catalog entry with its genre, platform and rating collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Unique natural key used by every lookup.
    pub title: String,
    pub studio: String,
    pub edition: String,
    /// Free-form text; empty when none was given.
    pub description: String,
    available: bool,
    genres: Vec<String>,
    platforms: Vec<String>,
    ratings: Vec<Rating>,
}

impl Game {
    /// Creates an available game with empty description and collections.
    pub fn new(
        title: impl Into<String>,
        studio: impl Into<String>,
        edition: impl Into<String>,
    ) -> Self {
        Self::with_availability(title, studio, edition, true)
    }

    /// Creates a game with an explicit availability flag.
    ///
    /// Availability cannot change afterwards.
    pub fn with_availability(
        title: impl Into<String>,
        studio: impl Into<String>,
        edition: impl Into<String>,
        available: bool,
    ) -> Self {
        Self {
            title: title.into(),
            studio: studio.into(),
            edition: edition.into(),
            description: String::new(),
            available,
            genres: Vec::new(),
            platforms: Vec::new(),
            ratings: Vec::new(),
        }
    }

    /// Sets the description, returning the updated game.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn add_genre(&mut self, genre: impl Into<String>) {
        self.genres.push(genre.into());
    }

    pub fn add_platform(&mut self, platform: impl Into<String>) {
        self.platforms.push(platform.into());
    }

    pub fn add_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Returns the mean score, or `0.0` when the game has no ratings.
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let total: i64 = self
            .ratings
            .iter()
            .map(|rating| i64::from(rating.score))
            .sum();
        total as f64 / self.ratings.len() as f64
    }
}
