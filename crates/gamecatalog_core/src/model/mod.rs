//! Catalog domain model.
//!
//! # Responsibility
//! - Define the in-memory game aggregate carried across the repository boundary.
//!
//! # Invariants
//! - A game is identified by its title; storage row ids never appear here.
//! - Ratings are append-only.

pub mod game;
