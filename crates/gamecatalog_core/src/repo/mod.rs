//! Repository layer for the game catalog.
//!
//! # Responsibility
//! - Define the catalog data-access contract.
//! - Isolate SQLite statements and transactions from callers.
//!
//! # Invariants
//! - "Not found" is an `Option`, never an error, on read paths.
//! - Write paths report storage faults as `RepoError` after rolling back.

pub mod catalog_repo;
