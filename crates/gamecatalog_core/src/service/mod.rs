//! Catalog use-case services.
//!
//! # Responsibility
//! - Turn repository calls into the entry points used by console callers.
//! - Keep presentation layers decoupled from storage details.

pub mod catalog_service;
