//! Article domain model.
//!
//! # Responsibility
//! - Define the canonical article record exchanged with the remote collection.
//! - Keep the wire shape (camelCase JSON) in one place.
//!
//! # Invariants
//! - Identifiers are assigned by the remote store, never locally.
//! - Unknown payload fields survive a decode/encode cycle.

pub mod article;
