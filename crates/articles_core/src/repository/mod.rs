//! Repository layer over the remote article collection.
//!
//! # Responsibility
//! - Own the in-memory, newest-first article collection.
//! - Bootstrap an empty remote collection from the fixture.
//! - Forward mutations to the store and keep the local copy in step.
//!
//! # Invariants
//! - Every store failure is returned to the caller and logged once.
//! - The local collection changes only after the store acknowledged.

pub mod article_repository;
