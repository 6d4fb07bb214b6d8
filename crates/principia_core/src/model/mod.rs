//! Domain model for principles and their tactics.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep request validation explicit and separate from the storage schema.
//!
//! # Invariants
//! - Every record is identified by a stable UUID generated at creation.
//! - Deletion is a hard delete; tactics never outlive their principle.

pub mod principle;
pub mod tactic;
pub mod validation;
