//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract used by the service layer.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes accept only validated inputs (`NewPrinciple`,
//!   `NewTactic`).
//! - Multi-statement writes run inside a single transaction.

pub mod principle_repo;
