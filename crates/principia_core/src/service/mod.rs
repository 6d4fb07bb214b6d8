//! Core use-case services.
//!
//! # Responsibility
//! - Validate wire drafts and orchestrate repository calls.
//! - Keep HTTP/CLI layers decoupled from storage details.

pub mod principle_service;
