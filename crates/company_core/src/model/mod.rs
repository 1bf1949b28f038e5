//! Domain model for companies and their employees.
//!
//! # Responsibility
//! - Define the canonical records persisted by the state store.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID.
//! - Employers reference their company by id only; nothing enforces that
//!   the referenced company exists.

pub mod company;
pub mod employer;
