//! In-memory search predicates applied after full-table scans.
//!
//! # Responsibility
//! - Own the term-matching rules shared by company and employer lookups.
//!
//! # Invariants
//! - No index is consulted; callers always scan the whole table first.

pub mod term;
