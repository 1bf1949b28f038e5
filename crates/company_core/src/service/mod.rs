//! Stateful service layer.
//!
//! # Responsibility
//! - Own exactly one repository per service instance.
//! - Expose repository operations as use-case entry points for transports.
//! - Provide the opt-in demo bootstrap (`seed`).
//!
//! # Invariants
//! - Services never resolve tables per call; repositories are built once.
//! - Seeding only happens when a caller explicitly asks for it.

pub mod company_service;
pub mod employer_service;
pub mod seed;
