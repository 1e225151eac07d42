//! Outbound adapters implementing the domain repository ports.
//!
//! - **memory**: process-local store used for development and tests
//! - **persistence**: PostgreSQL repositories built on Diesel
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
