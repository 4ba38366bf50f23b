//! Storage adapters behind the domain's repository ports.
//!
//! - **memory**: one process-local store implementing every port; used by
//!   the default binary and the behaviour suites
//! - **persistence**: Diesel repositories over the PostgreSQL site tables
//!
//! Both translate rows to domain types and report failures as
//! `RepositoryError`; neither makes business decisions.

pub mod memory;
pub mod persistence;
