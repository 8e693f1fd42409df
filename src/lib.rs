//! Core library surface for the staff manager CLI.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: a SQLite-backed persistence layer, the domain models it hydrates,
//! and the menu loop that sequences the CRUD actions.

pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer. `main.rs` uses these to
/// bring up the store before entering the loop.
pub use db::{open_default, StoreError};

/// The domain types other layers manipulate.
pub use models::{Department, Employee, EmployeeRow, Role};

/// The interactive entry point and its console boundary.
pub use ui::{App, Console, StdConsole};
