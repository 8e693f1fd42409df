//! Persistence module split across logical submodules. Every function here
//! encapsulates one statement so the menu loop can stay focused on prompting
//! and reporting.

mod connection;
mod departments;
mod employees;
mod error;
mod roles;
mod store;

pub use connection::{open_default, open_in_memory};
pub use departments::{add_department, list_departments};
pub use employees::{
    add_employee, delete_employee, fetch_employees, list_employees, update_employee_role,
};
pub use error::{StoreError, StoreResult};
pub use roles::{add_role, list_roles};
