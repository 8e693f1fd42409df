//! Domain models that mirror the SQLite schema and get passed between the
//! persistence layer and the menu loop. The intent is that these types stay
//! light-weight data holders so other layers can focus on prompting and
//! persistence logic.

use std::fmt;

#[derive(Debug, Clone)]
/// An organizational unit. Departments are the root of the reference chain:
/// roles point at departments, employees point at roles.
pub struct Department {
    /// Primary key from the database. Kept around even when the UI only needs
    /// the name because the add-role flow bubbles the id back down to the
    /// persistence layer.
    pub id: i64,
    /// Display name, e.g. "Engineering".
    pub name: String,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone)]
/// A job title within a department, carrying the default salary shown for
/// employees who hold it.
pub struct Role {
    /// Primary key from the SQLite store.
    pub id: i64,
    /// Title displayed in lists and selection prompts.
    pub title: String,
    /// Salary attached to the role. Stored as a float because SQLite has no
    /// decimal type and exact cents are not a requirement here.
    pub salary: f64,
    /// Owning department.
    pub department_id: i64,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[derive(Debug, Clone)]
/// A staff member. `manager_id` is a self-reference to another employee and
/// is `None` for root employees (e.g. a CEO). `salary`, when `None`, means
/// the role salary is the one shown in the joined listing.
pub struct Employee {
    /// Primary key from the SQLite store.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Role held by this employee.
    pub role_id: i64,
    /// The employee's manager, if any.
    pub manager_id: Option<i64>,
    /// Individual salary override; `None` when the employee was added without
    /// one.
    pub salary: Option<f64>,
}

impl Employee {
    /// Compose the `First Last` string used everywhere an employee is shown
    /// as a single selectable line.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One row of the joined employee listing: the employee plus the title and
/// salary of their role and the display name of their manager. Role and
/// manager come from LEFT JOINs, so either can be absent without the row
/// itself disappearing.
pub struct EmployeeRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Title of the employee's role, if the role still resolves.
    pub role: Option<String>,
    /// Salary of the employee's role, if the role still resolves.
    pub salary: Option<f64>,
    /// `First Last` of the manager, if one is set and still exists.
    pub manager: Option<String>,
}
