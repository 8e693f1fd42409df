//! The menu controller: an explicit loop over a menu-action enum. Written as
//! a `loop` rather than a recursive call per action so a long interactive
//! session never grows the call stack.

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use rusqlite::Connection;

use crate::db::{
    add_department, add_employee, add_role, delete_employee, fetch_employees, list_departments,
    list_employees, list_roles, update_employee_role,
};
use crate::models::EmployeeRow;

use super::console::Console;

/// The eight actions of the main menu plus the exit action. Order here is
/// presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewEmployees,
    AddEmployee,
    UpdateEmployee,
    DeleteEmployee,
    ViewDepartments,
    AddDepartment,
    ViewRoles,
    AddRole,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::ViewEmployees,
        MenuAction::AddEmployee,
        MenuAction::UpdateEmployee,
        MenuAction::DeleteEmployee,
        MenuAction::ViewDepartments,
        MenuAction::AddDepartment,
        MenuAction::ViewRoles,
        MenuAction::AddRole,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ViewEmployees => "View all employees",
            MenuAction::AddEmployee => "Add an employee",
            MenuAction::UpdateEmployee => "Update an employee",
            MenuAction::DeleteEmployee => "Delete an employee",
            MenuAction::ViewDepartments => "View all departments",
            MenuAction::AddDepartment => "Add a department",
            MenuAction::ViewRoles => "View all roles",
            MenuAction::AddRole => "Add a role",
            MenuAction::Exit => "Exit",
        }
    }

    fn labels() -> Vec<String> {
        Self::ALL.iter().map(|a| a.label().to_string()).collect()
    }
}

/// Central application state: the store connection plus the console it
/// prompts through. The connection is owned here for the whole session and
/// released when the app is dropped after the exit action.
pub struct App<C: Console> {
    conn: Connection,
    console: C,
}

impl<C: Console> App<C> {
    pub fn new(conn: Connection, console: C) -> Self {
        Self { conn, console }
    }

    /// Drive the menu until the operator exits. Every action, successful or
    /// failed, returns control here; a failed action is reported and the
    /// menu comes straight back. Only a console failure (e.g. stdin closing)
    /// ends the loop early.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let choice = self
                .console
                .select("What would you like to do?", &MenuAction::labels())?;
            let action = MenuAction::ALL[choice];

            if action == MenuAction::Exit {
                self.console.info("Goodbye!");
                return Ok(());
            }

            if let Err(err) = self.dispatch(action) {
                self.console.error(&format!("{err}"));
            }
        }
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::ViewEmployees => self.view_employees(),
            MenuAction::AddEmployee => self.add_employee(),
            MenuAction::UpdateEmployee => self.update_employee(),
            MenuAction::DeleteEmployee => self.delete_employee(),
            MenuAction::ViewDepartments => self.view_departments(),
            MenuAction::AddDepartment => self.add_department(),
            MenuAction::ViewRoles => self.view_roles(),
            MenuAction::AddRole => self.add_role(),
            MenuAction::Exit => Ok(()),
        }
    }

    fn view_employees(&mut self) -> Result<()> {
        let rows = list_employees(&self.conn)?;
        let cells: Vec<Vec<String>> = rows.iter().map(employee_cells).collect();
        self.console.table(
            &["id", "first_name", "last_name", "role", "salary", "manager"],
            &cells,
        );
        Ok(())
    }

    /// Collect first name, last name, a role chosen from the current role
    /// list, then optional salary and manager id. All prompts complete
    /// before anything is written; blank optional fields are persisted as
    /// NULL, never as empty text or zero.
    fn add_employee(&mut self) -> Result<()> {
        let roles = list_roles(&self.conn)?;
        if roles.is_empty() {
            self.console.info("No roles available. Add a role first.");
            return Ok(());
        }

        let first_name = self.console.input("Enter the employee's first name:")?;
        let last_name = self.console.input("Enter the employee's last name:")?;
        let titles: Vec<String> = roles.iter().map(|r| r.title.clone()).collect();
        let role = &roles[self
            .console
            .select("Select the employee's role:", &titles)?];
        let salary: Option<f64> = parse_optional(
            &self
                .console
                .input("Enter the employee's salary (leave blank if none):")?,
        )?;
        let manager_id: Option<i64> = parse_optional(
            &self
                .console
                .input("Enter the employee's manager ID (leave blank if none):")?,
        )?;

        add_employee(
            &self.conn,
            &first_name,
            &last_name,
            role.id,
            manager_id,
            salary,
        )?;
        self.console.info("Employee added successfully!");
        Ok(())
    }

    /// Reassign an employee's role. Both the employee and the new role are
    /// chosen from the current lists; an empty list short-circuits back to
    /// the menu without prompting further.
    fn update_employee(&mut self) -> Result<()> {
        let employees = fetch_employees(&self.conn)?;
        if employees.is_empty() {
            self.console.info("No employees to update.");
            return Ok(());
        }
        let roles = list_roles(&self.conn)?;
        if roles.is_empty() {
            self.console.info("No roles available. Add a role first.");
            return Ok(());
        }

        let names: Vec<String> = employees.iter().map(|e| e.display_name()).collect();
        let employee = &employees[self
            .console
            .select("Select the employee to update:", &names)?];
        let titles: Vec<String> = roles.iter().map(|r| r.title.clone()).collect();
        let role = &roles[self
            .console
            .select("Select the employee's new role:", &titles)?];

        update_employee_role(&self.conn, employee.id, role.id)?;
        self.console.info("Employee updated successfully!");
        Ok(())
    }

    fn delete_employee(&mut self) -> Result<()> {
        let employees = fetch_employees(&self.conn)?;
        if employees.is_empty() {
            self.console.info("No employees to delete.");
            return Ok(());
        }

        let names: Vec<String> = employees.iter().map(|e| e.display_name()).collect();
        let employee = &employees[self
            .console
            .select("Select the employee you want to delete:", &names)?];

        delete_employee(&self.conn, employee.id)?;
        self.console.info("Employee deleted successfully!");
        Ok(())
    }

    fn view_departments(&mut self) -> Result<()> {
        let departments = list_departments(&self.conn)?;
        let cells: Vec<Vec<String>> = departments
            .iter()
            .map(|d| vec![d.id.to_string(), d.name.clone()])
            .collect();
        self.console.table(&["id", "name"], &cells);
        Ok(())
    }

    fn add_department(&mut self) -> Result<()> {
        let name = self.console.input("Enter the department's name:")?;
        add_department(&self.conn, &name)?;
        self.console.info("Department added successfully!");
        Ok(())
    }

    fn view_roles(&mut self) -> Result<()> {
        let roles = list_roles(&self.conn)?;
        let cells: Vec<Vec<String>> = roles
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.title.clone(),
                    r.salary.to_string(),
                    r.department_id.to_string(),
                ]
            })
            .collect();
        self.console
            .table(&["id", "title", "salary", "department_id"], &cells);
        Ok(())
    }

    /// Collect title and salary, then the owning department chosen from the
    /// current department list.
    fn add_role(&mut self) -> Result<()> {
        let departments = list_departments(&self.conn)?;
        if departments.is_empty() {
            self.console
                .info("No departments available. Add a department first.");
            return Ok(());
        }

        let title = self.console.input("Enter the role's title:")?;
        let salary: f64 = parse_required(&self.console.input("Enter the salary for this role:")?)?;
        let names: Vec<String> = departments.iter().map(|d| d.name.clone()).collect();
        let department = &departments[self
            .console
            .select("Select the department for this role:", &names)?];

        add_role(&self.conn, &title, salary, department.id)?;
        self.console.info("Role added successfully!");
        Ok(())
    }
}

/// Turn one joined employee row into display cells. Absent role, salary, or
/// manager fields render as empty cells.
fn employee_cells(row: &EmployeeRow) -> Vec<String> {
    vec![
        row.id.to_string(),
        row.first_name.clone(),
        row.last_name.clone(),
        row.role.clone().unwrap_or_default(),
        row.salary.map(|s| s.to_string()).unwrap_or_default(),
        row.manager.clone().unwrap_or_default(),
    ]
}

/// Parse a numeric field where blank means absent. The caller persists
/// `None` as SQL NULL.
fn parse_optional<T>(input: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|err| anyhow!("invalid value {trimmed:?}: {err}"))
}

/// Parse a numeric field that must be present. A failure aborts the action
/// before anything is written.
fn parse_required<T>(input: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|err| anyhow!("invalid value {trimmed:?}: {err}"))
}
