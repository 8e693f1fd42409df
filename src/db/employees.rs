use std::collections::HashSet;

use rusqlite::{params, Connection};

use super::error::{StoreError, StoreResult};
use super::store::{execute, query};
use crate::models::{Employee, EmployeeRow};

/// Retrieve the joined employee listing: each employee with their role's
/// title and salary and their manager's display name. Both joins are LEFT
/// JOINs, so an employee whose role or manager does not resolve still
/// appears, with the affected fields absent. The `||` concatenation
/// propagates NULL, which is exactly what we want for the missing-manager
/// case.
pub fn list_employees(conn: &Connection) -> StoreResult<Vec<EmployeeRow>> {
    query(
        conn,
        "SELECT
            e.id,
            e.first_name,
            e.last_name,
            r.title,
            r.salary,
            m.first_name || ' ' || m.last_name
         FROM employees AS e
         LEFT JOIN roles AS r ON e.role_id = r.id
         LEFT JOIN employees AS m ON e.manager_id = m.id
         ORDER BY e.id",
        [],
        |row| {
            Ok(EmployeeRow {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                role: row.get(3)?,
                salary: row.get(4)?,
                manager: row.get(5)?,
            })
        },
    )
}

/// Retrieve the raw employee rows. Used by the selection prompts (update and
/// delete flows) which need ids and names without the joined projection.
pub fn fetch_employees(conn: &Connection) -> StoreResult<Vec<Employee>> {
    query(
        conn,
        "SELECT id, first_name, last_name, role_id, manager_id, salary
         FROM employees ORDER BY id",
        [],
        |row| {
            Ok(Employee {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                role_id: row.get(3)?,
                manager_id: row.get(4)?,
                salary: row.get(5)?,
            })
        },
    )
}

/// Insert a new employee. Absent manager and salary are persisted as SQL
/// NULL; callers normalize blank input to `None` before getting here. An
/// unknown `role_id` or `manager_id` is rejected by the foreign keys and
/// surfaces as a constraint violation.
///
/// When a manager is supplied, the manager chain is walked first and the
/// insert is refused if that chain already cycles. A freshly inserted row
/// cannot itself close a cycle (nothing references its id yet), so the walk
/// only guards against damage already present in the table.
pub fn add_employee(
    conn: &Connection,
    first_name: &str,
    last_name: &str,
    role_id: i64,
    manager_id: Option<i64>,
    salary: Option<f64>,
) -> StoreResult<Employee> {
    if let Some(manager) = manager_id {
        ensure_acyclic_manager_chain(conn, manager)?;
    }

    execute(
        conn,
        "INSERT INTO employees (first_name, last_name, role_id, manager_id, salary)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![first_name, last_name, role_id, manager_id, salary],
    )?;

    Ok(Employee {
        id: conn.last_insert_rowid(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        role_id,
        manager_id,
        salary,
    })
}

/// Reassign an employee's role, touching nothing else. Zero affected rows
/// means the employee id matched nothing, which we surface as a distinct
/// not-found outcome instead of silent success.
pub fn update_employee_role(
    conn: &Connection,
    employee_id: i64,
    new_role_id: i64,
) -> StoreResult<()> {
    let updated = execute(
        conn,
        "UPDATE employees SET role_id = ?1 WHERE id = ?2",
        params![new_role_id, employee_id],
    )?;

    if updated == 0 {
        Err(StoreError::NotFound("employee"))
    } else {
        Ok(())
    }
}

/// Hard-delete an employee. The schema's `ON DELETE SET NULL` on the manager
/// self-reference clears `manager_id` on any reports, so no dangling ids are
/// left behind. Deleting an id that matches nothing is surfaced as
/// not-found; a second delete of the same id is therefore a reported no-op,
/// never a crash.
pub fn delete_employee(conn: &Connection, employee_id: i64) -> StoreResult<()> {
    let deleted = execute(
        conn,
        "DELETE FROM employees WHERE id = ?1",
        params![employee_id],
    )?;

    if deleted == 0 {
        Err(StoreError::NotFound("employee"))
    } else {
        Ok(())
    }
}

/// Walk the manager chain upward from `start` with a visited-set and reject
/// it if any id repeats. An unknown starting id simply ends the walk; the
/// foreign key rejects it during the insert proper.
fn ensure_acyclic_manager_chain(conn: &Connection, start: i64) -> StoreResult<()> {
    let mut visited = HashSet::new();
    let mut current = Some(start);

    while let Some(id) = current {
        if !visited.insert(id) {
            return Err(StoreError::Constraint(format!(
                "manager chain starting at employee {start} contains a cycle"
            )));
        }
        current = query(
            conn,
            "SELECT manager_id FROM employees WHERE id = ?1",
            params![id],
            |row| row.get::<_, Option<i64>>(0),
        )?
        .into_iter()
        .next()
        .flatten();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_in_memory;
    use crate::db::departments::add_department;
    use crate::db::roles::add_role;
    use crate::models::Role;

    /// One department with one role, the fixture most cases start from.
    fn seeded_conn() -> (Connection, Role) {
        let conn = open_in_memory().unwrap();
        let dept = add_department(&conn, "Engineering").unwrap();
        let role = add_role(&conn, "Engineer", 80_000.0, dept.id).unwrap();
        (conn, role)
    }

    #[test]
    fn add_then_list_joins_role_title_and_salary() {
        let (conn, role) = seeded_conn();
        assert!(list_employees(&conn).unwrap().is_empty());

        let ada = add_employee(&conn, "Ada", "Lovelace", role.id, None, None).unwrap();

        let rows = list_employees(&conn).unwrap();
        assert_eq!(
            rows,
            vec![EmployeeRow {
                id: ada.id,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                role: Some("Engineer".to_string()),
                salary: Some(80_000.0),
                manager: None,
            }]
        );
    }

    #[test]
    fn absent_manager_and_salary_persist_as_null() {
        let (conn, role) = seeded_conn();
        add_employee(&conn, "Ada", "Lovelace", role.id, None, None).unwrap();

        let raw = fetch_employees(&conn).unwrap();
        assert_eq!(raw[0].manager_id, None);
        assert_eq!(raw[0].salary, None);
    }

    #[test]
    fn unknown_role_is_rejected_and_writes_nothing() {
        let (conn, _role) = seeded_conn();
        let err = add_employee(&conn, "Ada", "Lovelace", 999, None, None).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert!(list_employees(&conn).unwrap().is_empty());
    }

    #[test]
    fn manager_name_appears_in_the_listing() {
        let (conn, role) = seeded_conn();
        let grace = add_employee(&conn, "Grace", "Hopper", role.id, None, None).unwrap();
        add_employee(&conn, "Ada", "Lovelace", role.id, Some(grace.id), None).unwrap();

        let rows = list_employees(&conn).unwrap();
        assert_eq!(rows[1].manager.as_deref(), Some("Grace Hopper"));
    }

    #[test]
    fn update_role_changes_only_the_role_field() {
        let (conn, role) = seeded_conn();
        let lead = add_role(&conn, "Lead Engineer", 110_000.0, role.department_id).unwrap();
        let grace = add_employee(&conn, "Grace", "Hopper", role.id, None, None).unwrap();
        let ada =
            add_employee(&conn, "Ada", "Lovelace", role.id, Some(grace.id), Some(90_000.0))
                .unwrap();

        update_employee_role(&conn, ada.id, lead.id).unwrap();

        let raw = fetch_employees(&conn)
            .unwrap()
            .into_iter()
            .find(|e| e.id == ada.id)
            .unwrap();
        assert_eq!(raw.role_id, lead.id);
        assert_eq!(raw.first_name, "Ada");
        assert_eq!(raw.last_name, "Lovelace");
        assert_eq!(raw.manager_id, Some(grace.id));
        assert_eq!(raw.salary, Some(90_000.0));

        let rows = list_employees(&conn).unwrap();
        let row = rows.iter().find(|r| r.id == ada.id).unwrap();
        assert_eq!(row.role.as_deref(), Some("Lead Engineer"));
        assert_eq!(row.salary, Some(110_000.0));
    }

    #[test]
    fn update_role_with_unknown_employee_reports_not_found() {
        let (conn, role) = seeded_conn();
        let err = update_employee_role(&conn, 999, role.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound("employee")));
    }

    #[test]
    fn update_role_to_unknown_role_is_a_constraint_violation() {
        let (conn, role) = seeded_conn();
        let ada = add_employee(&conn, "Ada", "Lovelace", role.id, None, None).unwrap();
        let err = update_employee_role(&conn, ada.id, 999).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[test]
    fn delete_removes_one_row_and_a_second_delete_is_a_noop() {
        let (conn, role) = seeded_conn();
        let ada = add_employee(&conn, "Ada", "Lovelace", role.id, None, None).unwrap();

        delete_employee(&conn, ada.id).unwrap();
        assert!(list_employees(&conn).unwrap().is_empty());

        let err = delete_employee(&conn, ada.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound("employee")));
    }

    #[test]
    fn deleting_a_manager_clears_the_reports_reference() {
        let (conn, role) = seeded_conn();
        let grace = add_employee(&conn, "Grace", "Hopper", role.id, None, None).unwrap();
        let ada = add_employee(&conn, "Ada", "Lovelace", role.id, Some(grace.id), None).unwrap();

        delete_employee(&conn, grace.id).unwrap();

        let raw = fetch_employees(&conn).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].id, ada.id);
        assert_eq!(raw[0].manager_id, None);

        let rows = list_employees(&conn).unwrap();
        assert_eq!(rows[0].manager, None);
    }

    #[test]
    fn a_cycling_manager_chain_blocks_the_insert() {
        let (conn, role) = seeded_conn();
        let grace = add_employee(&conn, "Grace", "Hopper", role.id, None, None).unwrap();
        let ada = add_employee(&conn, "Ada", "Lovelace", role.id, Some(grace.id), None).unwrap();

        // Forge a cycle behind the API's back, as a hand-edited database
        // could.
        conn.execute(
            "UPDATE employees SET manager_id = ?1 WHERE id = ?2",
            params![ada.id, grace.id],
        )
        .unwrap();

        let err =
            add_employee(&conn, "Charles", "Babbage", role.id, Some(ada.id), None).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(fetch_employees(&conn).unwrap().len(), 2);
    }
}
