use rusqlite::{params, Connection};

use super::error::StoreResult;
use super::store::{execute, query};
use crate::models::Role;

/// Retrieve every role. Doubles as the source for the role selection prompt
/// when adding an employee or reassigning one.
pub fn list_roles(conn: &Connection) -> StoreResult<Vec<Role>> {
    query(
        conn,
        "SELECT id, title, salary, department_id FROM roles ORDER BY id",
        [],
        |row| {
            Ok(Role {
                id: row.get(0)?,
                title: row.get(1)?,
                salary: row.get(2)?,
                department_id: row.get(3)?,
            })
        },
    )
}

/// Insert a new role under an existing department. An unknown
/// `department_id` is rejected by the foreign key and surfaces as a
/// constraint violation.
pub fn add_role(
    conn: &Connection,
    title: &str,
    salary: f64,
    department_id: i64,
) -> StoreResult<Role> {
    execute(
        conn,
        "INSERT INTO roles (title, salary, department_id) VALUES (?1, ?2, ?3)",
        params![title, salary, department_id],
    )?;

    Ok(Role {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        salary,
        department_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_in_memory;
    use crate::db::departments::add_department;
    use crate::db::error::StoreError;

    #[test]
    fn add_then_list_round_trips() {
        let conn = open_in_memory().unwrap();
        let dept = add_department(&conn, "Engineering").unwrap();

        let role = add_role(&conn, "Engineer", 80_000.0, dept.id).unwrap();
        assert_eq!(role.title, "Engineer");

        let listed = list_roles(&conn).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].salary, 80_000.0);
        assert_eq!(listed[0].department_id, dept.id);
    }

    #[test]
    fn unknown_department_is_a_constraint_violation() {
        let conn = open_in_memory().unwrap();
        let err = add_role(&conn, "Orphan", 1.0, 999).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert!(list_roles(&conn).unwrap().is_empty());
    }
}
