use rusqlite::{params, Connection};

use super::error::StoreResult;
use super::store::{execute, query};
use crate::models::Department;

/// Retrieve every department. Departments are the root entity, so this list
/// also feeds the selection prompt when a new role is added.
pub fn list_departments(conn: &Connection) -> StoreResult<Vec<Department>> {
    query(
        conn,
        "SELECT id, name FROM departments ORDER BY id",
        [],
        |row| {
            Ok(Department {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
}

/// Insert a new department, returning the hydrated struct so the caller can
/// echo it back to the operator without a re-read.
pub fn add_department(conn: &Connection, name: &str) -> StoreResult<Department> {
    execute(
        conn,
        "INSERT INTO departments (name) VALUES (?1)",
        params![name],
    )?;

    Ok(Department {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_in_memory;

    #[test]
    fn add_then_list_round_trips() {
        let conn = open_in_memory().unwrap();
        assert!(list_departments(&conn).unwrap().is_empty());

        let dept = add_department(&conn, "Engineering").unwrap();
        assert_eq!(dept.name, "Engineering");

        let listed = list_departments(&conn).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, dept.id);
        assert_eq!(listed[0].name, "Engineering");
    }
}
