//! Thin wrappers that funnel every repository statement through a single
//! query path and a single execute path. Centralizing the two calls means
//! error classification happens in exactly one place and no repository
//! function ever returns a raw rusqlite error.

use rusqlite::{Connection, Params, Row};

use super::error::{StoreError, StoreResult};

/// Run a SELECT-shaped statement and collect the mapped rows. Each call is a
/// single, independent statement; nothing here opens a transaction.
pub(crate) fn query<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    map_row: F,
) -> StoreResult<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql).map_err(StoreError::from_sql)?;
    let rows = stmt
        .query_map(params, map_row)
        .map_err(StoreError::from_sql)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(StoreError::from_sql)?;
    Ok(rows)
}

/// Run an INSERT/UPDATE/DELETE and return the affected-row count. Callers
/// decide whether a zero count is a no-op worth surfacing.
pub(crate) fn execute<P: Params>(conn: &Connection, sql: &str, params: P) -> StoreResult<usize> {
    conn.execute(sql, params).map_err(StoreError::from_sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_in_memory;

    #[test]
    fn malformed_sql_is_a_query_error() {
        let conn = open_in_memory().unwrap();
        let err = execute(&conn, "FROB departments", []).unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[test]
    fn query_maps_rows_in_order() {
        let conn = open_in_memory().unwrap();
        execute(&conn, "INSERT INTO departments (name) VALUES ('A'), ('B')", []).unwrap();
        let names = query(
            &conn,
            "SELECT name FROM departments ORDER BY id",
            [],
            |row| row.get::<_, String>(0),
        )
        .unwrap();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }
}
