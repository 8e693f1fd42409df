//! Binary entry point that glues the SQLite-backed store to the menu loop:
//! open the database, announce the connection, and drive the menu until the
//! operator exits.

use std::process::ExitCode;

use staff_manager::{open_default, App, StdConsole};

/// Open the store and run the loop. A startup connection failure is the one
/// fatal path: it is reported and the process exits non-zero with no retry.
/// The exit action ends the loop normally, dropping (and thereby releasing)
/// the connection on the way out.
fn main() -> ExitCode {
    let conn = match open_default() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Error connecting to database: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("Connected to the database.");

    let mut app = App::new(conn, StdConsole::new());
    if let Err(err) = app.run() {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
