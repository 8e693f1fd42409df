//! Interaction module: the menu controller plus the console boundary it
//! prompts through.

mod app;
mod console;
mod table;

pub use app::{App, MenuAction};
pub use console::{Console, StdConsole};
