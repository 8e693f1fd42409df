//! The presentation boundary. The menu loop talks to an abstract [`Console`]
//! so interaction stays a strict sequence of labelled prompts: the real
//! implementation reads stdin and writes styled lines to stdout, while tests
//! substitute a scripted double and drive the loop without a terminal.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use crossterm::style::Stylize;

use super::table::render_table;

/// Everything the menu controller needs from the outside world: labelled
/// selection among known options, labelled free-text input, tabular result
/// display, and two severities of status line.
pub trait Console {
    /// Present `options` under `message` and return the chosen index.
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize>;
    /// Prompt for one line of free text, trimmed.
    fn input(&mut self, message: &str) -> Result<String>;
    /// Display result rows in columns under their headers.
    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]);
    /// Report a successful or neutral outcome.
    fn info(&mut self, message: &str);
    /// Report a failed action. The loop continues afterwards.
    fn error(&mut self, message: &str);
}

/// Line-oriented console over stdin/stdout. Selection lists are numbered and
/// re-prompt until a listed number is entered; an exhausted input stream is
/// an error so a closed stdin can never spin the loop.
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        StdConsole
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Err(anyhow!("input stream closed"));
        }
        Ok(line.trim().to_string())
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
        println!("{message}");
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {option}", i + 1);
        }

        loop {
            print!("> ");
            io::stdout().flush().context("failed to flush stdout")?;
            let line = self.read_line()?;
            match line.parse::<usize>() {
                Ok(n) if n >= 1 && n <= options.len() => return Ok(n - 1),
                _ => println!("{}", "Please enter one of the listed numbers.".red()),
            }
        }
    }

    fn input(&mut self, message: &str) -> Result<String> {
        print!("{message} ");
        io::stdout().flush().context("failed to flush stdout")?;
        self.read_line()
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        print!("{}", render_table(headers, rows));
    }

    fn info(&mut self, message: &str) {
        println!("{}", message.green());
    }

    fn error(&mut self, message: &str) {
        eprintln!("{}", message.red());
    }
}
