//! Terminal output helpers.
//!
//! Status lines follow one register across the tool: `✓` for success,
//! `x` for failures, `!` for warnings. `Table` renders small listings
//! (`fargo targets`, `fargo profile list`) with box-drawing borders,
//! sized by visible width so colored cells line up.

use colored::*;
use console::measure_text_width;

pub fn status(msg: &str) {
    println!("{} {}", "[fargo]".blue(), msg);
}

pub fn ok(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn warn(msg: &str) {
    println!("{} {}", "!".yellow(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "x".red(), msg);
}

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn print(&self) {
        if self.headers.is_empty() {
            return;
        }

        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| measure_text_width(h))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }

        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {left}{}{right}", segments.join(mid))
        };

        let print_cells = |cells: &[String], bold: bool| {
            print!("  │");
            for (i, cell) in cells.iter().enumerate() {
                let pad = widths[i].saturating_sub(measure_text_width(cell));
                let text = if bold {
                    cell.bold().to_string()
                } else {
                    cell.clone()
                };
                print!(" {}{} │", text, " ".repeat(pad));
            }
            println!();
        };

        println!("{}", rule("┌", "┬", "┐"));
        print_cells(&self.headers, true);
        println!("{}", rule("├", "┼", "┤"));
        for row in &self.rows {
            print_cells(row, false);
        }
        println!("{}", rule("└", "┴", "┘"));
    }
}
