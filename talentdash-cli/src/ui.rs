//! Output helpers for the talentdash CLI
//!
//! Tables and JSON go to stdout; status lines and errors go to stderr.

use std::io::{self, Write};

use serde::Serialize;
use talentdash_core::reports::{Cell, ReportTable, TableRow};
use talentdash_core::DashError;

/// Print `table` as aligned text, or `table` as JSON when `json` is set.
pub fn emit_table(table: &ReportTable, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(table)
    } else {
        let mut out = io::stdout().lock();
        write_table(&mut out, table)?;
        Ok(())
    }
}

/// Print typed rows: as JSON records, or as a titled table.
pub fn emit_rows<R: TableRow + Serialize>(title: &str, rows: &[R], json: bool) -> anyhow::Result<()> {
    if json {
        print_json(rows)
    } else {
        emit_table(&ReportTable::from_rows(title, rows), false)
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn success(msg: impl AsRef<str>) {
    eprintln!("✓ {}", msg.as_ref());
}

/// Word a failure for the terminal.
pub fn print_error(err: &anyhow::Error) {
    match err.downcast_ref::<DashError>() {
        Some(dash) => eprintln!("✗ {}", describe(dash)),
        None => eprintln!("✗ {:#}", err),
    }
}

fn describe(err: &DashError) -> String {
    match err {
        DashError::Connection { reason } => {
            format!("Could not reach the database ({}). Nothing was changed.", reason)
        }
        DashError::DuplicateUser { username } => format!("Username '{}' is already taken.", username),
        DashError::JobNotFound { job_id } => format!("No job with ID {}.", job_id),
        DashError::Validation(v) => format!("Invalid input: {}.", v),
        DashError::InvalidRole { value } => {
            format!("'{}' is not a role; use 'admin' or 'recruiter'.", value)
        }
        DashError::Unauthorized { required } => format!("This needs the {} role.", required),
        DashError::NotAuthenticated => "Please log in first (--user).".to_string(),
        DashError::SessionExpired => "Session expired; log in again.".to_string(),
        DashError::Query { source } => format!("The database rejected the request: {}", source),
        DashError::Hashing { reason } => format!("Password hashing failed: {}", reason),
        DashError::Config { reason } => format!("Configuration problem: {}", reason),
    }
}

/// Render `table` with columns padded to their widest cell.
pub fn write_table<W: Write>(out: &mut W, table: &ReportTable) -> io::Result<()> {
    writeln!(out, "{}", table.title)?;
    if table.is_empty() {
        return writeln!(out, "(no rows)");
    }

    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(render_cell).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &rendered {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let header: Vec<String> = table.columns.iter().map(|c| c.to_string()).collect();
    write_row(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in &rendered {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Null => "-".to_string(),
        other => other.to_string().replace('\n', " "),
    }
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReportTable {
        ReportTable {
            title: "Top Skills".into(),
            columns: vec!["Skill", "Count"],
            rows: vec![
                vec![Cell::Text("Python".into()), Cell::Int(12)],
                vec![Cell::Text("Go".into()), Cell::Null],
            ],
        }
    }

    #[test]
    fn aligns_columns() {
        let mut out = Vec::new();
        write_table(&mut out, &table()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Top Skills");
        assert_eq!(lines[1], "Skill   Count");
        assert_eq!(lines[2], "------  -----");
        assert_eq!(lines[3], "Python  12");
        assert_eq!(lines[4], "Go      -");
    }

    #[test]
    fn empty_table_says_so() {
        let mut empty = table();
        empty.rows.clear();
        let mut out = Vec::new();
        write_table(&mut out, &empty).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(no rows)"));
    }

    #[test]
    fn errors_are_worded_for_people() {
        assert_eq!(describe(&DashError::JobNotFound { job_id: 42 }), "No job with ID 42.");
        assert!(describe(&DashError::connection("refused")).contains("Nothing was changed"));
    }
}
