//! Console and markdown table rendering.

use comfy_table::{Cell, Table};

use unitgrade_core::{Grid, Tally};

/// Render a grid as a console table, first row as header.
pub fn render_table(grid: &Grid) -> String {
    let mut table = Table::new();
    let mut rows = grid.iter();
    if let Some(header) = rows.next() {
        table.set_header(header.iter().map(Cell::new).collect::<Vec<_>>());
    }
    for row in rows {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    table.to_string()
}

/// Per-student verdict counts as a console table.
pub fn render_tallies(tallies: &[Tally]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Student", "Correct", "Incorrect", "Invalid", "Blank"]);
    for t in tallies {
        table.add_row(vec![
            Cell::new(&t.student_name),
            Cell::new(t.correct),
            Cell::new(t.incorrect),
            Cell::new(t.invalid),
            Cell::new(t.blank),
        ]);
    }
    table.to_string()
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

/// Render a grid as a markdown pipe table, first row as header.
pub fn to_markdown(grid: &Grid) -> String {
    let mut md = String::new();
    let Some((header, body)) = grid.split_first() else {
        return md;
    };

    let line = |cells: &[String]| {
        let escaped: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
        format!("| {} |\n", escaped.join(" | "))
    };

    md.push_str(&line(header));
    md.push_str(&format!(
        "|{}\n",
        header.iter().map(|_| "---|").collect::<String>()
    ));
    for row in body {
        md.push_str(&line(row));
    }
    md
}
