//! ASCII box-table rendering for `ResultSet` tables (§6).

use bgmd_core::resultset::Table;

/// Renders a result table as a box-drawn grid, columns sized to their widest
/// cell (header included). An empty table still prints its header row.
#[must_use]
pub fn render_table(table: &Table) -> String {
    let headers: Vec<&str> = table.header.iter().map(|h| h.name.as_str()).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    write_separator(&mut out, &widths);
    write_row(&mut out, &headers, &widths);
    write_separator(&mut out, &widths);
    for row in &table.rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_row(&mut out, &cells, &widths);
    }
    write_separator(&mut out, &widths);
    out
}

fn write_separator(out: &mut String, widths: &[usize]) {
    out.push('+');
    for w in widths {
        out.push_str(&"-".repeat(w + 2));
        out.push('+');
    }
    out.push('\n');
}

fn write_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    out.push('|');
    for (cell, w) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(w - cell.len()));
        out.push_str(" |");
    }
    out.push('\n');
}
