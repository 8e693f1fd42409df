//! Plain-text columnar rendering for query results. The repository hands the
//! menu loop ordered field/value rows; this module lines them up under their
//! headers so listings read like a table instead of a raw dump.

/// Render headers plus rows into an aligned block of text. Column widths are
/// the maximum of the header and every cell in that column; cells are
/// left-aligned with a two-space gutter.
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let separators: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    push_row(&mut out, &widths, headers.iter().copied());
    push_row(&mut out, &widths, separators.iter().map(|s| s.as_str()));
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(|c| c.as_str()));
    }
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let width = widths.get(i).copied().unwrap_or(0);
        for _ in cell.len()..width {
            line.push(' ');
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
