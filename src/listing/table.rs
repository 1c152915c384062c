//! Text table rendering for listings.

use super::rows::{DisplayRow, TableFormat};

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, to: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(s))));
    out
}

/// Render `rows` under `headers`; the result has no trailing newline.
///
/// Columns are left-aligned and padded to their widest cell.
pub fn render_table(headers: &[&str], rows: &[DisplayRow], format: TableFormat) -> String {
    let cell = |row: &DisplayRow, col: usize| -> String {
        row.cells.get(col).cloned().unwrap_or_default()
    };

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .map(|row| width(&cell(row, col)))
                .chain(std::iter::once(width(headers[col])))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| (0..headers.len()).map(|col| cell(row, col)).collect())
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 4);
    match format {
        TableFormat::Github => {
            let line = |cells: &[String]| {
                let padded: Vec<String> = cells
                    .iter()
                    .zip(&widths)
                    .map(|(c, w)| format!(" {} ", pad(c, *w)))
                    .collect();
                format!("|{}|", padded.join("|"))
            };
            lines.push(line(header_cells.as_slice()));
            let rule: Vec<String> = widths
                .iter()
                .map(|w| format!(":{}", "-".repeat(w + 1)))
                .collect();
            lines.push(format!("|{}|", rule.join("|")));
            lines.extend(body.iter().map(|r| line(r.as_slice())));
        }
        TableFormat::Rst => {
            let line = |cells: &[String]| {
                let padded: Vec<String> =
                    cells.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
                padded.join("  ").trim_end().to_string()
            };
            let rule = widths
                .iter()
                .map(|w| "=".repeat(*w))
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(rule.clone());
            lines.push(line(header_cells.as_slice()));
            lines.push(rule.clone());
            lines.extend(body.iter().map(|r| line(r.as_slice())));
            lines.push(rule);
        }
        TableFormat::Plain => {
            let line = |cells: &[String]| {
                let padded: Vec<String> =
                    cells.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
                padded.join("  ").trim_end().to_string()
            };
            lines.push(line(header_cells.as_slice()));
            lines.extend(body.iter().map(|r| line(r.as_slice())));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<DisplayRow> {
        vec![
            DisplayRow {
                cells: vec!["TransE".to_string(), "Bordes, 2013".to_string()],
            },
            DisplayRow {
                cells: vec!["RotatE".to_string(), "Sun, 2019".to_string()],
            },
        ]
    }

    #[test]
    fn test_plain() {
        let table = render_table(&["Name", "Citation"], &rows(), TableFormat::Plain);
        assert_eq!(
            table,
            "Name    Citation\nTransE  Bordes, 2013\nRotatE  Sun, 2019"
        );
    }

    #[test]
    fn test_github() {
        let table = render_table(&["Name", "Citation"], &rows(), TableFormat::Github);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "| Name   | Citation     |");
        assert_eq!(lines[1], "|:-------|:-------------|");
        assert_eq!(lines[2], "| TransE | Bordes, 2013 |");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_rst() {
        let table = render_table(&["Name", "Citation"], &rows(), TableFormat::Rst);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "======  ============");
        assert_eq!(lines[1], "Name    Citation");
        assert_eq!(lines[3], "TransE  Bordes, 2013");
        assert_eq!(lines[5], "======  ============");
    }

    #[test]
    fn test_empty_table_has_only_headers() {
        let table = render_table(&["Name", "Reference", "Description"], &[], TableFormat::Github);
        assert_eq!(table.lines().count(), 2);
    }
}
