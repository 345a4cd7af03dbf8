//! Latest-tenants table

use std::fmt::Write;

use crate::models::TenantRecord;

const HEADERS: [&str; 4] = ["#", "School ID", "Name", "Created At"];

/// Render the latest tenants with 1-based row numbers
pub fn render_table(records: &[TenantRecord]) -> String {
    let mut output = String::new();

    if records.is_empty() {
        let _ = writeln!(output, "No tenants yet.");
        return output;
    }

    let rows: Vec<[String; 4]> = records
        .iter()
        .enumerate()
        .map(|(i, t)| {
            [
                (i + 1).to_string(),
                t.school_id.clone(),
                t.display_name().to_string(),
                t.created_at.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut output, &HEADERS.map(String::from), &widths);
    let total: usize = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    let _ = writeln!(output, "{}", "-".repeat(total));

    for row in &rows {
        write_row(&mut output, row, &widths);
    }

    output
}

fn write_row(output: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(output, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows() {
        let records = vec![
            TenantRecord::new("SCH-001")
                .name("Green Valley")
                .created_at("2025-07-01T09:00:00 IST"),
            TenantRecord::new("SCH-002"),
        ];

        let out = render_table(&records);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# | School ID | Name"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("1 | SCH-001"));
        assert!(lines[2].contains("Green Valley"));
        assert!(lines[3].contains("N/A"));
        assert!(lines[3].ends_with('-'));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_table(&[]), "No tenants yet.\n");
    }
}
