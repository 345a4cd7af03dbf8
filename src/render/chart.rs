//! Terminal bar chart

use std::fmt::Write;

use crate::aggregate::{axis_ticks, SignupSeries};

const BAR: &str = "█";

/// Render a vertical bar chart
///
/// Each bucket gets `bar_width` columns, widened to fit its label plus a
/// separating space. Labels are never truncated.
pub fn render_chart(series: &SignupSeries, height: usize, bar_width: usize) -> String {
    let mut output = String::new();

    if series.is_empty() {
        let _ = writeln!(output, "No signups to chart");
        write_skipped(&mut output, series.skipped);
        return output;
    }

    let height = height.max(1) as u64;
    let bar_width = bar_width.max(3);
    let ticks = axis_ticks(series.max_signups());
    let top = ticks.last().copied().unwrap_or(1).max(1);
    let axis_width = top.to_string().len();

    let longest_label = series
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);
    let slot = bar_width.max(longest_label + 1);
    let bar = BAR.repeat(bar_width - 2);
    let bar_left = (slot - (bar_width - 2)) / 2;
    let bar_right = slot - (bar_width - 2) - bar_left;

    let rows_for = |value: u64| (value * height + top / 2) / top;

    let bar_rows: Vec<u64> = series
        .points
        .iter()
        .map(|p| match rows_for(p.signups) {
            0 if p.signups > 0 => 1,
            rows => rows,
        })
        .collect();

    for row in (1..=height).rev() {
        let tick = ticks
            .iter()
            .rev()
            .find(|t| **t > 0 && rows_for(**t) == row)
            .map(|t| t.to_string())
            .unwrap_or_default();

        let mut line = format!("{:>width$} |", tick, width = axis_width);
        for rows in &bar_rows {
            if *rows >= row {
                let _ = write!(
                    line,
                    "{}{}{}",
                    " ".repeat(bar_left),
                    bar,
                    " ".repeat(bar_right)
                );
            } else {
                line.push_str(&" ".repeat(slot));
            }
        }
        let _ = writeln!(output, "{}", line.trim_end());
    }

    let _ = writeln!(
        output,
        "{:>width$} +{}",
        0,
        "-".repeat(slot * series.len()),
        width = axis_width
    );

    let mut labels = " ".repeat(axis_width + 2);
    for point in &series.points {
        let _ = write!(labels, "{:^width$}", point.label, width = slot);
    }
    let _ = writeln!(output, "{}", labels.trim_end());

    write_skipped(&mut output, series.skipped);
    output
}

fn write_skipped(output: &mut String, skipped: usize) {
    if skipped > 0 {
        let _ = writeln!(
            output,
            "({} records skipped: missing or unparseable createdAt)",
            skipped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_signups, ChartPoint, Granularity, ZoneSuffixNormalizer};
    use crate::models::TenantRecord;
    use crate::render::RenderOptions;

    fn series(points: &[(&str, u64)], skipped: usize) -> SignupSeries {
        SignupSeries {
            granularity: Granularity::Day,
            points: points
                .iter()
                .map(|(label, signups)| ChartPoint {
                    label: label.to_string(),
                    signups: *signups,
                })
                .collect(),
            skipped,
        }
    }

    #[test]
    fn test_bars_scale_to_height() {
        let out = render_chart(&series(&[("22 Jun", 2), ("01 Jul", 1)], 0), 4, 8);
        let lines: Vec<_> = out.lines().collect();

        // 4 bar rows, baseline, labels
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("2 |"));
        assert_eq!(lines[0].matches(BAR).count(), 6);
        assert!(lines[2].starts_with("1 |"));
        assert_eq!(lines[2].matches(BAR).count(), 12);
        assert_eq!(lines[4], format!("0 +{}", "-".repeat(16)));

        let first = lines[5].find("22 Jun").unwrap();
        let second = lines[5].find("01 Jul").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_width_grows_with_bucket_count() {
        let narrow = render_chart(&series(&[("a", 1)], 0), 3, 6);
        let wide = render_chart(&series(&[("a", 1), ("b", 1), ("c", 1)], 0), 3, 6);

        let baseline = |s: &str| s.lines().find(|l| l.contains('+')).unwrap().len();
        assert_eq!(baseline(&wide) - baseline(&narrow), 12);
    }

    #[test]
    fn test_small_counts_still_visible() {
        let out = render_chart(&series(&[("big", 100), ("tiny", 1)], 0), 5, 6);
        let bottom_row = out.lines().nth(4).unwrap();
        assert_eq!(bottom_row.matches(BAR).count(), 8);
    }

    #[test]
    fn test_empty_and_skipped() {
        let out = render_chart(&series(&[], 2), 5, 8);
        assert!(out.contains("No signups to chart"));
        assert!(out.contains("2 records skipped"));

        let out = render_chart(&series(&[("22 Jun", 1)], 0), 5, 8);
        assert!(!out.contains("skipped"));
    }

    fn label_line(out: &str) -> &str {
        out.lines()
            .skip_while(|l| !l.contains('+'))
            .nth(1)
            .unwrap()
    }

    #[test]
    fn test_long_labels_are_kept_whole_and_separated() {
        let records = vec![
            TenantRecord::new("S1").created_at("2024-12-31T10:00:00 IST"),
            TenantRecord::new("S2").created_at("2025-01-01T10:00:00 IST"),
            TenantRecord::new("S3").created_at("2025-06-22T10:00:00 IST"),
        ];
        let normalizer = ZoneSuffixNormalizer::default();
        let options = RenderOptions::default();

        let day = aggregate_signups(&records, Granularity::Day, &normalizer);
        let out = render_chart(&day, options.chart_height, options.bar_width);
        assert!(label_line(&out).contains("31 Dec 2024 01 Jan 2025 22 Jun 2025"));
        // 11-char labels widen each slot to 12 columns
        assert!(out.contains(&format!("0 +{}", "-".repeat(36))));

        let month = aggregate_signups(&records, Granularity::Month, &normalizer);
        let out = render_chart(&month, options.chart_height, options.bar_width);
        assert!(label_line(&out).contains("Dec 2024 Jan 2025 Jun 2025"));
    }
}
