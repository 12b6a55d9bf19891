//! Terminal rendering of the coverage curve.
//!
//! One horizontal bar per threshold. The axis runs from the largest
//! multiple of ten at or below the lowest coverage up to 100%.

use voccov_core::CoveragePoint;

/// Default bar area width in columns.
pub const DEFAULT_WIDTH: usize = 50;

/// Render `points` as a bar chart headed by `title`.
pub fn render(title: &str, points: &[CoveragePoint], width: usize) -> String {
    let mut lines = vec![title.to_string()];
    if points.is_empty() {
        lines.push("(no thresholds)".to_string());
        return lines.join("\n") + "\n";
    }

    let floor = axis_floor(points);
    let label_width = points
        .iter()
        .map(|point| point.threshold.to_string().len())
        .max()
        .unwrap_or(0);

    for point in points {
        let filled = bar_length(point.coverage, floor, width);
        lines.push(format!(
            "{:>label_width$} │{}{} {:>6.2}%",
            point.threshold,
            "█".repeat(filled),
            " ".repeat(width - filled),
            point.coverage,
        ));
    }
    lines.push(format!("{:>label_width$} └{}", "", "─".repeat(width)));
    lines.push(format!(
        "{:>label_width$}  {:<left$}{:>right$}",
        "",
        format!("{floor:.0}%"),
        "100%",
        left = width / 2,
        right = width - width / 2,
    ));

    lines.join("\n") + "\n"
}

/// Lowest coverage rounded down to a multiple of ten, within 0–90.
fn axis_floor(points: &[CoveragePoint]) -> f64 {
    let min = points
        .iter()
        .map(|point| point.coverage)
        .fold(f64::INFINITY, f64::min);
    ((min / 10.0).floor() * 10.0).clamp(0.0, 90.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_length(coverage: f64, floor: f64, width: usize) -> usize {
    let fraction = ((coverage - floor) / (100.0 - floor)).clamp(0.0, 1.0);
    ((fraction * width as f64).round() as usize).min(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(threshold: usize, coverage: f64) -> CoveragePoint {
        CoveragePoint {
            threshold,
            coverage,
        }
    }

    #[test]
    fn floor_tracks_lowest_coverage() {
        assert_eq!(axis_floor(&[point(1, 95.0), point(2, 99.0)]), 90.0);
        assert_eq!(axis_floor(&[point(1, 42.0)]), 40.0);
        assert_eq!(axis_floor(&[point(1, 100.0)]), 90.0);
        assert_eq!(axis_floor(&[point(1, 0.0)]), 0.0);
    }

    #[test]
    fn bars_scale_between_floor_and_full() {
        assert_eq!(bar_length(100.0, 90.0, 50), 50);
        assert_eq!(bar_length(95.0, 90.0, 50), 25);
        assert_eq!(bar_length(90.0, 90.0, 50), 0);
        assert_eq!(bar_length(0.0, 0.0, 10), 0);
    }

    #[test]
    fn renders_one_bar_per_point() {
        let chart = render("book.txt stat data", &[point(4000, 95.0), point(60000, 100.0)], 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "book.txt stat data");
        assert!(lines[1].starts_with(" 4000 │█████ "));
        assert!(lines[1].ends_with(" 95.00%"));
        assert!(lines[2].starts_with("60000 │██████████ "));
        assert!(lines[4].contains("90%"));
        assert!(lines[4].ends_with("100%"));
    }

    #[test]
    fn empty_points_render_placeholder() {
        let chart = render("empty", &[], 10);
        assert_eq!(chart, "empty\n(no thresholds)\n");
    }
}
