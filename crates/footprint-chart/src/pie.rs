//! Pie chart model and SVG generation
//!
//! Slices start at twelve o'clock and run counter-clockwise. Each slice is
//! labelled with its category outside the disc and its percentage inside.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write;

use footprint_core::{format_percent, EmissionBreakdown, EmissionCategory};

use crate::types::ChartOptions;

/// Chart title
pub const CHART_TITLE: &str = "Carbon Emission Distribution";

/// Text shown in place of slices when nothing was emitted
pub const EMPTY_CHART_NOTE: &str = "No emissions recorded";

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const EMPTY_FILL: &str = "#dddddd";

/// Fixed fill color for a category
pub fn slice_color(category: EmissionCategory) -> &'static str {
    match category {
        EmissionCategory::Energy => "#ff9999",
        EmissionCategory::Transport => "#66b3ff",
        EmissionCategory::Waste => "#99ff99",
    }
}

/// One wedge of the pie
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub category: EmissionCategory,
    pub value: f64,
    /// Share of the whole, 0..=100
    pub percent: f64,
}

impl Slice {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn color(&self) -> &'static str {
        slice_color(self.category)
    }
}

/// Emission distribution as a pie chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieChart {
    slices: Vec<Slice>,
}

impl PieChart {
    /// Build the chart from a breakdown
    ///
    /// Negative components are drawn as zero-size wedges.
    pub fn from_breakdown(breakdown: &EmissionBreakdown) -> Self {
        for category in EmissionCategory::ALL {
            if breakdown.get(category) < 0.0 {
                log::warn!(
                    "Negative {} emission ({}) drawn as an empty slice",
                    category,
                    breakdown.get(category)
                );
            }
        }

        let slices = breakdown
            .shares()
            .into_iter()
            .map(|share| Slice {
                category: share.category,
                value: share.value,
                percent: share.percent,
            })
            .collect();

        Self { slices }
    }

    /// All slices, including zero-size ones
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Slices that occupy part of the disc
    pub fn visible_slices(&self) -> impl Iterator<Item = &Slice> {
        self.slices.iter().filter(|slice| slice.value > 0.0)
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.visible_slices().next().is_none()
    }

    /// Render the chart as a standalone SVG document
    pub fn to_svg(&self, options: &ChartOptions) -> String {
        let width = f64::from(options.width.max(1));
        let height = f64::from(options.height.max(1));
        let title_size = (height * 0.035).max(10.0);
        let label_size = (height * 0.028).max(8.0);

        // The disc sits below the title and leaves room for outside labels
        let title_y = title_size * 1.8;
        let cx = width / 2.0;
        let cy = title_y + (height - title_y) / 2.0;
        let radius = (width.min(height - title_y) / 2.0) * 0.72;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        let _ = writeln!(
            svg,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
            width, height
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" text-anchor="middle">{}</text>"#,
            cx, title_y, FONT_FAMILY, title_size, CHART_TITLE
        );

        if self.is_empty() {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                cx, cy, radius, EMPTY_FILL
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" text-anchor="middle">{}</text>"#,
                cx, cy, FONT_FAMILY, label_size, EMPTY_CHART_NOTE
            );
            svg.push_str("</svg>\n");
            return svg;
        }

        let mut start = FRAC_PI_2;
        for slice in self.visible_slices() {
            let sweep = TAU * slice.percent / 100.0;
            let end = start + sweep;
            let mid = start + sweep / 2.0;

            svg.push_str(&wedge(cx, cy, radius, start, end, slice.color()));

            let (lx, ly) = polar(cx, cy, radius * 1.1, mid);
            let anchor = if mid.cos() >= 0.0 { "start" } else { "end" };
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
                lx,
                ly,
                FONT_FAMILY,
                label_size,
                anchor,
                slice.label()
            );

            let (px, py) = polar(cx, cy, radius * 0.6, mid);
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                px,
                py,
                FONT_FAMILY,
                label_size,
                format_percent(slice.percent)
            );

            start = end;
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Point on a circle; angles are counter-clockwise from three o'clock
fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy - r * angle.sin())
}

/// SVG element for a wedge between two angles
fn wedge(cx: f64, cy: f64, r: f64, start: f64, end: f64, fill: &str) -> String {
    let sweep = end - start;

    // An arc cannot start and end on the same point
    if sweep >= TAU - 1e-9 {
        return format!(
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>\n",
            cx, cy, r, fill
        );
    }

    let (x1, y1) = polar(cx, cy, r, start);
    let (x2, y2) = polar(cx, cy, r, end);
    let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };

    format!(
        "  <path d=\"M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 0 {x2:.2} {y2:.2} Z\" fill=\"{fill}\"/>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::compute;

    #[test]
    fn test_from_breakdown() {
        let chart = PieChart::from_breakdown(&compute(100.0, 50.0, 10.0));
        let labels: Vec<_> = chart.slices().iter().map(Slice::label).collect();
        assert_eq!(labels, ["Energy", "Transport", "Waste"]);
        assert!(!chart.is_empty());
    }

    #[test]
    fn test_slice_colors() {
        assert_eq!(slice_color(EmissionCategory::Energy), "#ff9999");
        assert_eq!(slice_color(EmissionCategory::Transport), "#66b3ff");
        assert_eq!(slice_color(EmissionCategory::Waste), "#99ff99");
    }

    #[test]
    fn test_svg_contains_title_labels_and_percentages() {
        let chart = PieChart::from_breakdown(&compute(100.0, 50.0, 10.0));
        let svg = chart.to_svg(&ChartOptions::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(CHART_TITLE));
        for text in ["Energy", "Transport", "Waste", "68.7%", "28.3%", "2.9%"] {
            assert!(svg.contains(text), "missing {text}");
        }
        for color in ["#ff9999", "#66b3ff", "#99ff99"] {
            assert!(svg.contains(color), "missing {color}");
        }
        assert_eq!(svg.matches("<path").count(), 3);
    }

    #[test]
    fn test_first_slice_starts_at_top() {
        let chart = PieChart::from_breakdown(&compute(100.0, 50.0, 10.0));
        let options = ChartOptions::default();
        let svg = chart.to_svg(&options);

        // Energy wedge: centre, then straight up to the top of the disc
        let path = svg
            .lines()
            .find(|line| line.contains("<path"))
            .unwrap();
        let d = path.split('"').nth(1).unwrap();
        let coords: Vec<f64> = d
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect();
        let (cx, cy, x1, y1) = (coords[0], coords[1], coords[2], coords[3]);
        assert!((x1 - cx).abs() < 0.01);
        assert!(y1 < cy);
    }

    #[test]
    fn test_single_slice_is_full_circle() {
        let chart = PieChart::from_breakdown(&compute(0.0, 10.0, 0.0));
        let svg = chart.to_svg(&ChartOptions::default());

        assert_eq!(chart.visible_slices().count(), 1);
        assert!(!svg.contains("<path"));
        assert!(svg.contains("fill=\"#66b3ff\""));
        assert!(svg.contains("100.0%"));
        assert!(!svg.contains(">Energy<"));
    }

    #[test]
    fn test_empty_chart() {
        let chart = PieChart::from_breakdown(&compute(0.0, 0.0, 0.0));
        let svg = chart.to_svg(&ChartOptions::default());

        assert!(chart.is_empty());
        assert!(svg.contains(EMPTY_CHART_NOTE));
        assert!(svg.contains(CHART_TITLE));
        assert!(!svg.contains('%'));
    }

    #[test]
    fn test_negative_component_not_drawn() {
        let chart = PieChart::from_breakdown(&compute(-100.0, 50.0, 10.0));
        let svg = chart.to_svg(&ChartOptions::default());

        assert_eq!(chart.slices().len(), 3);
        assert_eq!(chart.visible_slices().count(), 2);
        assert!(!svg.contains("#ff9999"));
    }

    #[test]
    fn test_huge_values_split_evenly() {
        let breakdown = EmissionBreakdown {
            energy_emission: 1e308,
            transport_emission: 1e308,
            waste_emission: 1e308,
            total_emission: f64::MAX,
        };
        let chart = PieChart::from_breakdown(&breakdown);
        let svg = chart.to_svg(&ChartOptions::default());

        assert!(!chart.is_empty());
        assert_eq!(svg.matches("33.3%").count(), 3);
        assert!(!svg.contains("0.0%"));
    }

    #[test]
    fn test_custom_size() {
        let chart = PieChart::from_breakdown(&compute(1.0, 1.0, 1.0));
        let svg = chart.to_svg(&ChartOptions::new().with_size(800, 600));
        assert!(svg.contains("viewBox=\"0 0 800 600\""));
    }
}
