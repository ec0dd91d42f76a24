//! Report to Typst markup transpiler
//!
//! Lays out the footprint report: title, summary lines, generation date,
//! summary table, chart and footer.

use chrono::NaiveDateTime;
use footprint_core::{format_kg, EmissionBreakdown};

/// Report title
pub const REPORT_TITLE: &str = "Carbon Footprint Report";
/// Heading above the summary lines
pub const REPORT_SUBTITLE: &str = "Summary of Carbon Emissions";
/// Footer attribution
pub const FOOTER_TEXT: &str = "Generated by the Carbon Footprint Calculator";
/// Format of the generation timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TITLE_COLOR: &str = "#00008b";
const HEADER_FILL: &str = "gray";
const HEADER_TEXT_COLOR: &str = "#f5f5f5";
const BODY_FILL: &str = "#f5f5dc";

/// Everything the report layout needs
#[derive(Debug, Clone)]
pub struct ReportContent<'a> {
    pub breakdown: &'a EmissionBreakdown,
    pub generated_at: NaiveDateTime,
    /// Virtual path of the chart image, if one is embedded
    pub chart_path: Option<&'a str>,
}

/// Transpiler for converting a report to Typst markup
pub struct Transpiler;

impl Transpiler {
    /// Transpile a report to Typst markup
    pub fn transpile(content: &ReportContent<'_>) -> String {
        let mut output = String::new();

        output.push_str(&Self::transpile_preamble());
        output.push_str(&Self::transpile_header());
        output.push_str(&Self::transpile_summary(content.breakdown));
        output.push_str(&format!(
            "#text(size: 10pt)[Generated Date: {}]\n\n",
            escape_markup(&content.generated_at.format(TIMESTAMP_FORMAT).to_string())
        ));
        output.push_str(&Self::transpile_table(content.breakdown));

        if let Some(path) = content.chart_path {
            output.push_str(&format!(
                "#align(center, image(\"{}\", width: 400pt, height: 250pt, fit: \"contain\"))\n",
                escape_string(path)
            ));
        }

        output
    }

    /// Page setup, document metadata and footer
    fn transpile_preamble() -> String {
        format!(
            "#set document(title: \"{}\")\n\
             #set page(paper: \"us-letter\", margin: (x: 50pt, top: 22pt, bottom: 50pt), \
             footer: text(size: 10pt)[{}])\n\
             #set text(size: 12pt)\n\n",
            escape_string(REPORT_TITLE),
            escape_markup(FOOTER_TEXT)
        )
    }

    /// Bold title with a rule beneath, then the sub-header
    fn transpile_header() -> String {
        format!(
            "#align(center, text(size: 18pt, weight: \"bold\", fill: rgb(\"{}\"))[{}])\n\
             #line(length: 100%, stroke: 0.5pt)\n\n\
             #text(size: 14pt, weight: \"bold\")[{}]\n\n",
            TITLE_COLOR,
            escape_markup(REPORT_TITLE),
            escape_markup(REPORT_SUBTITLE)
        )
    }

    /// The four summary lines, energy to total
    fn transpile_summary(breakdown: &EmissionBreakdown) -> String {
        let lines = [
            ("Energy Emission (Electricity)", breakdown.energy_emission),
            ("Transport Emission", breakdown.transport_emission),
            ("Waste Emission", breakdown.waste_emission),
            ("Total Emission", breakdown.total_emission),
        ];

        let body: Vec<String> = lines
            .iter()
            .map(|(label, value)| {
                escape_markup(&format!("{}: {} kg CO2", label, format_kg(*value)))
            })
            .collect();

        format!("{}\n\n", body.join(" \\\n"))
    }

    /// Five-row summary table with shaded header and full grid
    fn transpile_table(breakdown: &EmissionBreakdown) -> String {
        let mut output = String::new();

        output.push_str("#align(center, table(\n");
        output.push_str("  columns: (200pt, 150pt),\n");
        output.push_str("  align: center + horizon,\n");
        output.push_str("  stroke: 1pt + black,\n");
        output.push_str(&format!(
            "  fill: (_, y) => if y == 0 {{ {} }} else {{ rgb(\"{}\") }},\n",
            HEADER_FILL, BODY_FILL
        ));
        output.push_str("  table.header(\n");
        for heading in ["Category", "Emissions (kg CO2)"] {
            output.push_str(&format!(
                "    text(fill: rgb(\"{}\"), weight: \"bold\")[{}],\n",
                HEADER_TEXT_COLOR,
                escape_markup(heading)
            ));
        }
        output.push_str("  ),\n");

        for row in breakdown.rows() {
            output.push_str(&format!(
                "  [{}], [{}],\n",
                escape_markup(row.label),
                escape_markup(&row.formatted())
            ));
        }

        output.push_str("))\n\n");
        output
    }
}

/// Escape special characters in strings for Typst
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape characters with markup meaning inside Typst content blocks
fn escape_markup(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '#' | '*' | '_' | '$' | '@' | '<' | '>' | '[' | ']' | '`' | '~' | '/'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
