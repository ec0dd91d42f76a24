//! HTML views
//!
//! Self-contained pages for the calculator form and its result.

use footprint_core::{
    format_kg, EmissionBreakdown, FIELD_DISTANCE, FIELD_ELECTRICITY, FIELD_WASTE, PARAM_ENERGY,
    PARAM_TOTAL, PARAM_TRANSPORT, PARAM_WASTE,
};

/// Path of the report download endpoint
pub const DOWNLOAD_PATH: &str = "/download_pdf";

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 640px;
            margin: 0 auto;
            padding: 2rem;
            background: #f8f9fa;
        }
        h1 { color: #212529; border-bottom: 2px solid #dee2e6; padding-bottom: 0.5rem; }
        form, .result {
            background: white;
            padding: 1.5rem;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        label { display: block; margin-top: 1rem; font-weight: bold; }
        input[type=number] { width: 100%; padding: 0.5rem; margin-top: 0.25rem; }
        button, .button {
            display: inline-block;
            margin-top: 1.5rem;
            padding: 0.5rem 1rem;
            border: none;
            border-radius: 4px;
            background: #28a745;
            color: white;
            text-decoration: none;
        }
        table { width: 100%; border-collapse: collapse; }
        th, td { padding: 0.5rem; border-bottom: 1px solid #dee2e6; text-align: left; }
        td.value { text-align: right; font-family: 'SF Mono', Monaco, 'Courier New', monospace; }
        tr.total td { font-weight: bold; }
"#;

/// Wrap a page body in the shared layout
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <h1>{title}</h1>
{body}
</body>
</html>
"#
    )
}

/// The calculator input form
pub fn index_page() -> String {
    let fields = [
        (FIELD_ELECTRICITY, "Electricity usage (kWh)"),
        (FIELD_DISTANCE, "Travel distance (km)"),
        (FIELD_WASTE, "Waste (kg)"),
    ];

    let mut body = String::from("    <form method=\"post\" action=\"/\">\n");
    for (name, label) in fields {
        body.push_str(&format!(
            "        <label for=\"{name}\">{label}</label>\n        <input type=\"number\" step=\"any\" id=\"{name}\" name=\"{name}\" required>\n"
        ));
    }
    body.push_str("        <button type=\"submit\">Calculate</button>\n    </form>\n");

    page("Carbon Footprint Calculator", &body)
}

/// The computed breakdown with a link to the PDF report
pub fn result_page(breakdown: &EmissionBreakdown) -> String {
    let mut rows = String::new();
    for row in breakdown.rows() {
        let class = if row.label == "Total" { " class=\"total\"" } else { "" };
        rows.push_str(&format!(
            "            <tr{class}><td>{}</td><td class=\"value\">{} kg CO2</td></tr>\n",
            row.label,
            row.formatted()
        ));
    }

    let body = format!(
        r#"    <div class="result">
        <table>
            <tr><th>Category</th><th>Emissions</th></tr>
{rows}        </table>
        <a class="button" href="{href}">Download PDF Report</a>
    </div>
    <p><a href="/">Calculate again</a></p>
"#,
        href = escape_html(&download_link(breakdown)),
    );

    page("Your Carbon Footprint", &body)
}

/// Report link carrying the unrounded breakdown values
pub fn download_link(breakdown: &EmissionBreakdown) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(PARAM_ENERGY, &breakdown.energy_emission.to_string())
        .append_pair(PARAM_TRANSPORT, &breakdown.transport_emission.to_string())
        .append_pair(PARAM_WASTE, &breakdown.waste_emission.to_string())
        .append_pair(PARAM_TOTAL, &breakdown.total_emission.to_string())
        .finish();
    format!("{}?{}", DOWNLOAD_PATH, query)
}

/// Escape text for use in HTML content and attribute values
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
