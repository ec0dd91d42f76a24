//! Request routing
//!
//! Maps a method, request target and body to a response. Independent of the
//! HTTP server so that handlers can be exercised directly.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, warn};

use footprint_core::{
    compute_from_form, EmissionBreakdown, PARAM_ENERGY, PARAM_TOTAL, PARAM_TRANSPORT, PARAM_WASTE,
};
use footprint_pdf::{RenderedReport, ReportRenderer, REPORT_FILE_NAME};

use crate::views::{self, DOWNLOAD_PATH};

const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";
const CONTENT_TYPE_PDF: &str = "application/pdf";

/// A response ready to be written by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// File name offered when the body is a download
    pub attachment: Option<String>,
}

impl HttpResponse {
    pub fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_HTML,
            body: body.into_bytes(),
            attachment: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_TEXT,
            body: body.as_bytes().to_vec(),
            attachment: None,
        }
    }

    pub fn pdf(body: Vec<u8>, file_name: &str) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_PDF,
            body,
            attachment: Some(file_name.to_string()),
        }
    }

    /// Value for the `Content-Disposition` header, if any
    pub fn content_disposition(&self) -> Option<String> {
        self.attachment
            .as_ref()
            .map(|name| format!("attachment; filename=\"{}\"", name))
    }
}

/// Stateless dispatcher for the calculator endpoints
pub struct Router {
    renderer: ReportRenderer,
    clock: fn() -> NaiveDateTime,
}

impl Router {
    pub fn new(renderer: ReportRenderer) -> Self {
        Self {
            renderer,
            clock: local_now,
        }
    }

    /// Replace the source of report timestamps
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Handle a single request
    ///
    /// `target` is the request target as sent by the client, including any
    /// query string.
    pub fn handle(&self, method: &str, target: &str, body: &[u8]) -> HttpResponse {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));

        match (path, method) {
            ("/", "GET") => HttpResponse::html(views::index_page()),
            ("/", "POST") => self.calculate(body),
            (DOWNLOAD_PATH, "GET") => self.download_pdf(query),
            ("/", _) | (DOWNLOAD_PATH, _) => HttpResponse::text(405, "Method not allowed"),
            _ => HttpResponse::text(404, "Not found"),
        }
    }

    /// Compute the breakdown from the submitted form
    fn calculate(&self, body: &[u8]) -> HttpResponse {
        let pairs = decode_pairs(body);
        let fields = pairs.iter().map(|(key, value)| (key.as_str(), value.as_str()));

        match compute_from_form(fields) {
            Ok(breakdown) => {
                debug!(total = breakdown.total_emission, "computed footprint");
                HttpResponse::html(views::result_page(&breakdown))
            }
            Err(e) => {
                debug!(error = %e, "rejected calculator input");
                HttpResponse::text(400, e.user_message())
            }
        }
    }

    /// Render the PDF report for the breakdown carried in the query
    fn download_pdf(&self, query: &str) -> HttpResponse {
        let params = decode_pairs(query.as_bytes());
        let param = |name: &str| first_value(&params, name);

        let breakdown = match EmissionBreakdown::from_report_params(
            param(PARAM_ENERGY),
            param(PARAM_TRANSPORT),
            param(PARAM_WASTE),
            param(PARAM_TOTAL),
        ) {
            Ok(breakdown) => breakdown,
            Err(e) => {
                debug!(error = %e, "rejected report parameters");
                return HttpResponse::text(400, e.user_message());
            }
        };

        if !breakdown.is_consistent() {
            warn!(
                total = breakdown.total_emission,
                component_sum = breakdown.component_sum(),
                "report total does not match its components"
            );
        }

        match self.renderer.render(&breakdown, (self.clock)()) {
            Ok(RenderedReport { chart, document }) => {
                // The chart has been embedded; release it before responding
                drop(chart);
                HttpResponse::pdf(document.into_bytes(), REPORT_FILE_NAME)
            }
            Err(e) => {
                error!(error = %e, "failed to render report");
                HttpResponse::text(500, "Failed to generate PDF report")
            }
        }
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Decode an `application/x-www-form-urlencoded` payload
fn decode_pairs(input: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(input).into_owned().collect()
}

/// First value submitted for a name
fn first_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
