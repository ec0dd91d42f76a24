//! Integration tests for the footprint HTTP endpoints
//!
//! Each test starts a real server on an ephemeral port and talks to it over
//! HTTP.

use footprint_pdf::ReportRenderer;
use footprint_web::{ReportServer, Router, ServerSettings};
use reqwest::blocking::Client;
use reqwest::StatusCode;

fn start_server() -> ReportServer {
    let settings = ServerSettings {
        bind: "127.0.0.1".to_string(),
        port: 0,
    };
    ReportServer::start(&settings, Router::new(ReportRenderer::default())).unwrap()
}

fn client() -> Client {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn chart_files_in(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| {
                    entry
                        .file_name()
                        .to_string_lossy()
                        .starts_with("emission_chart")
                })
                .count()
        })
        .unwrap_or(0)
}

#[test]
fn test_get_form() {
    let server = start_server();
    let response = client().get(server.url()).send().unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = response.text().unwrap();
    assert!(html.contains("name=\"electricity\""));
    assert!(html.contains("name=\"distance\""));
    assert!(html.contains("name=\"waste\""));
}

#[test]
fn test_post_form_shows_breakdown() {
    let server = start_server();
    let response = client()
        .post(server.url())
        .form(&[("electricity", "100"), ("distance", "50"), ("waste", "10")])
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().unwrap();
    for value in ["23.30", "9.60", "1.00", "33.90"] {
        assert!(html.contains(value), "missing {value}");
    }
    assert!(html.contains("/download_pdf?energy="));
}

#[test]
fn test_post_form_rejects_text() {
    let server = start_server();
    let response = client()
        .post(server.url())
        .form(&[("electricity", "abc"), ("distance", "50"), ("waste", "10")])
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text().unwrap(),
        "Invalid input, please enter valid numbers."
    );
}

#[test]
fn test_post_oversize_body_rejected() {
    let server = start_server();
    let body = format!(
        "distance=0&waste=0&electricity={}1000",
        "0".repeat(70 * 1024)
    );
    let response = client()
        .post(server.url())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.text().unwrap(), "Request body too large");
}

#[test]
fn test_post_long_number_within_limit() {
    let server = start_server();
    let body = format!(
        "distance=0&waste=0&electricity={}1000",
        "0".repeat(1024)
    );
    let response = client()
        .post(server.url())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().unwrap().contains("233.00"));
}

#[test]
fn test_download_pdf() {
    let server = start_server();
    let response = client()
        .get(format!(
            "{}/download_pdf?energy=23.30&transport=9.60&waste=1.00&total=33.90",
            server.url()
        ))
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"carbon_footprint_report.pdf\""
    );

    let body = response.bytes().unwrap();
    assert!(!body.is_empty());
    assert!(body.starts_with(b"%PDF"));
}

#[test]
fn test_download_pdf_missing_waste() {
    let server = start_server();
    let response = client()
        .get(format!(
            "{}/download_pdf?energy=23.30&transport=9.60&total=33.90",
            server.url()
        ))
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text().unwrap(),
        "Missing parameters for PDF generation"
    );
}

#[test]
fn test_download_pdf_invalid_value() {
    let server = start_server();
    let response = client()
        .get(format!(
            "{}/download_pdf?energy=23.30&transport=nine&waste=1.00&total=33.90",
            server.url()
        ))
        .send()
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().unwrap(), "Invalid parameter values");
}

#[test]
fn test_form_result_link_downloads_report() {
    let server = start_server();
    let client = client();
    let html = client
        .post(server.url())
        .form(&[("electricity", "12.5"), ("distance", "3"), ("waste", "0.25")])
        .send()
        .unwrap()
        .text()
        .unwrap();

    let start = html.find("/download_pdf?").unwrap();
    let end = start + html[start..].find('"').unwrap();
    let link = html[start..end].replace("&amp;", "&");

    let response = client
        .get(format!("{}{}", server.url(), link))
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.bytes().unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_no_chart_artifact_after_download() {
    let server = start_server();
    let response = client()
        .get(format!(
            "{}/download_pdf?energy=5&transport=5&waste=5&total=15",
            server.url()
        ))
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cwd = std::env::current_dir().unwrap();
    assert_eq!(chart_files_in(&cwd), 0);
    assert_eq!(chart_files_in(&std::env::temp_dir()), 0);
}

#[test]
fn test_unknown_path_and_method() {
    let server = start_server();
    let client = client();

    let response = client
        .get(format!("{}/nope", server.url()))
        .send()
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.delete(server.url()).send().unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn test_shutdown() {
    let server = start_server();
    let addr = server.addr();
    server.shutdown();

    let result = client().get(format!("http://{}/", addr)).send();
    assert!(result.is_err());
}
