//! Shared helpers for the mock-server tests.

#![allow(dead_code, clippy::unwrap_used, clippy::panic)]

use oaikit::{Client, ClientConfig};
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "test-key";

/// Install a test subscriber once; `RUST_LOG=oaikit=debug` shows request logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client pointed at the mock server.
pub fn client_for(server: &MockServer) -> Client {
    init_tracing();
    Client::new(ClientConfig::new(API_KEY).with_base_url(server.uri())).unwrap()
}

/// The only request the server saw.
pub async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

/// Request body parsed as JSON.
pub fn json_body(request: &Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).unwrap()
}

/// One part of a `multipart/form-data` body.
#[derive(Debug)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FormPart {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.data).unwrap()
    }
}

/// Split a multipart request body into its parts.
pub fn form_parts(request: &Request) -> Vec<FormPart> {
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "unexpected content type {content_type}"
    );

    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .unwrap()
        .trim_matches('"');
    let delimiter = format!("--{boundary}");
    let body = &request.body;

    // Each part sits between "--boundary\r\n" and "\r\n--boundary".
    find_all(body, delimiter.as_bytes())
        .windows(2)
        .map(|w| parse_part(&body[w[0] + delimiter.len() + 2..w[1] - 2]))
        .collect()
}

/// Value of a text field, if present.
pub fn field<'a>(parts: &'a [FormPart], name: &str) -> Option<&'a str> {
    parts.iter().find(|p| p.name == name).map(FormPart::text)
}

fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

fn parse_part(section: &[u8]) -> FormPart {
    let split = find_all(section, b"\r\n\r\n")[0];
    let head = std::str::from_utf8(&section[..split]).unwrap();

    let mut part = FormPart {
        name: String::new(),
        file_name: None,
        content_type: None,
        data: section[split + 4..].to_vec(),
    };

    for line in head.split("\r\n") {
        let (key, value) = line.split_once(':').unwrap();
        if key.eq_ignore_ascii_case("content-disposition") {
            for attr in value.split(';').map(str::trim) {
                if let Some(v) = attr.strip_prefix("name=") {
                    part.name = v.trim_matches('"').to_owned();
                } else if let Some(v) = attr.strip_prefix("filename=") {
                    part.file_name = Some(v.trim_matches('"').to_owned());
                }
            }
        } else if key.eq_ignore_ascii_case("content-type") {
            part.content_type = Some(value.trim().to_owned());
        }
    }

    part
}
