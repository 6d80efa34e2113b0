//! In-memory transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Url;

use wcs_protocol::{HttpTransport, TransportResponse, WcsResult, WebCoverageService};

#[derive(Clone)]
struct Canned {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
}

/// Answers requests by the value of their `request` query parameter and
/// records every URL it is asked for.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, Canned>>,
    requests: Mutex<Vec<Url>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(
        &self,
        request: &str,
        status: u16,
        content_type: Option<&str>,
        body: impl Into<Vec<u8>>,
    ) {
        self.routes.lock().unwrap().insert(
            request.to_string(),
            Canned {
                status,
                content_type: content_type.map(str::to_string),
                body: body.into(),
            },
        );
    }

    pub fn respond_xml(&self, request: &str, body: &str) {
        self.respond(request, 200, Some("text/xml"), body);
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<Url> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &Url) -> WcsResult<TransportResponse> {
        self.requests.lock().unwrap().push(url.clone());

        let request = query_value(url, "request").unwrap_or_default();
        let canned = self.routes.lock().unwrap().get(&request).cloned();
        Ok(match canned {
            Some(c) => TransportResponse::from_bytes(c.status, c.content_type, c.body),
            None => TransportResponse::from_bytes(404, Some("text/plain".into()), "not found"),
        })
    }
}

/// Decoded value of a query parameter.
pub fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Service built from an in-memory capabilities document.
pub async fn service(xml: &str, transport: Arc<MockTransport>) -> WebCoverageService {
    WebCoverageService::with_transport(
        test_utils::fixtures::capabilities::ENDPOINT,
        Some(xml),
        transport,
    )
    .await
    .unwrap()
}
