//! HTTP transport seam.
//!
//! The client only ever issues GET requests, so a transport is a single
//! async `get`. [`ReqwestTransport`] is the production implementation; tests
//! plug in an in-memory one.

use std::fmt;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use reqwest::{header, Client, Url};
use tracing::debug;

use wcs_common::{WcsError, WcsResult};

use crate::config::ClientConfig;
use crate::exceptions::{check_for_exception, is_xml_content_type};
use crate::xml::Element;

/// Response body as a stream of byte chunks.
pub type ByteStream = BoxStream<'static, WcsResult<Bytes>>;

/// A response as seen by the client: status, declared content type and a body stream.
pub struct TransportResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: ByteStream,
}

impl TransportResponse {
    pub fn new(status: u16, content_type: Option<String>, body: ByteStream) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// Response whose whole body is already in memory.
    pub fn from_bytes(status: u16, content_type: Option<String>, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        Self::new(status, content_type, stream::once(async move { Ok(body) }).boxed())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_xml(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_xml_content_type)
    }

    /// Read the whole body into memory.
    pub async fn bytes(self) -> WcsResult<Bytes> {
        collect_body(self.body).await
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

pub(crate) async fn collect_body(mut body: ByteStream) -> WcsResult<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(buf.freeze())
}

/// Issues HTTP GET requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> WcsResult<TransportResponse>;
}

/// [`HttpTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> WcsResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(WcsError::transport)?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> WcsResult<TransportResponse> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(WcsError::transport)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        debug!(%url, status, content_type = ?content_type, "Received response");

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(WcsError::transport))
            .boxed();
        Ok(TransportResponse::new(status, content_type, body))
    }
}

/// Append form-urlencoded `params` to `base`, keeping any query it already has.
pub fn build_url(base: &str, params: &[(String, String)]) -> WcsResult<Url> {
    Url::parse_with_params(base, params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .map_err(|e| WcsError::InvalidUrl(format!("{}: {}", base, e)))
}

/// GET `url` and parse the body as XML, failing on an exception report or an
/// unsuccessful status.
pub(crate) async fn fetch_xml(transport: &dyn HttpTransport, url: &Url) -> WcsResult<Element> {
    let response = transport.get(url).await?;
    let status = response.status;
    let body = response.bytes().await?;
    parse_checked(status, &body, url)
}

/// Parse an XML response body. An exception report takes precedence over
/// the HTTP status; an unparseable body on a failed request reports the status.
pub(crate) fn parse_checked(status: u16, body: &[u8], url: &Url) -> WcsResult<Element> {
    let success = (200..300).contains(&status);
    let doc = match Element::parse_bytes(body) {
        Ok(doc) => doc,
        Err(_) if !success => return Err(http_status(status, url)),
        Err(e) => return Err(e),
    };
    check_for_exception(&doc)?;
    if !success {
        return Err(http_status(status, url));
    }
    Ok(doc)
}

pub(crate) fn http_status(status: u16, url: &Url) -> WcsError {
    WcsError::HttpStatus {
        status,
        url: url.to_string(),
    }
}
