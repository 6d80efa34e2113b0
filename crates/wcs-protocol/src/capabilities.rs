//! Capabilities document retrieval.

use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, instrument};

use wcs_common::WcsResult;

use crate::exceptions::check_for_exception;
use crate::transport::{build_url, fetch_xml, HttpTransport};
use crate::xml::Element;

/// Reads a WCS capabilities document from a string or from a server.
#[derive(Clone)]
pub struct CapabilitiesReader {
    version: String,
    transport: Arc<dyn HttpTransport>,
}

impl CapabilitiesReader {
    pub fn new(version: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            version: version.into(),
            transport,
        }
    }

    /// GetCapabilities URL for a service base URL.
    pub fn capabilities_url(&self, service_url: &str) -> WcsResult<Url> {
        let params = [
            ("service".to_string(), "WCS".to_string()),
            ("request".to_string(), "GetCapabilities".to_string()),
            ("version".to_string(), self.version.clone()),
        ];
        build_url(service_url, &params)
    }

    /// Fetch and parse the capabilities document of the service at `service_url`.
    #[instrument(skip(self))]
    pub async fn read(&self, service_url: &str) -> WcsResult<Element> {
        let url = self.capabilities_url(service_url)?;
        debug!(%url, "Requesting capabilities");
        fetch_xml(self.transport.as_ref(), &url).await
    }

    /// Parse a capabilities document held in memory.
    pub fn read_string(&self, xml: &str) -> WcsResult<Element> {
        let doc = Element::parse(xml)?;
        check_for_exception(&doc)?;
        Ok(doc)
    }
}

impl std::fmt::Debug for CapabilitiesReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilitiesReader")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
