//! WCS 1.1.0 service client.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use wcs_common::{WcsError, WcsResult};

use crate::capabilities::CapabilitiesReader;
use crate::config::ClientConfig;
use crate::contents::{check_child_and_parent, ContentMetadata};
use crate::describe::describe_coverage_params;
use crate::getcoverage::{CoverageResponse, GetCoverageRequest};
use crate::metadata::{ServiceIdentification, ServiceProvider};
use crate::operations::{HttpMethod, Operation};
use crate::transport::{
    build_url, fetch_xml, http_status, parse_checked, HttpTransport, ReqwestTransport,
};
use crate::xml::{ows, wcs, Element};

/// Protocol version implemented by this client.
pub const WCS_VERSION: &str = "1.1.0";

/// Client for one WCS 1.1.0 endpoint, built from its capabilities document.
pub struct WebCoverageService {
    url: String,
    capabilities: Element,
    identification: ServiceIdentification,
    provider: ServiceProvider,
    operations: Vec<Operation>,
    contents: Vec<ContentMetadata>,
    index: HashMap<String, usize>,
    transport: Arc<dyn HttpTransport>,
}

impl WebCoverageService {
    /// Connect using a `reqwest` transport configured from the environment.
    ///
    /// When `xml` is given it is used as the capabilities document and no
    /// request is made.
    pub async fn new(url: &str, xml: Option<&str>) -> WcsResult<Self> {
        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::new(&ClientConfig::from_env())?);
        Self::with_transport(url, xml, transport).await
    }

    /// Connect using the given transport.
    pub async fn with_transport(
        url: &str,
        xml: Option<&str>,
        transport: Arc<dyn HttpTransport>,
    ) -> WcsResult<Self> {
        let reader = CapabilitiesReader::new(WCS_VERSION, transport.clone());
        let capabilities = match xml {
            Some(xml) => reader.read_string(xml)?,
            None => reader.read(url).await?,
        };
        Self::from_capabilities(url, capabilities, transport)
    }

    /// Build the client from an already parsed capabilities document.
    pub fn from_capabilities(
        url: &str,
        capabilities: Element,
        transport: Arc<dyn HttpTransport>,
    ) -> WcsResult<Self> {
        let identification = capabilities
            .find(&[ows("ServiceIdentification")])
            .ok_or_else(|| WcsError::MissingElement("ServiceIdentification".to_string()))
            .and_then(ServiceIdentification::from_element)?;

        let provider = capabilities
            .find(&[ows("ServiceProvider")])
            .ok_or_else(|| WcsError::MissingElement("ServiceProvider".to_string()))
            .and_then(ServiceProvider::from_element)?;

        let operations = capabilities
            .find_all(&[ows("OperationsMetadata"), ows("Operation")])
            .into_iter()
            .map(Operation::from_element)
            .collect::<WcsResult<Vec<_>>>()?;

        let (contents, index) = extract_contents(&capabilities)?;

        info!(
            url,
            title = %identification.title,
            operations = operations.len(),
            coverages = contents.len(),
            "Parsed WCS capabilities"
        );

        Ok(Self {
            url: url.to_string(),
            capabilities,
            identification,
            provider,
            operations,
            contents,
            index,
            transport,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> &'static str {
        WCS_VERSION
    }

    /// Root element of the capabilities document.
    pub fn capabilities(&self) -> &Element {
        &self.capabilities
    }

    pub fn identification(&self) -> &ServiceIdentification {
        &self.identification
    }

    pub fn provider(&self) -> &ServiceProvider {
        &self.provider
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Advertised operation by name.
    pub fn get_operation_by_name(&self, name: &str) -> WcsResult<&Operation> {
        self.operations
            .iter()
            .find(|op| op.name == name)
            .ok_or_else(|| WcsError::OperationNotFound(name.to_string()))
    }

    /// Endpoint URL of an operation for an HTTP method.
    pub fn operation_url(&self, name: &str, method: HttpMethod) -> WcsResult<&str> {
        self.get_operation_by_name(name)?
            .url_for(method)
            .ok_or_else(|| WcsError::MethodNotFound {
                operation: name.to_string(),
                method: method.to_string(),
            })
    }

    /// All coverages in document order.
    pub fn contents(&self) -> &[ContentMetadata] {
        &self.contents
    }

    /// Coverage by identifier.
    pub fn get_coverage(&self, id: &str) -> Option<&ContentMetadata> {
        self.index.get(id).map(|&i| &self.contents[i])
    }

    /// Coverage by identifier, failing with [`WcsError::CoverageNotFound`].
    pub fn coverage(&self, id: &str) -> WcsResult<&ContentMetadata> {
        self.get_coverage(id)
            .ok_or_else(|| WcsError::CoverageNotFound(id.to_string()))
    }

    /// `(identifier, coverage)` pairs in document order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &ContentMetadata)> {
        self.contents.iter().map(|cm| (cm.id.as_str(), cm))
    }

    /// Issue a DescribeCoverage request and return the parsed response.
    ///
    /// Uses the advertised DescribeCoverage GET binding, or the service URL
    /// when the operation is not advertised.
    #[instrument(skip(self))]
    pub async fn describe_coverage(&self, identifier: &str) -> WcsResult<Element> {
        let base_url = match self.operation_url("DescribeCoverage", HttpMethod::Get) {
            Ok(url) => url,
            Err(e) if e.is_not_found() => self.url.as_str(),
            Err(e) => return Err(e),
        };
        let url = build_url(base_url, &describe_coverage_params(identifier, WCS_VERSION))?;
        debug!(%url, "Issuing DescribeCoverage request");
        fetch_xml(self.transport.as_ref(), &url).await
    }

    /// Issue a GetCoverage request.
    ///
    /// XML responses are read into memory and checked for an exception report
    /// before being handed back; any other response body is returned unread.
    #[instrument(skip(self, request), fields(identifier = %request.identifiers.join(",")))]
    pub async fn fetch_coverage(&self, request: &GetCoverageRequest) -> WcsResult<CoverageResponse> {
        let params = request.to_params(WCS_VERSION)?;
        let base_url = self.operation_url("GetCoverage", request.method)?;
        if request.method != HttpMethod::Get {
            return Err(WcsError::InvalidParameter {
                param: "method".to_string(),
                message: format!("{} requests are not supported", request.method),
            });
        }

        let url = build_url(base_url, &params)?;
        debug!(%url, "Issuing GetCoverage request");
        let response = self.transport.get(&url).await?;
        if response.is_xml() {
            let status = response.status;
            let content_type = response.content_type.clone();
            let body = response.bytes().await?;
            parse_checked(status, &body, &url)?;
            return Ok(CoverageResponse::buffered(content_type, body));
        }

        if !response.is_success() {
            return Err(http_status(response.status, &url));
        }
        Ok(CoverageResponse::streaming(
            response.content_type,
            response.body,
        ))
    }
}

impl fmt::Debug for WebCoverageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebCoverageService")
            .field("url", &self.url)
            .field("title", &self.identification.title)
            .field("operations", &self.operations.len())
            .field("coverages", &self.contents.len())
            .finish()
    }
}

type Contents = (Vec<ContentMetadata>, HashMap<String, usize>);

/// Collect coverages, preferring the hierarchical layout.
///
/// Leaves nested under a top-level summary inherit from it. Only when no
/// nested summaries exist are the top-level summaries themselves used.
fn extract_contents(capabilities: &Element) -> WcsResult<Contents> {
    let mut contents = Vec::new();
    let mut index = HashMap::new();

    let tops = capabilities.find_all(&[wcs("Contents"), wcs("CoverageSummary")]);

    for top in &tops {
        for leaf in top.find_all(&[wcs("CoverageSummary")]) {
            insert(&mut contents, &mut index, leaf, Some(top))?;
        }
    }

    if contents.is_empty() {
        for top in &tops {
            insert(&mut contents, &mut index, top, None)?;
        }
    }

    Ok((contents, index))
}

fn insert(
    contents: &mut Vec<ContentMetadata>,
    index: &mut HashMap<String, usize>,
    elem: &Element,
    parent: Option<&Element>,
) -> WcsResult<()> {
    if check_child_and_parent(elem, parent, &[wcs("Identifier")]).is_none() {
        warn!(
            title = ?elem.find_text(&[ows("Title")]),
            "Skipping CoverageSummary without Identifier"
        );
        return Ok(());
    }

    let cm = ContentMetadata::from_element(elem, parent)?;
    match index.get(&cm.id) {
        Some(&i) => {
            warn!(id = %cm.id, "Duplicate coverage identifier, keeping the last one");
            contents[i] = cm;
        }
        None => {
            index.insert(cm.id.clone(), contents.len());
            contents.push(cm);
        }
    }
    Ok(())
}
