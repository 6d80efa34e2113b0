//! WCS 1.1.0 GetCoverage request building and response handling.
//!
//! Example request:
//!
//! ```text
//! http://myhost/mywcs?service=WCS&request=GetCoverage&version=1.1.0
//!     &identifier=TuMYrRQ4&boundingbox=-112%2C36%2C-106%2C41
//!     &timesequence=2792-06-01T00%3A00%3A00.0&format=application%2Fnetcdf&store=True
//! ```
//!
//! With `store=True` the server answers with a `Coverages` XML document that
//! references the stored output; with `store=False` it returns the coverage
//! inline as a multipart body.

use std::fmt;

use bytes::Bytes;
use futures::stream;
use futures::StreamExt;

use wcs_common::{BoundingBox, WcsError, WcsResult};

use crate::operations::HttpMethod;
use crate::transport::{collect_body, ByteStream};

/// GridCRS parameters (`gridbaseCRS`, `gridtype`, `gridCS`, `gridorigin`, `gridoffsets`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridParameters {
    pub base_crs: Option<String>,
    pub grid_type: Option<String>,
    pub grid_cs: Option<String>,
    pub origin: Option<String>,
    pub offsets: Option<String>,
}

/// Parameters of a GetCoverage request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCoverageRequest {
    /// Coverage identifiers; at least one is required
    pub identifiers: Vec<String>,
    pub bbox: Option<BoundingBox>,
    pub time_sequence: Vec<String>,
    /// Output format, e.g. "application/netcdf"
    pub format: Option<String>,
    /// Ask the server to store the output and return a reference document
    pub store: bool,
    pub range_subset: Option<String>,
    pub grid: GridParameters,
    pub method: HttpMethod,
    /// Vendor-specific parameters, appended last
    pub extra: Vec<(String, String)>,
}

impl GetCoverageRequest {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self::with_identifiers([identifier])
    }

    pub fn with_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn bbox(mut self, bbox: impl Into<BoundingBox>) -> Self {
        self.bbox = Some(bbox.into());
        self
    }

    pub fn time_sequence<I, S>(mut self, times: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_sequence = times.into_iter().map(Into::into).collect();
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }

    pub fn range_subset(mut self, range_subset: impl Into<String>) -> Self {
        self.range_subset = Some(range_subset.into());
        self
    }

    pub fn grid(mut self, grid: GridParameters) -> Self {
        self.grid = grid;
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a vendor-specific parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Check the request can be sent: at least one non-blank identifier.
    pub fn validate(&self) -> WcsResult<()> {
        if self.identifiers.is_empty() {
            return Err(WcsError::MissingParameter("identifier".to_string()));
        }
        if self.identifiers.iter().any(|id| id.trim().is_empty()) {
            return Err(WcsError::InvalidParameter {
                param: "identifier".to_string(),
                message: "identifiers must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Query parameters in request order. Lists are comma-joined.
    ///
    /// An extra parameter whose key is already present replaces that value
    /// in place.
    pub fn to_params(&self, version: &str) -> WcsResult<Vec<(String, String)>> {
        self.validate()?;

        let mut params: Vec<(String, String)> = vec![
            ("service".into(), "WCS".into()),
            ("request".into(), "GetCoverage".into()),
            ("version".into(), version.into()),
            ("identifier".into(), self.identifiers.join(",")),
        ];

        let mut optional = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                params.push((key.to_string(), value));
            }
        };

        optional("boundingbox", self.bbox.map(|b| b.to_kvp_string()));
        optional(
            "timesequence",
            (!self.time_sequence.is_empty()).then(|| self.time_sequence.join(",")),
        );
        optional("format", self.format.clone());
        optional(
            "store",
            Some(if self.store { "True" } else { "False" }.to_string()),
        );
        optional("RangeSubset", self.range_subset.clone());
        optional("gridbaseCRS", self.grid.base_crs.clone());
        optional("gridtype", self.grid.grid_type.clone());
        optional("gridCS", self.grid.grid_cs.clone());
        optional("gridorigin", self.grid.origin.clone());
        optional("gridoffsets", self.grid.offsets.clone());

        for (key, value) in &self.extra {
            match params.iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value.clone(),
                None => params.push((key.clone(), value.clone())),
            }
        }

        Ok(params)
    }
}

enum CoverageBody {
    /// XML body, already read and checked for exceptions
    Buffered(Bytes),
    /// Any other body, untouched
    Streaming(ByteStream),
}

/// Body of a successful GetCoverage response, positioned at its start.
///
/// Either a multipart coverage payload or a `Coverages` reference document;
/// interpreting it is left to the caller.
pub struct CoverageResponse {
    content_type: Option<String>,
    body: CoverageBody,
}

impl CoverageResponse {
    pub(crate) fn buffered(content_type: Option<String>, body: Bytes) -> Self {
        Self {
            content_type,
            body: CoverageBody::Buffered(body),
        }
    }

    pub(crate) fn streaming(content_type: Option<String>, body: ByteStream) -> Self {
        Self {
            content_type,
            body: CoverageBody::Streaming(body),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// True if the body was read into memory (XML responses).
    pub fn is_buffered(&self) -> bool {
        matches!(self.body, CoverageBody::Buffered(_))
    }

    pub fn is_multipart(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with("multipart/"))
    }

    /// Read the whole body.
    pub async fn bytes(self) -> WcsResult<Bytes> {
        match self.body {
            CoverageBody::Buffered(bytes) => Ok(bytes),
            CoverageBody::Streaming(body) => collect_body(body).await,
        }
    }

    /// Consume the body as a stream of chunks.
    pub fn into_stream(self) -> ByteStream {
        match self.body {
            CoverageBody::Buffered(bytes) => stream::once(async move { Ok(bytes) }).boxed(),
            CoverageBody::Streaming(body) => body,
        }
    }
}

impl fmt::Debug for CoverageResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverageResponse")
            .field("content_type", &self.content_type)
            .field("buffered", &self.is_buffered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_params_fixed_fields_first() {
        let params = GetCoverageRequest::new("cov1").to_params("1.1.0").unwrap();
        assert_eq!(params[0], ("service".into(), "WCS".into()));
        assert_eq!(params[1], ("request".into(), "GetCoverage".into()));
        assert_eq!(params[2], ("version".into(), "1.1.0".into()));
        assert_eq!(params[3], ("identifier".into(), "cov1".into()));
    }

    #[test]
    fn test_optional_fields_only_when_set() {
        let params = GetCoverageRequest::new("cov1").to_params("1.1.0").unwrap();
        assert_eq!(lookup(&params, "boundingbox"), None);
        assert_eq!(lookup(&params, "timesequence"), None);
        assert_eq!(lookup(&params, "format"), None);
        assert_eq!(lookup(&params, "gridtype"), None);
        assert_eq!(lookup(&params, "store"), Some("False"));
    }

    #[test]
    fn test_lists_are_comma_joined() {
        let params = GetCoverageRequest::with_identifiers(["a", "b"])
            .bbox((-112.0, 36.0, -106.0, 41.0))
            .time_sequence(["2000-01-01", "2000-02-01"])
            .to_params("1.1.0")
            .unwrap();
        assert_eq!(lookup(&params, "identifier"), Some("a,b"));
        assert_eq!(lookup(&params, "boundingbox"), Some("-112,36,-106,41"));
        assert_eq!(lookup(&params, "timesequence"), Some("2000-01-01,2000-02-01"));
    }

    #[test]
    fn test_grid_and_range_subset() {
        let params = GetCoverageRequest::new("cov1")
            .range_subset("temp[band[1]]")
            .grid(GridParameters {
                base_crs: Some("urn:ogc:def:crs:EPSG::4326".into()),
                offsets: Some("0.5,0.5".into()),
                ..Default::default()
            })
            .to_params("1.1.0")
            .unwrap();
        assert_eq!(lookup(&params, "RangeSubset"), Some("temp[band[1]]"));
        assert_eq!(lookup(&params, "gridbaseCRS"), Some("urn:ogc:def:crs:EPSG::4326"));
        assert_eq!(lookup(&params, "gridoffsets"), Some("0.5,0.5"));
        assert_eq!(lookup(&params, "gridCS"), None);
    }

    #[test]
    fn test_extra_params_append_and_override() {
        let params = GetCoverageRequest::new("cov1")
            .param("vendor_key", "42")
            .param("store", "true")
            .to_params("1.1.0")
            .unwrap();
        assert_eq!(lookup(&params, "vendor_key"), Some("42"));
        assert_eq!(params.iter().filter(|(k, _)| k == "store").count(), 1);
        assert_eq!(lookup(&params, "store"), Some("true"));
        assert_eq!(params.last().map(|(k, _)| k.as_str()), Some("vendor_key"));
    }

    #[test]
    fn test_identifier_validation() {
        let empty = GetCoverageRequest::with_identifiers(Vec::<String>::new());
        assert!(matches!(
            empty.validate(),
            Err(WcsError::MissingParameter(ref p)) if p == "identifier"
        ));

        let blank = GetCoverageRequest::new("  ");
        assert!(matches!(
            blank.to_params("1.1.0"),
            Err(WcsError::InvalidParameter { .. })
        ));
    }

    #[tokio::test]
    async fn test_buffered_response_stream() {
        let response = CoverageResponse::buffered(Some("text/xml".into()), Bytes::from_static(b"<x/>"));
        assert!(response.is_buffered());
        assert!(!response.is_multipart());
        let chunks: Vec<_> = response.into_stream().collect().await;
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].as_ref().unwrap(), &Bytes::from_static(b"<x/>"));
    }
}
