//! OGC Web Coverage Service (WCS) 1.1.0 client.
//!
//! Parses a server's capabilities document into typed metadata, exposes the
//! advertised coverages by identifier, and issues GetCoverage and
//! DescribeCoverage requests.
//!
//! ```ignore
//! use wcs_protocol::{GetCoverageRequest, WebCoverageService};
//!
//! let wcs = WebCoverageService::new("http://example.org/wcs", None).await?;
//! let request = GetCoverageRequest::new("TuMYrRQ4")
//!     .bbox((-112.0, 36.0, -106.0, 41.0))
//!     .format("application/netcdf")
//!     .store(true);
//! let response = wcs.fetch_coverage(&request).await?;
//! ```

pub mod capabilities;
pub mod config;
pub mod contents;
pub mod describe;
pub mod exceptions;
pub mod getcoverage;
pub mod metadata;
pub mod operations;
pub mod service;
pub mod transport;
pub mod xml;

pub use capabilities::CapabilitiesReader;
pub use config::ClientConfig;
pub use contents::ContentMetadata;
pub use getcoverage::{CoverageResponse, GetCoverageRequest, GridParameters};
pub use metadata::{Address, ContactInfo, Phone, ServiceContact, ServiceIdentification, ServiceProvider};
pub use operations::{HttpMethod, Operation};
pub use service::{WebCoverageService, WCS_VERSION};
pub use transport::{ByteStream, HttpTransport, ReqwestTransport, TransportResponse};
pub use xml::Element;

pub use wcs_common::{BoundingBox, CrsBoundingBox, TimeLimits, WcsError, WcsResult};
