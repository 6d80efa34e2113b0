//! Canned WCS 1.1.0 documents for tests.
//!
//! The capabilities fixtures deliberately mix the OWS namespace variants seen
//! in the wild (`ows`, `ows/1.1` and the WCS-local `wcs/1.1/ows`).

/// Capabilities documents.
pub mod capabilities {
    /// Base URL the fixtures advertise for every operation.
    pub const ENDPOINT: &str = "http://example.org/wcs";

    /// Hierarchical document: one top-level `CoverageSummary` grouping two
    /// leaf coverages, `TuMYrRQ4` and `PRECIP01`.
    ///
    /// `PRECIP01` has no title, abstract, keywords or WGS84 box of its own and
    /// inherits them from the top-level summary.
    pub const HIERARCHICAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Capabilities xmlns="http://www.opengis.net/wcs/1.1"
    xmlns:ows="http://www.opengis.net/ows"
    xmlns:owcs="http://www.opengis.net/wcs/1.1/ows"
    xmlns:xlink="http://www.w3.org/1999/xlink"
    version="1.1.0">
  <owcs:ServiceIdentification>
    <ows:Title>Climate Model Archive</ows:Title>
    <ows:Abstract>Gridded outputs from coupled climate model runs.</ows:Abstract>
    <ows:Keywords>
      <ows:Keyword>climate</ows:Keyword>
      <ows:Keyword>WCS</ows:Keyword>
    </ows:Keywords>
    <owcs:ServiceType>WCS</owcs:ServiceType>
    <owcs:ServiceTypeVersion>1.1.0</owcs:ServiceTypeVersion>
    <owcs:Fees>NONE</owcs:Fees>
    <owcs:AccessConstraints>Registered users only</owcs:AccessConstraints>
  </owcs:ServiceIdentification>
  <ows:ServiceProvider>
    <ows:ProviderName>Example Data Centre</ows:ProviderName>
    <ows:ProviderSite xlink:href="http://example.org/"/>
    <ows:ServiceContact>
      <ows:IndividualName>Jo Bloggs</ows:IndividualName>
      <ows:PositionName>Data Scientist</ows:PositionName>
      <ows:ContactInfo>
        <ows:Phone>
          <ows:Voice>+44 1234 567890</ows:Voice>
          <ows:Facsimile>+44 1234 567891</ows:Facsimile>
        </ows:Phone>
        <ows:Address>
          <ows:DeliveryPoint>1 Science Park</ows:DeliveryPoint>
          <ows:City>Didcot</ows:City>
          <ows:AdministrativeArea>Oxfordshire</ows:AdministrativeArea>
          <ows:PostalCode>OX11 0QX</ows:PostalCode>
          <ows:Country>UK</ows:Country>
          <ows:ElectronicMailAddress>data@example.org</ows:ElectronicMailAddress>
        </ows:Address>
      </ows:ContactInfo>
    </ows:ServiceContact>
  </ows:ServiceProvider>
  <owcs:OperationsMetadata>
    <owcs:Operation name="GetCapabilities">
      <owcs:DCP>
        <owcs:HTTP>
          <owcs:Get xlink:href="http://example.org/wcs"/>
        </owcs:HTTP>
      </owcs:DCP>
    </owcs:Operation>
    <owcs:Operation name="DescribeCoverage">
      <owcs:DCP>
        <owcs:HTTP>
          <owcs:Get xlink:href="http://example.org/wcs/describe"/>
        </owcs:HTTP>
      </owcs:DCP>
    </owcs:Operation>
    <owcs:Operation name="GetCoverage">
      <owcs:DCP>
        <owcs:HTTP>
          <owcs:Get xlink:href="http://example.org/wcs/coverage"/>
          <owcs:Post xlink:href="http://example.org/wcs/coverage-post"/>
        </owcs:HTTP>
      </owcs:DCP>
      <owcs:Parameter name="Format">
        <owcs:AllowedValues>
          <owcs:Value>application/netcdf</owcs:Value>
          <owcs:Value>application/x-hdf</owcs:Value>
        </owcs:AllowedValues>
      </owcs:Parameter>
    </owcs:Operation>
  </owcs:OperationsMetadata>
  <Contents>
    <CoverageSummary>
      <ows:Title>Climate runs</ows:Title>
      <ows:Abstract>Monthly means from the control run.</ows:Abstract>
      <ows:Keywords>
        <ows:Keyword>climate</ows:Keyword>
        <ows:Keyword>monthly</ows:Keyword>
      </ows:Keywords>
      <ows:WGS84BoundingBox>
        <ows:LowerCorner>-180 -90</ows:LowerCorner>
        <ows:UpperCorner>180 90</ows:UpperCorner>
      </ows:WGS84BoundingBox>
      <SupportedCRS>urn:ogc:def:crs:EPSG::4326</SupportedCRS>
      <SupportedFormat>application/netcdf</SupportedFormat>
      <CoverageSummary>
        <ows:Title>Surface temperature</ows:Title>
        <ows:Abstract>Air temperature at 1.5m.</ows:Abstract>
        <ows:Keywords>
          <ows:Keyword>temperature</ows:Keyword>
        </ows:Keywords>
        <ows:WGS84BoundingBox>
          <ows:LowerCorner>-112 36</ows:LowerCorner>
          <ows:UpperCorner>-106 41</ows:UpperCorner>
        </ows:WGS84BoundingBox>
        <ows:BoundingBox crs="urn:ogc:def:crs:EPSG::27700">
          <ows:LowerCorner>0 0</ows:LowerCorner>
          <ows:UpperCorner>700000 1300000</ows:UpperCorner>
        </ows:BoundingBox>
        <ows:BoundingBox crs="urn:ogc:def:crs:EPSG::3857">
          <ows:LowerCorner>-12467782 4300621</ows:LowerCorner>
          <ows:UpperCorner>-11799834 5012341</ows:UpperCorner>
        </ows:BoundingBox>
        <SupportedCRS>urn:ogc:def:crs:EPSG::4326</SupportedCRS>
        <SupportedCRS>urn:ogc:def:crs:EPSG::27700</SupportedCRS>
        <SupportedFormat>application/netcdf</SupportedFormat>
        <SupportedFormat>application/x-hdf</SupportedFormat>
        <Identifier>TuMYrRQ4</Identifier>
      </CoverageSummary>
      <CoverageSummary>
        <Description>Total precipitation flux.</Description>
        <Identifier>PRECIP01</Identifier>
      </CoverageSummary>
    </CoverageSummary>
  </Contents>
</Capabilities>
"#;

    /// Flat document using OWS 1.1 namespaces: three top-level coverages and
    /// no grouping summary.
    pub const FLAT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wcs:Capabilities xmlns:wcs="http://www.opengis.net/wcs/1.1"
    xmlns:ows="http://www.opengis.net/ows/1.1"
    xmlns:xlink="http://www.w3.org/1999/xlink"
    version="1.1.0">
  <ows:ServiceIdentification>
    <ows:Title>Flat WCS</ows:Title>
    <ows:Abstract>Three independent coverages.</ows:Abstract>
    <ows:ServiceType>WCS</ows:ServiceType>
    <ows:ServiceTypeVersion>1.1.0</ows:ServiceTypeVersion>
    <ows:Fees>none</ows:Fees>
    <ows:AccessConstraints>none</ows:AccessConstraints>
  </ows:ServiceIdentification>
  <ows:ServiceProvider>
    <ows:ProviderName>Flat Provider</ows:ProviderName>
  </ows:ServiceProvider>
  <ows:OperationsMetadata>
    <ows:Operation name="GetCoverage">
      <ows:DCP>
        <ows:HTTP>
          <ows:Get xlink:href="http://example.org/wcs?map=flat"/>
        </ows:HTTP>
      </ows:DCP>
    </ows:Operation>
  </ows:OperationsMetadata>
  <wcs:Contents>
    <wcs:CoverageSummary>
      <ows:Title>Elevation</ows:Title>
      <ows:Keywords><ows:Keyword>dem</ows:Keyword></ows:Keywords>
      <ows:WGS84BoundingBox>
        <ows:LowerCorner>-10 40</ows:LowerCorner>
        <ows:UpperCorner>5 55</ows:UpperCorner>
      </ows:WGS84BoundingBox>
      <wcs:Identifier>dem</wcs:Identifier>
    </wcs:CoverageSummary>
    <wcs:CoverageSummary>
      <ows:Title>Land cover</ows:Title>
      <wcs:Identifier>landcover</wcs:Identifier>
    </wcs:CoverageSummary>
    <wcs:CoverageSummary>
      <ows:Title><![CDATA[Sea surface <temperature>]]></ows:Title>
      <wcs:Identifier>sst</wcs:Identifier>
    </wcs:CoverageSummary>
  </wcs:Contents>
</wcs:Capabilities>
"#;

    /// Capabilities with a ServiceIdentification lacking the required `Fees`.
    pub const MISSING_FEES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Capabilities xmlns="http://www.opengis.net/wcs/1.1"
    xmlns:ows="http://www.opengis.net/ows/1.1" version="1.1.0">
  <ows:ServiceIdentification>
    <ows:Title>Broken</ows:Title>
    <ows:Abstract>No fees element.</ows:Abstract>
    <ows:AccessConstraints>none</ows:AccessConstraints>
  </ows:ServiceIdentification>
  <ows:ServiceProvider>
    <ows:ProviderName>Nobody</ows:ProviderName>
  </ows:ServiceProvider>
  <Contents/>
</Capabilities>
"#;
}

/// DescribeCoverage responses.
pub mod describe {
    /// Coverage description with a single time period.
    pub const WITH_TIME_PERIOD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CoverageDescriptions xmlns="http://www.opengis.net/wcs/1.1"
    xmlns:ows="http://www.opengis.net/ows"
    xmlns:gml="http://www.opengis.net/gml">
  <CoverageDescription>
    <ows:Title>Surface temperature</ows:Title>
    <Identifier>TuMYrRQ4</Identifier>
    <Domain>
      <SpatialDomain>
        <ows:BoundingBox crs="urn:ogc:def:crs:OGC:2:84">
          <ows:LowerCorner>-112 36</ows:LowerCorner>
          <ows:UpperCorner>-106 41</ows:UpperCorner>
        </ows:BoundingBox>
      </SpatialDomain>
      <TemporalDomain>
        <TimePeriod>
          <BeginPosition>2000-01-16T00:00:00Z</BeginPosition>
          <EndPosition>2099-12-16T00:00:00Z</EndPosition>
        </TimePeriod>
      </TemporalDomain>
    </Domain>
    <SupportedFormat>application/netcdf</SupportedFormat>
  </CoverageDescription>
</CoverageDescriptions>
"#;

    /// Coverage description without any temporal domain.
    pub const WITHOUT_TIME: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CoverageDescriptions xmlns="http://www.opengis.net/wcs/1.1">
  <CoverageDescription>
    <Identifier>dem</Identifier>
    <Domain>
      <SpatialDomain/>
    </Domain>
  </CoverageDescription>
</CoverageDescriptions>
"#;
}

/// GetCoverage and error responses.
pub mod responses {
    /// OWS 1.0 exception report carrying its message as element text.
    pub const EXCEPTION_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ows:ExceptionReport xmlns:ows="http://www.opengis.net/ows" version="1.0.0">
  <ows:Exception exceptionCode="InvalidParameterValue" locator="identifier">
      Invalid identifier
  </ows:Exception>
</ows:ExceptionReport>
"#;

    /// OWS 1.1 exception report carrying its message in `ExceptionText`.
    pub const EXCEPTION_REPORT_OWS11: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ows:ExceptionReport xmlns:ows="http://www.opengis.net/ows/1.1" version="1.1.0">
  <ows:Exception exceptionCode="MissingParameterValue" locator="format">
    <ows:ExceptionText>  Parameter FORMAT is required  </ows:ExceptionText>
  </ows:Exception>
</ows:ExceptionReport>
"#;

    /// Exception report with a code but no message.
    pub const EXCEPTION_REPORT_EMPTY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ExceptionReport xmlns="http://www.opengis.net/ows/1.1" version="1.1.0">
  <Exception exceptionCode="NoApplicableCode"/>
</ExceptionReport>
"#;

    /// Coverages document returned when `store=True`.
    pub const COVERAGES_REFERENCE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Coverages xmlns="http://www.opengis.net/wcs/1.1"
    xmlns:ows="http://www.opengis.net/ows"
    xmlns:xlink="http://www.w3.org/1999/xlink">
  <Coverage>
    <ows:Title>Surface temperature</ows:Title>
    <ows:Identifier>TuMYrRQ4</ows:Identifier>
    <ows:Reference xlink:href="http://example.org/output/TuMYrRQ4.nc"/>
  </Coverage>
</Coverages>
"#;

    /// Minimal multipart body returned when `store=False`.
    pub const MULTIPART_BOUNDARY: &str = "wcs";

    /// Multipart payload with an XML part and a binary part.
    pub const MULTIPART_BODY: &[u8] = b"--wcs\r\nContent-Type: text/xml\r\n\r\n<Coverages/>\r\n--wcs\r\nContent-Type: application/netcdf\r\n\r\nCDF\x01\x00\x00\r\n--wcs--\r\n";
}
