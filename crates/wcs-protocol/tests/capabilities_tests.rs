//! Capabilities parsing and coverage lookup against canned documents.

mod common;

use std::collections::HashSet;

use common::{query_value, service, MockTransport};
use test_utils::fixtures::{capabilities, describe, responses};
use test_utils::{
    assert_bbox_approx_eq, flat_capabilities, hierarchical_capabilities, latin1_document,
};
use wcs_protocol::{HttpMethod, TimeLimits, WcsError, WebCoverageService};

// ============================================================================
// Service metadata
// ============================================================================

#[tokio::test]
async fn test_identification_and_provider() {
    let wcs = service(capabilities::HIERARCHICAL, MockTransport::new()).await;

    let id = wcs.identification();
    assert_eq!(id.service, "WCS");
    assert_eq!(id.version, "1.1.0");
    assert_eq!(id.title, "Climate Model Archive");
    assert_eq!(id.keywords, vec!["climate", "WCS"]);
    assert_eq!(id.fees, "NONE");
    assert_eq!(id.access_constraints, "Registered users only");

    let provider = wcs.provider();
    assert_eq!(provider.name, "Example Data Centre");
    assert_eq!(provider.url.as_deref(), Some("http://example.org/"));
    let contact = provider.contact.as_ref().unwrap();
    assert_eq!(contact.individual_name.as_deref(), Some("Jo Bloggs"));
    let info = contact.contact_info.as_ref().unwrap();
    assert_eq!(info.address.as_ref().unwrap().email(), Some("data@example.org"));
    assert_eq!(info.phone.as_ref().unwrap().fax(), Some("+44 1234 567891"));
}

#[tokio::test]
async fn test_operations() {
    let wcs = service(capabilities::HIERARCHICAL, MockTransport::new()).await;

    let names: Vec<&str> = wcs.operations().iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, vec!["GetCapabilities", "DescribeCoverage", "GetCoverage"]);

    let get_coverage = wcs.get_operation_by_name("GetCoverage").unwrap();
    assert_eq!(
        get_coverage.format_options,
        vec!["application/netcdf", "application/x-hdf"]
    );
    assert_eq!(
        get_coverage.url_for(HttpMethod::Post),
        Some("http://example.org/wcs/coverage-post")
    );
}

#[tokio::test]
async fn test_missing_required_section_fails() {
    let xml = capabilities::FLAT.replace("ServiceProvider", "Provider");
    let result =
        WebCoverageService::with_transport(capabilities::ENDPOINT, Some(&xml), MockTransport::new())
            .await;
    assert!(matches!(result, Err(WcsError::MissingElement(ref p)) if p == "ServiceProvider"));
}

// ============================================================================
// Hierarchical contents
// ============================================================================

#[tokio::test]
async fn test_leaf_inherits_from_parent() {
    let wcs = service(capabilities::HIERARCHICAL, MockTransport::new()).await;

    let precip = wcs.coverage("PRECIP01").unwrap();
    assert_eq!(precip.title.as_deref(), Some("Climate runs"));
    assert_eq!(
        precip.abstract_text.as_deref(),
        Some("Monthly means from the control run.")
    );
    assert_eq!(precip.keywords, vec!["climate", "monthly"]);
    assert_bbox_approx_eq!(
        precip.bounding_box_wgs84.unwrap().as_tuple(),
        (-180.0, -90.0, 180.0, 90.0),
        1e-9
    );
    assert_eq!(precip.supported_crs, vec!["urn:ogc:def:crs:EPSG::4326"]);
    assert_eq!(precip.supported_formats, vec!["application/netcdf"]);
    assert!(precip.bounding_boxes.is_empty());
}

#[tokio::test]
async fn test_leaf_own_fields_win() {
    let wcs = service(capabilities::HIERARCHICAL, MockTransport::new()).await;

    let temp = wcs.coverage("TuMYrRQ4").unwrap();
    assert_eq!(temp.title.as_deref(), Some("Surface temperature"));
    assert_eq!(temp.keywords, vec!["temperature", "climate", "monthly"]);
    assert_bbox_approx_eq!(
        temp.bounding_box_wgs84.unwrap().as_tuple(),
        (-112.0, 36.0, -106.0, 41.0),
        1e-9
    );
    assert_eq!(temp.supported_formats.len(), 2);

    assert_eq!(temp.bounding_boxes.len(), 2);
    let osgb = &temp.bounding_boxes[0];
    assert_eq!(osgb.crs, "urn:ogc:def:crs:EPSG::27700");
    assert_bbox_approx_eq!(osgb.bbox.as_tuple(), (0.0, 0.0, 700000.0, 1300000.0), 1e-6);
}

#[tokio::test]
async fn test_generated_hierarchy_one_entry_per_leaf() {
    for n in [1usize, 2, 5, 9] {
        let ids: Vec<String> = (0..n).map(|i| format!("cov{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let xml = hierarchical_capabilities(&id_refs, 2);
        let wcs = service(&xml, MockTransport::new()).await;

        let found: Vec<&str> = wcs.items().map(|(id, _)| id).collect();
        assert_eq!(found, id_refs, "document order for {n} leaves");
        assert!(wcs.get_coverage("Parent").is_none());

        for (i, id) in id_refs.iter().enumerate() {
            let cm = wcs.get_coverage(id).unwrap();
            assert_eq!(cm.keywords.len(), i % 3 + 2);
            assert_eq!(cm.title.as_deref(), Some("Parent"));
        }
    }
}

// ============================================================================
// Flat contents
// ============================================================================

#[tokio::test]
async fn test_flat_contents_have_no_parent() {
    let wcs = service(capabilities::FLAT, MockTransport::new()).await;

    let ids: HashSet<&str> = wcs.items().map(|(id, _)| id).collect();
    assert_eq!(ids, HashSet::from(["dem", "landcover", "sst"]));

    let landcover = wcs.coverage("landcover").unwrap();
    assert!(landcover.keywords.is_empty());
    assert!(landcover.bounding_box_wgs84.is_none());

    let dem = wcs.coverage("dem").unwrap();
    assert_eq!(dem.keywords, vec!["dem"]);
}

#[tokio::test]
async fn test_generated_flat_keyword_counts() {
    let xml = flat_capabilities(&["a", "b", "c", "d"]);
    let wcs = service(&xml, MockTransport::new()).await;
    let counts: Vec<usize> = wcs.contents().iter().map(|cm| cm.keywords.len()).collect();
    assert_eq!(counts, vec![0, 1, 2, 0]);
}

#[tokio::test]
async fn test_ows_namespace_variants_parse_alike() {
    let ows10 = capabilities::FLAT.replace(
        "http://www.opengis.net/ows/1.1",
        "http://www.opengis.net/ows",
    );
    let a = service(capabilities::FLAT, MockTransport::new()).await;
    let b = service(&ows10, MockTransport::new()).await;

    assert_eq!(a.identification(), b.identification());
    assert_eq!(a.operations(), b.operations());
    assert_eq!(a.contents(), b.contents());
}

// ============================================================================
// Fetching capabilities and descriptions
// ============================================================================

#[tokio::test]
async fn test_capabilities_fetched_when_not_supplied() {
    let transport = MockTransport::new();
    transport.respond_xml("GetCapabilities", capabilities::FLAT);

    let wcs = WebCoverageService::with_transport(capabilities::ENDPOINT, None, transport.clone())
        .await
        .unwrap();
    assert_eq!(wcs.contents().len(), 3);

    let url = transport.last_request().unwrap();
    assert_eq!(
        url.as_str(),
        "http://example.org/wcs?service=WCS&request=GetCapabilities&version=1.1.0"
    );
}

#[tokio::test]
async fn test_latin1_capabilities_decoded() {
    let xml = capabilities::FLAT
        .replace("Flat WCS", "Temp\u{e9}rature de surface")
        .replace("Land cover", "Occupation du sol \u{e0} 30m");
    let transport = MockTransport::new();
    transport.respond(
        "GetCapabilities",
        200,
        Some("text/xml; charset=ISO-8859-1"),
        latin1_document(&xml),
    );

    let wcs = WebCoverageService::with_transport(capabilities::ENDPOINT, None, transport)
        .await
        .unwrap();
    assert_eq!(wcs.identification().title, "Temp\u{e9}rature de surface");
    assert_eq!(
        wcs.coverage("landcover").unwrap().title.as_deref(),
        Some("Occupation du sol \u{e0} 30m")
    );
    assert_eq!(wcs.contents().len(), 3);
}

#[tokio::test]
async fn test_capabilities_exception_report() {
    let transport = MockTransport::new();
    transport.respond("GetCapabilities", 400, Some("application/xml"), responses::EXCEPTION_REPORT);

    let err = WebCoverageService::with_transport(capabilities::ENDPOINT, None, transport)
        .await
        .unwrap_err();
    assert_eq!(err.service_message(), Some("Invalid identifier"));
}

#[tokio::test]
async fn test_time_limits_via_describe() {
    let transport = MockTransport::new();
    transport.respond_xml("DescribeCoverage", describe::WITH_TIME_PERIOD);
    let wcs = service(capabilities::HIERARCHICAL, transport.clone()).await;

    let limits = wcs
        .coverage("TuMYrRQ4")
        .unwrap()
        .time_limits(&wcs)
        .await
        .unwrap();
    assert_eq!(
        limits,
        Some(TimeLimits::new("2000-01-16T00:00:00Z", "2099-12-16T00:00:00Z"))
    );

    let url = transport.last_request().unwrap();
    assert_eq!(url.path(), "/wcs/describe");
    assert_eq!(query_value(&url, "identifier").as_deref(), Some("TuMYrRQ4"));
    assert_eq!(query_value(&url, "version").as_deref(), Some("1.1.0"));
}

#[tokio::test]
async fn test_time_limits_absent() {
    let transport = MockTransport::new();
    transport.respond_xml("DescribeCoverage", describe::WITHOUT_TIME);
    let wcs = service(capabilities::FLAT, transport.clone()).await;

    let limits = wcs.coverage("dem").unwrap().time_limits(&wcs).await.unwrap();
    assert_eq!(limits, None);

    // Not advertised, so the service URL is used.
    let url = transport.last_request().unwrap();
    assert_eq!(url.path(), "/wcs");
}
