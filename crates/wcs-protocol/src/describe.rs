//! DescribeCoverage requests and response inspection.

use wcs_common::TimeLimits;

use crate::xml::{wcs, Element};

/// Query parameters for a DescribeCoverage request.
pub fn describe_coverage_params(identifier: &str, version: &str) -> Vec<(String, String)> {
    vec![
        ("service".to_string(), "WCS".to_string()),
        ("request".to_string(), "DescribeCoverage".to_string()),
        ("version".to_string(), version.to_string()),
        ("identifier".to_string(), identifier.to_string()),
    ]
}

/// Extract the temporal extent from a DescribeCoverage response.
///
/// Accepts either the `CoverageDescriptions` document root or a single
/// `CoverageDescription`. When several time periods are present the last one
/// is used. Begin/end come from `BeginPosition`/`EndPosition`, or from the
/// first and last child of the period when those are not named as such.
pub fn time_limits(description: &Element) -> Option<TimeLimits> {
    let domain = [wcs("Domain"), wcs("TemporalDomain"), wcs("TimePeriod")];

    let periods = if description.is(wcs("CoverageDescription")) {
        description.find_all(&domain)
    } else {
        let path = [
            wcs("CoverageDescription"),
            wcs("Domain"),
            wcs("TemporalDomain"),
            wcs("TimePeriod"),
        ];
        description.find_all(&path)
    };

    let period = periods.last()?;
    let begin = period
        .find_text(&[wcs("BeginPosition")])
        .or_else(|| period.children().first().and_then(Element::text))?;
    let end = period
        .find_text(&[wcs("EndPosition")])
        .or_else(|| period.children().last().and_then(Element::text))?;

    Some(TimeLimits::new(begin, end))
}
