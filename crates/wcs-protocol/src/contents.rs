//! Coverage metadata (`Contents/CoverageSummary`).
//!
//! A hierarchical capabilities document groups leaf summaries under a
//! top-level summary. Leaves inherit any field they leave out from that
//! parent, and their keyword lists are extended with the parent's keywords.

use serde::Serialize;
use tracing::warn;

use wcs_common::{BoundingBox, CrsBoundingBox, TimeLimits, WcsError, WcsResult};

use crate::describe;
use crate::service::WebCoverageService;
use crate::xml::{display_path, ows, wcs, Element, Step};

/// Text at `path` under `elem`, else under `parent`, else `None`.
///
/// An element with empty text counts as missing.
pub fn check_child_and_parent<'a>(
    elem: &'a Element,
    parent: Option<&'a Element>,
    path: &[Step],
) -> Option<&'a str> {
    elem.find_text(path)
        .or_else(|| parent.and_then(|p| p.find_text(path)))
}

/// One advertised coverage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentMetadata {
    pub id: String,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub description: Option<String>,
    /// Own keywords followed by the parent's; duplicates are kept.
    pub keywords: Vec<String>,
    pub bounding_box_wgs84: Option<BoundingBox>,
    pub bounding_boxes: Vec<CrsBoundingBox>,
    pub supported_crs: Vec<String>,
    pub supported_formats: Vec<String>,
}

impl ContentMetadata {
    /// Build from a `CoverageSummary`, falling back to `parent` for missing fields.
    pub fn from_element(elem: &Element, parent: Option<&Element>) -> WcsResult<Self> {
        let text = |path: &[Step]| check_child_and_parent(elem, parent, path).map(str::to_string);

        let id_path = [wcs("Identifier")];
        let id = text(&id_path).ok_or_else(|| WcsError::MissingElement(display_path(&id_path)))?;

        let keyword_path = [ows("Keywords"), ows("Keyword")];
        let mut keywords = elem.find_all_text(&keyword_path);
        if let Some(parent) = parent {
            keywords.extend(parent.find_all_text(&keyword_path));
        }

        let wgs84 = match elem.find(&[ows("WGS84BoundingBox")]) {
            Some(b) => Some(b),
            None => parent.and_then(|p| p.find(&[ows("WGS84BoundingBox")])),
        };
        let bounding_box_wgs84 = wgs84.map(parse_box).transpose()?;

        let mut bounding_boxes = Vec::new();
        for b in elem.find_all(&[ows("BoundingBox")]) {
            let Some(crs) = b.attribute(None, "crs") else {
                warn!(coverage = %id, "Skipping BoundingBox without crs attribute");
                continue;
            };
            bounding_boxes.push(CrsBoundingBox::new(parse_box(b)?, crs));
        }

        let list = |path: &[Step]| {
            let own = elem.find_all_text(path);
            match parent {
                Some(p) if own.is_empty() => p.find_all_text(path),
                _ => own,
            }
        };

        Ok(Self {
            title: text(&[ows("Title")]),
            abstract_text: text(&[ows("Abstract")]),
            description: text(&[wcs("Description")]),
            keywords,
            bounding_box_wgs84,
            bounding_boxes,
            supported_crs: list(&[wcs("SupportedCRS")]),
            supported_formats: list(&[wcs("SupportedFormat")]),
            id,
        })
    }

    /// Temporal extent, resolved with a DescribeCoverage request.
    ///
    /// Returns `Ok(None)` when the description has no `TimePeriod`.
    pub async fn time_limits(&self, service: &WebCoverageService) -> WcsResult<Option<TimeLimits>> {
        let description = service.describe_coverage(&self.id).await?;
        Ok(describe::time_limits(&description))
    }
}

fn parse_box(elem: &Element) -> WcsResult<BoundingBox> {
    let lower = elem
        .find_text(&[ows("LowerCorner")])
        .ok_or_else(|| WcsError::MissingElement(format!("{}/LowerCorner", elem.name().local)))?;
    let upper = elem
        .find_text(&[ows("UpperCorner")])
        .ok_or_else(|| WcsError::MissingElement(format!("{}/UpperCorner", elem.name().local)))?;
    Ok(BoundingBox::from_corners(lower, upper)?)
}
