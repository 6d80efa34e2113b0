//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For WGS84 boxes the coordinates are longitude/latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse OWS corner text, e.g. `LowerCorner` "-180 -90" and `UpperCorner` "180 90".
    ///
    /// Each corner must hold at least two whitespace-separated numbers; any
    /// further ordinates (e.g. a vertical axis) are ignored.
    pub fn from_corners(lower: &str, upper: &str) -> Result<Self, BboxParseError> {
        let (min_x, min_y) = parse_corner(lower)?;
        let (max_x, max_y) = parse_corner(upper)?;
        Ok(Self::new(min_x, min_y, max_x, max_y))
    }

    /// Parse a KVP bounding box string: "minx,miny,maxx,maxy"
    pub fn from_kvp_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self {
            min_x: parse_number(parts[0])?,
            min_y: parse_number(parts[1])?,
            max_x: parse_number(parts[2])?,
            max_y: parse_number(parts[3])?,
        })
    }

    /// Render as the comma-joined KVP form used in request query strings.
    pub fn to_kvp_string(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Corner tuple in `(minx, miny, maxx, maxy)` order.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

impl From<(f64, f64, f64, f64)> for BoundingBox {
    fn from((min_x, min_y, max_x, max_y): (f64, f64, f64, f64)) -> Self {
        Self::new(min_x, min_y, max_x, max_y)
    }
}

/// A bounding box expressed in a named coordinate reference system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsBoundingBox {
    pub bbox: BoundingBox,
    /// CRS identifier as advertised, e.g. "urn:ogc:def:crs:EPSG::4326"
    pub crs: String,
}

impl CrsBoundingBox {
    pub fn new(bbox: BoundingBox, crs: impl Into<String>) -> Self {
        Self {
            bbox,
            crs: crs.into(),
        }
    }
}

fn parse_corner(s: &str) -> Result<(f64, f64), BboxParseError> {
    let mut parts = s.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(x), Some(y)) => Ok((parse_number(x)?, parse_number(y)?)),
        _ => Err(BboxParseError::InvalidCorner(s.to_string())),
    }
}

fn parse_number(s: &str) -> Result<f64, BboxParseError> {
    s.parse()
        .map_err(|_| BboxParseError::InvalidNumber(s.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bounding box format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid corner: '{0}'. Expected two whitespace-separated numbers")]
    InvalidCorner(String),

    #[error("Invalid number in bounding box: {0}")]
    InvalidNumber(String),
}
