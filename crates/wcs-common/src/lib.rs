//! Common types shared across the WCS client crates.

pub mod bbox;
pub mod error;
pub mod time;

pub use bbox::{BboxParseError, BoundingBox, CrsBoundingBox};
pub use error::{WcsError, WcsResult};
pub use time::{TimeLimits, TimeParseError};
