//! Operation metadata (`OperationsMetadata/Operation`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use wcs_common::{WcsError, WcsResult};

use crate::xml::{ows, Element, Step, XLINK_NS};

/// HTTP verb of a DCP binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "Get"),
            HttpMethod::Post => write!(f, "Post"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = WcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            _ => Err(WcsError::InvalidParameter {
                param: "method".to_string(),
                message: format!("unknown HTTP method: {}", s),
            }),
        }
    }
}

/// One advertised operation and the URLs that invoke it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub name: String,
    /// Allowed parameter values (`Parameter/AllowedValues/Value`), typically output formats.
    pub format_options: Vec<String>,
    /// Invocation URL per HTTP verb.
    pub methods: BTreeMap<HttpMethod, String>,
}

impl Operation {
    pub fn from_element(elem: &Element) -> WcsResult<Self> {
        let name = elem
            .attribute(None, "name")
            .ok_or_else(|| WcsError::MissingElement("Operation/@name".to_string()))?
            .to_string();

        let format_options =
            elem.find_all_text(&[ows("Parameter"), ows("AllowedValues"), ows("Value")]);

        let mut methods = BTreeMap::new();
        for verb in elem.find_all(&[ows("DCP"), ows("HTTP"), Step::Any]) {
            let Ok(method) = verb.name().local.parse::<HttpMethod>() else {
                debug!(operation = %name, verb = %verb.name(), "Ignoring unknown DCP binding");
                continue;
            };
            let Some(url) = verb.attribute(Some(XLINK_NS), "href") else {
                debug!(operation = %name, %method, "DCP binding has no xlink:href");
                continue;
            };
            // Last binding per verb wins.
            methods.insert(method, url.to_string());
        }

        Ok(Self {
            name,
            format_options,
            methods,
        })
    }

    /// Invocation URL for `method`, if bound.
    pub fn url_for(&self, method: HttpMethod) -> Option<&str> {
        self.methods.get(&method).map(String::as_str)
    }
}
