//! Owned, namespace-resolved XML element tree.
//!
//! Capabilities and coverage-description documents are small, so they are
//! read fully into a tree and queried with short paths of qualified names,
//! in the spirit of ElementTree's `find`/`findall`.
//!
//! OWS namespace variants are canonicalised while parsing (see
//! [`canonical_namespace`]), so lookups only ever need [`OWS_NS`].

use std::fmt;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use wcs_common::{WcsError, WcsResult};

/// WCS 1.1 namespace.
pub const WCS_NS: &str = "http://www.opengis.net/wcs/1.1";

/// Canonical OWS common namespace.
pub const OWS_NS: &str = "http://www.opengis.net/ows";

/// XLink namespace (used for `xlink:href`).
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Namespaces that servers use for OWS common elements.
const OWS_ALIASES: &[&str] = &[
    "http://www.opengis.net/ows/1.1",
    "http://www.opengis.net/wcs/1.1/ows",
];

/// Map an OWS namespace variant onto [`OWS_NS`]; other URIs are returned as-is.
pub fn canonical_namespace(uri: &str) -> &str {
    if OWS_ALIASES.contains(&uri) {
        OWS_NS
    } else {
        uri
    }
}

/// A resolved element or attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(namespace: Option<&str>, local: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local: local.to_string(),
        }
    }

    pub fn matches(&self, namespace: Option<&str>, local: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local == local
    }
}

impl fmt::Display for QName {
    /// Clark notation: `{namespace}local`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// One step of a lookup path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Child with this namespace and local name.
    Tag {
        ns: &'static str,
        local: &'static str,
    },
    /// Any child element (`*`).
    Any,
}

impl Step {
    fn matches(&self, name: &QName) -> bool {
        match self {
            Step::Tag { ns, local } => name.matches(Some(*ns), local),
            Step::Any => true,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Tag { local, .. } => write!(f, "{}", local),
            Step::Any => write!(f, "*"),
        }
    }
}

/// Step for an element in the WCS 1.1 namespace.
pub const fn wcs(local: &'static str) -> Step {
    Step::Tag { ns: WCS_NS, local }
}

/// Step for an element in the OWS namespace.
pub const fn ows(local: &'static str) -> Step {
    Step::Tag { ns: OWS_NS, local }
}

/// Render a path for error messages, e.g. `ServiceIdentification/Fees`.
pub fn display_path(path: &[Step]) -> String {
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// An XML element with its attributes, text content and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: QName,
    attributes: Vec<(QName, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Parse a complete document and return its root element.
    pub fn parse(xml: &str) -> WcsResult<Element> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        build(NsReader::from_str(xml))
    }

    /// Parse a document from raw bytes.
    ///
    /// The encoding comes from a byte order mark or the XML declaration and
    /// defaults to UTF-8.
    pub fn parse_bytes(bytes: &[u8]) -> WcsResult<Element> {
        build(NsReader::from_reader(bytes))
    }

    pub fn name(&self) -> &QName {
        &self.name
    }

    /// True if this element's name matches the step.
    pub fn is(&self, step: Step) -> bool {
        step.matches(&self.name)
    }

    /// Trimmed text content; `None` when empty or whitespace only.
    pub fn text(&self) -> Option<&str> {
        let text = self.text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Attribute value by namespace and local name.
    pub fn attribute(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.matches(namespace, local))
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First element reached by `path`, in document order.
    pub fn find(&self, path: &[Step]) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// All elements reached by `path`, in document order.
    pub fn find_all(&self, path: &[Step]) -> Vec<&Element> {
        let mut current = vec![self];
        for step in path {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter())
                .filter(|child| step.matches(&child.name))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// Text of the first element reached by `path`.
    pub fn find_text(&self, path: &[Step]) -> Option<&str> {
        self.find(path).and_then(Element::text)
    }

    /// Texts of every element reached by `path`, skipping empty ones.
    pub fn find_all_text(&self, path: &[Step]) -> Vec<String> {
        self.find_all(path)
            .into_iter()
            .filter_map(Element::text)
            .map(str::to_string)
            .collect()
    }

    /// Pre-order traversal of this element and all its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn build(mut reader: NsReader<&[u8]>) -> WcsResult<Element> {
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        buf.clear();
        let (ns, event) = match reader.read_resolved_event_into(&mut buf) {
            Ok((ns, event)) => (namespace(ns)?, event),
            Err(e) => {
                return Err(WcsError::XmlParse(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        };

        match event {
            Event::Start(e) => {
                let element = open_element(&reader, ns, &e)?;
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = open_element(&reader, ns, &e)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| WcsError::XmlParse("unbalanced end tag".to_string()))?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape().map_err(xml_error)?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    let text = reader.decoder().decode(&c).map_err(xml_error)?;
                    current.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(WcsError::XmlParse(
            "unexpected end of document".to_string(),
        ));
    }
    root.ok_or_else(|| WcsError::XmlParse("document has no root element".to_string()))
}

fn open_element(
    reader: &NsReader<&[u8]>,
    namespace_uri: Option<String>,
    start: &BytesStart<'_>,
) -> WcsResult<Element> {
    let decoder = reader.decoder();
    let local = decoder
        .decode(start.local_name().into_inner())
        .map_err(xml_error)?;
    let name = QName::new(namespace_uri.as_deref(), &local);

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| WcsError::XmlParse(e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let (ns, local) = reader.resolve_attribute(attr.key);
        let ns = namespace(ns)?;
        let local = decoder.decode(local.into_inner()).map_err(xml_error)?;
        let raw = decoder.decode(&attr.value).map_err(xml_error)?;
        let value = unescape(&raw).map_err(|e| WcsError::XmlParse(e.to_string()))?;
        attributes.push((QName::new(ns.as_deref(), &local), value.into_owned()));
    }

    Ok(Element {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Owned, canonicalised namespace URI of a resolved name.
fn namespace(result: ResolveResult<'_>) -> WcsResult<Option<String>> {
    match result {
        ResolveResult::Bound(ns) => {
            let uri = std::str::from_utf8(ns.into_inner())?;
            Ok(Some(canonical_namespace(uri).to_string()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(WcsError::XmlParse(format!(
            "undeclared namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn xml_error(e: quick_xml::Error) -> WcsError {
    WcsError::XmlParse(e.to_string())
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> WcsResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(WcsError::XmlParse(
            "document has more than one root element".to_string(),
        )),
    }
}
