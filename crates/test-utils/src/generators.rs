//! Generators for capabilities documents with arbitrary coverage sets.
//!
//! These produce minimal but valid WCS 1.1.0 capabilities documents so tests
//! can check structural properties (one entry per leaf, parent fallback) over
//! many shapes of input rather than a single fixture.

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Capabilities xmlns="http://www.opengis.net/wcs/1.1"
    xmlns:ows="http://www.opengis.net/ows"
    xmlns:xlink="http://www.w3.org/1999/xlink"
    version="1.1.0">
  <ows:ServiceIdentification>
    <ows:Title>Generated</ows:Title>
    <ows:Abstract>Generated capabilities</ows:Abstract>
    <ows:Fees>NONE</ows:Fees>
    <ows:AccessConstraints>NONE</ows:AccessConstraints>
  </ows:ServiceIdentification>
  <ows:ServiceProvider>
    <ows:ProviderName>Generator</ows:ProviderName>
  </ows:ServiceProvider>
  <ows:OperationsMetadata>
    <ows:Operation name="GetCoverage">
      <ows:DCP>
        <ows:HTTP>
          <ows:Get xlink:href="http://example.org/generated"/>
        </ows:HTTP>
      </ows:DCP>
    </ows:Operation>
  </ows:OperationsMetadata>
"#;

fn leaf(identifier: &str, keywords: usize) -> String {
    let mut xml = String::from("      <CoverageSummary>\n");
    if keywords > 0 {
        xml.push_str("        <ows:Keywords>\n");
        for k in 0..keywords {
            xml.push_str(&format!(
                "          <ows:Keyword>{}-kw{}</ows:Keyword>\n",
                identifier, k
            ));
        }
        xml.push_str("        </ows:Keywords>\n");
    }
    xml.push_str(&format!("        <Identifier>{}</Identifier>\n", identifier));
    xml.push_str("      </CoverageSummary>\n");
    xml
}

/// Builds a hierarchical capabilities document.
///
/// A single top-level summary titled "Parent" with `parent_keywords`
/// keywords groups one leaf per identifier. Leaf `i` carries `i % 3`
/// keywords of its own.
///
/// # Example
///
/// ```
/// use test_utils::hierarchical_capabilities;
///
/// let xml = hierarchical_capabilities(&["a", "b"], 2);
/// assert_eq!(xml.matches("<Identifier>").count(), 2);
/// ```
pub fn hierarchical_capabilities(identifiers: &[&str], parent_keywords: usize) -> String {
    let mut xml = String::from(HEADER);
    xml.push_str("  <Contents>\n    <CoverageSummary>\n");
    xml.push_str("      <ows:Title>Parent</ows:Title>\n");
    xml.push_str("      <ows:Keywords>\n");
    for k in 0..parent_keywords {
        xml.push_str(&format!("        <ows:Keyword>parent-kw{}</ows:Keyword>\n", k));
    }
    xml.push_str("      </ows:Keywords>\n");
    for (i, id) in identifiers.iter().enumerate() {
        xml.push_str(&leaf(id, i % 3));
    }
    xml.push_str("    </CoverageSummary>\n  </Contents>\n</Capabilities>\n");
    xml
}

/// Builds a flat capabilities document with one top-level summary per identifier.
///
/// Summary `i` carries `i % 3` keywords.
pub fn flat_capabilities(identifiers: &[&str]) -> String {
    let mut xml = String::from(HEADER);
    xml.push_str("  <Contents>\n");
    for (i, id) in identifiers.iter().enumerate() {
        xml.push_str(&leaf(id, i % 3));
    }
    xml.push_str("  </Contents>\n</Capabilities>\n");
    xml
}

/// Re-declares a UTF-8 document as ISO-8859-1 and encodes it that way.
///
/// Panics if the document contains characters outside Latin-1.
pub fn latin1_document(xml: &str) -> Vec<u8> {
    xml.replacen(r#"encoding="UTF-8""#, r#"encoding="ISO-8859-1""#, 1)
        .chars()
        .map(|c| u8::try_from(u32::from(c)).expect("character outside Latin-1"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchical_shape() {
        let xml = hierarchical_capabilities(&["a", "b", "c"], 1);
        assert_eq!(xml.matches("<CoverageSummary>").count(), 4);
        assert!(xml.contains("parent-kw0"));
        assert!(xml.contains("c-kw1"));
    }

    #[test]
    fn test_flat_shape() {
        let xml = flat_capabilities(&["x", "y"]);
        assert_eq!(xml.matches("<CoverageSummary>").count(), 2);
        assert!(!xml.contains("Parent"));
    }

    #[test]
    fn test_latin1_document() {
        let bytes = latin1_document("<?xml version=\"1.0\" encoding=\"UTF-8\"?><t>\u{e9}</t>");
        assert!(bytes.starts_with(br#"<?xml version="1.0" encoding="ISO-8859-1"?>"#));
        assert!(bytes.ends_with(b"<t>\xe9</t>"));
    }
}
