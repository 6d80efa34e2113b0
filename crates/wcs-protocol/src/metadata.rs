//! Service-level metadata from the capabilities document.
//!
//! Each type wraps one OWS subtree. Required elements fail with
//! [`WcsError::MissingElement`]; everything else is optional and resolves to
//! `None` when absent.

use serde::Serialize;

use wcs_common::{WcsError, WcsResult};

use crate::xml::{display_path, ows, Element, Step, XLINK_NS};

/// Text of a required element. Present-but-empty resolves to an empty string.
fn required_text(elem: &Element, path: &[Step]) -> WcsResult<String> {
    elem.find(path)
        .map(|e| e.text().unwrap_or_default().to_string())
        .ok_or_else(|| WcsError::MissingElement(display_path(path)))
}

fn optional_text(elem: &Element, path: &[Step]) -> Option<String> {
    elem.find_text(path).map(str::to_string)
}

/// ServiceIdentification metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceIdentification {
    /// Always "WCS".
    pub service: String,
    /// Always "1.1.0".
    pub version: String,
    pub title: String,
    pub abstract_text: String,
    pub keywords: Vec<String>,
    pub fees: String,
    pub access_constraints: String,
}

impl ServiceIdentification {
    pub fn from_element(elem: &Element) -> WcsResult<Self> {
        Ok(Self {
            service: "WCS".to_string(),
            version: crate::service::WCS_VERSION.to_string(),
            title: required_text(elem, &[ows("Title")])?,
            abstract_text: required_text(elem, &[ows("Abstract")])?,
            keywords: elem.find_all_text(&[ows("Keywords"), ows("Keyword")]),
            fees: required_text(elem, &[ows("Fees")])?,
            access_constraints: required_text(elem, &[ows("AccessConstraints")])?,
        })
    }
}

/// ServiceProvider metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceProvider {
    pub name: String,
    /// Provider web site from `ProviderSite/@xlink:href`.
    pub url: Option<String>,
    pub contact: Option<ServiceContact>,
}

impl ServiceProvider {
    pub fn from_element(elem: &Element) -> WcsResult<Self> {
        Ok(Self {
            name: required_text(elem, &[ows("ProviderName")])?,
            url: elem
                .find(&[ows("ProviderSite")])
                .and_then(|site| site.attribute(Some(XLINK_NS), "href"))
                .map(str::to_string),
            contact: elem
                .find(&[ows("ServiceContact")])
                .map(ServiceContact::from_element),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceContact {
    pub individual_name: Option<String>,
    pub position_name: Option<String>,
    pub contact_info: Option<ContactInfo>,
}

impl ServiceContact {
    pub fn from_element(elem: &Element) -> Self {
        Self {
            individual_name: optional_text(elem, &[ows("IndividualName")]),
            position_name: optional_text(elem, &[ows("PositionName")]),
            contact_info: elem
                .find(&[ows("ContactInfo")])
                .map(ContactInfo::from_element),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactInfo {
    pub phone: Option<Phone>,
    pub address: Option<Address>,
}

impl ContactInfo {
    pub fn from_element(elem: &Element) -> Self {
        Self {
            phone: elem.find(&[ows("Phone")]).map(Phone::from_element),
            address: elem.find(&[ows("Address")]).map(Address::from_element),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub delivery_point: Option<String>,
    pub city: Option<String>,
    pub administrative_area: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub electronic_mail_address: Option<String>,
}

impl Address {
    pub fn from_element(elem: &Element) -> Self {
        Self {
            delivery_point: optional_text(elem, &[ows("DeliveryPoint")]),
            city: optional_text(elem, &[ows("City")]),
            administrative_area: optional_text(elem, &[ows("AdministrativeArea")]),
            postal_code: optional_text(elem, &[ows("PostalCode")]),
            country: optional_text(elem, &[ows("Country")]),
            electronic_mail_address: optional_text(elem, &[ows("ElectronicMailAddress")]),
        }
    }

    /// Shorthand for `electronic_mail_address`.
    pub fn email(&self) -> Option<&str> {
        self.electronic_mail_address.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phone {
    pub voice: Option<String>,
    pub facsimile: Option<String>,
}

impl Phone {
    pub fn from_element(elem: &Element) -> Self {
        Self {
            voice: optional_text(elem, &[ows("Voice")]),
            facsimile: optional_text(elem, &[ows("Facsimile")]),
        }
    }

    /// Shorthand for `facsimile`.
    pub fn fax(&self) -> Option<&str> {
        self.facsimile.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTIFICATION: &str = r#"<ows:ServiceIdentification xmlns:ows="http://www.opengis.net/ows/1.1">
        <ows:Title>T</ows:Title>
        <ows:Abstract>A</ows:Abstract>
        <ows:Keywords><ows:Keyword>k1</ows:Keyword><ows:Keyword>k2</ows:Keyword></ows:Keywords>
        <ows:Fees/>
        <ows:AccessConstraints>none</ows:AccessConstraints>
    </ows:ServiceIdentification>"#;

    #[test]
    fn test_identification() {
        let elem = Element::parse(IDENTIFICATION).unwrap();
        let id = ServiceIdentification::from_element(&elem).unwrap();
        assert_eq!(id.service, "WCS");
        assert_eq!(id.version, "1.1.0");
        assert_eq!(id.title, "T");
        assert_eq!(id.keywords, vec!["k1", "k2"]);
        assert_eq!(id.fees, "");
        assert_eq!(id.access_constraints, "none");
    }

    #[test]
    fn test_identification_missing_abstract() {
        let elem = Element::parse(
            r#"<ServiceIdentification xmlns="http://www.opengis.net/ows"><Title>T</Title></ServiceIdentification>"#,
        )
        .unwrap();
        match ServiceIdentification::from_element(&elem) {
            Err(WcsError::MissingElement(path)) => assert_eq!(path, "Abstract"),
            other => panic!("expected MissingElement, got {other:?}"),
        }
    }

    #[test]
    fn test_contact_with_partial_info() {
        let elem = Element::parse(
            r#"<ServiceContact xmlns="http://www.opengis.net/ows">
                 <IndividualName>Jo</IndividualName>
                 <ContactInfo><Phone><Voice>123</Voice></Phone></ContactInfo>
               </ServiceContact>"#,
        )
        .unwrap();
        let contact = ServiceContact::from_element(&elem);
        assert_eq!(contact.individual_name.as_deref(), Some("Jo"));
        assert_eq!(contact.position_name, None);
        let info = contact.contact_info.unwrap();
        assert!(info.address.is_none());
        let phone = info.phone.unwrap();
        assert_eq!(phone.voice.as_deref(), Some("123"));
        assert_eq!(phone.fax(), None);
    }
}
