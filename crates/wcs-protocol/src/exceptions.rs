//! OWS exception report detection.

use wcs_common::{WcsError, WcsResult};

use crate::xml::{ows, Element};

/// True if a Content-Type header value denotes an XML body.
///
/// Parameters such as `; charset=UTF-8` are ignored.
pub fn is_xml_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/xml" || mime == "application/xml" || mime.ends_with("+xml")
}

/// Fail with [`WcsError::ServiceException`] if the document reports one.
///
/// The message is the trimmed `ExceptionText` (OWS 1.1) or, failing that, the
/// trimmed text of the `Exception` element itself (OWS 1.0). Reports with no
/// text at all use the `exceptionCode` instead.
pub fn check_for_exception(doc: &Element) -> WcsResult<()> {
    let Some(exception) = doc.descendants().find(|e| e.is(ows("Exception"))) else {
        return Ok(());
    };

    let code = exception.attribute(None, "exceptionCode");
    let message = exception
        .find_text(&[ows("ExceptionText")])
        .or_else(|| exception.text())
        .or(code)
        .unwrap_or("unknown service exception")
        .to_string();

    Err(WcsError::ServiceException {
        code: code.map(str::to_string),
        message,
    })
}
