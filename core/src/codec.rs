//! URL-encoding of parameter mappings.
//!
//! Escaping follows RFC 3986: everything outside the unreserved set
//! (`ALPHA DIGIT - . _ ~`) is percent-encoded, including `/`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::Error;
use crate::params::Params;

/// Characters escaped in keys and values: all but the RFC 3986 unreserved set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-escape a single key or value.
pub fn escape(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Encode `params` as `key=value` pairs joined by `&`.
///
/// List values produce one pair per element. Entry order and element order
/// are preserved.
pub fn encode(params: &Params) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params.iter() {
        let key = escape(key);
        for item in value.values() {
            pairs.push(format!("{key}={}", escape(item)));
        }
    }
    pairs.join("&")
}

/// Decode a query string into a mapping.
///
/// `+` decodes to a space. Repeated keys accumulate: the first occurrence is
/// a scalar, later ones turn it into a list of every value in order.
pub fn decode(query: &str) -> Result<Params, Error> {
    let mut params = Params::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.append(unescape(key)?, unescape(value)?);
    }
    Ok(params)
}

fn unescape(component: &str) -> Result<String, Error> {
    let bytes = component.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let well_formed = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(Error::Decode(format!(
                "malformed percent-escape at byte {i} of `{component}`"
            )));
        }
    }
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::Decode(format!("`{component}` is not valid UTF-8: {e}")))
}
