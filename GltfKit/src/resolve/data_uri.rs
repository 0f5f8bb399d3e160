//! Inline `data:` URI payloads.
//!
//! Syntax: `data:[<mediatype>][;base64],<payload>`. Payloads without the
//! base64 tag are taken as raw bytes.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::error::{Error, Result};

const SCHEME: &str = "data:";
const BASE64_TAG: &str = ";base64";

/// MIME of a base64 payload with no media type
pub const DEFAULT_BASE64_MIME: &str = "application/octet-stream";

/// MIME of a raw payload with no media type
pub const DEFAULT_TEXT_MIME: &str = "text/plain;charset=US-ASCII";

/// A decoded `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Whether `uri` uses the `data:` scheme.
#[must_use]
pub fn is_data_uri(uri: &str) -> bool {
    uri.starts_with(SCHEME)
}

/// Decode a `data:` URI into its payload and media type.
///
/// # Errors
///
/// Returns [`Error::InvalidDataUri`] if the scheme or the `,` separator is
/// missing, or if a base64 payload does not decode.
///
/// [`Error::InvalidDataUri`]: crate::Error::InvalidDataUri
pub fn decode_data_uri(uri: &str) -> Result<DataUri> {
    let (header, payload) = split(uri)?;
    let (media_type, is_base64) = parse_header(header);

    let bytes = if is_base64 {
        BASE64
            .decode(payload)
            .map_err(|e| Error::invalid_data_uri(format!("bad base64 payload: {e}")))?
    } else {
        payload.as_bytes().to_vec()
    };

    Ok(DataUri { bytes, mime: effective_mime(media_type, is_base64).to_string() })
}

/// The media type of a `data:` URI, without decoding the payload.
///
/// Returns `None` when `uri` is not a well formed `data:` URI.
#[must_use]
pub fn data_uri_mime(uri: &str) -> Option<&str> {
    let (header, _) = split(uri).ok()?;
    let (media_type, is_base64) = parse_header(header);
    Some(effective_mime(media_type, is_base64))
}

fn split(uri: &str) -> Result<(&str, &str)> {
    let rest = uri
        .strip_prefix(SCHEME)
        .ok_or_else(|| Error::invalid_data_uri("missing data: scheme"))?;
    rest.split_once(',')
        .ok_or_else(|| Error::invalid_data_uri("missing ',' before the payload"))
}

fn parse_header(header: &str) -> (&str, bool) {
    match header.strip_suffix(BASE64_TAG) {
        Some(media_type) => (media_type, true),
        None => (header, false),
    }
}

fn effective_mime(media_type: &str, is_base64: bool) -> &str {
    match (media_type.is_empty(), is_base64) {
        (false, _) => media_type,
        (true, true) => DEFAULT_BASE64_MIME,
        (true, false) => DEFAULT_TEXT_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base64_without_media_type() {
        let data = decode_data_uri("data:;base64,AAECAw==").unwrap();
        assert_eq!(data.bytes, vec![0, 1, 2, 3]);
        assert_eq!(data.mime, "application/octet-stream");
    }

    #[test]
    fn test_base64_with_media_type() {
        let data = decode_data_uri("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(data.bytes, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(data.mime, "image/png");
    }

    #[test]
    fn test_raw_payload() {
        let data = decode_data_uri("data:,hello").unwrap();
        assert_eq!(data.bytes, b"hello".to_vec());
        assert_eq!(data.mime, DEFAULT_TEXT_MIME);

        let data = decode_data_uri("data:text/csv,a,b").unwrap();
        assert_eq!(data.bytes, b"a,b".to_vec());
        assert_eq!(data.mime, "text/csv");
    }

    #[test]
    fn test_empty_payload() {
        let data = decode_data_uri("data:;base64,").unwrap();
        assert!(data.bytes.is_empty());
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(decode_data_uri("data:;base64"), Err(Error::InvalidDataUri { .. })));
        assert!(matches!(decode_data_uri("file.bin"), Err(Error::InvalidDataUri { .. })));
        assert!(matches!(decode_data_uri("data:;base64,A$=="), Err(Error::InvalidDataUri { .. })));
    }

    #[test]
    fn test_mime_sniff() {
        assert_eq!(data_uri_mime("data:image/jpeg;base64,/9j/"), Some("image/jpeg"));
        assert_eq!(data_uri_mime("data:;base64,AAAA"), Some(DEFAULT_BASE64_MIME));
        assert_eq!(data_uri_mime("data:,x"), Some(DEFAULT_TEXT_MIME));
        assert_eq!(data_uri_mime("data:image/png"), None);
        assert!(is_data_uri("data:,x"));
        assert!(!is_data_uri("textures/a.png"));
    }
}
