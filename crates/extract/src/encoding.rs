use crate::error::ExtractResult;
use base64::{engine::general_purpose, Engine as _};

/// Decodes a base64 payload, accepting an optional `data:<mime>;base64,` prefix.
///
/// Everything up to and including the last comma is discarded before decoding.
pub fn decode_base64(payload: &str) -> ExtractResult<Vec<u8>> {
    let body = payload.rsplit_once(',').map_or(payload, |(_, body)| body);
    let body: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(general_purpose::STANDARD.decode(body)?)
}

/// Decodes UTF-8, silently dropping invalid byte sequences.
pub fn decode_utf8_ignoring_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    #[test]
    fn test_plain_base64() {
        assert_eq!(decode_base64("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_data_uri_prefix_is_stripped() {
        assert_eq!(
            decode_base64("data:text/plain;base64,aGVs\nbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode_base64("***").unwrap_err(),
            ExtractError::Base64(_)
        ));
    }

    #[test]
    fn test_invalid_utf8_dropped() {
        assert_eq!(decode_utf8_ignoring_invalid(b"caf\xff\xfee"), "cafe");
        assert_eq!(decode_utf8_ignoring_invalid("naïve".as_bytes()), "naïve");
    }
}
