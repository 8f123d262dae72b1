//! Plain text decoding.

use crate::{FlattextError, Result};

/// Decode UTF-8 text verbatim. Nothing is trimmed or normalized.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        let valid_up_to = e.utf8_error().valid_up_to();
        FlattextError::parsing_with_source(
            format!("Text is not valid UTF-8 (invalid byte at offset {})", valid_up_to),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim() {
        let input = "  line one\r\nline two\n\n";
        assert_eq!(decode_text(input.as_bytes()).unwrap(), input);
    }

    #[test]
    fn test_multibyte() {
        assert_eq!(decode_text("café ☕".as_bytes()).unwrap(), "café ☕");
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode_text(b"abc\xffdef").unwrap_err();
        assert!(matches!(err, FlattextError::Parsing { .. }));
        assert!(err.detail().contains("offset 3"), "{}", err);
    }
}
