//! On-disk envelope format.
//!
//! An encrypted file holds a single line, `hex(iv):hex(ciphertext)`. There is
//! no version tag and no integrity tag.

use crate::crypto::IV_LENGTH;
use crate::error::{DotenvencError, Result};

/// IV and ciphertext as stored in an encrypted secrets file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub iv: [u8; IV_LENGTH],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(iv: [u8; IV_LENGTH], ciphertext: Vec<u8>) -> Self {
        Self { iv, ciphertext }
    }

    /// Render as `hex(iv):hex(ciphertext)`.
    pub fn encode(&self) -> String {
        format!("{}:{}", hex::encode(self.iv), hex::encode(&self.ciphertext))
    }

    /// Split on the first colon and hex-decode both halves.
    ///
    /// Surrounding whitespace (a trailing newline added by an editor, say) is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `DotenvencError::MalformedEnvelope` if the colon is missing,
    /// either half is not hex, or the IV is not 16 bytes.
    pub fn decode(text: &str) -> Result<Self> {
        let (iv_hex, ciphertext_hex) = text.trim().split_once(':').ok_or_else(|| {
            DotenvencError::MalformedEnvelope("expected \"<iv hex>:<ciphertext hex>\"".to_string())
        })?;

        let iv_bytes = hex::decode(iv_hex)
            .map_err(|e| DotenvencError::MalformedEnvelope(format!("invalid IV hex: {}", e)))?;
        let iv: [u8; IV_LENGTH] = iv_bytes.try_into().map_err(|bytes: Vec<u8>| {
            DotenvencError::MalformedEnvelope(format!(
                "IV must be {} bytes (got {})",
                IV_LENGTH,
                bytes.len()
            ))
        })?;
        let ciphertext = hex::decode(ciphertext_hex).map_err(|e| {
            DotenvencError::MalformedEnvelope(format!("invalid ciphertext hex: {}", e))
        })?;

        Ok(Self { iv, ciphertext })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let envelope = Envelope::new([0xab; IV_LENGTH], vec![0x01, 0xff]);
        assert_eq!(
            envelope.encode(),
            "abababababababababababababababab:01ff"
        );
    }

    #[test]
    fn test_decode_accepts_trailing_newline() {
        let envelope = Envelope::new([7; IV_LENGTH], b"cipher".to_vec());
        let text = format!("{}\n", envelope.encode());
        assert_eq!(Envelope::decode(&text).unwrap(), envelope);
    }

    #[test]
    fn test_decode_empty_ciphertext() {
        let text = format!("{}:", "00".repeat(IV_LENGTH));
        let envelope = Envelope::decode(&text).unwrap();
        assert!(envelope.ciphertext.is_empty());
    }

    #[test]
    fn test_decode_missing_colon() {
        let result = Envelope::decode("00112233");
        assert!(matches!(result, Err(DotenvencError::MalformedEnvelope(_))));
    }

    #[test]
    fn test_decode_invalid_hex() {
        let text = format!("{}:zz", "00".repeat(IV_LENGTH));
        assert!(matches!(
            Envelope::decode(&text),
            Err(DotenvencError::MalformedEnvelope(_))
        ));
        assert!(matches!(
            Envelope::decode("not-hex:00"),
            Err(DotenvencError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_decode_wrong_iv_length() {
        let result = Envelope::decode("0011:2233");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("IV must be 16 bytes"));
    }
}
