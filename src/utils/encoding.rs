// Byte-level helpers for the transaction wire layout used in block-size accounting
use crate::core::Hash;
use crate::error::{AssemblyError, Result};
use data_encoding::HEXLOWER_PERMISSIVE;

/// Encode a number as a Bitcoin-style variable length integer
pub fn encode_varint(value: u64) -> Vec<u8> {
    if value < 0xfd {
        vec![value as u8]
    } else if value <= 0xffff {
        let mut result = vec![0xfd];
        result.extend_from_slice(&(value as u16).to_le_bytes());
        result
    } else if value <= 0xffff_ffff {
        let mut result = vec![0xfe];
        result.extend_from_slice(&(value as u32).to_le_bytes());
        result
    } else {
        let mut result = vec![0xff];
        result.extend_from_slice(&value.to_le_bytes());
        result
    }
}

/// Decode hex text (either case) into bytes
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    Ok(HEXLOWER_PERMISSIVE.decode(text.as_bytes())?)
}

/// Decode a displayed txid into its 32 internal bytes.
///
/// Txids are shown byte-reversed, so the decoded bytes are reversed back.
/// An empty txid (the coinbase input) maps to 32 zero bytes.
pub fn decode_txid(text: &str) -> Result<Hash> {
    let mut hash = [0u8; 32];
    if text.is_empty() {
        return Ok(hash);
    }

    let bytes = decode_hex(text)?;
    if bytes.len() != hash.len() {
        return Err(AssemblyError::Serialization(format!(
            "txid {text} is {} bytes, expected 32",
            bytes.len()
        )));
    }
    hash.copy_from_slice(&bytes);
    hash.reverse();
    Ok(hash)
}

/// Wire bytes of a script field.
///
/// Scripts are normally hex, but records treat them as opaque text, so
/// anything that does not decode is carried as its raw UTF-8 bytes.
pub fn script_bytes(text: &str) -> Vec<u8> {
    decode_hex(text).unwrap_or_else(|_| text.as_bytes().to_vec())
}

/// Wire bytes of a previous-txid field.
///
/// A 64-digit hex txid becomes its 32 internal (reversed) bytes and the empty
/// txid becomes 32 zero bytes. Any other text is written as its raw UTF-8 bytes.
pub fn txid_bytes(text: &str) -> Vec<u8> {
    match decode_txid(text) {
        Ok(hash) => hash.to_vec(),
        Err(_) => text.as_bytes().to_vec(),
    }
}

/// Append a varint length prefix followed by the bytes themselves
pub fn write_var_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&encode_varint(bytes.len() as u64));
    buf.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_varint_boundaries() {
        assert_eq!(encode_varint(0), vec![0x00]);
        assert_eq!(encode_varint(0xfc), vec![0xfc]);
        assert_eq!(encode_varint(0xfd), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(encode_varint(0xffff), vec![0xfd, 0xff, 0xff]);
        assert_eq!(encode_varint(0x10000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(encode_varint(0x1_0000_0000).len(), 9);
    }

    #[test]
    fn test_decode_hex_accepts_both_cases() {
        assert_eq!(decode_hex("00aB").unwrap(), vec![0x00, 0xab]);
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_rejects_garbage() {
        assert!(matches!(
            decode_hex("xyz0"),
            Err(AssemblyError::Serialization(_))
        ));
        assert!(decode_hex("abc").is_err());
    }

    #[test]
    fn test_decode_txid_reverses_bytes() {
        let text = format!("01{}", "00".repeat(31));
        let hash = decode_txid(&text).unwrap();
        assert_eq!(hash[31], 0x01);
        assert_eq!(hash[0], 0x00);
    }

    #[test]
    fn test_decode_txid_empty_is_zero() {
        assert_eq!(decode_txid("").unwrap(), [0u8; 32]);
    }

    #[test]
    fn test_script_bytes_falls_back_to_text() {
        assert_eq!(script_bytes("6a01ff"), vec![0x6a, 0x01, 0xff]);
        assert_eq!(script_bytes("OP_RETURN"), b"OP_RETURN".to_vec());
        // odd length is not hex either
        assert_eq!(script_bytes("abc"), b"abc".to_vec());
        assert!(script_bytes("").is_empty());
    }

    #[test]
    fn test_txid_bytes_falls_back_to_text() {
        assert_eq!(txid_bytes(""), vec![0u8; 32]);
        assert_eq!(txid_bytes(&"ab".repeat(32)), vec![0xab; 32]);
        assert_eq!(txid_bytes("tx1"), b"tx1".to_vec());
        // valid hex but not 32 bytes
        assert_eq!(txid_bytes("abcd"), b"abcd".to_vec());
    }

    #[test]
    fn test_decode_txid_wrong_length() {
        assert!(matches!(
            decode_txid("abcd"),
            Err(AssemblyError::Serialization(_))
        ));
    }
}
