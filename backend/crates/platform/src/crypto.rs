//! Random tokens and codes, log-safe tags, and base64

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// No 0/O or 1/I. 32 symbols, so `byte % 32` is unbiased.
const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Unpadded base64url over `len` random bytes (token ids)
pub fn random_token(len: usize) -> String {
    to_base64url(&random_bytes(len))
}

/// Uppercase code a customer can read back over the phone (order codes,
/// referral codes)
pub fn random_code(len: usize) -> String {
    random_bytes(len)
        .into_iter()
        .map(|b| CODE_ALPHABET[usize::from(b % 32)] as char)
        .collect()
}

/// Stable, non-reversible 12-character tag standing in for an email or phone
/// number in logs
pub fn log_tag(value: &str) -> String {
    let digest: [u8; 32] = Sha256::digest(value.as_bytes()).into();
    to_base64url(&digest[..9])
}

pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Standard alphabet, padded (secrets in environment variables)
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Runs over the full length regardless of where the first mismatch is
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_token_is_url_safe() {
        let token = random_token(32);
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(token, random_token(32));
    }

    #[test]
    fn test_random_code_avoids_ambiguous_symbols() {
        let code = random_code(64);
        assert_eq!(code.len(), 64);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        assert!(!code.contains(['O', '0', 'I', '1']));
    }

    #[test]
    fn test_log_tag_is_stable_and_opaque() {
        let tag = log_tag("buyer@example.com");
        assert_eq!(tag, log_tag("buyer@example.com"));
        assert_ne!(tag, log_tag("Buyer@example.com"));
        assert!(!tag.contains("buyer"));
        assert_eq!(tag.len(), 12);

        // First 9 bytes of SHA-256("")
        let empty = hex::decode("e3b0c44298fc1c149a").unwrap();
        assert_eq!(log_tag(""), to_base64url(&empty));
    }

    #[test]
    fn test_from_base64_pepper() {
        assert_eq!(from_base64("cGVwcGVy").unwrap(), b"pepper");
        assert!(from_base64("not base64!").is_err());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"cb-token-1", b"cb-token-1"));
        assert!(!constant_time_eq(b"cb-token-1", b"cb-token-2"));
        assert!(!constant_time_eq(b"cb-token-1", b"cb-token"));
        assert!(constant_time_eq(b"", b""));
    }
}
