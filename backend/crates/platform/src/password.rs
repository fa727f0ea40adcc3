//! Password hashing for customer and reseller accounts
//!
//! Passwords are NFKC-normalized, checked against a small policy on
//! registration and password change, and stored as Argon2id PHC strings.
//! An optional server-side pepper is appended before hashing.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Counted in code points, after normalization
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Rejected outright, compared case-insensitively
const DENYLIST: &[&str] = &[
    "password",
    "password1",
    "password123",
    "12345678",
    "123456789",
    "1234567890",
    "abcdefgh",
    "iloveyou",
    "letmein",
    "welcome1",
    "admin123",
    "sayang123",
    "bismillah",
    "indonesia",
    "rahasia123",
];

/// Rejected when contained anywhere in the password
const KEYBOARD_RUNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear text
// ============================================================================

/// A submitted password. Zeroized on drop, never printed.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("Batik#Solo2024".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// New password (registration, password change); policy enforced
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        check_policy(&password.0)?;
        Ok(password)
    }

    /// Login and current-password checks skip the policy so accounts created
    /// under older rules can still sign in.
    pub fn for_verification(mut raw: String) -> Self {
        let normalized = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(pepper) = pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }

    /// Argon2id with default parameters and a fresh salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

fn check_policy(password: &str) -> Result<(), PasswordPolicyError> {
    if password.trim().is_empty() {
        return Err(PasswordPolicyError::EmptyOrWhitespace);
    }

    let actual = password.chars().count();
    if actual < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual,
        });
    }
    if actual > MAX_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooLong {
            max: MAX_PASSWORD_LENGTH,
            actual,
        });
    }

    // Passphrases may span lines; other control characters may not
    if password
        .chars()
        .any(|c| c.is_control() && c != '\t' && c != '\n')
    {
        return Err(PasswordPolicyError::InvalidCharacter);
    }

    if is_predictable(password) {
        return Err(PasswordPolicyError::CommonPattern);
    }

    Ok(())
}

fn is_predictable(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    let first = chars.next();
    if chars.all(|c| Some(c) == first) {
        return true;
    }

    if DENYLIST.contains(&lower.as_str()) {
        return true;
    }

    if KEYBOARD_RUNS.iter().any(|run| lower.contains(run)) {
        return true;
    }

    is_digit_run(&lower)
}

/// "12345678", "98765432", wrapping through 0
fn is_digit_run(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 {
        return false;
    }

    let up = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let down = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
    up || down
}

// ============================================================================
// Stored hash
// ============================================================================

/// Argon2id PHC string, safe to persist
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Constant-time; the pepper must match the one used at hashing
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(raw: &str) -> Result<ClearTextPassword, PasswordPolicyError> {
        ClearTextPassword::new(raw.to_string())
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(policy("short"), Err(PasswordPolicyError::TooShort { actual: 5, .. })));
        let long = "Kain#".repeat(MAX_PASSWORD_LENGTH / 5 + 1);
        assert!(matches!(policy(&long), Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_length_counts_code_points() {
        // Eight characters, more than eight bytes
        assert!(policy("ñandú#Rí").is_ok());
    }

    #[test]
    fn test_blank_and_control_characters() {
        assert_eq!(policy("").unwrap_err(), PasswordPolicyError::EmptyOrWhitespace);
        assert_eq!(policy("          ").unwrap_err(), PasswordPolicyError::EmptyOrWhitespace);
        assert_eq!(
            policy("Tenun\u{0007}Ikat99").unwrap_err(),
            PasswordPolicyError::InvalidCharacter
        );
    }

    #[test]
    fn test_predictable_passwords() {
        for weak in ["Password123", "qwertyuiop", "12345678", "98765432", "zzzzzzzzzz", "Indonesia"] {
            assert_eq!(
                policy(weak).unwrap_err(),
                PasswordPolicyError::CommonPattern,
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepted_passwords() {
        assert!(policy("MySecure#Pass2024!").is_ok());
        assert!(policy("kain tenun ikat sumba").is_ok());
        assert!(policy("13572468").is_ok());
    }

    #[test]
    fn test_hash_and_verify_with_pepper() {
        let password = ClearTextPassword::new_unchecked("Rendang#Padang7".to_string());
        let pepper = b"server-side-pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"other-pepper")));

        let wrong = ClearTextPassword::new_unchecked("Rendang#Padang8".to_string());
        assert!(!hashed.verify(&wrong, Some(pepper)));
    }

    #[test]
    fn test_stored_hash_reloads() {
        let password = ClearTextPassword::new_unchecked("Gudeg#Jogja2025".to_string());
        let stored = password.hash(None).unwrap().as_phc_string().to_string();

        assert!(stored.starts_with("$argon2id$"));
        let restored = HashedPassword::from_phc_string(stored).unwrap();
        assert!(restored.verify(&password, None));

        assert!(matches!(
            HashedPassword::from_phc_string("plain-text"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let password = ClearTextPassword::new_unchecked("secret-batik".to_string());
        let hashed = password.hash(None).unwrap();
        assert!(!format!("{password:?}").contains("secret"));
        assert!(!format!("{hashed:?}").contains("argon2"));
    }

    #[test]
    fn test_verification_skips_policy_but_normalizes() {
        let legacy = ClearTextPassword::new_unchecked("abc".to_string()).hash(None).unwrap();
        assert!(legacy.verify(&ClearTextPassword::for_verification("abc".to_string()), None));

        // Fullwidth digits fold to ASCII under NFKC
        let hashed = policy("Kopi#Tubruk12").unwrap().hash(None).unwrap();
        let submitted = ClearTextPassword::for_verification("Kopi#Tubruk\u{FF11}\u{FF12}".to_string());
        assert!(hashed.verify(&submitted, None));
    }
}
