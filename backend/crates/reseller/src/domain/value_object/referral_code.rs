use std::fmt;

use platform::crypto::random_code;

/// Uppercase referral code shared by a reseller
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferralCode(String);

impl ReferralCode {
    pub fn generate(len: usize) -> Self {
        Self(random_code(len))
    }

    /// Normalize user input; `None` when it cannot be a referral code
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim().to_uppercase();
        let valid = (4..=16).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric());
        valid.then_some(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
