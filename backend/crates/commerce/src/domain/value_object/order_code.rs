use std::fmt;

use chrono::{DateTime, Utc};
use platform::crypto::random_code;

const RANDOM_LEN: usize = 6;

/// Public order reference, e.g. `ORD-20260412-7KQ2ZD`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderCode(String);

impl OrderCode {
    pub fn generate(at: DateTime<Utc>) -> Self {
        Self(format!(
            "ORD-{}-{}",
            at.format("%Y%m%d"),
            random_code(RANDOM_LEN)
        ))
    }

    /// Normalize a code typed by a user
    pub fn normalize(input: &str) -> String {
        input.trim().to_uppercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
