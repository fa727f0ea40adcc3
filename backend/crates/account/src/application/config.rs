//! Application Configuration

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Must match the pepper the auth crate hashes with
    pub password_pepper: Option<Vec<u8>>,
    /// Upper bound on saved addresses per user
    pub max_addresses: usize,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            password_pepper: None,
            max_addresses: 20,
        }
    }
}

impl AccountConfig {
    pub fn with_pepper(password_pepper: Option<Vec<u8>>) -> Self {
        Self {
            password_pepper,
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self::default()
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
