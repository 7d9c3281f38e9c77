//! Access-key credential

use crate::error::{Result, SdkError};

/// Access-key pair used to sign every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_key_id: String,
    access_key_password: String,
}

impl Credential {
    /// Both halves must be non-empty.
    pub fn new(access_key_id: impl Into<String>, access_key_password: impl Into<String>) -> Result<Self> {
        let access_key_id = access_key_id.into();
        let access_key_password = access_key_password.into();

        if access_key_id.trim().is_empty() {
            return Err(SdkError::Credential("access_key_id is empty".to_string()));
        }
        if access_key_password.trim().is_empty() {
            return Err(SdkError::Credential(
                "access_key_password is empty".to_string(),
            ));
        }

        Ok(Self {
            access_key_id,
            access_key_password,
        })
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn access_key_password(&self) -> &str {
        &self.access_key_password
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_halves() {
        assert!(Credential::new("", "secret").is_err());
        assert!(Credential::new("id", "  ").is_err());
        assert!(Credential::new("id", "secret").is_ok());
    }

    #[test]
    fn test_debug_redacts_password() {
        let cred = Credential::new("AKID", "super-secret").unwrap();
        let printed = format!("{:?}", cred);
        assert!(printed.contains("AKID"));
        assert!(!printed.contains("super-secret"));
    }
}
