//! AppRole identity pair.
//!
//! Both halves are identity material: they live in zeroizing buffers and
//! never show up in `Debug` output.

use zeroize::Zeroizing;

use crate::error::ValidationError;

/// An AppRole (role_id, secret_id) pair.
#[derive(Clone)]
pub struct IdentityPair {
    role_id: Zeroizing<String>,
    secret_id: Zeroizing<String>,
}

impl IdentityPair {
    /// Build an identity pair.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyInput` if either half is empty.
    pub fn new(
        role_id: impl Into<String>,
        secret_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let role_id = Zeroizing::new(role_id.into());
        let secret_id = Zeroizing::new(secret_id.into());

        if role_id.trim().is_empty() {
            return Err(ValidationError::EmptyInput("role_id"));
        }
        if secret_id.trim().is_empty() {
            return Err(ValidationError::EmptyInput("secret_id"));
        }

        Ok(Self { role_id, secret_id })
    }

    pub fn role_id(&self) -> &str {
        &self.role_id
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }
}

impl std::fmt::Debug for IdentityPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityPair")
            .field("role_id", &"[redacted]")
            .field("secret_id", &"[redacted]")
            .finish()
    }
}
