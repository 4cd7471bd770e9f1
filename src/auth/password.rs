use bcrypt::{hash, DEFAULT_COST};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password")]
    HashingFailed(#[source] bcrypt::BcryptError),
}

/// Hash a plaintext password into the opaque credential stored on a user
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash(password, DEFAULT_COST).map_err(PasswordError::HashingFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_verifiable() {
        let hashed = hash_password("admin123").unwrap();
        assert_ne!(hashed, "admin123");
        assert!(bcrypt::verify("admin123", &hashed).unwrap());
        assert!(!bcrypt::verify("wrong", &hashed).unwrap());
    }
}
