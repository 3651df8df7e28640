use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::DomainError;

/// Hash a plaintext password with a fresh salt. Only the hash is ever
/// persisted.
pub fn hash_password(plain: &str) -> Result<String, DomainError> {
    hash(plain, DEFAULT_COST).map_err(|err| DomainError::PasswordHash(err.to_string()))
}

/// Check a plaintext candidate against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, DomainError> {
    verify(plain, hashed).map_err(|err| DomainError::PasswordHash(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_against_the_original_plaintext() {
        let hashed = hash_password("password123").unwrap();
        assert_ne!(hashed, "password123");
        assert!(verify_password("password123", &hashed).unwrap());
        assert!(!verify_password("password124", &hashed).unwrap());
    }

    #[test]
    fn hashing_twice_salts_differently() {
        let first = hash_password("pw1").unwrap();
        let second = hash_password("pw1").unwrap();
        assert_ne!(first, second);
    }
}
