//! PBKDF2-HMAC-SHA256 password key derivation.
//!
//! Derivation path:
//!   password (UTF-8 bytes) + salt (16 random bytes)
//!     -> PBKDF2-HMAC-SHA256, 10000 iterations
//!     -> 32-byte AES-256 key

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2 iteration count for envelope encryption.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// PBKDF2 salt size in bytes.
pub const SALT_SIZE: usize = 16;

/// Derived key size in bytes (AES-256).
pub const DERIVED_KEY_SIZE: usize = 32;

/// A derived AES key, zeroed when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; DERIVED_KEY_SIZE]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; DERIVED_KEY_SIZE] {
        &self.0
    }
}

/// Derive the envelope key for `password` and `salt`.
pub fn derive_key(password: &[u8], salt: &[u8]) -> DerivedKey {
    derive_key_with_iterations(password, salt, PBKDF2_ITERATIONS)
}

/// Derive a key with an explicit iteration count.
pub fn derive_key_with_iterations(password: &[u8], salt: &[u8], iterations: u32) -> DerivedKey {
    let mut key = [0u8; DERIVED_KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    DerivedKey(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pbkdf2_sha256_known_answer() {
        let key = derive_key_with_iterations(b"password", b"salt", 1);
        assert_eq!(
            hex::encode(key.as_bytes()),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let salt = [3u8; SALT_SIZE];
        let a = derive_key(b"pw", &salt);
        let b = derive_key(b"pw", &salt);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn salt_and_password_affect_output() {
        let base = derive_key(b"pw", &[1u8; SALT_SIZE]);
        let other_salt = derive_key(b"pw", &[2u8; SALT_SIZE]);
        let other_pw = derive_key(b"pw2", &[1u8; SALT_SIZE]);
        assert_ne!(base.as_bytes(), other_salt.as_bytes());
        assert_ne!(base.as_bytes(), other_pw.as_bytes());
    }

    #[test]
    fn iterations_affect_output() {
        let one = derive_key_with_iterations(b"pw", b"salt", 1);
        let many = derive_key_with_iterations(b"pw", b"salt", PBKDF2_ITERATIONS);
        assert_ne!(one.as_bytes(), many.as_bytes());
    }
}
