//! Cryptographic primitives exposed to load-test scripts.
//!
//! Every primitive comes from the RustCrypto crates; this module only
//! marshals parameters (text, base64, hex) and composes the two envelope
//! operations.

pub mod aes_cbc;
pub mod aes_cfb;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod kdf;
pub mod utils;


// Re-export primary functions for convenience
pub use aes_cfb::{create_cipheriv, CipherSession, AES_256_CFB};
pub use envelope::{decrypt_data, encrypt_data, hash_body, Envelope};
pub use error::{CryptoError, CryptoResult};
pub use hash::{create_hash, sha256_hex, DigestEncoding, HashSession, SHA256};
pub use utils::{generate_random_bytes, random_bytes_base64};
