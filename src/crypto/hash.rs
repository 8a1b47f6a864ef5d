//! SHA-256 hash sessions for `createHash` / `digest`.

use sha2::{Digest, Sha256};

use super::error::{CryptoError, CryptoResult};
use super::utils::{bytes_to_base64, bytes_to_hex};

/// The only algorithm name accepted by `createHash`.
pub const SHA256: &str = "sha256";

/// SHA-256 digest size in bytes.
pub const SHA256_DIGEST_SIZE: usize = 32;

/// Output encoding for `digest`.
///
/// `"hex"` selects lowercase hex. Every other string, including unknown
/// ones, selects base64. Scripts rely on that fallback, so it is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestEncoding {
    Hex,
    Base64,
}

impl DigestEncoding {
    pub fn parse(encoding: &str) -> Self {
        if encoding == "hex" {
            DigestEncoding::Hex
        } else {
            DigestEncoding::Base64
        }
    }

    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            DigestEncoding::Hex => bytes_to_hex(bytes),
            DigestEncoding::Base64 => bytes_to_base64(bytes),
        }
    }
}

/// A SHA-256 accumulator.
///
/// `digest` consumes the session, so nothing can be written after
/// finalization.
#[derive(Debug, Clone, Default)]
pub struct HashSession {
    hasher: Sha256,
    written: u64,
}

impl HashSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append data to the hash; returns the number of bytes written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        self.hasher.update(data);
        self.written += data.len() as u64;
        data.len()
    }

    /// Total bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Finalize and return the raw digest.
    pub fn finalize(self) -> [u8; SHA256_DIGEST_SIZE] {
        self.hasher.finalize().into()
    }

    /// `digest(session, encoding)`.
    pub fn digest(self, encoding: &str) -> String {
        DigestEncoding::parse(encoding).encode(&self.finalize())
    }
}

/// `createHash(algorithm)`.
pub fn create_hash(algorithm: &str) -> CryptoResult<HashSession> {
    if algorithm != SHA256 {
        return Err(CryptoError::UnsupportedAlgorithm(algorithm.to_string()));
    }
    Ok(HashSession::new())
}

/// One-shot SHA-256 of `data`, lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut session = HashSession::new();
    session.write(data);
    session.digest("hex")
}
