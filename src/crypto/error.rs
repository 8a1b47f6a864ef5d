//! Error taxonomy shared by every crypto operation exposed to scripts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("decoding failed: {0}")]
    Decoding(String),
    #[error("invalid key material: {0}")]
    Key(String),
    #[error("secure random source failed: {0}")]
    Entropy(#[from] rand::Error),
    #[error("decryption failed: {0}")]
    Decryption(String),
}

impl From<base64::DecodeError> for CryptoError {
    fn from(err: base64::DecodeError) -> Self {
        CryptoError::Decoding(format!("invalid base64: {}", err))
    }
}

pub type CryptoResult<T> = Result<T, CryptoError>;
