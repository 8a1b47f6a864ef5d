//! Password-based envelope encryption.
//!
//! Envelope format (before base64):
//!   salt (16 bytes) || IV (16 bytes) || AES-256-CBC ciphertext
//!
//! The key is PBKDF2-HMAC-SHA256(password, salt, 10000) and the plaintext is
//! PKCS#7 padded. Salt and IV are fresh per call, so identical inputs never
//! produce the same envelope.

use zeroize::Zeroize;

use super::aes_cbc::{self, AES_BLOCK_SIZE};
use super::error::{CryptoError, CryptoResult};
use super::hash::sha256_hex;
use super::kdf::{self, SALT_SIZE};
use super::utils::{base64_to_bytes, bytes_to_base64, generate_random_array};

/// Envelope header size: salt + IV.
pub const ENVELOPE_HEADER_SIZE: usize = SALT_SIZE + AES_BLOCK_SIZE;

/// Minimum envelope size: header plus one padded block.
pub const MIN_ENVELOPE_SIZE: usize = ENVELOPE_HEADER_SIZE + AES_BLOCK_SIZE;

/// Parsed envelope parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_SIZE],
    pub iv: [u8; AES_BLOCK_SIZE],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Serialize as `salt || iv || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ENVELOPE_HEADER_SIZE + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split raw envelope bytes into salt, IV and ciphertext.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() < MIN_ENVELOPE_SIZE {
            return Err(CryptoError::Decryption(format!(
                "envelope too short: {} bytes, need at least {}",
                bytes.len(),
                MIN_ENVELOPE_SIZE
            )));
        }

        let (salt, rest) = bytes.split_at(SALT_SIZE);
        let (iv, ciphertext) = rest.split_at(AES_BLOCK_SIZE);

        if ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(CryptoError::Decryption(
                "ciphertext is not block-aligned".to_string(),
            ));
        }

        Ok(Self {
            salt: salt
                .try_into()
                .map_err(|_| CryptoError::Decryption("bad salt".to_string()))?,
            iv: iv
                .try_into()
                .map_err(|_| CryptoError::Decryption("bad IV".to_string()))?,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Decode a base64 envelope.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        Self::from_bytes(&base64_to_bytes(encoded)?)
    }
}

/// Seal raw bytes into an envelope.
pub fn seal(plaintext: &[u8], password: &[u8]) -> CryptoResult<Envelope> {
    let salt = generate_random_array::<SALT_SIZE>()?;
    let iv = generate_random_array::<AES_BLOCK_SIZE>()?;

    let key = kdf::derive_key(password, &salt);
    let ciphertext = aes_cbc::encrypt_aes_cbc(plaintext, key.as_bytes(), &iv)?;

    Ok(Envelope {
        salt,
        iv,
        ciphertext,
    })
}

/// Open an envelope and strip PKCS#7 padding.
pub fn open(envelope: &Envelope, password: &[u8]) -> CryptoResult<Vec<u8>> {
    let key = kdf::derive_key(password, &envelope.salt);
    aes_cbc::decrypt_aes_cbc(&envelope.ciphertext, key.as_bytes(), &envelope.iv)
}

/// `encryptData(value, password)`: base64 envelope of `value`.
pub fn encrypt_data(value: &str, password: &str) -> CryptoResult<String> {
    let envelope = seal(value.as_bytes(), password.as_bytes())?;
    Ok(bytes_to_base64(&envelope.to_bytes()))
}

/// `decryptData(envelope, password)`: inverse of `encrypt_data`.
pub fn decrypt_data(envelope_base64: &str, password: &str) -> CryptoResult<String> {
    let envelope = Envelope::from_base64(envelope_base64)?;
    let plaintext = open(&envelope, password.as_bytes())?;
    String::from_utf8(plaintext).map_err(|e| {
        let mut bytes = e.into_bytes();
        bytes.zeroize();
        CryptoError::Decoding("plaintext is not UTF-8".to_string())
    })
}

/// `hashBody(payload, password)`: envelope of the hex SHA-256 of `payload`.
pub fn hash_body(payload: &str, password: &str) -> CryptoResult<String> {
    let seed_hash = sha256_hex(payload.as_bytes());
    encrypt_data(&seed_hash, password)
}
