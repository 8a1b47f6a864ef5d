//! AES-256-CBC encryption/decryption with PKCS#7 padding.
//!
//! Padding always adds 1..=16 bytes; block-aligned input gets a full block
//! of `0x10` bytes appended.

use aes::Aes256;
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroize;

use super::error::{CryptoError, CryptoResult};

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-256 key size in bytes.
pub const AES_KEY_SIZE: usize = 32;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Length of `len` bytes after PKCS#7 padding.
pub fn padded_len(len: usize) -> usize {
    (len / AES_BLOCK_SIZE + 1) * AES_BLOCK_SIZE
}

/// Encrypt `plaintext` with AES-256-CBC and PKCS#7 padding.
///
/// Output length is always `padded_len(plaintext.len())`.
pub fn encrypt_aes_cbc(
    plaintext: &[u8],
    key: &[u8; AES_KEY_SIZE],
    iv: &[u8; AES_BLOCK_SIZE],
) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256CbcEnc::new(key.into(), iv.into());
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt AES-256-CBC ciphertext, returning the still-padded plaintext.
pub fn decrypt_aes_cbc_raw(
    ciphertext: &[u8],
    key: &[u8; AES_KEY_SIZE],
    iv: &[u8; AES_BLOCK_SIZE],
) -> CryptoResult<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(CryptoError::Decryption(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            AES_BLOCK_SIZE
        )));
    }

    let cipher = Aes256CbcDec::new(key.into(), iv.into());
    let mut buf = ciphertext.to_vec();
    cipher
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| CryptoError::Decryption("CBC decryption failed".to_string()))?;
    Ok(buf)
}

/// Decrypt AES-256-CBC ciphertext and strip PKCS#7 padding.
pub fn decrypt_aes_cbc(
    ciphertext: &[u8],
    key: &[u8; AES_KEY_SIZE],
    iv: &[u8; AES_BLOCK_SIZE],
) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256CbcDec::new(key.into(), iv.into());
    let mut buf = ciphertext.to_vec();
    let plaintext = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map(|pt| pt.to_vec())
        .map_err(|_| CryptoError::Decryption("invalid padding".to_string()));

    // buf holds decrypted bytes on both paths
    buf.zeroize();
    plaintext
}
