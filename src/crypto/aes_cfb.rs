//! AES-256-CFB stream encryption for the `createCipheriv` / `update` pair.
//!
//! Full-block CFB (segment size = 128 bits). Partial blocks are buffered by
//! `BufEncryptor`, so consecutive `update` calls continue the same keystream
//! exactly as one call over the concatenated input would.
//!
//! SECURITY NOTE: CFB does NOT provide authentication.

use aes::Aes256;
use cfb_mode::cipher::KeyIvInit;
use cfb_mode::BufEncryptor;

use super::error::{CryptoError, CryptoResult};
use super::utils::{base64_to_bytes, bytes_to_base64};

/// The only algorithm name accepted by `createCipheriv`.
pub const AES_256_CFB: &str = "aes-256-cfb";

/// AES-256 key size in bytes.
pub const AES_CFB_KEY_SIZE: usize = 32;

/// CFB IV size in bytes (one AES block).
pub const AES_CFB_IV_SIZE: usize = 16;

/// A keyed CFB stream bound to one key and one IV.
///
/// Owned exclusively by whoever created it; `update` takes `&mut self`
/// because every call advances the stream position.
pub struct CipherSession {
    encryptor: BufEncryptor<Aes256>,
    processed: u64,
}

impl std::fmt::Debug for CipherSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherSession")
            .field("algorithm", &AES_256_CFB)
            .field("processed", &self.processed)
            .finish_non_exhaustive()
    }
}

impl CipherSession {
    /// Build a session from raw key bytes and raw IV bytes.
    pub fn new(key: &[u8], iv: &[u8]) -> CryptoResult<Self> {
        if key.len() != AES_CFB_KEY_SIZE {
            return Err(CryptoError::Key(format!(
                "key must be {} bytes, got {}",
                AES_CFB_KEY_SIZE,
                key.len()
            )));
        }
        if iv.len() != AES_CFB_IV_SIZE {
            return Err(CryptoError::Key(format!(
                "IV must be {} bytes, got {}",
                AES_CFB_IV_SIZE,
                iv.len()
            )));
        }

        let encryptor = BufEncryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|e| CryptoError::Key(e.to_string()))?;

        Ok(Self {
            encryptor,
            processed: 0,
        })
    }

    /// Encrypt `data` in place, continuing the keystream.
    pub fn apply(&mut self, data: &mut [u8]) {
        self.encryptor.encrypt(data);
        self.processed += data.len() as u64;
    }

    /// `update(session, plaintext)`: encrypt text and return base64 ciphertext.
    ///
    /// Ciphertext length always equals plaintext length.
    pub fn update(&mut self, plaintext: &str) -> String {
        let mut buf = plaintext.as_bytes().to_vec();
        self.apply(&mut buf);
        bytes_to_base64(&buf)
    }

    /// Total number of bytes pushed through this session.
    pub fn processed(&self) -> u64 {
        self.processed
    }
}

/// `createCipheriv(algorithm, key, ivBase64)`.
///
/// Key bytes are the raw UTF-8 bytes of `key`. The IV is base64-decoded.
pub fn create_cipheriv(algorithm: &str, key: &str, iv_base64: &str) -> CryptoResult<CipherSession> {
    if algorithm != AES_256_CFB {
        return Err(CryptoError::UnsupportedAlgorithm(algorithm.to_string()));
    }

    let iv = base64_to_bytes(iv_base64)?;
    CipherSession::new(key.as_bytes(), &iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfb_mode::BufDecryptor;

    fn decrypt_aes_cfb(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Vec<u8> {
        let mut decryptor = BufDecryptor::<Aes256>::new_from_slices(key, iv).unwrap();
        let mut output = ciphertext.to_vec();
        decryptor.decrypt(&mut output);
        output
    }

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn zero_iv() -> String {
        bytes_to_base64(&[0u8; AES_CFB_IV_SIZE])
    }

    #[test]
    fn nist_sp800_38a_cfb128_aes256_first_block() {
        let key = hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
            .unwrap();
        let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let mut block = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let mut session = CipherSession::new(&key, &iv).unwrap();
        session.apply(&mut block);

        assert_eq!(hex::encode(block), "dc7e84bfda79164b7ecd8486985d3860");
    }

    #[test]
    fn output_length_matches_input_length() {
        for len in [0usize, 1, 15, 16, 17, 100] {
            let mut session = create_cipheriv(AES_256_CFB, KEY, &zero_iv()).unwrap();
            let plaintext = "x".repeat(len);
            let ct = base64_to_bytes(&session.update(&plaintext)).unwrap();
            assert_eq!(ct.len(), len);
        }
    }

    #[test]
    fn sequential_updates_continue_keystream() {
        let mut whole = create_cipheriv(AES_256_CFB, KEY, &zero_iv()).unwrap();
        let mut split = create_cipheriv(AES_256_CFB, KEY, &zero_iv()).unwrap();

        let text = "the quick brown fox jumps over the lazy dog";
        let expected = base64_to_bytes(&whole.update(text)).unwrap();

        let mut actual = base64_to_bytes(&split.update(&text[..7])).unwrap();
        actual.extend(base64_to_bytes(&split.update(&text[7..])).unwrap());

        assert_eq!(actual, expected);
        assert_eq!(split.processed(), text.len() as u64);
    }

    #[test]
    fn second_update_uses_fresh_keystream() {
        let mut session = create_cipheriv(AES_256_CFB, KEY, &zero_iv()).unwrap();
        let first = session.update("same block text!");
        let second = session.update("same block text!");
        assert_ne!(first, second);
    }

    #[test]
    fn decrypt_recovers_plaintext() {
        let iv = [7u8; AES_CFB_IV_SIZE];
        let mut session = CipherSession::new(KEY.as_bytes(), &iv).unwrap();
        let ct = base64_to_bytes(&session.update("hello stream")).unwrap();

        let pt = decrypt_aes_cfb(&ct, KEY.as_bytes(), &iv);
        assert_eq!(pt, b"hello stream");
    }

    #[test]
    fn unsupported_algorithm_rejected() {
        let err = create_cipheriv("aes-128-cbc", KEY, &zero_iv()).unwrap_err();
        assert!(matches!(err, CryptoError::UnsupportedAlgorithm(a) if a == "aes-128-cbc"));
    }

    #[test]
    fn malformed_iv_is_decoding_error() {
        let err = create_cipheriv(AES_256_CFB, KEY, "%%%").unwrap_err();
        assert!(matches!(err, CryptoError::Decoding(_)));
    }

    #[test]
    fn wrong_key_length_is_key_error() {
        let err = create_cipheriv(AES_256_CFB, "short key", &zero_iv()).unwrap_err();
        assert!(matches!(err, CryptoError::Key(_)));
    }

    #[test]
    fn wrong_iv_length_is_key_error() {
        let iv = bytes_to_base64(&[0u8; 12]);
        let err = create_cipheriv(AES_256_CFB, KEY, &iv).unwrap_err();
        assert!(matches!(err, CryptoError::Key(_)));
    }
}
