//! Utility functions for cryptographic operations.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use super::error::CryptoResult;

/// Largest `randomBytes` request a script may make (1 MiB).
pub const MAX_RANDOM_BYTES: usize = 1 << 20;

/// Fill `buf` from `rng`, failing instead of leaving short or zero-filled
/// output. On failure `buf` is zeroed.
pub fn fill_random<R: RngCore + ?Sized>(rng: &mut R, buf: &mut [u8]) -> CryptoResult<()> {
    if let Err(e) = rng.try_fill_bytes(buf) {
        buf.zeroize();
        return Err(e.into());
    }
    Ok(())
}

/// Generate `len` random bytes from `rng`.
pub fn generate_random_bytes_from<R: RngCore + ?Sized>(
    rng: &mut R,
    len: usize,
) -> CryptoResult<Vec<u8>> {
    let mut buf = vec![0u8; len];
    fill_random(rng, &mut buf)?;
    Ok(buf)
}

/// Generate cryptographically secure random bytes from the OS source.
pub fn generate_random_bytes(len: usize) -> CryptoResult<Vec<u8>> {
    generate_random_bytes_from(&mut OsRng, len)
}

/// Fill a fixed-size array from the OS random source.
pub fn generate_random_array<const N: usize>() -> CryptoResult<[u8; N]> {
    let mut buf = [0u8; N];
    fill_random(&mut OsRng, &mut buf)?;
    Ok(buf)
}

/// Base64 of `len` random bytes drawn from `rng`.
pub fn random_bytes_base64_from<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> CryptoResult<String> {
    let mut bytes = generate_random_bytes_from(rng, len)?;
    let encoded = bytes_to_base64(&bytes);
    bytes.zeroize();
    Ok(encoded)
}

/// `randomBytes(length)`: base64 of `len` secure random bytes.
///
/// Callers bound `len` (see `MAX_RANDOM_BYTES`); the buffer is allocated up
/// front.
pub fn random_bytes_base64(len: usize) -> CryptoResult<String> {
    random_bytes_base64_from(&mut OsRng, len)
}

/// Encode bytes as standard padded base64.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard padded base64.
pub fn base64_to_bytes(encoded: &str) -> CryptoResult<Vec<u8>> {
    Ok(STANDARD.decode(encoded)?)
}

/// Convert bytes to a lowercase hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
