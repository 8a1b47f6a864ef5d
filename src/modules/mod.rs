//! The two script modules: the stream-cipher/hash module and the
//! password-envelope module.

pub mod crypto;
pub mod cryptography;

pub use crypto::CryptoModule;
pub use cryptography::CryptographyModule;
