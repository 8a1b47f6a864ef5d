//! Cryptographic helper modules for load-test scripts.
//!
//! `k6/x/crypto` exposes an AES-256-CFB stream cipher, SHA-256 hash sessions
//! and secure random bytes. `k6/x/cryptography` exposes password-based
//! AES-256-CBC envelopes. Both are reached through [`host::ModuleRegistry`].

pub mod crypto;
pub mod host;
pub mod modules;
pub mod state;

pub use host::error::{HostError, HostResult};
pub use host::types::{CallOutcome, ModuleCall, ModuleInfo};
pub use host::{ModuleRegistry, ScriptModule};
