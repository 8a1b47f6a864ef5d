//! Errors raised at the script host boundary.

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::state::SessionId;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("unknown module: {0}")]
    UnknownModule(String),
    #[error("module already registered: {0}")]
    DuplicateModule(String),
    #[error("{module} has no export named {function}")]
    UnknownFunction { module: String, function: String },
    #[error("{function} expects {expected} argument(s), got {got}")]
    Arity {
        function: String,
        expected: usize,
        got: usize,
    },
    #[error("bad argument {index} to {function}: {reason}")]
    BadArgument {
        function: String,
        index: usize,
        reason: String,
    },
    #[error("invalid handle {handle}: {reason}")]
    InvalidHandle { handle: SessionId, reason: String },
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

pub type HostResult<T> = Result<T, HostError>;
