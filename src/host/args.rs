//! Positional argument extraction for exported functions.

use serde_json::Value;

use super::error::{HostError, HostResult};
use crate::state::SessionId;

/// Arguments of one call, tagged with the function name for error messages.
pub struct Args<'a> {
    function: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub fn new(function: &'a str, values: &'a [Value]) -> Self {
        Self { function, values }
    }

    /// Require exactly `n` arguments.
    pub fn require(&self, n: usize) -> HostResult<()> {
        if self.values.len() != n {
            return Err(HostError::Arity {
                function: self.function.to_string(),
                expected: n,
                got: self.values.len(),
            });
        }
        Ok(())
    }

    fn bad(&self, index: usize, reason: impl Into<String>) -> HostError {
        HostError::BadArgument {
            function: self.function.to_string(),
            index,
            reason: reason.into(),
        }
    }

    fn get(&self, index: usize) -> HostResult<&'a Value> {
        self.values
            .get(index)
            .ok_or_else(|| self.bad(index, "missing"))
    }

    pub fn str(&self, index: usize) -> HostResult<&'a str> {
        self.get(index)?
            .as_str()
            .ok_or_else(|| self.bad(index, "expected a string"))
    }

    pub fn handle(&self, index: usize) -> HostResult<SessionId> {
        self.get(index)?
            .as_u64()
            .ok_or_else(|| self.bad(index, "expected a session handle"))
    }

    /// A byte length: a non-negative integer no larger than `max`.
    pub fn length(&self, index: usize, max: usize) -> HostResult<usize> {
        let value = self.get(index)?;
        let n = value
            .as_u64()
            .ok_or_else(|| self.bad(index, format!("expected a non-negative integer, got {}", value)))?;
        match usize::try_from(n) {
            Ok(len) if len <= max => Ok(len),
            _ => Err(self.bad(index, format!("length {} exceeds maximum of {}", n, max))),
        }
    }
}
