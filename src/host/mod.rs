//! Minimal script host: module registration and call dispatch.
//!
//! A module is registered under an import path and exposes named functions.
//! The registry owns the session arena, so handles returned by one call stay
//! valid for later calls against the same registry.

pub mod args;
pub mod error;
pub mod types;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::modules::{CryptoModule, CryptographyModule};
use crate::state::SessionStore;
use error::{HostError, HostResult};
use types::{CallOutcome, ModuleCall, ModuleInfo};

/// A module importable by scripts.
pub trait ScriptModule: Send {
    /// Import path, e.g. `k6/x/crypto`.
    fn name(&self) -> &'static str;

    /// Names of the exported functions.
    fn exports(&self) -> &'static [&'static str];

    /// Invoke an exported function.
    fn call(
        &self,
        sessions: &mut SessionStore,
        function: &str,
        args: &[Value],
    ) -> HostResult<Value>;
}

/// Import path -> module, plus the sessions created through them.
pub struct ModuleRegistry {
    modules: BTreeMap<&'static str, Box<dyn ScriptModule>>,
    sessions: SessionStore,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
            sessions: SessionStore::new(),
        }
    }

    /// A registry with both crypto modules registered.
    pub fn with_defaults() -> HostResult<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(CryptoModule))?;
        registry.register(Box::new(CryptographyModule))?;
        Ok(registry)
    }

    /// Register a module. Fails if the import path is already taken.
    pub fn register(&mut self, module: Box<dyn ScriptModule>) -> HostResult<()> {
        let name = module.name();
        if self.modules.contains_key(name) {
            return Err(HostError::DuplicateModule(name.to_string()));
        }
        log::debug!("Registered module {}", name);
        self.modules.insert(name, module);
        Ok(())
    }

    pub fn modules(&self) -> Vec<ModuleInfo> {
        self.modules
            .values()
            .map(|m| ModuleInfo {
                name: m.name().to_string(),
                exports: m.exports().iter().map(|e| e.to_string()).collect(),
            })
            .collect()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Dispatch one call.
    pub fn call(&mut self, module: &str, function: &str, args: &[Value]) -> HostResult<Value> {
        let target = self
            .modules
            .get(module)
            .ok_or_else(|| HostError::UnknownModule(module.to_string()))?;

        if !target.exports().iter().any(|e| *e == function) {
            return Err(HostError::UnknownFunction {
                module: module.to_string(),
                function: function.to_string(),
            });
        }

        log::debug!("{}.{} ({} args)", module, function, args.len());
        let result = target.call(&mut self.sessions, function, args);
        if let Err(e) = &result {
            log::warn!("{}.{} failed: {}", module, function, e);
        }
        result
    }

    /// Dispatch a `ModuleCall` and wrap the result for the wire.
    pub fn dispatch(&mut self, call: &ModuleCall) -> CallOutcome {
        self.call(&call.module, &call.function, &call.args).into()
    }
}
