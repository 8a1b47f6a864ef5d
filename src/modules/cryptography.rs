//! `k6/x/cryptography`: password-based envelope encryption.

use serde_json::Value;

use crate::crypto;
use crate::host::args::Args;
use crate::host::error::{HostError, HostResult};
use crate::host::ScriptModule;
use crate::state::SessionStore;

pub const MODULE_NAME: &str = "k6/x/cryptography";

const EXPORTS: &[&str] = &["encryptData", "hashBody", "decryptData"];

pub struct CryptographyModule;

impl ScriptModule for CryptographyModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn exports(&self) -> &'static [&'static str] {
        EXPORTS
    }

    fn call(&self, _: &mut SessionStore, function: &str, args: &[Value]) -> HostResult<Value> {
        let args = Args::new(function, args);
        args.require(2)?;
        let (first, password) = (args.str(0)?, args.str(1)?);

        let out = match function {
            "encryptData" => crypto::encrypt_data(first, password)?,
            "hashBody" => crypto::hash_body(first, password)?,
            "decryptData" => crypto::decrypt_data(first, password)?,
            _ => {
                return Err(HostError::UnknownFunction {
                    module: MODULE_NAME.to_string(),
                    function: function.to_string(),
                })
            }
        };
        Ok(Value::String(out))
    }
}
