//! `k6/x/crypto`: stream cipher, hash sessions and random bytes.
//!
//! Sessions are stored in the host's `SessionStore`; scripts only ever see
//! the numeric handle.

use serde_json::Value;

use crate::crypto;
use crate::crypto::utils::MAX_RANDOM_BYTES;
use crate::host::args::Args;
use crate::host::error::{HostError, HostResult};
use crate::host::ScriptModule;
use crate::state::SessionStore;

pub const MODULE_NAME: &str = "k6/x/crypto";

const EXPORTS: &[&str] = &[
    "createCipheriv",
    "createCipher",
    "update",
    "createHash",
    "write",
    "digest",
    "randomBytes",
    "release",
];

pub struct CryptoModule;

impl CryptoModule {
    fn create_cipheriv(sessions: &mut SessionStore, args: &Args) -> HostResult<Value> {
        args.require(3)?;
        let cipher = crypto::create_cipheriv(args.str(0)?, args.str(1)?, args.str(2)?)?;
        Ok(Value::from(sessions.insert_cipher(cipher)))
    }

    fn update(sessions: &mut SessionStore, args: &Args) -> HostResult<Value> {
        args.require(2)?;
        let cipher = sessions.cipher_mut(args.handle(0)?)?;
        Ok(Value::String(cipher.update(args.str(1)?)))
    }

    fn create_hash(sessions: &mut SessionStore, args: &Args) -> HostResult<Value> {
        args.require(1)?;
        let hash = crypto::create_hash(args.str(0)?)?;
        Ok(Value::from(sessions.insert_hash(hash)))
    }

    fn write(sessions: &mut SessionStore, args: &Args) -> HostResult<Value> {
        args.require(2)?;
        let hash = sessions.hash_mut(args.handle(0)?)?;
        Ok(Value::from(hash.write(args.str(1)?.as_bytes())))
    }

    fn digest(sessions: &mut SessionStore, args: &Args) -> HostResult<Value> {
        args.require(2)?;
        // validate before consuming the session
        let encoding = args.str(1)?;
        let hash = sessions.take_hash(args.handle(0)?)?;
        Ok(Value::String(hash.digest(encoding)))
    }

    fn random_bytes(args: &Args) -> HostResult<Value> {
        args.require(1)?;
        Ok(Value::String(crypto::random_bytes_base64(args.length(0, MAX_RANDOM_BYTES)?)?))
    }

    fn release(sessions: &mut SessionStore, args: &Args) -> HostResult<Value> {
        args.require(1)?;
        Ok(Value::Bool(sessions.release(args.handle(0)?)))
    }
}

impl ScriptModule for CryptoModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn exports(&self) -> &'static [&'static str] {
        EXPORTS
    }

    fn call(
        &self,
        sessions: &mut SessionStore,
        function: &str,
        args: &[Value],
    ) -> HostResult<Value> {
        let args = Args::new(function, args);
        match function {
            "createCipheriv" | "createCipher" => Self::create_cipheriv(sessions, &args),
            "update" => Self::update(sessions, &args),
            "createHash" => Self::create_hash(sessions, &args),
            "write" => Self::write(sessions, &args),
            "digest" => Self::digest(sessions, &args),
            "randomBytes" => Self::random_bytes(&args),
            "release" => Self::release(sessions, &args),
            _ => Err(HostError::UnknownFunction {
                module: MODULE_NAME.to_string(),
                function: function.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::utils::base64_to_bytes;
    use crate::crypto::CryptoError;
    use serde_json::json;

    const KEY: &str = "0123456789abcdef0123456789abcdef";
    const ZERO_IV: &str = "AAAAAAAAAAAAAAAAAAAAAA==";

    fn call(sessions: &mut SessionStore, function: &str, args: Value) -> HostResult<Value> {
        let args = args.as_array().cloned().unwrap_or_default();
        CryptoModule.call(sessions, function, &args)
    }

    #[test]
    fn cipher_lifecycle() {
        let mut sessions = SessionStore::new();
        let handle = call(&mut sessions, "createCipheriv", json!(["aes-256-cfb", KEY, ZERO_IV])).unwrap();

        let first = call(&mut sessions, "update", json!([handle, "hello"])).unwrap();
        let first = base64_to_bytes(first.as_str().unwrap()).unwrap();
        assert_eq!(first.len(), 5);

        assert_eq!(call(&mut sessions, "release", json!([handle])).unwrap(), json!(true));
        assert!(matches!(
            call(&mut sessions, "update", json!([handle, "hello"])),
            Err(HostError::InvalidHandle { .. })
        ));
    }

    #[test]
    fn create_cipher_alias() {
        let mut sessions = SessionStore::new();
        let handle = call(&mut sessions, "createCipher", json!(["aes-256-cfb", KEY, ZERO_IV]));
        assert!(handle.unwrap().is_u64());
    }

    #[test]
    fn unsupported_cipher_allocates_no_handle() {
        let mut sessions = SessionStore::new();
        let err = call(&mut sessions, "createCipheriv", json!(["des", KEY, ZERO_IV])).unwrap_err();
        assert!(matches!(err, HostError::Crypto(CryptoError::UnsupportedAlgorithm(_))));
        assert!(sessions.is_empty());
    }

    #[test]
    fn bad_key_allocates_no_handle() {
        let mut sessions = SessionStore::new();
        let err = call(&mut sessions, "createCipheriv", json!(["aes-256-cfb", "short", ZERO_IV])).unwrap_err();
        assert!(matches!(err, HostError::Crypto(CryptoError::Key(_))));
        assert!(sessions.is_empty());
    }

    #[test]
    fn hash_lifecycle() {
        let mut sessions = SessionStore::new();
        let handle = call(&mut sessions, "createHash", json!(["sha256"])).unwrap();
        assert_eq!(call(&mut sessions, "write", json!([handle, "ab"])).unwrap(), json!(2));
        call(&mut sessions, "write", json!([handle, "c"])).unwrap();

        let digest = call(&mut sessions, "digest", json!([handle, "hex"])).unwrap();
        assert_eq!(
            digest,
            json!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );

        // finalized sessions cannot be written or digested again
        assert!(call(&mut sessions, "write", json!([handle, "d"])).is_err());
        assert!(call(&mut sessions, "digest", json!([handle, "hex"])).is_err());
    }

    #[test]
    fn digest_unknown_encoding_is_base64() {
        let mut sessions = SessionStore::new();
        let handle = call(&mut sessions, "createHash", json!(["sha256"])).unwrap();
        let digest = call(&mut sessions, "digest", json!([handle, "utf8"])).unwrap();
        assert_eq!(base64_to_bytes(digest.as_str().unwrap()).unwrap().len(), 32);
    }

    #[test]
    fn digest_with_bad_encoding_arg_keeps_session() {
        let mut sessions = SessionStore::new();
        let handle = call(&mut sessions, "createHash", json!(["sha256"])).unwrap();
        assert!(call(&mut sessions, "digest", json!([handle, 5])).is_err());
        assert!(call(&mut sessions, "digest", json!([handle, "hex"])).is_ok());
    }

    #[test]
    fn digest_on_cipher_handle_rejected() {
        let mut sessions = SessionStore::new();
        let handle = call(&mut sessions, "createCipheriv", json!(["aes-256-cfb", KEY, ZERO_IV])).unwrap();
        assert!(matches!(
            call(&mut sessions, "digest", json!([handle, "hex"])),
            Err(HostError::InvalidHandle { .. })
        ));
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn random_bytes_export() {
        let mut sessions = SessionStore::new();
        let out = call(&mut sessions, "randomBytes", json!([24])).unwrap();
        assert_eq!(base64_to_bytes(out.as_str().unwrap()).unwrap().len(), 24);
        assert!(call(&mut sessions, "randomBytes", json!([-4])).is_err());
    }

    #[test]
    fn oversized_random_bytes_rejected_without_allocating() {
        let mut sessions = SessionStore::new();
        let handle = call(&mut sessions, "createHash", json!(["sha256"])).unwrap();

        for len in [json!(MAX_RANDOM_BYTES + 1), json!(u64::MAX / 2), json!(u64::MAX)] {
            let err = call(&mut sessions, "randomBytes", json!([len])).unwrap_err();
            assert!(matches!(err, HostError::BadArgument { index: 0, .. }));
        }

        let out = call(&mut sessions, "randomBytes", json!([MAX_RANDOM_BYTES])).unwrap();
        assert_eq!(base64_to_bytes(out.as_str().unwrap()).unwrap().len(), MAX_RANDOM_BYTES);
        // open sessions survive a rejected request
        assert!(call(&mut sessions, "digest", json!([handle, "hex"])).is_ok());
    }
}
