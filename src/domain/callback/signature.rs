//! Billogram callback signature verification.
//!
//! Billogram signs each callback with `md5(callback_id + sign_key)`. The sign
//! key is the one set on the invoice at creation time, which is the order id,
//! so the signature can only be checked after the body has been parsed.

use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

use super::errors::CallbackError;
use super::event::CallbackPayload;

/// Lowercase hex MD5 of `callback_id + sign_key`.
pub fn sign_callback(callback_id: &str, sign_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(callback_id.as_bytes());
    hasher.update(sign_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verifier for Billogram callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallbackVerifier;

impl CallbackVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Parses the body and checks its signature.
    ///
    /// # Errors
    ///
    /// - `ParseError` - Body is not a callback document
    /// - `MissingField` - `custom` or `callback_id` is empty
    /// - `InvalidSignature` - Signature did not match
    pub fn verify_and_parse(&self, payload: &[u8]) -> Result<CallbackPayload, CallbackError> {
        let callback: CallbackPayload = serde_json::from_slice(payload)
            .map_err(|e| CallbackError::ParseError(e.to_string()))?;

        if callback.custom.trim().is_empty() {
            return Err(CallbackError::MissingField("custom"));
        }
        if callback.callback_id.is_empty() {
            return Err(CallbackError::MissingField("callback_id"));
        }

        self.verify(&callback)?;
        Ok(callback)
    }

    /// Checks the signature of an already parsed callback.
    pub fn verify(&self, callback: &CallbackPayload) -> Result<(), CallbackError> {
        let expected = sign_callback(&callback.callback_id, &callback.custom);
        let supplied = callback.signature.trim().to_ascii_lowercase();

        if !constant_time_compare(expected.as_bytes(), supplied.as_bytes()) {
            return Err(CallbackError::InvalidSignature);
        }
        Ok(())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
