//! Fingerprint Generator
//!
//! Derives short, deterministic cache keys from large payloads (typically
//! multi-megabyte base64-encoded blueprint images) without hashing the full
//! content.

use serde_json::Value;

/// Characters of the payload folded into the signature.
const PAYLOAD_PREFIX_LEN: usize = 32;

/// Characters of the serialized context folded into the signature.
const CONTEXT_PREFIX_LEN: usize = 20;

/// Sentinel used when no context accompanies the payload.
const NO_CONTEXT: &str = "no-ctx";

// == Key Generation ==
/// Builds a cache key from a namespace, a large payload, and optional
/// structured context.
///
/// The payload signature is its first 32 characters plus its total length;
/// the context signature is the serialized context's length plus its first
/// 20 characters. Identical inputs always produce identical keys, and the
/// whole payload is never hashed or copied.
///
/// Two distinct payloads that share the same 32-character prefix and the
/// same total length map to the same key and will silently serve each
/// other's cached response. Callers accept that trade for constant-time key
/// derivation over multi-megabyte inputs.
pub fn generate_key(namespace: &str, payload: &str, context: Option<&Value>) -> String {
    let payload_signature = format!("{}_{}", char_prefix(payload, PAYLOAD_PREFIX_LEN), payload.len());

    let context_signature = match context {
        Some(ctx) => {
            let serialized = ctx.to_string();
            format!(
                "{}_{}",
                serialized.len(),
                char_prefix(&serialized, CONTEXT_PREFIX_LEN)
            )
        }
        None => NO_CONTEXT.to_string(),
    };

    format!("{namespace}::{payload_signature}::{context_signature}")
}

/// First `n` characters of `s`, respecting char boundaries.
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
