//! Versioned firewall digest (v1).
//!
//! The solder rewrites sensitive equality filters into a comparison
//! against a precomputed hash column, so emitted (and logged) query text
//! never contains the raw business value. That only works if both sides
//! use the exact same function, so the contract is pinned and versioned:
//!
//! - algorithm: **SHA-256**
//! - encoding: lowercase hex
//! - truncation: first **16** hex chars (64 bits)
//! - input: the UTF-8 bytes of the parameter value, as given
//!
//! The backing store's `<dimension>_hash` columns must be populated with
//! this same function. An algorithm or truncation change must mint a new
//! `_v2` function and constants; v1 is frozen.

use sha2::{Digest, Sha256};

/// Scheme name for the v1 firewall digest.
pub const FIREWALL_DIGEST_V1_SCHEME: &str = "sha256/16";

/// Hex length of a v1 digest.
pub const FIREWALL_DIGEST_V1_HEX_LEN: usize = 16;

/// Compute the v1 firewall digest of a filter value.
///
/// Deterministic and one-way; the output is safe to embed in query text
/// in place of the raw value.
pub fn firewall_digest_v1(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let mut out = String::with_capacity(FIREWALL_DIGEST_V1_HEX_LEN);
    for byte in digest.iter().take(FIREWALL_DIGEST_V1_HEX_LEN / 2) {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
