// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SHA-256 fingerprints of canonical JSON, for cache keys and audit digests.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hex SHA-256 of the JSON serialization of `value`.
///
/// Callers must only pass ordered collections so the encoding is canonical.
pub fn sha256_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(value)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
