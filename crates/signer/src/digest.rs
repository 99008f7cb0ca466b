use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

use crate::error::SignerError;

pub const DIGEST_ALGORITHM: &str = "sha-256";

/// `Content-Digest` value for a request body, e.g. `sha-256=:<base64>:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest {
    encoded_hash: String,
    header_value: String,
}

impl ContentDigest {
    /// Hashes `body` with SHA-256.
    ///
    /// Returns `Ok(None)` for a missing or empty body: such requests carry
    /// no `Content-Digest` and do not cover the `content-digest` component.
    pub fn compute(body: Option<&[u8]>) -> Result<Option<Self>, SignerError> {
        let body = match body {
            Some(body) if !body.is_empty() => body,
            _ => return Ok(None),
        };

        let hash = Sha256::digest(body);
        let encoded_hash = STANDARD.encode(hash);

        // label + "=:" + hash + ":"
        let mut header_value =
            String::with_capacity(DIGEST_ALGORITHM.len() + encoded_hash.len() + 3);
        write!(header_value, "{DIGEST_ALGORITHM}=:{encoded_hash}:")?;

        Ok(Some(Self {
            encoded_hash,
            header_value,
        }))
    }

    pub fn algorithm(&self) -> &'static str {
        DIGEST_ALGORITHM
    }

    /// The base64-encoded SHA-256 hash, without label or delimiters.
    pub fn encoded_hash(&self) -> &str {
        &self.encoded_hash
    }

    pub fn header_value(&self) -> &str {
        &self.header_value
    }
}
