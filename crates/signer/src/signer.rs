use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::SignerError;

pub const SIGNATURE_ALGORITHM: &str = "rsa-v1_5-sha256";

/// Signs signature-base bytes.
///
/// Implementations are sync and take `&self`: signing is CPU-bound and
/// one signer may be shared by concurrent requests.
pub trait MessageSigner: Send + Sync {
    /// Sign the bytes. Returns raw signature bytes.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignerError>;

    /// HTTP message signature algorithm name (e.g. "rsa-v1_5-sha256").
    fn algorithm(&self) -> &'static str;
}

/// RSA PKCS#1 v1.5 signer with SHA-256 digest.
pub struct RsaSigner {
    signing_key: SigningKey<Sha256>,
    public_key: RsaPublicKey,
}

impl RsaSigner {
    pub fn new(private_key: RsaPrivateKey) -> Self {
        let public_key = private_key.to_public_key();
        let signing_key = SigningKey::<Sha256>::new(private_key);
        Self {
            signing_key,
            public_key,
        }
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Modulus size in bytes, which is also the signature length.
    pub fn key_size(&self) -> usize {
        self.public_key.size()
    }

    /// SubjectPublicKeyInfo PEM for registering the key with the API.
    pub fn public_key_pem(&self) -> Result<String, SignerError> {
        self.public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| SignerError::Formatting(format!("encoding public key: {e}")))
    }

    /// Signs `data` and base64-encodes the raw signature.
    pub fn sign_base64(&self, data: &[u8]) -> Result<String, SignerError> {
        let signature = MessageSigner::sign(self, data)?;
        Ok(STANDARD.encode(signature))
    }
}

impl MessageSigner for RsaSigner {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignerError> {
        let signature = self
            .signing_key
            .try_sign(data)
            .map_err(|e| SignerError::Signing(e.to_string()))?;
        Ok(signature.to_vec())
    }

    fn algorithm(&self) -> &'static str {
        SIGNATURE_ALGORITHM
    }
}
