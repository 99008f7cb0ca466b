use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument};

use crate::base::{SignatureBase, SignatureParameters};
use crate::digest::ContentDigest;
use crate::error::{SignRequestError, SignStage, SignerError};
use crate::key::SigningIdentity;
use crate::request::RequestDescriptor;

pub const CONTENT_DIGEST: &str = "Content-Digest";
pub const SIGNATURE_INPUT: &str = "Signature-Input";
pub const SIGNATURE: &str = "Signature";

const CONTENT_DIGEST_NAME: HeaderName = HeaderName::from_static("content-digest");
const SIGNATURE_INPUT_NAME: HeaderName = HeaderName::from_static("signature-input");
const SIGNATURE_NAME: HeaderName = HeaderName::from_static("signature");

/// Label tying `Signature-Input` to `Signature`.
pub const SIGNATURE_LABEL: &str = "sig";

/// The three header values for one signed request.
///
/// Only ever produced whole: if any value cannot be built, no
/// `SignedHeaders` exists.
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    content_digest: Option<String>,
    signature_input: String,
    signature: String,
    map: HeaderMap,
}

impl SignedHeaders {
    fn assemble(
        digest: Option<ContentDigest>,
        base: &SignatureBase,
        encoded_signature: &str,
    ) -> Result<Self, SignerError> {
        let content_digest = digest.map(|d| d.header_value().to_owned());

        let params = base.serialized_parameters();
        let mut signature_input = String::with_capacity(SIGNATURE_LABEL.len() + 1 + params.len());
        signature_input.push_str(SIGNATURE_LABEL);
        signature_input.push('=');
        signature_input.push_str(params);

        let mut signature =
            String::with_capacity(SIGNATURE_LABEL.len() + 3 + encoded_signature.len());
        signature.push_str(SIGNATURE_LABEL);
        signature.push_str("=:");
        signature.push_str(encoded_signature);
        signature.push(':');

        let mut map = HeaderMap::with_capacity(3);
        if let Some(value) = &content_digest {
            map.insert(CONTENT_DIGEST_NAME, header_value(value)?);
        }
        map.insert(SIGNATURE_INPUT_NAME, header_value(&signature_input)?);
        map.insert(SIGNATURE_NAME, header_value(&signature)?);

        Ok(Self {
            content_digest,
            signature_input,
            signature,
            map,
        })
    }

    /// `sha-256=:<base64>:`, absent for requests without a body.
    pub fn content_digest(&self) -> Option<&str> {
        self.content_digest.as_deref()
    }

    pub fn signature_input(&self) -> &str {
        &self.signature_input
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// `(name, value)` pairs in the order Content-Digest, Signature-Input,
    /// Signature.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.content_digest
            .as_deref()
            .map(|value| (CONTENT_DIGEST, value))
            .into_iter()
            .chain([
                (SIGNATURE_INPUT, self.signature_input.as_str()),
                (SIGNATURE, self.signature.as_str()),
            ])
    }

    pub fn to_header_map(&self) -> HeaderMap {
        self.map.clone()
    }

    /// Merges all signature headers into `headers`, replacing any existing
    /// values under the same names.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.map {
            headers.insert(name.clone(), value.clone());
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue, SignerError> {
    HeaderValue::from_str(value)
        .map_err(|e| SignerError::Formatting(format!("invalid header value: {e}")))
}

fn unix_now() -> Result<u64, SignerError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| SignerError::Clock(e.to_string()))
}

fn fail(stage: SignStage, source: SignerError) -> SignRequestError {
    debug!(stage = %stage, error = %source, "request signing failed");
    SignRequestError::new(stage, source)
}

/// Attaches `Content-Digest`, `Signature-Input` and `Signature` to
/// outgoing requests on behalf of one [`SigningIdentity`].
#[derive(Debug)]
pub struct HttpSigner {
    identity: SigningIdentity,
}

impl HttpSigner {
    pub fn new(identity: SigningIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    /// Signs `request` with `created` set to the current time.
    ///
    /// The clock is read once; the same value is declared in
    /// `Signature-Input` and covered by the signature.
    pub fn sign(&self, request: &RequestDescriptor<'_>) -> Result<SignedHeaders, SignRequestError> {
        let created = unix_now().map_err(|e| fail(SignStage::Clock, e))?;
        self.sign_at(request, created)
    }

    /// Signs `request` with an explicit `created` timestamp.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            method = %request.method(),
            target_uri = request.target_uri(),
            body_len = request.body_len(),
            created = created,
        )
    )]
    pub fn sign_at(
        &self,
        request: &RequestDescriptor<'_>,
        created: u64,
    ) -> Result<SignedHeaders, SignRequestError> {
        let digest =
            ContentDigest::compute(request.body()).map_err(|e| fail(SignStage::Digest, e))?;

        let parameters =
            SignatureParameters::new(digest.is_some(), created, self.identity.client_id());
        let base = SignatureBase::build(request, digest.as_ref(), parameters)
            .map_err(|e| fail(SignStage::SignatureBase, e))?;

        let raw_signature = self
            .identity
            .signer()
            .sign(base.as_bytes())
            .map_err(|e| fail(SignStage::Sign, e))?;
        let encoded_signature = STANDARD.encode(raw_signature);

        let headers = SignedHeaders::assemble(digest, &base, &encoded_signature)
            .map_err(|e| fail(SignStage::Headers, e))?;

        debug!(
            covered = base.parameters().components().len(),
            "signed request"
        );
        Ok(headers)
    }
}
