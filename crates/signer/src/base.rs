//! Signature parameters and the signature base they describe.
//!
//! The serialized parameters are emitted twice: once as the value of
//! `Signature-Input` and once as the final `"@signature-params"` line of
//! the signature base. Both come from the same [`SignatureParameters`]
//! value, so the declared components can never drift from the signed ones.

use std::fmt::Write;

use crate::digest::ContentDigest;
use crate::error::SignerError;
use crate::request::RequestDescriptor;
use crate::signer::SIGNATURE_ALGORITHM;

/// A covered component of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Method,
    TargetUri,
    ContentDigest,
}

impl Component {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Method => "@method",
            Self::TargetUri => "@target-uri",
            Self::ContentDigest => "content-digest",
        }
    }
}

const WITH_DIGEST: [Component; 3] = [
    Component::Method,
    Component::TargetUri,
    Component::ContentDigest,
];
const WITHOUT_DIGEST: [Component; 2] = [Component::Method, Component::TargetUri];

/// Metadata describing what was signed, when, by whom and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameters {
    components: &'static [Component],
    created: u64,
    key_id: String,
}

impl SignatureParameters {
    /// Covers `content-digest` only when the request has a digest. The
    /// algorithm is always `rsa-v1_5-sha256`.
    pub fn new(has_digest: bool, created: u64, key_id: &str) -> Self {
        let components: &'static [Component] = if has_digest {
            &WITH_DIGEST
        } else {
            &WITHOUT_DIGEST
        };
        Self {
            components,
            created,
            key_id: key_id.to_owned(),
        }
    }

    pub fn components(&self) -> &[Component] {
        self.components
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn algorithm(&self) -> &'static str {
        SIGNATURE_ALGORITHM
    }

    /// `("@method" "@target-uri");created=..;keyid="..";alg=".."`
    pub fn serialize(&self) -> Result<String, SignerError> {
        let mut out = String::with_capacity(96 + self.key_id.len());
        out.push('(');
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write!(out, "\"{}\"", component.name())?;
        }
        write!(
            out,
            ");created={};keyid=\"{}\";alg=\"{}\"",
            self.created, self.key_id, SIGNATURE_ALGORITHM
        )?;
        Ok(out)
    }
}

/// The exact bytes that get signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBase {
    parameters: SignatureParameters,
    serialized_parameters: String,
    base: String,
}

impl SignatureBase {
    /// Builds the newline-joined `"name": value` lines for every component
    /// in `parameters`, followed by the `"@signature-params"` line.
    pub fn build(
        request: &RequestDescriptor<'_>,
        digest: Option<&ContentDigest>,
        parameters: SignatureParameters,
    ) -> Result<Self, SignerError> {
        let target_uri = request.target_uri();
        if target_uri.contains(['\r', '\n']) {
            return Err(SignerError::InvalidInput(
                "target uri contains a line break".into(),
            ));
        }

        let serialized_parameters = parameters.serialize()?;

        let mut base = String::with_capacity(
            request.method().as_str().len()
                + target_uri.len()
                + digest.map_or(0, |d| d.header_value().len())
                + serialized_parameters.len()
                + 96,
        );

        for component in parameters.components() {
            let value = match component {
                Component::Method => request.method().as_str(),
                Component::TargetUri => target_uri,
                Component::ContentDigest => digest
                    .ok_or_else(|| {
                        SignerError::InvalidInput(
                            "content-digest is covered but the request has no digest".into(),
                        )
                    })?
                    .header_value(),
            };
            writeln!(base, "\"{}\": {}", component.name(), value)?;
        }
        write!(base, "\"@signature-params\": {serialized_parameters}")?;

        Ok(Self {
            parameters,
            serialized_parameters,
            base,
        })
    }

    pub fn parameters(&self) -> &SignatureParameters {
        &self.parameters
    }

    pub fn serialized_parameters(&self) -> &str {
        &self.serialized_parameters
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.base.as_bytes()
    }
}
