use std::fmt;

/// Failures raised by the individual stages of the signing engine.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to parse private key: {0}")]
    KeyParse(String),
    #[error("failed to compute content digest: {0}")]
    Digest(String),
    #[error("failed to sign signature base: {0}")]
    Signing(String),
    #[error("failed to format signature headers: {0}")]
    Formatting(String),
    #[error("system clock error: {0}")]
    Clock(String),
}

impl From<fmt::Error> for SignerError {
    fn from(error: fmt::Error) -> Self {
        Self::Formatting(error.to_string())
    }
}

/// The step of header assembly that was running when signing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignStage {
    Clock,
    Digest,
    SignatureBase,
    Sign,
    Headers,
}

impl SignStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Digest => "digest",
            Self::SignatureBase => "signature-base",
            Self::Sign => "sign",
            Self::Headers => "headers",
        }
    }
}

impl fmt::Display for SignStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single outcome returned when a request could not be signed.
///
/// The display string never includes the underlying cause. Callers that
/// are allowed to see it can walk [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("failed to sign request")]
pub struct SignRequestError {
    stage: SignStage,
    #[source]
    source: SignerError,
}

impl SignRequestError {
    pub(crate) fn new(stage: SignStage, source: SignerError) -> Self {
        Self { stage, source }
    }

    pub fn stage(&self) -> SignStage {
        self.stage
    }

    pub fn cause(&self) -> &SignerError {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn sign_request_error_hides_cause_in_display() {
        let error = SignRequestError::new(
            SignStage::Sign,
            SignerError::Signing("decryption error at modulus".into()),
        );
        assert_eq!(error.to_string(), "failed to sign request");
        assert_eq!(error.stage(), SignStage::Sign);
    }

    #[test]
    fn sign_request_error_exposes_source() {
        let error = SignRequestError::new(
            SignStage::Digest,
            SignerError::Digest("hash backend unavailable".into()),
        );
        let source = error.source().unwrap();
        assert!(source.to_string().contains("hash backend unavailable"));
        assert!(matches!(error.cause(), SignerError::Digest(_)));
    }

    #[test]
    fn fmt_error_maps_to_formatting() {
        let error: SignerError = fmt::Error.into();
        assert!(matches!(error, SignerError::Formatting(_)));
    }

    #[test]
    fn stage_names() {
        assert_eq!(SignStage::SignatureBase.to_string(), "signature-base");
        assert_eq!(SignStage::Headers.as_str(), "headers");
    }
}
