//! Outbound HTTP message signing for the Layer1 digital asset API.
//!
//! Every request carries `Signature-Input` and `Signature` headers, plus
//! `Content-Digest` when it has a body. The signature covers `@method`,
//! `@target-uri` and, when present, `content-digest`, using
//! `rsa-v1_5-sha256` under the client id as `keyid`.

pub mod error;

mod base;
mod digest;
mod headers;
mod key;
mod request;
mod signer;

pub use base::{Component, SignatureBase, SignatureParameters};
pub use digest::{ContentDigest, DIGEST_ALGORITHM};
pub use error::{SignRequestError, SignStage, SignerError};
pub use headers::{
    CONTENT_DIGEST, HttpSigner, SIGNATURE, SIGNATURE_INPUT, SIGNATURE_LABEL, SignedHeaders,
};
pub use key::{KeyDecoder, SigningIdentity, load_private_key};
pub use request::{Method, RequestDescriptor};
pub use signer::{MessageSigner, RsaSigner, SIGNATURE_ALGORITHM};
