#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::RsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use sha2::{Digest, Sha256};

pub const PKCS8_PEM: &str = include_str!("../fixtures/client_key_pkcs8.pem");
pub const PKCS1_PEM: &str = include_str!("../fixtures/client_key_pkcs1.pem");
pub const PUBLIC_PEM: &str = include_str!("../fixtures/client_key_pub.pem");
pub const ED25519_PEM: &str = include_str!("../fixtures/ed25519_key.pem");
pub const EXPECTED_POST_SIGNATURE: &str = include_str!("../fixtures/expected_post_signature.b64");
pub const EXPECTED_GET_SIGNATURE: &str = include_str!("../fixtures/expected_get_signature.b64");

pub fn public_key() -> RsaPublicKey {
    RsaPublicKey::from_public_key_pem(PUBLIC_PEM).unwrap()
}

/// Rebuilds the signature base the way a receiver would: from the request
/// it saw and the `Signature-Input` header it was given.
pub fn reconstruct_base(
    method: &str,
    target_uri: &str,
    body: Option<&[u8]>,
    signature_input: &str,
) -> String {
    let params = signature_input.strip_prefix("sig=").expect("sig= label");
    let list_end = params.find(')').expect("closing paren");
    let components: Vec<&str> = params[1..list_end]
        .split(' ')
        .map(|c| c.trim_matches('"'))
        .collect();

    let mut lines = Vec::new();
    for component in components {
        let value = match component {
            "@method" => method.to_string(),
            "@target-uri" => target_uri.to_string(),
            "content-digest" => {
                let hash = Sha256::digest(body.expect("digest declared for a body"));
                format!("sha-256=:{}:", STANDARD.encode(hash))
            }
            other => panic!("unexpected component {other}"),
        };
        lines.push(format!("\"{component}\": {value}"));
    }
    lines.push(format!("\"@signature-params\": {params}"));
    lines.join("\n")
}

pub fn verify(public_key: &RsaPublicKey, base: &str, signature_header: &str) -> bool {
    let Some(inner) = signature_header
        .strip_prefix("sig=:")
        .and_then(|s| s.strip_suffix(':'))
    else {
        return false;
    };
    let Ok(raw) = STANDARD.decode(inner) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(raw.as_slice()) else {
        return false;
    };
    VerifyingKey::<Sha256>::new(public_key.clone())
        .verify(base.as_bytes(), &signature)
        .is_ok()
}
