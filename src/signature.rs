//! JS-SDK page signature.
//!
//! `signature = hex(sha1(string1))` where `string1` is the canonical form of
//! `jsapi_ticket`, `noncestr`, `timestamp` and `url`
//! (see [`crate::canonical`]).

use sha1::{Digest, Sha1};

use crate::canonical::canonicalize;
use crate::error::{Error, Result};
use crate::nonce::create_nonce_str;
use crate::timestamp::create_timestamp;
use crate::types::{SignatureInput, SignedPayload};

/// Lowercase hex SHA-1 of `input`.
pub fn sha1_hex(input: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Sign `url` with `jsapi_ticket` using a fresh nonce and the current time.
///
/// Fails with [`crate::Error::InvalidArgument`] when either argument is
/// empty. No network I/O is performed.
pub fn compute_signature(jsapi_ticket: &str, url: &str) -> Result<SignedPayload> {
    if jsapi_ticket.is_empty() {
        return Err(Error::InvalidArgument("jsapi_ticket"));
    }
    if url.is_empty() {
        return Err(Error::InvalidArgument("url"));
    }

    sign_with(jsapi_ticket, url, &create_nonce_str(), &create_timestamp())
}

/// Sign with an explicit nonce and timestamp.
pub fn sign_with(
    jsapi_ticket: &str,
    url: &str,
    nonce: &str,
    timestamp: &str,
) -> Result<SignedPayload> {
    let input = SignatureInput {
        jsapi_ticket: jsapi_ticket.to_string(),
        nonce: nonce.to_string(),
        timestamp: timestamp.to_string(),
        url: url.to_string(),
    };
    input.validate()?;

    let string1 = canonicalize(input.fields());
    let signature = sha1_hex(&string1);

    Ok(SignedPayload { input, signature })
}

/// `url` without its `#fragment`, which the platform excludes from signing.
pub fn signable_url(url: &str) -> &str {
    match url.find('#') {
        Some(pos) => &url[..pos],
        None => url,
    }
}
