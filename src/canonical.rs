//! Canonical string construction for JS-SDK page signatures.
//!
//! The bridge verifies a signature by rebuilding `string1` from the same
//! fields, so both sides must agree byte for byte:
//!
//! ```text
//! jsapi_ticket=...&noncestr=...&timestamp=...&url=...
//! ```
//!
//! Field names are lower-cased and ordered by ASCII value. Neither names nor
//! values are URL-escaped.

use std::collections::BTreeMap;

/// Join `fields` into the canonical `key=value&key=value` form.
///
/// When two names collide after lower-casing, the value of the name that
/// sorts later in its original spelling wins (`"URL"` < `"url"`, so `url`
/// beats `URL`). An empty input yields an empty string.
pub fn canonicalize<I, K, V>(fields: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(K, V)> = fields.into_iter().collect();
    pairs.sort_by(|(a, _), (b, _)| a.as_ref().as_bytes().cmp(b.as_ref().as_bytes()));

    // BTreeMap<String, _> orders by bytes, which is the ASCII order we need.
    let mut lowered: BTreeMap<String, V> = BTreeMap::new();
    for (key, value) in pairs {
        lowered.insert(key.as_ref().to_lowercase(), value);
    }

    let mut out = String::new();
    for (key, value) in &lowered {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value.as_ref());
    }
    out
}
