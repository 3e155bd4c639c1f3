/// Length of the generated `noncestr`.
pub const NONCE_LEN: usize = 15;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a `noncestr` for page signing.
///
/// Format: 15 lowercase base-36 characters (e.g. `k3x9q0b7zt1m2wa`).
///
/// The bridge only needs the value to be unique in practice, so a fast
/// non-cryptographic source is enough here.
pub fn create_nonce_str() -> String {
    (0..NONCE_LEN)
        .map(|_| ALPHABET[fastrand::usize(..ALPHABET.len())] as char)
        .collect()
}
