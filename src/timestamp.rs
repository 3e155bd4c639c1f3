use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in whole seconds, as a decimal string.
///
/// Read from the wall clock on every call.
pub fn create_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string()
}
