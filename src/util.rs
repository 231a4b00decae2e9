//! Clock and path helpers shared by the content model.

/// Nanosecond clock reading used to seed the random part of generated
/// content identifiers.
///
/// Native targets read `SystemTime`; wasm32 has no such clock and asks the
/// JavaScript host instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed_nanos() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(12345)
}

#[cfg(target_arch = "wasm32")]
pub fn time_seed_nanos() -> u64 {
    // js_sys::Date::now() returns milliseconds as f64
    (js_sys::Date::now() * 1_000_000.0) as u64
}

/// Whole seconds since the Unix epoch, the time part of generated
/// content identifiers. Falls back to 0 if the clock is before the epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn time_now_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn time_now_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

/// Pick a pseudo-random number in `low..=high` from the time seed.
///
/// Not suitable for anything security-related; it only spreads values
/// generated within the same second.
pub fn time_seeded_range(low: u32, high: u32) -> u32 {
    debug_assert!(low <= high);
    let mut x = time_seed_nanos();
    x = x.wrapping_mul(6364136223846793005);
    x = x.wrapping_add(1442695040888963407);
    let span = u64::from(high - low) + 1;
    low + ((x >> 33) % span) as u32
}

// ============================================================================
// Path helpers
// ============================================================================

/// Make `path` end in exactly one `/`. Leading separators are untouched.
///
/// ```
/// use folio::util::add_trailing_slash;
///
/// assert_eq!(add_trailing_slash("images"), "images/");
/// assert_eq!(add_trailing_slash("images/"), "images/");
/// assert_eq!(add_trailing_slash("images//"), "images/");
/// assert_eq!(add_trailing_slash(""), "/");
/// ```
pub fn add_trailing_slash(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

/// Remove a single leading `/` from `path`, if present.
///
/// ```
/// use folio::util::strip_leading_slash;
///
/// assert_eq!(strip_leading_slash("/css/main.css"), "css/main.css");
/// assert_eq!(strip_leading_slash("css/main.css"), "css/main.css");
/// ```
pub fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}
