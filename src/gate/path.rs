//! Path canonicalization shared by the gate and the settings layer.

/// Reduces a raw request path or URL fragment to its canonical comparison form.
///
/// # Normalization Rules
///
/// 1. **Query**: everything from the first `?` is removed
/// 2. **Fragment**: everything from the first `#` is removed
/// 3. **Slashes**: all leading and trailing `/` are trimmed, together with
///    any whitespace interleaved with them
///
/// Never fails. Blank input yields an empty string, and applying the function
/// to its own output returns it unchanged.
///
/// # Examples
///
/// ```
/// use hidden_login::gate::path::normalize;
///
/// assert_eq!(normalize("/foo/?x=1#y"), "foo");
/// assert_eq!(normalize("my-login"), "my-login");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());

    raw[..end]
        .trim_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}
