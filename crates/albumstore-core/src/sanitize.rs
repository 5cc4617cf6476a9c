//! Track name sanitizing.
//!
//! Every user-supplied track identifier passes through [`sanitize_track_name`]
//! before it is joined with an entitled prefix. The result is only ever compared
//! against listed storage keys; it never touches a filesystem.

/// Reduce a raw track identifier to its final path segment.
///
/// Both `/` and `\` are treated as separators regardless of platform, so the
/// result never contains either. `"../../secret.mp3"` becomes `"secret.mp3"`.
pub fn sanitize_track_name(raw: &str) -> String {
    raw.rsplit(['/', '\\']).next().unwrap_or_default().to_string()
}

/// Whether a sanitized name can possibly identify a stored track.
///
/// Empty segments and the `.`/`..` pseudo-entries never match a listed key.
pub fn is_addressable(sanitized: &str) -> bool {
    !sanitized.is_empty() && sanitized != "." && sanitized != ".."
}
