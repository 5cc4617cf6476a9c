//! Audio file helpers shared by listing, download, zip and preview paths.

use regex::Regex;
use std::sync::LazyLock;

/// Extensions that count as deliverable audio, lowercase and without the dot.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "m4a"];

/// Content type used when a file extension is not recognised.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type the preview endpoint always answers with.
pub const PREVIEW_CONTENT_TYPE: &str = "audio/mpeg";

static AUDIO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = AUDIO_EXTENSIONS.join("|");
    Regex::new(&format!(r"(?i)\.({})$", alternatives)).expect("static audio pattern")
});

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)").expect("static track number pattern"));

/// Whether a storage key names an audio file (case-insensitive extension match).
pub fn is_audio_file(pathname: &str) -> bool {
    AUDIO_PATTERN.is_match(pathname)
}

/// Final `/`-separated segment of a storage key.
pub fn basename(pathname: &str) -> &str {
    pathname.rsplit('/').next().unwrap_or(pathname)
}

/// Lowercased extension of a file name, without the dot.
pub fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Infer the `Content-Type` to serve for a file name.
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension(file_name).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("zip") => "application/zip",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Leading integer of a file name such as `"10. Oh Most High.mp3"`.
///
/// Returns `None` when the name does not start with a digit or the number does
/// not fit in a `u32`.
pub fn leading_track_number(file_name: &str) -> Option<u32> {
    LEADING_DIGITS
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_audio_file_case_insensitive() {
        assert!(is_audio_file("albums/WE BOW/1. Ready.mp3"));
        assert!(is_audio_file("albums/WE BOW/2. Track.FLAC"));
        assert!(is_audio_file("x.Wav"));
        assert!(is_audio_file("x.m4a"));
        assert!(!is_audio_file("albums/WE BOW/cover.jpg"));
        assert!(!is_audio_file("albums/WE BOW/notes.mp3.txt"));
        assert!(!is_audio_file("albums/WE BOW/mp3"));
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("albums/WE BOW/1. Ready.mp3"), "1. Ready.mp3");
        assert_eq!(basename("top.mp3"), "top.mp3");
        assert_eq!(basename("albums/"), "");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.mp3"), "audio/mpeg");
        assert_eq!(content_type_for("a.FLAC"), "audio/flac");
        assert_eq!(content_type_for("a.wav"), "audio/wav");
        assert_eq!(content_type_for("a.m4a"), "audio/mp4");
        assert_eq!(content_type_for("bundle.zip"), "application/zip");
        assert_eq!(content_type_for("a.ogg"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("noext"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(".mp3"), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_leading_track_number() {
        assert_eq!(leading_track_number("10. Oh Most High.mp3"), Some(10));
        assert_eq!(leading_track_number("02 - My Yah.mp3"), Some(2));
        assert_eq!(leading_track_number("Intro.mp3"), None);
        assert_eq!(leading_track_number(" 1. Leading space.mp3"), None);
        assert_eq!(leading_track_number("99999999999999. Huge.mp3"), None);
    }
}
