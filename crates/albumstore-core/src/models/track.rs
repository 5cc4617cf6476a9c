use serde::Serialize;

use crate::audio;

/// Ordering key for files without a leading track number; they sort last.
pub const UNNUMBERED_TRACK: u32 = 999;

/// An audio object that lies directly under an entitled prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// Basename of the storage key, shown to buyers and used in archives.
    pub file_name: String,
    /// Full storage key.
    pub pathname: String,
    /// Retrieval URL reported by the blob store.
    pub url: String,
    pub size: Option<u64>,
    /// Leading number of the file name, [`UNNUMBERED_TRACK`] if absent.
    pub track_number: u32,
}

impl Track {
    pub fn new(pathname: impl Into<String>, url: impl Into<String>, size: Option<u64>) -> Self {
        let pathname = pathname.into();
        let file_name = audio::basename(&pathname).to_string();
        let track_number = audio::leading_track_number(&file_name).unwrap_or(UNNUMBERED_TRACK);
        Self {
            file_name,
            pathname,
            url: url.into(),
            size,
            track_number,
        }
    }
}

/// Stable ascending sort by track number; equal numbers keep their listing order.
pub fn sort_tracks(tracks: &mut [Track]) {
    tracks.sort_by_key(|t| t.track_number);
}

/// Join a download prefix and a file name into the storage key the store uses.
pub fn storage_key_for(prefix: &str, file_name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), file_name)
}

/// What a paid session may download, computed fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    pub album_title: String,
    pub download_prefix: String,
    /// Tracks in delivery order.
    pub tracks: Vec<Track>,
}

impl Entitlement {
    pub fn track_names(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.file_name.clone()).collect()
    }

    /// Exact-match lookup of an already sanitized file name.
    pub fn find_track(&self, sanitized: &str) -> Option<&Track> {
        let key = storage_key_for(&self.download_prefix, sanitized);
        self.tracks.iter().find(|t| t.pathname == key)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
