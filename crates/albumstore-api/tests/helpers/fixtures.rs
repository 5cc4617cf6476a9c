//! Stored file fixtures.

use super::ALBUM_PREFIX;

/// Deterministic bytes so ranges can be checked against slices.
pub fn audio_bytes(seed: u8, len: usize) -> Vec<u8> {
    (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
}

pub fn key(name: &str) -> String {
    format!("{}/{}", ALBUM_PREFIX, name)
}

/// The purchased album, stored out of order, plus files that must never be served.
pub fn standard_album() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("albums/WE BOW/10 - Finale.mp3", audio_bytes(10, 64)),
        ("albums/WE BOW/02 - Second.flac", audio_bytes(2, 48)),
        ("albums/WE BOW/01 - Intro.mp3", audio_bytes(1, 100)),
        ("albums/WE BOW/Bonus.wav", audio_bytes(99, 32)),
        ("albums/WE BOW/cover.jpg", b"not audio".to_vec()),
        ("albums/WE BOW/extras/05 - Hidden.mp3", audio_bytes(5, 16)),
        ("albums/WE BOW DELUXE/01 - Deluxe.mp3", audio_bytes(50, 16)),
        ("secret.mp3", audio_bytes(7, 16)),
    ]
}
