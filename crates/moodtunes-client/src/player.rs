use std::sync::Arc;

use anyhow::Result;
use rand::Rng;

use moodtunes_types::catalog::{self, Artist, Song};

use crate::preview::Preview;
use crate::storage::{LocalStorage, SAVED_SONGS_KEY};

pub const WAVEFORM_BARS: usize = 50;

/// Assumed track length until the audio backend reports the real one.
const DEFAULT_DURATION_SECS: u64 = 240;

/// A catalog song addressed by its player route slugs.
#[derive(Debug, Clone)]
pub struct Track {
    pub artist_slug: String,
    pub song_slug: String,
    pub artist: &'static Artist,
    pub song: &'static Song,
}

impl Track {
    pub fn resolve(artist_slug: &str, song_slug: &str) -> Option<Self> {
        let (artist, song) = catalog::find_song(artist_slug, song_slug)?;
        Some(Self {
            artist_slug: artist_slug.to_string(),
            song_slug: song_slug.to_string(),
            artist,
            song,
        })
    }

    /// Identity used by the saved-songs list.
    pub fn key(&self) -> String {
        song_key(&self.artist_slug, &self.song_slug)
    }

    pub fn next(&self) -> Option<Track> {
        self.neighbour(1)
    }

    pub fn previous(&self) -> Option<Track> {
        self.neighbour(-1)
    }

    fn neighbour(&self, step: isize) -> Option<Track> {
        let idx = self
            .artist
            .songs
            .iter()
            .position(|s| catalog::slugify(s.title) == self.song_slug)?;
        let song = self.artist.songs.get(idx.checked_add_signed(step)?)?;
        Some(Track {
            artist_slug: self.artist_slug.clone(),
            song_slug: catalog::slugify(song.title),
            artist: self.artist,
            song,
        })
    }
}

pub fn song_key(artist_slug: &str, song_slug: &str) -> String {
    format!("{}:{}", artist_slug, song_slug)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    Bundled(&'static str),
    Remote(String),
}

#[derive(Debug, Clone)]
pub struct NowPlaying {
    pub track: Track,
    pub source: AudioSource,
    pub artwork: String,
    pub position_secs: u64,
    pub duration_secs: u64,
    pub playing: bool,
}

impl NowPlaying {
    /// Position over duration, clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        (self.position_secs as f64 / self.duration_secs as f64).min(1.0)
    }
}

/// Single-track playback state. Starting a track replaces the current one.
#[derive(Debug, Default)]
pub struct Player {
    current: Option<NowPlaying>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `track`, preferring the remote preview when one was found.
    /// Returns the track that was playing before, if any.
    pub fn play(&mut self, track: Track, preview: Option<Preview>) -> Option<NowPlaying> {
        let (source, artwork) = match preview {
            Some(p) => (
                p.audio_url
                    .map(AudioSource::Remote)
                    .unwrap_or(AudioSource::Bundled(track.song.file)),
                p.artwork_url.unwrap_or_else(|| track.song.image.to_string()),
            ),
            None => (AudioSource::Bundled(track.song.file), track.song.image.to_string()),
        };
        self.current.replace(NowPlaying {
            track,
            source,
            artwork,
            position_secs: 0,
            duration_secs: DEFAULT_DURATION_SECS,
            playing: true,
        })
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.current.as_ref()
    }

    /// Flips play/pause; returns the new playing flag.
    pub fn toggle(&mut self) -> bool {
        match self.current.as_mut() {
            Some(np) => {
                np.playing = !np.playing;
                np.playing
            }
            None => false,
        }
    }

    /// Applies a status report from the audio backend.
    pub fn update_status(&mut self, position_secs: u64, duration_secs: u64) {
        if let Some(np) = self.current.as_mut() {
            np.duration_secs = duration_secs;
            np.position_secs = position_secs.min(duration_secs);
            if duration_secs > 0 && position_secs >= duration_secs {
                np.playing = false;
            }
        }
    }

    pub fn stop(&mut self) -> Option<NowPlaying> {
        self.current.take()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveBar {
    pub height: f64,
    pub active: bool,
}

/// Decorative bars; heights are random in `[10, 50)`.
pub fn waveform(progress: f64) -> Vec<WaveBar> {
    let mut rng = rand::rng();
    (0..WAVEFORM_BARS)
        .map(|i| WaveBar {
            height: rng.random_range(10.0..50.0),
            active: i as f64 / WAVEFORM_BARS as f64 <= progress,
        })
        .collect()
}

/// `m:ss`
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Song keys the user saved from the player, kept under `saved:songs`.
#[derive(Clone)]
pub struct SavedSongs {
    storage: Arc<LocalStorage>,
}

impl SavedSongs {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    /// Anything other than a JSON string array reads as empty.
    pub fn list(&self) -> Result<Vec<String>> {
        let raw = self.storage.get_item(SAVED_SONGS_KEY)?;
        Ok(raw
            .and_then(|r| serde_json::from_str(&r).ok())
            .unwrap_or_default())
    }

    pub fn is_saved(&self, key: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|k| k == key))
    }

    pub fn save(&self, key: &str) -> Result<()> {
        let mut keys = self.list()?;
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
        self.storage.set_json(SAVED_SONGS_KEY, &keys)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut keys = self.list()?;
        keys.retain(|k| k != key);
        self.storage.set_json(SAVED_SONGS_KEY, &keys)
    }
}
