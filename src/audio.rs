//! Background music cue
//!
//! The simulation only says whether music should be playing. This manager
//! turns that level signal into play/stop commands for the mixer and keeps
//! running without audio when the track can't be loaded.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Command for the mixer backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    /// Start the track looping from the top
    PlayLoop,
    Stop,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("music file {path:?} could not be read: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("music file {0:?} is empty")]
    Empty(PathBuf),
}

/// A loaded music track
#[derive(Debug, Clone)]
pub struct MusicTrack {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

impl MusicTrack {
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let data = std::fs::read(path).map_err(|source| AudioError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        if data.is_empty() {
            return Err(AudioError::Empty(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    track: Option<MusicTrack>,
    music_volume: f32,
    muted: bool,
    playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::disabled()
    }
}

impl AudioManager {
    /// Load the music track if one is configured. A failed load logs a
    /// warning and leaves audio disabled.
    pub fn new(music_path: Option<&Path>, music_volume: f32) -> Self {
        let track = music_path.and_then(|path| match MusicTrack::load(path) {
            Ok(track) => {
                log::info!("Loaded music {:?} ({} bytes)", track.path, track.data.len());
                Some(track)
            }
            Err(e) => {
                log::warn!("{e} - audio disabled");
                None
            }
        });
        Self {
            track,
            music_volume: music_volume.clamp(0.0, 1.0),
            muted: false,
            playing: false,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, 0.0)
    }

    pub fn is_enabled(&self) -> bool {
        self.track.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    /// Feed the per-frame music cue. Returns a command only when the
    /// desired state changes and a track is available.
    pub fn set_music_playing(&mut self, should_play: bool) -> Option<MusicCommand> {
        if !self.is_enabled() || should_play == self.playing {
            return None;
        }
        self.playing = should_play;
        let command = if should_play {
            MusicCommand::PlayLoop
        } else {
            MusicCommand::Stop
        };
        log::debug!("Music {:?} (volume {:.2})", command, self.effective_volume());
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> AudioManager {
        AudioManager {
            track: Some(MusicTrack {
                path: PathBuf::from("bgm.mp3"),
                data: vec![0xFF, 0xFB],
            }),
            music_volume: 0.25,
            muted: false,
            playing: false,
        }
    }

    #[test]
    fn test_commands_only_on_change() {
        let mut audio = enabled();
        assert_eq!(audio.set_music_playing(false), None);
        assert_eq!(audio.set_music_playing(true), Some(MusicCommand::PlayLoop));
        assert_eq!(audio.set_music_playing(true), None);
        assert_eq!(audio.set_music_playing(false), Some(MusicCommand::Stop));
        assert!(!audio.is_playing());
    }

    #[test]
    fn test_missing_track_disables_audio() {
        let mut audio = AudioManager::new(Some(Path::new("/nonexistent/bgm.mp3")), 0.5);
        assert!(!audio.is_enabled());
        assert_eq!(audio.set_music_playing(true), None);
    }

    #[test]
    fn test_missing_track_reports_load_error() {
        let err = MusicTrack::load(Path::new("/nonexistent/bgm.mp3")).unwrap_err();
        assert!(matches!(err, AudioError::Load { .. }));
    }

    #[test]
    fn test_mute_zeroes_volume() {
        let mut audio = enabled();
        assert_eq!(audio.effective_volume(), 0.25);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_muted(false);
        assert_eq!(audio.effective_volume(), 0.25);
    }

    #[test]
    fn test_volume_is_clamped() {
        let audio = AudioManager::new(None, 3.0);
        assert_eq!(audio.effective_volume(), 1.0);
    }
}
