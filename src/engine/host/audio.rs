// Audio playback backed by kira

use super::LoadError;
use kira::sound::static_sound::StaticSoundData;
use kira::{AudioManager, AudioManagerSettings, DefaultBackend};
use log::warn;
use std::path::Path;

/// Decoded sound effect
pub struct SoundClip {
    data: StaticSoundData,
}

/// Decoded music track, looping over its whole length
pub struct MusicTrack {
    data: StaticSoundData,
}

impl SoundClip {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            data: decode(path)?,
        })
    }
}

impl MusicTrack {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        Ok(Self::from_data(decode(path)?))
    }

    fn from_data(data: StaticSoundData) -> Self {
        Self {
            data: data.loop_region(..),
        }
    }
}

fn decode(path: &Path) -> Result<StaticSoundData, LoadError> {
    if !path.is_file() {
        return Err(LoadError::Missing);
    }
    StaticSoundData::from_file(path).map_err(|e| LoadError::Decode(e.to_string()))
}

/// Output device wrapper
///
/// Without a usable device every play call is a no-op; decoding still
/// happens so that missing or corrupt files are reported the same way.
pub struct AudioPlayer {
    manager: Option<AudioManager<DefaultBackend>>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(manager) => Some(manager),
            Err(e) => {
                warn!("Audio device unavailable, continuing without sound: {}", e);
                None
            }
        };
        Self { manager }
    }

    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    pub fn play_sound(&mut self, clip: &SoundClip) {
        self.play(&clip.data);
    }

    pub fn play_music(&mut self, track: &MusicTrack) {
        self.play(&track.data);
    }

    fn play(&mut self, data: &StaticSoundData) {
        if let Some(manager) = self.manager.as_mut() {
            if let Err(e) = manager.play(data.clone()) {
                warn!("Failed to play sound: {:?}", e);
            }
        }
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}
