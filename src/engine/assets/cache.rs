// Named asset cache

use super::{AssetError, AssetKind, LoadPhase, Manifest, ResourceLocator};
use crate::core::Color;
use crate::engine::host::{LoadError, MediaBackend};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::PathBuf;

/// Name → handle map for one asset kind
struct Registry<H> {
    kind: AssetKind,
    entries: HashMap<String, H>,
}

impl<H> Registry<H> {
    fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    fn ensure_vacant(&self, name: &str) -> Result<(), AssetError> {
        if self.entries.contains_key(name) {
            return Err(AssetError::DuplicateRegistration {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Caller must have checked `ensure_vacant`
    fn insert(&mut self, name: &str, handle: H) {
        self.entries.insert(name.to_string(), handle);
    }

    fn get(&self, name: &str) -> Result<&H, AssetError> {
        self.entries.get(name).ok_or_else(|| AssetError::NotFound {
            kind: self.kind,
            name: name.to_string(),
        })
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Remove every entry, handing back ownership of the handles
    fn drain(&mut self) -> impl Iterator<Item = H> + '_ {
        self.entries.drain().map(|(_, handle)| handle)
    }
}

fn load_failed(kind: AssetKind, name: &str, path: PathBuf, err: LoadError) -> AssetError {
    AssetError::LoadFailed {
        kind,
        name: name.to_string(),
        path,
        reason: err.to_string(),
    }
}

/// Cache of every gameplay font, image, sound and music track
///
/// The cache owns each handle from registration until `release_all`. Names
/// are case-sensitive and unique within a kind; the same name may be used
/// once per kind (the standard manifest has both a "Menu" font and image).
pub struct AssetCache<B: MediaBackend> {
    locator: ResourceLocator,
    fonts: Registry<B::Font>,
    images: Registry<B::Image>,
    sounds: Registry<B::Sound>,
    music: Registry<B::Music>,
}

impl<B: MediaBackend> AssetCache<B> {
    /// Create an empty cache resolving files through `locator`
    pub fn new(locator: ResourceLocator) -> Self {
        Self {
            locator,
            fonts: Registry::new(AssetKind::Font),
            images: Registry::new(AssetKind::Image),
            sounds: Registry::new(AssetKind::Sound),
            music: Registry::new(AssetKind::Music),
        }
    }

    /// Load a font at the given point size and register it as `name`
    pub fn register_font(
        &mut self,
        backend: &mut B,
        name: &str,
        file: &str,
        size: u32,
    ) -> Result<(), AssetError> {
        self.fonts.ensure_vacant(name)?;
        let path = self.locator.resolve(AssetKind::Font, file);
        let font = backend
            .load_font(&path, size)
            .map_err(|e| load_failed(AssetKind::Font, name, path, e))?;
        self.fonts.insert(name, font);
        debug!("Registered font `{}` from {} at {}pt", name, file, size);
        Ok(())
    }

    /// Load an image and register it as `name`
    pub fn register_image(
        &mut self,
        backend: &mut B,
        name: &str,
        file: &str,
    ) -> Result<(), AssetError> {
        self.insert_image(backend, name, file, None)
    }

    /// Load an image with `color_key` made transparent and register it as `name`
    pub fn register_transparent_image(
        &mut self,
        backend: &mut B,
        name: &str,
        file: &str,
        color_key: Color,
    ) -> Result<(), AssetError> {
        self.insert_image(backend, name, file, Some(color_key))
    }

    fn insert_image(
        &mut self,
        backend: &mut B,
        name: &str,
        file: &str,
        color_key: Option<Color>,
    ) -> Result<(), AssetError> {
        self.images.ensure_vacant(name)?;
        let path = self.locator.resolve(AssetKind::Image, file);
        let image = backend
            .load_image(&path, color_key)
            .map_err(|e| load_failed(AssetKind::Image, name, path, e))?;
        self.images.insert(name, image);
        debug!("Registered image `{}` from {}", name, file);
        Ok(())
    }

    /// Load a sound effect and register it as `name`
    pub fn register_sound(
        &mut self,
        backend: &mut B,
        name: &str,
        file: &str,
    ) -> Result<(), AssetError> {
        self.sounds.ensure_vacant(name)?;
        let path = self.locator.resolve(AssetKind::Sound, file);
        let sound = backend
            .load_sound(&path)
            .map_err(|e| load_failed(AssetKind::Sound, name, path, e))?;
        self.sounds.insert(name, sound);
        debug!("Registered sound `{}` from {}", name, file);
        Ok(())
    }

    /// Load a music track and register it as `name`
    pub fn register_music(
        &mut self,
        backend: &mut B,
        name: &str,
        file: &str,
    ) -> Result<(), AssetError> {
        self.music.ensure_vacant(name)?;
        let path = self.locator.resolve(AssetKind::Music, file);
        let music = backend
            .load_music(&path)
            .map_err(|e| load_failed(AssetKind::Music, name, path, e))?;
        self.music.insert(name, music);
        debug!("Registered music `{}` from {}", name, file);
        Ok(())
    }

    /// Register every manifest entry belonging to `phase`
    ///
    /// Entries whose file cannot be loaded are skipped and returned so the
    /// caller can report them. Any other error stops the phase.
    pub fn load_phase(
        &mut self,
        backend: &mut B,
        manifest: &Manifest,
        phase: LoadPhase,
    ) -> Result<Vec<AssetError>, AssetError> {
        let mut failures = Vec::new();
        let mut record = |result: Result<(), AssetError>| -> Result<(), AssetError> {
            match result {
                Err(err) if err.is_recoverable() => {
                    warn!("Skipping asset: {}", err);
                    failures.push(err);
                    Ok(())
                }
                other => other,
            }
        };

        match phase {
            LoadPhase::Fonts => {
                for entry in &manifest.fonts {
                    record(self.register_font(backend, &entry.name, &entry.file, entry.size))?;
                }
            }
            LoadPhase::Images => {
                for entry in &manifest.images {
                    let transparent = entry.transparent;
                    record(self.insert_image(backend, &entry.name, &entry.file, transparent))?;
                }
            }
            LoadPhase::Sounds => {
                for entry in &manifest.sounds {
                    record(self.register_sound(backend, &entry.name, &entry.file))?;
                }
            }
            LoadPhase::Music => {
                for entry in &manifest.music {
                    record(self.register_music(backend, &entry.name, &entry.file))?;
                }
            }
        }

        Ok(failures)
    }

    pub fn font(&self, name: &str) -> Result<&B::Font, AssetError> {
        self.fonts.get(name)
    }

    pub fn image(&self, name: &str) -> Result<&B::Image, AssetError> {
        self.images.get(name)
    }

    pub fn sound(&self, name: &str) -> Result<&B::Sound, AssetError> {
        self.sounds.get(name)
    }

    pub fn music(&self, name: &str) -> Result<&B::Music, AssetError> {
        self.music.get(name)
    }

    /// Check whether `name` is registered for the given kind
    pub fn contains(&self, kind: AssetKind, name: &str) -> bool {
        match kind {
            AssetKind::Font => self.fonts.contains(name),
            AssetKind::Image => self.images.contains(name),
            AssetKind::Sound => self.sounds.contains(name),
            AssetKind::Music => self.music.contains(name),
        }
    }

    /// Release every cached handle through the backend and empty the cache
    ///
    /// Returns the number of handles released. Calling it again without new
    /// registrations releases nothing.
    pub fn release_all(&mut self, backend: &mut B) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut released = 0;
        for font in self.fonts.drain() {
            backend.free_font(font);
            released += 1;
        }
        for image in self.images.drain() {
            backend.free_image(image);
            released += 1;
        }
        for music in self.music.drain() {
            backend.free_music(music);
            released += 1;
        }
        for sound in self.sounds.drain() {
            backend.free_sound(sound);
            released += 1;
        }

        info!("Released {} cached assets", released);
        released
    }

    /// Total number of cached handles
    pub fn len(&self) -> usize {
        self.fonts.len() + self.images.len() + self.sounds.len() + self.music.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get statistics about cached assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            font_count: self.fonts.len(),
            image_count: self.images.len(),
            sound_count: self.sounds.len(),
            music_count: self.music.len(),
        }
    }

    /// Get the resource locator
    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }
}

impl<B: MediaBackend> Drop for AssetCache<B> {
    fn drop(&mut self) {
        if !self.is_empty() {
            warn!(
                "Asset cache dropped with {} handles never released",
                self.len()
            );
        }
    }
}

/// Statistics about cached assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub font_count: usize,
    pub image_count: usize,
    pub sound_count: usize,
    pub music_count: usize,
}

impl AssetStats {
    pub fn total(&self) -> usize {
        self.font_count + self.image_count + self.sound_count + self.music_count
    }
}
