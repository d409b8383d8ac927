// Host media, display and audio boundary
//
// Everything the cache, the loading screen and the widgets need from the
// platform goes through these traits. Handles are move-only: each `free_*`
// takes its handle by value, so a handle cannot be released twice.

mod audio;
mod canvas;
#[cfg(test)]
pub mod recording;
mod window;

pub use audio::{AudioPlayer, MusicTrack, SoundClip};
pub use canvas::{Bitmap, Canvas, LoadedFont};
pub use window::WindowHost;

use crate::core::{Color, Rect};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Failure reported by a host loader
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found")]
    Missing,

    #[error("{0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Horizontal text alignment within a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Loading and releasing media handles
pub trait MediaBackend {
    type Font;
    type Image;
    type Sound;
    type Music;

    fn load_font(&mut self, path: &Path, size: u32) -> Result<Self::Font, LoadError>;

    /// Load a bitmap, turning every pixel of `color_key` transparent if given
    fn load_image(
        &mut self,
        path: &Path,
        color_key: Option<Color>,
    ) -> Result<Self::Image, LoadError>;

    fn load_sound(&mut self, path: &Path) -> Result<Self::Sound, LoadError>;
    fn load_music(&mut self, path: &Path) -> Result<Self::Music, LoadError>;

    fn free_font(&mut self, font: Self::Font);
    fn free_image(&mut self, image: Self::Image);
    fn free_sound(&mut self, sound: Self::Sound);
    fn free_music(&mut self, music: Self::Music);
}

/// Screen drawing, frame presentation and event polling
pub trait Display: MediaBackend {
    /// A drawable instance wrapping an image
    type Sprite;

    fn screen_size(&self) -> (u32, u32);
    fn set_screen_size(&mut self, width: u32, height: u32) -> anyhow::Result<()>;

    fn draw_image(&mut self, image: &Self::Image, x: i32, y: i32);

    /// Draw the `src` part of an image with its top-left corner at (x, y)
    fn draw_image_part(&mut self, image: &Self::Image, src: Rect, x: i32, y: i32);

    fn draw_text(
        &mut self,
        text: &str,
        font: &Self::Font,
        color: Color,
        background: Color,
        align: TextAlign,
        area: Rect,
    );

    /// Draw text with a font picked by family name instead of a loaded handle
    fn draw_label(&mut self, text: &str, color: Color, family: &str, size: u32, x: i32, y: i32);

    fn create_sprite(&mut self, image: &Self::Image) -> Self::Sprite;
    fn draw_sprite(&mut self, sprite: &Self::Sprite, position: IVec2);
    fn free_sprite(&mut self, sprite: Self::Sprite);

    fn clear(&mut self);
    fn refresh(&mut self) -> anyhow::Result<()>;
    fn process_events(&mut self);
    fn delay(&mut self, millis: u64);
}

/// Audio playback
pub trait AudioOut: MediaBackend {
    fn play_sound(&mut self, sound: &Self::Sound);
    fn play_music(&mut self, music: &Self::Music);
}

/// Everything the loading sequence needs from a host
pub trait Host: Display + AudioOut {}

impl<T: Display + AudioOut> Host for T {}
