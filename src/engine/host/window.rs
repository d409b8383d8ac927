// Desktop host: winit window, software canvas, wgpu presentation, kira audio

use super::canvas::load_face;
use super::{
    AudioOut, AudioPlayer, Bitmap, Canvas, Display, LoadError, LoadedFont, MediaBackend,
    MusicTrack, SoundClip, TextAlign,
};
use crate::config::GameConfig;
use crate::core::{Color, Rect};
use crate::engine::assets::{AssetKind, ResourceLocator};
use crate::engine::renderer::Renderer;
use ab_glyph::FontArc;
use anyhow::{Context, Result};
use glam::IVec2;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::EventLoop,
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowBuilder},
};

/// Host backed by a real window and audio device
///
/// Drawing goes to a CPU canvas sized to the logical screen; `refresh`
/// uploads it and presents it stretched over the window.
pub struct WindowHost {
    event_loop: EventLoop<()>,
    window: Arc<Window>,
    renderer: Renderer,
    canvas: Canvas,
    audio: AudioPlayer,
    locator: ResourceLocator,
    /// Label faces by family name; `None` once a family failed to load
    label_faces: HashMap<String, Option<FontArc>>,
    skip_delays: bool,
    cursor: IVec2,
    clicks: Vec<IVec2>,
    close_requested: bool,
}

impl WindowHost {
    pub fn new(config: &GameConfig, locator: ResourceLocator) -> Result<Self> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(config.window_title.as_str())
                .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
                .with_resizable(false)
                .build(&event_loop)
                .context("Failed to create window")?,
        );
        info!("Window created successfully");

        let renderer = pollster::block_on(Renderer::new(window.clone()))?;
        let audio = AudioPlayer::new();
        if audio.is_available() {
            info!("Audio output ready");
        }

        Ok(Self {
            event_loop,
            window,
            renderer,
            canvas: Canvas::new(config.window_width, config.window_height),
            audio,
            locator,
            label_faces: HashMap::new(),
            skip_delays: config.skip_delays,
            cursor: IVec2::ZERO,
            clicks: Vec::new(),
            close_requested: false,
        })
    }

    /// Whether the user asked to close the window
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Left clicks, in screen coordinates, since the last call
    pub fn take_clicks(&mut self) -> Vec<IVec2> {
        std::mem::take(&mut self.clicks)
    }

    /// Map a window pixel to canvas coordinates
    fn to_canvas(&self, x: f64, y: f64) -> IVec2 {
        let size = self.window.inner_size();
        let sx = f64::from(self.canvas.width()) / f64::from(size.width.max(1));
        let sy = f64::from(self.canvas.height()) / f64::from(size.height.max(1));
        IVec2::new((x * sx).floor() as i32, (y * sy).floor() as i32)
    }

    fn label_face(&mut self, family: &str) -> Option<FontArc> {
        if let Some(face) = self.label_faces.get(family) {
            return face.clone();
        }
        let file = format!("{}.ttf", family.to_lowercase());
        let path = self.locator.resolve(AssetKind::Font, &file);
        let face = match load_face(&path) {
            Ok(face) => Some(face),
            Err(e) => {
                warn!("No font for family {} at {}: {}", family, path.display(), e);
                None
            }
        };
        self.label_faces.insert(family.to_string(), face.clone());
        face
    }
}

impl MediaBackend for WindowHost {
    type Font = LoadedFont;
    type Image = Bitmap;
    type Sound = SoundClip;
    type Music = MusicTrack;

    fn load_font(&mut self, path: &Path, size: u32) -> Result<LoadedFont, LoadError> {
        LoadedFont::load(path, size)
    }

    fn load_image(&mut self, path: &Path, color_key: Option<Color>) -> Result<Bitmap, LoadError> {
        Bitmap::load(path, color_key)
    }

    fn load_sound(&mut self, path: &Path) -> Result<SoundClip, LoadError> {
        SoundClip::load(path)
    }

    fn load_music(&mut self, path: &Path) -> Result<MusicTrack, LoadError> {
        MusicTrack::load(path)
    }

    fn free_font(&mut self, font: LoadedFont) {
        drop(font);
    }

    fn free_image(&mut self, image: Bitmap) {
        drop(image);
    }

    fn free_sound(&mut self, sound: SoundClip) {
        drop(sound);
    }

    fn free_music(&mut self, music: MusicTrack) {
        drop(music);
    }
}

impl Display for WindowHost {
    type Sprite = Bitmap;

    fn screen_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_screen_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.canvas.resize(width, height);
        if let Some(size) = self.window.request_inner_size(PhysicalSize::new(width, height)) {
            self.renderer.resize(size.width, size.height);
        }
        info!("Screen size set to {}x{}", width, height);
        Ok(())
    }

    fn draw_image(&mut self, image: &Bitmap, x: i32, y: i32) {
        self.canvas.draw_bitmap(image, x, y);
    }

    fn draw_image_part(&mut self, image: &Bitmap, src: Rect, x: i32, y: i32) {
        self.canvas.draw_bitmap_part(image, src, x, y);
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: &LoadedFont,
        color: Color,
        background: Color,
        align: TextAlign,
        area: Rect,
    ) {
        self.canvas.fill_rect(area, background);
        self.canvas
            .draw_text(text, font.face(), font.size(), color, align, area);
    }

    fn draw_label(&mut self, text: &str, color: Color, family: &str, size: u32, x: i32, y: i32) {
        if let Some(face) = self.label_face(family) {
            self.canvas.draw_text_at(text, &face, size, color, x, y);
        }
    }

    fn create_sprite(&mut self, image: &Bitmap) -> Bitmap {
        image.clone()
    }

    fn draw_sprite(&mut self, sprite: &Bitmap, position: IVec2) {
        self.canvas.draw_bitmap(sprite, position.x, position.y);
    }

    fn free_sprite(&mut self, sprite: Bitmap) {
        drop(sprite);
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn refresh(&mut self) -> Result<()> {
        self.renderer.present(self.canvas.pixels())
    }

    fn process_events(&mut self) {
        let mut resized = None;
        let mut moved = None;
        // Cursor position at each press; `None` means it has not moved yet
        let mut pressed = Vec::new();
        let mut close = false;

        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _| {
                if let Event::WindowEvent { event, .. } = event {
                    match event {
                        WindowEvent::CloseRequested => close = true,
                        WindowEvent::Resized(size) => resized = Some(size),
                        WindowEvent::CursorMoved { position, .. } => {
                            moved = Some((position.x, position.y));
                        }
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Left,
                            ..
                        } => pressed.push(moved),
                        _ => {}
                    }
                }
            });

        if let Some(size) = resized {
            self.renderer.resize(size.width, size.height);
        }
        for at in pressed {
            let point = match at {
                Some((x, y)) => self.to_canvas(x, y),
                None => self.cursor,
            };
            self.clicks.push(point);
        }
        if let Some((x, y)) = moved {
            self.cursor = self.to_canvas(x, y);
        }
        if close || matches!(status, PumpStatus::Exit(_)) {
            if !self.close_requested {
                info!("Close requested, shutting down...");
            }
            self.close_requested = true;
        }
    }

    fn delay(&mut self, millis: u64) {
        if !self.skip_delays {
            std::thread::sleep(Duration::from_millis(millis));
        }
    }
}

impl AudioOut for WindowHost {
    fn play_sound(&mut self, sound: &SoundClip) {
        self.audio.play_sound(sound);
    }

    fn play_music(&mut self, music: &MusicTrack) {
        self.audio.play_music(music);
    }
}
