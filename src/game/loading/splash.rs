// Loading screen shown while the asset cache fills

use crate::core::{filled_width, Color, Rect};
use crate::engine::assets::{AssetError, AssetKind, ResourceLocator};
use crate::engine::host::{Host, TextAlign};
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of progress stages: four load phases plus the final message
pub const TOTAL_STAGES: u32 = 5;

/// Files, positions and timings of the loading screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashLayout {
    pub screen_width: u32,
    pub screen_height: u32,

    pub background: String,
    pub animation: String,
    pub loader_empty: String,
    pub loader_full: String,
    pub font: String,
    pub font_size: u32,
    pub start_sound: String,

    /// Where each animation cell is drawn
    pub animation_x: i32,
    pub animation_y: i32,
    pub cell_width: i32,
    pub cell_height: i32,
    /// Cells are laid out top-to-bottom, then left-to-right
    pub cells_per_column: i32,
    pub cell_count: i32,

    pub bar_x: i32,
    pub bar_y: i32,
    pub bar_width: u32,
    pub bar_height: u32,
    pub text_area: Rect,
    pub text_align: TextAlign,

    pub cue_delay_ms: u64,
    pub frame_delay_ms: u64,
    pub hold_delay_ms: u64,
    pub end_delay_ms: u64,
}

impl Default for SplashLayout {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            background: "SplashBack.png".to_string(),
            animation: "SwinGameAni.jpg".to_string(),
            loader_empty: "loader_empty.png".to_string(),
            loader_full: "loader_full.png".to_string(),
            font: "arial.ttf".to_string(),
            font_size: 12,
            start_sound: "SwinGameStart.ogg".to_string(),
            animation_x: 143,
            animation_y: 134,
            cell_width: 546,
            cell_height: 327,
            cells_per_column: 6,
            cell_count: 11,
            bar_x: 279,
            bar_y: 453,
            bar_width: 260,
            bar_height: 66,
            text_area: Rect::new(310, 493, 200, 25),
            text_align: TextAlign::Center,
            cue_delay_ms: 200,
            frame_delay_ms: 20,
            hold_delay_ms: 1500,
            end_delay_ms: 500,
        }
    }
}

impl SplashLayout {
    /// Source rectangle of animation cell `index` in the sheet
    pub fn cell_rect(&self, index: i32) -> Rect {
        let per_column = self.cells_per_column.max(1);
        Rect::new(
            (index / per_column) * self.cell_width,
            (index % per_column) * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }

    /// Part of the full bar shown after `stage` stages
    pub fn filled_bar(&self, stage: u32) -> Rect {
        let width = filled_width(self.bar_width, stage, TOTAL_STAGES);
        Rect::new(0, 0, width as i32, self.bar_height as i32)
    }
}

struct SplashResources<H: Host> {
    background: H::Image,
    animation: H::Image,
    loader_empty: H::Image,
    loader_full: H::Image,
    font: H::Font,
    start_sound: H::Sound,
}

impl<H: Host> SplashResources<H> {
    fn release(self, host: &mut H) {
        host.free_font(self.font);
        host.free_image(self.background);
        host.free_image(self.animation);
        host.free_image(self.loader_empty);
        host.free_image(self.loader_full);
        host.free_sound(self.start_sound);
    }
}

/// Free the splash resources loaded before a failure and pass the error on
fn abandon<H: Host>(
    host: &mut H,
    images: impl IntoIterator<Item = H::Image>,
    font: Option<H::Font>,
    sound: Option<H::Sound>,
    error: anyhow::Error,
) -> anyhow::Error {
    if let Some(font) = font {
        host.free_font(font);
    }
    for image in images {
        host.free_image(image);
    }
    if let Some(sound) = sound {
        host.free_sound(sound);
    }
    error
}

fn splash_failure(kind: AssetKind, file: &str, path: PathBuf, reason: String) -> AssetError {
    AssetError::LoadFailed {
        kind,
        name: file.to_string(),
        path,
        reason,
    }
}

fn load_image<H: Host>(host: &mut H, locator: &ResourceLocator, file: &str) -> Result<H::Image> {
    let path = locator.resolve(AssetKind::Image, file);
    host.load_image(&path, None)
        .map_err(|e| splash_failure(AssetKind::Image, file, path, e.to_string()).into())
}

fn load_font<H: Host>(
    host: &mut H,
    locator: &ResourceLocator,
    layout: &SplashLayout,
) -> Result<H::Font> {
    let path = locator.resolve(AssetKind::Font, &layout.font);
    host.load_font(&path, layout.font_size)
        .map_err(|e| splash_failure(AssetKind::Font, &layout.font, path, e.to_string()).into())
}

fn load_sound<H: Host>(host: &mut H, locator: &ResourceLocator, file: &str) -> Result<H::Sound> {
    let path = locator.resolve(AssetKind::Sound, file);
    host.load_sound(&path)
        .map_err(|e| splash_failure(AssetKind::Sound, file, path, e.to_string()).into())
}

/// Owns the loading-screen resources between `begin` and `end`
///
/// `end` consumes the presenter, so nothing can draw with a released
/// resource.
pub struct SplashPresenter<H: Host> {
    layout: SplashLayout,
    resources: SplashResources<H>,
}

impl<H: Host> SplashPresenter<H> {
    /// Load the splash resources and play the intro
    ///
    /// A missing or unreadable splash file is fatal; whatever was already
    /// loaded is released before the error is returned.
    pub fn begin(host: &mut H, locator: &ResourceLocator, layout: &SplashLayout) -> Result<Self> {
        let resources = Self::acquire(host, locator, layout)?;
        let presenter = Self {
            layout: layout.clone(),
            resources,
        };
        if let Err(e) = presenter.play_intro(host) {
            presenter.resources.release(host);
            return Err(e);
        }
        Ok(presenter)
    }

    /// Load the splash files, showing the background as soon as it is in
    fn acquire(
        host: &mut H,
        locator: &ResourceLocator,
        layout: &SplashLayout,
    ) -> Result<SplashResources<H>> {
        let background = load_image(host, locator, &layout.background)?;
        host.draw_image(&background, 0, 0);
        if let Err(e) = host.refresh() {
            return Err(abandon(host, [background], None, None, e));
        }
        host.process_events();

        let animation = match load_image(host, locator, &layout.animation) {
            Ok(image) => image,
            Err(e) => return Err(abandon(host, [background], None, None, e)),
        };
        let font = match load_font(host, locator, layout) {
            Ok(font) => font,
            Err(e) => return Err(abandon(host, [background, animation], None, None, e)),
        };
        let start_sound = match load_sound(host, locator, &layout.start_sound) {
            Ok(sound) => sound,
            Err(e) => return Err(abandon(host, [background, animation], Some(font), None, e)),
        };
        let loader_full = match load_image(host, locator, &layout.loader_full) {
            Ok(image) => image,
            Err(e) => {
                let images = [background, animation];
                return Err(abandon(host, images, Some(font), Some(start_sound), e));
            }
        };
        let loader_empty = match load_image(host, locator, &layout.loader_empty) {
            Ok(image) => image,
            Err(e) => {
                let images = [background, animation, loader_full];
                return Err(abandon(host, images, Some(font), Some(start_sound), e));
            }
        };

        Ok(SplashResources {
            background,
            animation,
            loader_empty,
            loader_full,
            font,
            start_sound,
        })
    }

    fn play_intro(&self, host: &mut H) -> Result<()> {
        let layout = &self.layout;
        let res = &self.resources;

        host.play_sound(&res.start_sound);
        host.delay(layout.cue_delay_ms);

        for cell in 0..layout.cell_count {
            host.draw_image(&res.background, 0, 0);
            host.draw_image_part(
                &res.animation,
                layout.cell_rect(cell),
                layout.animation_x,
                layout.animation_y,
            );
            host.delay(layout.frame_delay_ms);
            host.refresh()?;
            host.process_events();
        }

        host.delay(layout.hold_delay_ms);
        debug!("Intro finished after {} cells", layout.cell_count);
        Ok(())
    }

    /// Redraw the progress bar for `stage` of `TOTAL_STAGES` with `message` under it
    pub fn show_progress(&self, host: &mut H, message: &str, stage: u32) -> Result<()> {
        let layout = &self.layout;
        let res = &self.resources;

        host.draw_image(&res.loader_empty, layout.bar_x, layout.bar_y);
        host.draw_image_part(
            &res.loader_full,
            layout.filled_bar(stage),
            layout.bar_x,
            layout.bar_y,
        );
        host.draw_text(
            message,
            &res.font,
            Color::WHITE,
            Color::TRANSPARENT,
            layout.text_align,
            layout.text_area,
        );

        host.refresh()?;
        host.process_events();
        Ok(())
    }

    /// Clear the screen and release every splash resource
    pub fn end(self, host: &mut H) -> Result<()> {
        host.process_events();
        host.delay(self.layout.end_delay_ms);
        host.clear();
        let refreshed = host.refresh();
        self.resources.release(host);
        debug!("Splash resources released");
        refreshed
    }
}
