// Software framebuffer the window host draws into before presenting

use super::{LoadError, TextAlign};
use crate::core::{Color, Rect};
use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use glam::IVec2;
use image::{Rgba, RgbaImage};
use std::path::Path;
use std::rc::Rc;

/// Decoded RGBA bitmap
///
/// Clones share pixel storage, so a sprite made from a cached image does
/// not copy it.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: Rc<RgbaImage>,
}

impl Bitmap {
    pub fn from_image(pixels: RgbaImage) -> Self {
        Self {
            pixels: Rc::new(pixels),
        }
    }

    /// Decode an image file, keying out `color_key` if given
    pub fn load(path: &Path, color_key: Option<Color>) -> Result<Self, LoadError> {
        if !path.is_file() {
            return Err(LoadError::Missing);
        }

        let mut pixels = image::open(path)
            .map_err(|e| LoadError::Decode(e.to_string()))?
            .to_rgba8();

        if let Some(key) = color_key {
            for pixel in pixels.pixels_mut() {
                if key.same_rgb(pixel.0) {
                    pixel.0[3] = 0;
                }
            }
        }

        Ok(Self::from_image(pixels))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// A parsed font face paired with the point size it was loaded at
#[derive(Clone)]
pub struct LoadedFont {
    face: FontArc,
    size: u32,
}

impl LoadedFont {
    pub fn new(face: FontArc, size: u32) -> Self {
        Self { face, size }
    }

    pub fn load(path: &Path, size: u32) -> Result<Self, LoadError> {
        Ok(Self::new(load_face(path)?, size))
    }

    pub fn face(&self) -> &FontArc {
        &self.face
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Parse a TrueType/OpenType face from disk
pub fn load_face(path: &Path) -> Result<FontArc, LoadError> {
    if !path.is_file() {
        return Err(LoadError::Missing);
    }
    let data = std::fs::read(path)?;
    FontArc::try_from_vec(data).map_err(|e| LoadError::Decode(e.to_string()))
}

/// CPU-side RGBA frame
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(Color::BLACK.to_array())),
        }
    }

    /// Replace the frame with a blank one of the new size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::from_pixel(width, height, Rgba(Color::BLACK.to_array()));
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba(Color::BLACK.to_array());
        }
    }

    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        image::imageops::overlay(&mut self.pixels, bitmap.pixels(), i64::from(x), i64::from(y));
    }

    /// Draw the `src` region of a bitmap, clipped to the bitmap's bounds
    pub fn draw_bitmap_part(&mut self, bitmap: &Bitmap, src: Rect, x: i32, y: i32) {
        let left = src.x.max(0);
        let top = src.y.max(0);
        let right = (src.x + src.width).min(bitmap.width() as i32);
        let bottom = (src.y + src.height).min(bitmap.height() as i32);
        if right <= left || bottom <= top {
            return;
        }

        let part = image::imageops::crop_imm(
            bitmap.pixels(),
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
        .to_image();
        let dx = i64::from(x + (left - src.x));
        let dy = i64::from(y + (top - src.y));
        image::imageops::overlay(&mut self.pixels, &part, dx, dy);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.a == 0 {
            return;
        }
        for y in rect.y.max(0)..(rect.y + rect.height).min(self.height() as i32) {
            for x in rect.x.max(0)..(rect.x + rect.width).min(self.width() as i32) {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    /// Draw text inside `area`, one line per `\n`, clipped to the area
    pub fn draw_text(
        &mut self,
        text: &str,
        face: &FontArc,
        size: u32,
        color: Color,
        align: TextAlign,
        area: Rect,
    ) {
        let scale = PxScale::from(size as f32);
        let scaled = face.as_scaled(scale);
        let line_height = scaled.height() + scaled.line_gap();
        let mut baseline = area.y as f32 + scaled.ascent();

        for line in text.lines() {
            let width = line_width(face, scale, line);
            let left = match align {
                TextAlign::Left => area.x as f32,
                TextAlign::Center => area.x as f32 + (area.width as f32 - width) / 2.0,
                TextAlign::Right => (area.x + area.width) as f32 - width,
            };
            self.draw_line(face, scale, line, left, baseline, color, area);
            baseline += line_height;
        }
    }

    /// Draw a single line with its top-left corner at (x, y), unclipped
    pub fn draw_text_at(
        &mut self,
        text: &str,
        face: &FontArc,
        size: u32,
        color: Color,
        x: i32,
        y: i32,
    ) {
        let scale = PxScale::from(size as f32);
        let baseline = y as f32 + face.as_scaled(scale).ascent();
        let clip = self.bounds();
        self.draw_line(face, scale, text, x as f32, baseline, color, clip);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_line(
        &mut self,
        face: &FontArc,
        scale: PxScale,
        line: &str,
        left: f32,
        baseline: f32,
        color: Color,
        clip: Rect,
    ) {
        let scaled = face.as_scaled(scale);
        let mut caret = left;
        let mut previous: Option<GlyphId> = None;

        for ch in line.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = face.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    if clip.contains(IVec2::new(px, py)) {
                        self.blend(px, py, color, coverage);
                    }
                });
            }
        }
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0) * f32::from(color.a) / 255.0;
        let src = color.to_array();
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let mixed = f32::from(src[c]) * alpha + f32::from(dst.0[c]) * (1.0 - alpha);
            dst.0[c] = mixed.round() as u8;
        }
        dst.0[3] = dst.0[3].max((alpha * 255.0).round() as u8);
    }
}

fn line_width(face: &FontArc, scale: PxScale, line: &str) -> f32 {
    let scaled = face.as_scaled(scale);
    let mut width = 0.0;
    let mut previous: Option<GlyphId> = None;
    for ch in line.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}
