// Test host that records every call instead of touching real devices

use super::{AudioOut, Display, LoadError, MediaBackend, TextAlign};
use crate::core::{Color, Rect};
use glam::IVec2;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What a recorded handle stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Font,
    Image,
    Sound,
    Music,
    Sprite,
}

/// Move-only numbered handle
#[derive(Debug, PartialEq, Eq)]
pub struct MockHandle {
    pub id: u64,
    pub kind: HandleKind,
    pub path: PathBuf,
}

/// A single host call
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Load { kind: HandleKind, id: u64, path: PathBuf },
    Free { kind: HandleKind, id: u64 },
    SetScreenSize(u32, u32),
    DrawImage { id: u64, x: i32, y: i32 },
    DrawImagePart { id: u64, src: Rect, x: i32, y: i32 },
    DrawText { text: String, area: Rect, align: TextAlign },
    DrawLabel { text: String, family: String, size: u32, x: i32, y: i32 },
    CreateSprite { id: u64 },
    DrawSprite { id: u64, position: IVec2 },
    Clear,
    Refresh,
    ProcessEvents,
    Delay(u64),
    PlaySound(u64),
    PlayMusic(u64),
}

pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    screen: (u32, u32),
    next_id: u64,
    live: HashSet<u64>,
    failing: HashSet<String>,
    failing_size: Option<(u32, u32)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            screen: (1024, 768),
            next_id: 1,
            live: HashSet::new(),
            failing: HashSet::new(),
            failing_size: None,
        }
    }

    /// Make every load of a file with this name fail
    pub fn fail_file(&mut self, file: &str) {
        self.failing.insert(file.to_string());
    }

    /// Make switching the screen to this size fail
    pub fn fail_screen_size(&mut self, width: u32, height: u32) {
        self.failing_size = Some((width, height));
    }

    /// Number of handles handed out and not yet freed
    pub fn live_handles(&self) -> usize {
        self.live.len()
    }

    pub fn loads(&self) -> Vec<(HandleKind, PathBuf)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Load { kind, path, .. } => Some((*kind, path.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn frees(&self) -> Vec<(HandleKind, u64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Free { kind, id } => Some((*kind, *id)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    fn issue(&mut self, kind: HandleKind, path: &Path) -> Result<MockHandle, LoadError> {
        let file = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.failing.contains(&file) {
            return Err(LoadError::Missing);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);
        self.events.push(HostEvent::Load {
            kind,
            id,
            path: path.to_path_buf(),
        });
        Ok(MockHandle {
            id,
            kind,
            path: path.to_path_buf(),
        })
    }

    fn release(&mut self, handle: MockHandle) {
        assert!(
            self.live.remove(&handle.id),
            "handle {} released twice",
            handle.id
        );
        self.events.push(HostEvent::Free {
            kind: handle.kind,
            id: handle.id,
        });
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for RecordingHost {
    type Font = MockHandle;
    type Image = MockHandle;
    type Sound = MockHandle;
    type Music = MockHandle;

    fn load_font(&mut self, path: &Path, _size: u32) -> Result<MockHandle, LoadError> {
        self.issue(HandleKind::Font, path)
    }

    fn load_image(
        &mut self,
        path: &Path,
        _color_key: Option<Color>,
    ) -> Result<MockHandle, LoadError> {
        self.issue(HandleKind::Image, path)
    }

    fn load_sound(&mut self, path: &Path) -> Result<MockHandle, LoadError> {
        self.issue(HandleKind::Sound, path)
    }

    fn load_music(&mut self, path: &Path) -> Result<MockHandle, LoadError> {
        self.issue(HandleKind::Music, path)
    }

    fn free_font(&mut self, font: MockHandle) {
        self.release(font);
    }

    fn free_image(&mut self, image: MockHandle) {
        self.release(image);
    }

    fn free_sound(&mut self, sound: MockHandle) {
        self.release(sound);
    }

    fn free_music(&mut self, music: MockHandle) {
        self.release(music);
    }
}

impl Display for RecordingHost {
    type Sprite = MockHandle;

    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn set_screen_size(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        if self.failing_size == Some((width, height)) {
            anyhow::bail!("cannot switch to {}x{}", width, height);
        }
        self.screen = (width, height);
        self.events.push(HostEvent::SetScreenSize(width, height));
        Ok(())
    }

    fn draw_image(&mut self, image: &MockHandle, x: i32, y: i32) {
        self.events.push(HostEvent::DrawImage { id: image.id, x, y });
    }

    fn draw_image_part(&mut self, image: &MockHandle, src: Rect, x: i32, y: i32) {
        self.events.push(HostEvent::DrawImagePart {
            id: image.id,
            src,
            x,
            y,
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        _font: &MockHandle,
        _color: Color,
        _background: Color,
        align: TextAlign,
        area: Rect,
    ) {
        self.events.push(HostEvent::DrawText {
            text: text.to_string(),
            area,
            align,
        });
    }

    fn draw_label(&mut self, text: &str, _color: Color, family: &str, size: u32, x: i32, y: i32) {
        self.events.push(HostEvent::DrawLabel {
            text: text.to_string(),
            family: family.to_string(),
            size,
            x,
            y,
        });
    }

    fn create_sprite(&mut self, image: &MockHandle) -> MockHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);
        self.events.push(HostEvent::CreateSprite { id });
        MockHandle {
            id,
            kind: HandleKind::Sprite,
            path: image.path.clone(),
        }
    }

    fn draw_sprite(&mut self, sprite: &MockHandle, position: IVec2) {
        self.events.push(HostEvent::DrawSprite {
            id: sprite.id,
            position,
        });
    }

    fn free_sprite(&mut self, sprite: MockHandle) {
        self.release(sprite);
    }

    fn clear(&mut self) {
        self.events.push(HostEvent::Clear);
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        self.events.push(HostEvent::Refresh);
        Ok(())
    }

    fn process_events(&mut self) {
        self.events.push(HostEvent::ProcessEvents);
    }

    fn delay(&mut self, millis: u64) {
        self.events.push(HostEvent::Delay(millis));
    }
}

impl AudioOut for RecordingHost {
    fn play_sound(&mut self, sound: &MockHandle) {
        self.events.push(HostEvent::PlaySound(sound.id));
    }

    fn play_music(&mut self, music: &MockHandle) {
        self.events.push(HostEvent::PlayMusic(music.id));
    }
}
