// Main menu shown once loading has finished

use super::ui::Button;
use crate::engine::assets::AssetCache;
use crate::engine::host::Display;
use glam::IVec2;
use log::{debug, warn};

/// What a menu click asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Randomize,
    Instructions,
    Quit,
}

struct ButtonSpec {
    action: MenuAction,
    image: &'static str,
    label: &'static str,
    position: (i32, i32),
    size: (i32, i32),
}

const LABEL_SIZE: u32 = 14;
const LABEL_INSET: (i32, i32) = (12, 8);

const BUTTONS: [ButtonSpec; 4] = [
    ButtonSpec {
        action: MenuAction::Play,
        image: "PlayButton",
        label: "PLAY",
        position: (30, 72),
        size: (94, 32),
    },
    ButtonSpec {
        action: MenuAction::Randomize,
        image: "RandomButton",
        label: "RANDOMIZE",
        position: (134, 72),
        size: (94, 32),
    },
    ButtonSpec {
        action: MenuAction::Instructions,
        image: "SelectedShip",
        label: "HOW TO PLAY",
        position: (238, 72),
        size: (94, 32),
    },
    ButtonSpec {
        action: MenuAction::Quit,
        image: "SelectedShip",
        label: "QUIT",
        position: (342, 72),
        size: (94, 32),
    },
];

/// Name of the background image in the asset cache
pub const BACKGROUND: &str = "Menu";

pub struct MainMenu<H: Display> {
    buttons: Vec<(MenuAction, Button<H>)>,
}

impl<H: Display> MainMenu<H> {
    /// Build the menu buttons from the cached images
    ///
    /// A button whose image is not in the cache is left out of the menu.
    pub fn new(host: &mut H, cache: &AssetCache<H>) -> Self {
        let mut buttons = Vec::with_capacity(BUTTONS.len());
        for spec in &BUTTONS {
            let mut button = match Button::new(host, cache, spec.image) {
                Ok(button) => button,
                Err(e) => {
                    warn!("Menu entry {:?} unavailable: {}", spec.action, e);
                    continue;
                }
            };
            let (x, y) = spec.position;
            button.set_position(x, y);
            button.set_size(spec.size.0, spec.size.1);
            button.set_label(spec.label, LABEL_SIZE);
            button.set_label_offset(x + LABEL_INSET.0, y + LABEL_INSET.1);
            buttons.push((spec.action, button));
        }
        debug!("Main menu built with {} buttons", buttons.len());
        Self { buttons }
    }

    /// Number of buttons on the menu
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Handle a left click, selecting the button under `point`
    pub fn click(&mut self, point: IVec2) -> Option<MenuAction> {
        let hit = self
            .buttons
            .iter()
            .position(|(_, button)| button.hit_test(point))?;
        for (index, (_, button)) in self.buttons.iter_mut().enumerate() {
            button.set_selected(index == hit);
        }
        Some(self.buttons[hit].0)
    }

    /// Currently selected entry, if any
    #[cfg(test)]
    pub fn selected(&self) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|(_, button)| button.is_selected())
            .map(|(action, _)| *action)
    }

    pub fn draw(&self, host: &mut H, cache: &AssetCache<H>) {
        if let Ok(background) = cache.image(BACKGROUND) {
            host.draw_image(background, 0, 0);
        }
        for (_, button) in &self.buttons {
            button.draw(host);
        }
    }

    /// Free every button sprite
    pub fn release(self, host: &mut H) {
        for (_, button) in self.buttons {
            button.release(host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{LoadPhase, Manifest, ResourceLocator};
    use crate::engine::host::recording::{HostEvent, RecordingHost};

    fn loaded() -> (RecordingHost, AssetCache<RecordingHost>) {
        let mut host = RecordingHost::new();
        let mut cache = AssetCache::new(ResourceLocator::new("res"));
        cache
            .load_phase(&mut host, &Manifest::standard(), LoadPhase::Images)
            .unwrap();
        (host, cache)
    }

    #[test]
    fn test_menu_builds_all_buttons() {
        let (mut host, mut cache) = loaded();
        let menu = MainMenu::new(&mut host, &cache);

        assert_eq!(menu.len(), 4);
        assert_eq!(menu.selected(), None);

        menu.release(&mut host);
        cache.release_all(&mut host);
        assert_eq!(host.live_handles(), 0);
    }

    #[test]
    fn test_click_selects_hit_button() {
        let (mut host, mut cache) = loaded();
        let mut menu = MainMenu::new(&mut host, &cache);

        assert_eq!(menu.click(IVec2::new(40, 80)), Some(MenuAction::Play));
        assert_eq!(menu.selected(), Some(MenuAction::Play));

        assert_eq!(menu.click(IVec2::new(350, 100)), Some(MenuAction::Quit));
        assert_eq!(menu.selected(), Some(MenuAction::Quit));

        // A miss keeps the previous selection
        assert_eq!(menu.click(IVec2::new(5, 5)), None);
        assert_eq!(menu.selected(), Some(MenuAction::Quit));

        menu.release(&mut host);
        cache.release_all(&mut host);
    }

    #[test]
    fn test_missing_image_drops_button() {
        let mut host = RecordingHost::new();
        let mut cache = AssetCache::new(ResourceLocator::new("res"));
        cache
            .register_image(&mut host, "PlayButton", "deploy_play_button.png")
            .unwrap();

        let mut menu = MainMenu::new(&mut host, &cache);

        assert_eq!(menu.len(), 1);
        assert_eq!(menu.click(IVec2::new(140, 80)), None);

        menu.release(&mut host);
        cache.release_all(&mut host);
    }

    #[test]
    fn test_draw_background_then_buttons() {
        let (mut host, mut cache) = loaded();
        let menu = MainMenu::new(&mut host, &cache);
        let before = host.events.len();

        menu.draw(&mut host, &cache);

        let drawn = &host.events[before..];
        assert!(matches!(drawn[0], HostEvent::DrawImage { x: 0, y: 0, .. }));
        assert_eq!(
            drawn
                .iter()
                .filter(|e| matches!(e, HostEvent::DrawSprite { .. }))
                .count(),
            4
        );

        menu.release(&mut host);
        cache.release_all(&mut host);
    }
}
