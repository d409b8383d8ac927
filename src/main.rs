use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Duration;

mod config;
mod core;
mod engine;
mod game;

use config::GameConfig;
use engine::assets::{AssetCache, Manifest, ResourceLocator};
use engine::host::{AudioOut, Display, Host, WindowHost};
use game::loading::{LoadReport, LoadingSequencer, SplashLayout};
use game::menu::{MainMenu, MenuAction};

const FRAME_TIME: Duration = Duration::from_millis(16);
const MENU_MUSIC: &str = "Background1";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Broadside...");

    let config = GameConfig::load()?;
    let manifest = match &config.manifest {
        Some(path) => Manifest::from_file(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        None => Manifest::standard(),
    };
    if manifest.is_empty() {
        warn!("Manifest lists no assets");
    } else {
        info!("Manifest lists {} assets", manifest.len());
    }

    let locator = ResourceLocator::new(&config.resource_dir);
    info!("Resources from {}", locator.base_path().display());
    let mut host = WindowHost::new(&config, locator.clone())?;
    let mut cache = AssetCache::new(locator);

    let report = load_assets(&mut host, &mut cache, config.splash.clone(), &manifest)?;
    if report.is_complete() {
        info!("All {} assets loaded", report.loaded);
    } else {
        warn!(
            "{} assets loaded, {} skipped",
            report.loaded,
            report.failures.len()
        );
        for failure in &report.failures {
            warn!("{}", failure);
        }
    }

    let result = run_menu(&mut host, &cache);

    let released = cache.release_all(&mut host);
    info!("Shut down after releasing {} assets", released);
    host.process_events();
    result
}

/// Run the loading screen, draining the cache if the sequence aborts
fn load_assets<H: Host>(
    host: &mut H,
    cache: &mut AssetCache<H>,
    layout: SplashLayout,
    manifest: &Manifest,
) -> Result<LoadReport> {
    let mut sequencer = LoadingSequencer::new(layout);
    sequencer.run(host, cache, manifest).map_err(|e| {
        let released = cache.release_all(host);
        warn!("Loading aborted, released {} assets", released);
        e
    })
}

fn run_menu(host: &mut WindowHost, cache: &AssetCache<WindowHost>) -> Result<()> {
    let mut menu = MainMenu::new(host, cache);
    if menu.is_empty() {
        warn!("Main menu has no buttons");
    } else {
        info!("Main menu ready with {} buttons", menu.len());
    }
    if let Ok(music) = cache.music(MENU_MUSIC) {
        host.play_music(music);
    }

    let mut result = Ok(());
    while !host.close_requested() {
        host.process_events();
        for click in host.take_clicks() {
            match menu.click(click) {
                Some(MenuAction::Quit) => {
                    info!("Quit selected");
                    host.request_close();
                }
                Some(action) => info!("Menu action {:?}", action),
                None => {}
            }
        }

        host.clear();
        menu.draw(host, cache);
        if let Err(e) = host.refresh() {
            result = Err(e);
            break;
        }
        std::thread::sleep(FRAME_TIME);
    }

    menu.release(host);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::host::recording::RecordingHost;

    #[test]
    fn test_aborted_load_releases_cache() {
        let mut host = RecordingHost::new();
        let mut cache = AssetCache::new(ResourceLocator::new("res"));
        let mut manifest = Manifest::standard();
        let font = manifest.fonts[0].clone();
        manifest.fonts.push(font);

        let result = load_assets(&mut host, &mut cache, SplashLayout::default(), &manifest);

        assert!(result.is_err());
        assert!(cache.is_empty());
        assert_eq!(host.live_handles(), 0);
    }

    #[test]
    fn test_completed_load_keeps_cache() {
        let mut host = RecordingHost::new();
        let mut cache = AssetCache::new(ResourceLocator::new("res"));
        let manifest = Manifest::standard();

        let report =
            load_assets(&mut host, &mut cache, SplashLayout::default(), &manifest).unwrap();

        assert!(report.is_complete());
        assert_eq!(cache.len(), manifest.len());
        assert_eq!(host.live_handles(), cache.len());
        cache.release_all(&mut host);
    }
}
