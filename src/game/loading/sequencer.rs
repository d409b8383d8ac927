// Staged loading of the gameplay assets behind the splash screen

use super::splash::{SplashLayout, SplashPresenter, TOTAL_STAGES};
use crate::engine::assets::{AssetCache, AssetError, LoadPhase, Manifest};
use crate::engine::host::Host;
use anyhow::Result;
use log::{debug, info, warn};

/// Pause after each phase so the progress bar is readable
pub const PHASE_PAUSE_MS: u64 = 100;

pub const LOADED_MESSAGE: &str = "Game loaded...";

/// Outcome of a loading run
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of handles in the cache once loading finished
    pub loaded: usize,
    /// Entries that could not be loaded and were skipped
    pub failures: Vec<AssetError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives the splash screen and the four load phases, once
pub struct LoadingSequencer {
    layout: SplashLayout,
    stage: u32,
    has_run: bool,
}

impl LoadingSequencer {
    pub fn new(layout: SplashLayout) -> Self {
        Self {
            layout,
            stage: 0,
            has_run: false,
        }
    }

    /// Last stage shown on the progress bar
    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Fraction of the progress bar filled so far
    pub fn progress(&self) -> f32 {
        self.stage as f32 / TOTAL_STAGES as f32
    }

    /// Fill `cache` from `manifest` while showing the splash screen
    ///
    /// The display is switched to the splash resolution for the duration and
    /// restored afterwards, also when a phase fails.
    pub fn run<H: Host>(
        &mut self,
        host: &mut H,
        cache: &mut AssetCache<H>,
        manifest: &Manifest,
    ) -> Result<LoadReport> {
        if self.has_run {
            return Err(AssetError::SequenceAlreadyRun.into());
        }
        self.has_run = true;

        let (width, height) = host.screen_size();
        host.set_screen_size(self.layout.screen_width, self.layout.screen_height)?;

        let splash = match SplashPresenter::begin(host, cache.locator(), &self.layout) {
            Ok(splash) => splash,
            Err(e) => {
                if let Err(restore) = host.set_screen_size(width, height) {
                    warn!("Failed to restore screen size {}x{}: {}", width, height, restore);
                }
                return Err(e);
            }
        };

        let loaded = self.load_phases(host, &splash, cache, manifest);
        let ended = splash.end(host);
        let restored = host.set_screen_size(width, height);

        let failures = loaded?;
        ended?;
        restored?;

        let stats = cache.stats();
        info!(
            "Loaded {} fonts, {} images, {} sounds and {} music tracks ({} skipped)",
            stats.font_count,
            stats.image_count,
            stats.sound_count,
            stats.music_count,
            failures.len()
        );
        Ok(LoadReport {
            loaded: stats.total(),
            failures,
        })
    }

    fn load_phases<H: Host>(
        &mut self,
        host: &mut H,
        splash: &SplashPresenter<H>,
        cache: &mut AssetCache<H>,
        manifest: &Manifest,
    ) -> Result<Vec<AssetError>> {
        let mut failures = Vec::new();

        for (index, phase) in LoadPhase::ORDER.iter().enumerate() {
            self.stage = index as u32;
            splash.show_progress(host, phase.message(), self.stage)?;
            debug!("Stage {} of {}", self.stage(), TOTAL_STAGES);
            info!(
                "Loading {} {} entries",
                manifest.entry_count(*phase),
                phase.kind()
            );

            let skipped = cache.load_phase(host, manifest, *phase)?;
            if !skipped.is_empty() {
                warn!("{} {} assets could not be loaded", skipped.len(), phase.kind());
            }
            failures.extend(skipped);

            host.delay(PHASE_PAUSE_MS);
        }

        host.delay(PHASE_PAUSE_MS);
        self.stage = TOTAL_STAGES;
        splash.show_progress(host, LOADED_MESSAGE, self.stage)?;
        debug!("Progress at {:.0}%", self.progress() * 100.0);
        host.delay(PHASE_PAUSE_MS);

        Ok(failures)
    }
}
