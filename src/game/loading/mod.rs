// Loading screen and staged asset loading
//
// The sequencer owns the order of the load phases; the splash presenter
// owns the short-lived resources that are only shown while loading.

mod sequencer;
mod splash;

pub use sequencer::{LoadReport, LoadingSequencer};
pub use splash::SplashLayout;
