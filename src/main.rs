mod components;
mod config;
mod error;
mod map;
mod model;
mod selection;
mod state;
mod util;

use components::App;
use config::Config;

fn main() {
    // the app reads the same build-time config again; here we only need the level
    let level = Config::from_build_env().level_filter();
    util::init_logging(*level.as_ref().unwrap_or(&log::LevelFilter::Info));
    if let Err(e) = level {
        log::warn!("{}, using info", e);
    }
    yew::Renderer::<App>::new().render();
}
