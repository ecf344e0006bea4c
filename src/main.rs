//! Circle overlay entry point
//!
//! Sets up logging, runs the window until it is closed, and turns a startup
//! failure into a non-zero exit status.

use circle_overlay::DemoConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Circle overlay starting...");

    if let Err(err) = circle_overlay::run(DemoConfig::default()) {
        log::error!("{err}");
        std::process::exit(-1);
    }
}
