/*
 * Boid Hunt
 *
 * Two prey species flock through a bounded 3D arena while predators pick
 * targets and chase them down. Caught prey fall to the floor and are replaced
 * so each species keeps its configured count.
 *
 * Usage: boid-hunt [config.json]
 *
 * Every field of the config file is optional. RUST_LOG overrides the file's
 * log_filter.
 */

use boid_hunt::{app, SimulationConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("boid-hunt: {err}");
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(seed = config.seed, "starting boid-hunt");

    app::set_startup_config(config);
    nannou::app(app::model).update(app::update).run();
}
