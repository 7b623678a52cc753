use std::env;

use movies_by_year::config::Config;

mod logging;

fn main() {
    logging::setup_logging();

    let config = Config::from_args(env::args());
    log::debug!("Using namespace {}", config.namespace);

    if let Err(e) = movies_by_year::run(config) {
        log::error!("Error while talking to the terminal: {}", e);
        std::process::exit(1);
    }
}
