use std::io;

use rand::Rng;

pub mod config;
use config::Config;

pub mod menu;
use menu::Menu;

pub mod model;

pub mod readers;
use readers::movie_parser::MovieParser;

pub mod selectors;

pub mod persisters;
use persisters::year_writer::{WriteSummary, YearWriter};

/// Runs the interactive menu on the process's stdin and stdout.
pub fn run(config: Config) -> io::Result<()> {
    let stdin = io::stdin();
    let mut menu = Menu::new(config, stdin.lock(), io::stdout(), rand::thread_rng());
    menu.run()
}

/// Parses `file_name` from the input directory and writes its titles into a
/// new per-year output directory.
pub fn process_file<R: Rng>(
    config: &Config,
    file_name: &str,
    rng: &mut R,
) -> Result<WriteSummary, String> {
    let movies = MovieParser::parse_movies_from_csv(config.input_dir.join(file_name))?;
    log::info!("Parsed {} movies from {}", movies.len(), file_name);

    let summary =
        YearWriter::save_movies_by_year(movies, &config.namespace, &config.output_dir, rng)?;
    log::info!(
        "Wrote {} titles into {} ({} failed)",
        summary.written,
        summary.directory,
        summary.failed
    );

    Ok(summary)
}
