use std::env;

/// Only this crate's warnings by default, so dependency chatter and info
/// lines stay out of the interactive prompts.
const DEFAULT_FILTERS: &str = concat!(env!("CARGO_CRATE_NAME"), "=warn");

pub fn setup_logging() {
    env_logger::Builder::new()
        .parse_filters(&filters_from(env::var("RUST_LOG").ok()))
        .init();
}

fn filters_from(rust_log: Option<String>) -> String {
    rust_log
        .filter(|filters| !filters.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTERS.to_string())
}
