use std::{env, path::PathBuf};

pub const INPUT_PREFIX: &str = "movies_";
pub const INPUT_SUFFIX: &str = ".csv";
pub const DIRECTORY_SEGMENT: &str = "movies";
pub const MAX_DIRECTORY_SUFFIX: u32 = 99999;

#[cfg(unix)]
pub const DIRECTORY_MODE: u32 = 0o750;
#[cfg(unix)]
pub const FILE_MODE: u32 = 0o640;

const NAMESPACE_ENV: &str = "MOVIES_NAMESPACE";
const DEFAULT_NAMESPACE: &str = "anonymous";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Prefix of every generated output directory.
    pub namespace: String,
    /// Where candidate `movies_*.csv` files are looked up.
    pub input_dir: PathBuf,
    /// Where output directories are created.
    pub output_dir: PathBuf,
}

impl Config {
    pub fn new(namespace: &str) -> Self {
        Config {
            namespace: namespace.to_string(),
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
        }
    }

    /// The first positional argument wins, then `MOVIES_NAMESPACE`, then `USER`.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let namespace = args
            .into_iter()
            .nth(1)
            .map(|arg| arg.trim().to_string())
            .filter(|arg| !arg.is_empty())
            .or_else(|| non_empty_env(NAMESPACE_ENV))
            .or_else(|| non_empty_env("USER"))
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        Config::new(&namespace)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
