use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionMode {
    Largest,
    Smallest,
    Named(String),
}

#[derive(Debug, Clone)]
pub struct FileSelector {
    directory: PathBuf,
    prefix: String,
    suffix: String,
}

impl FileSelector {
    pub fn new<P: AsRef<Path>>(directory: P, prefix: &str, suffix: &str) -> Self {
        FileSelector {
            directory: directory.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    /// Returns the name of the chosen file, or `None` when nothing qualifies.
    pub fn select(&self, mode: &SelectionMode) -> Option<String> {
        match mode {
            SelectionMode::Largest => self.find_by_size(|candidate, best| candidate > best),
            SelectionMode::Smallest => self.find_by_size(|candidate, best| candidate < best),
            SelectionMode::Named(name) => self.find_named(name),
        }
    }

    fn find_by_size<F>(&self, replaces_best: F) -> Option<String>
    where
        F: Fn(u64, u64) -> bool,
    {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!(
                    "Could not list directory {}: {}",
                    self.directory.display(),
                    e
                );
                return None;
            }
        };

        let mut best: Option<(String, u64)> = None;
        for entry in entries.flatten() {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if !self.matches_pattern(&name) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) if metadata.is_file() => metadata.len(),
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("Could not read size of {}: {}", name, e);
                    continue;
                }
            };

            let is_new_best = match &best {
                Some((_, best_size)) => replaces_best(size, *best_size),
                None => true,
            };
            if is_new_best {
                best = Some((name, size));
            }
        }

        best.map(|(name, _)| name)
    }

    fn find_named(&self, name: &str) -> Option<String> {
        match fs::metadata(self.directory.join(name)) {
            Ok(metadata) if metadata.is_file() => Some(name.to_string()),
            _ => None,
        }
    }

    fn matches_pattern(&self, name: &str) -> bool {
        name.len() >= self.suffix.len()
            && name.starts_with(&self.prefix)
            && name.ends_with(&self.suffix)
    }
}
