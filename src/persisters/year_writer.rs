use std::{
    fs::{DirBuilder, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

use rand::Rng;

use crate::config::{DIRECTORY_SEGMENT, MAX_DIRECTORY_SUFFIX};
#[cfg(unix)]
use crate::config::{DIRECTORY_MODE, FILE_MODE};
use crate::model::movie::Movie;

const MAX_DIRECTORY_ATTEMPTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    /// Name of the created directory, relative to the base directory.
    pub directory: String,
    pub written: usize,
    pub failed: usize,
}

pub struct YearWriter {}

impl YearWriter {
    /// Appends each movie title to `<year>.txt` inside a freshly created
    /// `<namespace>.movies.<n>` directory. A failed record is logged and
    /// skipped; only a failure to create the directory aborts the write.
    pub fn save_movies_by_year<R: Rng>(
        movies: Vec<Movie>,
        namespace: &str,
        base_dir: &Path,
        rng: &mut R,
    ) -> Result<WriteSummary, String> {
        let (directory, directory_path) =
            YearWriter::create_output_directory(namespace, base_dir, rng)?;

        let (written, failed) = YearWriter::write_movies_into(&movies, &directory_path);

        Ok(WriteSummary {
            directory,
            written,
            failed,
        })
    }

    pub fn directory_name(namespace: &str, suffix: u32) -> String {
        format!("{}.{}.{}", namespace, DIRECTORY_SEGMENT, suffix)
    }

    fn write_movies_into(movies: &[Movie], directory_path: &Path) -> (usize, usize) {
        let mut written = 0;
        let mut failed = 0;

        for movie in movies.iter() {
            let file_path = directory_path.join(movie.output_file_name());
            match YearWriter::append_title(&file_path, &movie.title) {
                Ok(()) => written += 1,
                Err(e) => {
                    log::error!(
                        "Error when appending {:?} to file {}. {}",
                        movie.title,
                        file_path.display(),
                        e
                    );
                    failed += 1;
                }
            }
        }

        (written, failed)
    }

    fn create_output_directory<R: Rng>(
        namespace: &str,
        base_dir: &Path,
        rng: &mut R,
    ) -> Result<(String, PathBuf), String> {
        for _ in 0..MAX_DIRECTORY_ATTEMPTS {
            let name = YearWriter::directory_name(namespace, rng.gen_range(0..=MAX_DIRECTORY_SUFFIX));
            let path = base_dir.join(&name);

            let mut builder = DirBuilder::new();
            #[cfg(unix)]
            builder.mode(DIRECTORY_MODE);

            match builder.create(&path) {
                Ok(()) => return Ok((name, path)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("Directory {} already exists, drawing another name", name);
                }
                Err(e) => {
                    return Err(format!(
                        "Could not create directory {}. {}",
                        path.display(),
                        e
                    ))
                }
            }
        }

        Err(format!(
            "Could not find a free directory name for namespace {} in {}",
            namespace,
            base_dir.display()
        ))
    }

    fn append_title(file_path: &Path, title: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        options.mode(FILE_MODE);

        let mut file = options.open(file_path)?;
        writeln!(file, "{}", title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::fs;

    fn movie(title: &str, year: u32) -> Movie {
        Movie {
            title: title.to_string(),
            year,
            languages: "[English]".to_string(),
            rating: 7.0,
        }
    }

    #[test]
    fn groups_titles_by_year_in_list_order() {
        let base = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let movies = vec![
            movie("Up", 2009),
            movie("Ratatouille", 2007),
            movie("Avatar", 2009),
        ];

        let summary =
            YearWriter::save_movies_by_year(movies, "tester", base.path(), &mut rng).unwrap();

        assert!(summary.directory.starts_with("tester.movies."));
        assert_eq!(summary.written, 3);
        assert_eq!(summary.failed, 0);

        let dir = base.path().join(&summary.directory);
        assert_eq!(fs::read_to_string(dir.join("2009.txt")).unwrap(), "Up\nAvatar\n");
        assert_eq!(fs::read_to_string(dir.join("2007.txt")).unwrap(), "Ratatouille\n");
    }

    #[test]
    fn directory_suffix_stays_within_bounds() {
        let base = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let summary =
            YearWriter::save_movies_by_year(vec![], "tester", base.path(), &mut rng).unwrap();

        let suffix: u32 = summary
            .directory
            .rsplit('.')
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert!(suffix <= MAX_DIRECTORY_SUFFIX);
        assert_eq!(fs::read_dir(base.path().join(&summary.directory)).unwrap().count(), 0);
    }

    #[test]
    fn existing_directory_name_is_not_reused() {
        let base = tempfile::tempdir().unwrap();
        let first = YearWriter::save_movies_by_year(
            vec![movie("Up", 2009)],
            "tester",
            base.path(),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();

        // Same seed, so the first draw collides with the existing directory.
        let second = YearWriter::save_movies_by_year(
            vec![movie("Up", 2009)],
            "tester",
            base.path(),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();

        assert_ne!(first.directory, second.directory);
    }

    #[test]
    fn missing_base_directory_is_fatal() {
        let base = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let result = YearWriter::save_movies_by_year(
            vec![movie("Up", 2009)],
            "tester",
            &base.path().join("does-not-exist"),
            &mut rng,
        );

        assert!(result.is_err());
    }

    #[test]
    fn failed_record_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        // A title cannot be appended where a directory with the file's name sits.
        fs::create_dir(dir.path().join("1999.txt")).unwrap();
        let movies = vec![movie("The Matrix", 1999), movie("Shrek", 2001)];

        let (written, failed) = YearWriter::write_movies_into(&movies, dir.path());

        assert_eq!((written, failed), (1, 1));
        assert_eq!(fs::read_to_string(dir.path().join("2001.txt")).unwrap(), "Shrek\n");
    }

    #[cfg(unix)]
    #[test]
    fn output_permissions_are_restricted() {
        use std::os::unix::fs::PermissionsExt;

        let base = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let summary = YearWriter::save_movies_by_year(
            vec![movie("Up", 2009)],
            "tester",
            base.path(),
            &mut rng,
        )
        .unwrap();

        let dir = base.path().join(&summary.directory);
        let dir_mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(dir.join("2009.txt")).unwrap().permissions().mode() & 0o777;
        // The process umask can only take bits away.
        assert_eq!(dir_mode & !DIRECTORY_MODE, 0);
        assert_eq!(file_mode & !FILE_MODE, 0);
    }
}
