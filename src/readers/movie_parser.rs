use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord};

use crate::model::movie::Movie;

const FIELDS_PER_ROW: usize = 4;

pub struct MovieParser {}

impl MovieParser {
    /// Reads every movie row of a CSV file, in file order. The first line is
    /// always discarded as a header. Fields are split on commas with no
    /// quoting, and rows with fewer than four fields or a blank title or
    /// languages column are skipped.
    pub fn parse_movies_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Movie>, String> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("Could not open file {} for reading. {}", path.display(), e))?;

        // The header is whatever the first line holds, even a blank one, so it
        // is dropped before the CSV reader sees the file.
        let mut reader = BufReader::new(file);
        let mut header = Vec::new();
        reader
            .read_until(b'\n', &mut header)
            .map_err(|e| format!("Error when reading header of file {}. {}", path.display(), e))?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut movies = vec![];
        for (index, result) in rdr.records().enumerate() {
            match result {
                Ok(record) => match MovieParser::movie_from_record(&record) {
                    Some(movie) => movies.push(movie),
                    None => log::debug!(
                        "Skipping row {} of {}: expected {} non-empty fields, found {:?}",
                        index + 2,
                        path.display(),
                        FIELDS_PER_ROW,
                        record
                    ),
                },
                Err(e) if e.is_io_error() => {
                    return Err(format!("Error when reading file {}. {}", path.display(), e));
                }
                Err(e) => log::warn!("Skipping unreadable row in {}: {}", path.display(), e),
            }
        }

        Ok(movies)
    }

    fn movie_from_record(record: &StringRecord) -> Option<Movie> {
        if record.len() < FIELDS_PER_ROW {
            return None;
        }

        // Blank columns count as missing, like a split that collapses ",,".
        let title = record.get(0).filter(|field| !field.trim().is_empty())?;
        let languages = record.get(2).filter(|field| !field.trim().is_empty())?;

        Some(Movie::from_fields(
            title,
            record.get(1)?,
            languages,
            record.get(3)?,
        ))
    }
}
