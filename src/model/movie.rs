/// Year used when the year column cannot be read as a number.
pub const UNKNOWN_YEAR: u32 = 0;

#[derive(Debug, Clone, PartialOrd, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: u32,
    pub languages: String,
    pub rating: f32,
}

impl Movie {
    /// Builds a movie from the four raw columns of a row. Title and languages
    /// are kept verbatim; year and rating are trimmed, parsed best-effort and
    /// fall back to `UNKNOWN_YEAR` and `0.0`.
    pub fn from_fields(title: &str, year: &str, languages: &str, rating: &str) -> Movie {
        Movie {
            title: title.to_string(),
            year: year.trim().parse::<u32>().unwrap_or(UNKNOWN_YEAR),
            languages: languages.to_string(),
            rating: rating.trim().parse::<f32>().unwrap_or(0.0),
        }
    }

    pub fn output_file_name(&self) -> String {
        format!("{}.txt", self.year)
    }
}
