//! Reading trip files from disk.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};

use super::TripError;
use super::parse::{Trip, parse_row};

/// A trip file being read row by row.
pub struct TripFile<R> {
    source: String,
    reader: csv::Reader<R>,
}

impl TripFile<File> {
    /// Open a trip file. Its source name is the file name without extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TripError> {
        let path = path.as_ref();
        let source = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path)?;
        Ok(Self::from_reader(source, file))
    }
}

impl<R: Read> TripFile<R> {
    /// Wrap any reader producing trip-file content.
    pub fn from_reader(source: impl Into<String>, reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        Self {
            source: source.into(),
            reader,
        }
    }

    /// The source name lines from this file are named after.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Iterate the trips in the file, skipping the header row.
    ///
    /// Rows are read lazily; a bad row yields an `Err` without consuming
    /// the rest of the file.
    pub fn trips(&mut self) -> impl Iterator<Item = Result<Trip, TripError>> + '_ {
        self.reader
            .records()
            .map(|record| parse_row(record?.iter()))
    }
}

/// List the `.csv` files in a directory, sorted by file name.
pub fn list_trip_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
Stop 1,Stop 2,Stop 3
A(08:00:00),B(08:05:00),C(08:10:00)
A(09:00:00),B(09:05:00)
";

    #[test]
    fn header_row_is_skipped() {
        let mut file = TripFile::from_reader("route42", SAMPLE.as_bytes());
        let trips: Vec<Trip> = file.trips().collect::<Result<_, _>>().unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].visits().len(), 3);
        assert_eq!(trips[1].visits().len(), 2);
        assert_eq!(trips[1].start_time(), Some("09:00:00"));
    }

    #[test]
    fn bad_row_does_not_hide_later_rows() {
        let content = "header\nA(08:00:00),B\nA(09:00:00)\n";
        let mut file = TripFile::from_reader("r", content.as_bytes());
        let results: Vec<_> = file.trips().collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }

    #[test]
    fn fields_are_trimmed() {
        let content = "header\n A(08:00:00) , B(08:05:00)\n";
        let mut file = TripFile::from_reader("r", content.as_bytes());
        let trip = file.trips().next().unwrap().unwrap();
        assert_eq!(trip.visits()[1].stop().as_str(), "B");
    }

    #[test]
    fn open_uses_file_stem_as_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("X1 Leeds.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let mut file = TripFile::open(&path).unwrap();
        assert_eq!(file.source(), "X1 Leeds");
        assert_eq!(file.trips().count(), 2);
    }

    #[test]
    fn open_missing_file_fails() {
        assert!(matches!(
            TripFile::open("/nonexistent/trips.csv"),
            Err(TripError::Io(_))
        ));
    }

    #[test]
    fn list_only_csv_files_sorted() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.csv"), SAMPLE).unwrap();
        std::fs::write(dir.path().join("a.csv"), SAMPLE).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = list_trip_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn list_missing_directory_fails() {
        assert!(list_trip_files("/nonexistent/trip/dir").is_err());
    }
}
