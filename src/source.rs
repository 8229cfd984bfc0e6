//! Line sources: opening log files and splitting them into raw lines.
//!
//! Lines are split on `\n` and keep their terminator. Bytes that are not valid UTF-8 are
//! replaced lossily so that binary noise in a log never aborts a triage session.

use crate::classify::LogLine;
use crate::error::{LogsiftError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Iterator over the lines of a readable source.
///
/// Yields `Err(SourceReadFailure)` once if the underlying reader fails, then ends. Text read
/// before the failure is yielded first as a final unterminated line.
#[derive(Debug)]
pub struct LineSource<R> {
    path: PathBuf,
    reader: R,
    buf: Vec<u8>,
    /// Read error held back while the partial line before it is yielded
    pending: Option<LogsiftError>,
    done: bool,
}

impl LineSource<BufReader<File>> {
    /// Open a log file for reading.
    ///
    /// # Error Cases
    /// - Path does not exist
    /// - Path points to a directory or other non-regular file
    /// - File is not readable by the current process
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        validate_file_path(path)?;
        let file = File::open(path).map_err(|e| LogsiftError::open(path, e))?;
        Ok(Self::from_reader(path, BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    /// Wrap an existing reader; `path` is used for diagnostics only.
    pub fn from_reader(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
            buf: Vec::new(),
            pending: None,
            done: false,
        }
    }

    fn take_line(&self) -> LogLine {
        LogLine::from(String::from_utf8_lossy(&self.buf).as_ref())
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<LogLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }
        if self.done {
            return None;
        }

        self.buf.clear();
        loop {
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => return Some(Ok(self.take_line())),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    let err = LogsiftError::read(&self.path, e);
                    if self.buf.is_empty() {
                        return Some(Err(err));
                    }
                    self.pending = Some(err);
                    return Some(Ok(self.take_line()));
                }
            }
        }
    }
}

/// Check that a path names an existing regular file before opening it.
pub fn validate_file_path(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| LogsiftError::open(path, e))?;

    if !metadata.is_file() {
        return Err(LogsiftError::open(
            path,
            std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read, Write};
    use tempfile::{NamedTempFile, TempDir};

    fn collect<R: BufRead>(source: LineSource<R>) -> Vec<String> {
        source
            .map(|line| line.unwrap().to_string())
            .collect()
    }

    #[test]
    fn keeps_line_terminators() {
        let source = LineSource::from_reader("mem", Cursor::new("a\r\nb\nc"));
        assert_eq!(collect(source), vec!["a\r\n", "b\n", "c"]);
    }

    #[test]
    fn empty_reader_yields_nothing() {
        let source = LineSource::from_reader("mem", Cursor::new(""));
        assert!(collect(source).is_empty());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let source = LineSource::from_reader("mem", Cursor::new(b"ERROR \xff\xfe\n".to_vec()));
        let lines = collect(source);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ERROR "));
        assert!(lines[0].contains('\u{FFFD}'));
    }

    /// Reader that returns some data, then fails.
    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                Err(io::Error::other("device unplugged"))
            } else {
                Ok(n)
            }
        }
    }

    #[test]
    fn read_failure_is_reported_once() {
        let reader = io::BufReader::new(FailingReader {
            data: Cursor::new(b"INFO one\n".to_vec()),
        });
        let mut source = LineSource::from_reader("flaky.log", reader);

        assert_eq!(source.next().unwrap().unwrap().as_ref(), "INFO one\n");
        match source.next() {
            Some(Err(LogsiftError::SourceReadFailure { path, .. })) => {
                assert_eq!(path, PathBuf::from("flaky.log"));
            }
            other => panic!("expected read failure, got {other:?}"),
        }
        assert!(source.next().is_none());
    }

    #[test]
    fn partial_line_before_failure_is_kept() {
        let reader = io::BufReader::new(FailingReader {
            data: Cursor::new(b"INFO one\nERROR partial".to_vec()),
        });
        let mut source = LineSource::from_reader("flaky.log", reader);

        assert_eq!(source.next().unwrap().unwrap().as_ref(), "INFO one\n");
        assert_eq!(source.next().unwrap().unwrap().as_ref(), "ERROR partial");
        assert!(matches!(
            source.next(),
            Some(Err(LogsiftError::SourceReadFailure { .. }))
        ));
        assert!(source.next().is_none());
    }

    #[test]
    fn partial_line_is_classified_before_read_error() {
        let reader = io::BufReader::new(FailingReader {
            data: Cursor::new(b"INFO one\nERROR partial".to_vec()),
        });
        let classification =
            crate::classify::classify_source(LineSource::from_reader("flaky.log", reader));

        assert!(classification.read_error.is_some());
        assert_eq!(classification.buckets.all.len(), 2);
        assert_eq!(classification.buckets.errors.len(), 1);
        assert!(classification.buckets.errors.contains("ERROR partial"));
    }

    #[test]
    fn open_reads_real_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "INFO up\nERROR down\n").unwrap();

        let source = LineSource::open(file.path()).unwrap();
        assert_eq!(collect(source), vec!["INFO up\n", "ERROR down\n"]);
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.log");
        assert!(matches!(
            LineSource::open(&missing),
            Err(LogsiftError::SourceOpenFailure { .. })
        ));
    }

    #[test]
    fn open_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            LineSource::open(dir.path()),
            Err(LogsiftError::SourceOpenFailure { .. })
        ));
    }
}
