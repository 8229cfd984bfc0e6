//! Severity classification of raw log lines.
//!
//! Every line goes into the ALL bucket. Lines are additionally placed into at most one severity
//! bucket by literal substring match, tested in the fixed priority order ERROR, INFO, WARN. The
//! first match wins, so a line mentioning both "ERROR" and "INFO" only ever shows up under ERROR.

use crate::error::LogsiftError;
use memchr::memmem;
use std::fmt;
use std::sync::Arc;

/// A raw log line, including its trailing terminator when the source had one.
pub type LogLine = Arc<str>;

/// Severity assigned to a line. Variant order is match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Info,
    Warn,
}

impl Severity {
    /// All severities in match priority order.
    pub const PRIORITY: [Severity; 3] = [Severity::Error, Severity::Info, Severity::Warn];

    /// The literal marker searched for in each line.
    pub fn marker(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
        }
    }
}

/// Identifier of one of the four views a session can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketId {
    All,
    Error,
    Info,
    Warn,
}

impl BucketId {
    /// Map a digit key to its bucket: '1' ALL, '2' ERROR, '3' INFO, '4' WARN.
    pub fn from_digit(ch: char) -> Option<Self> {
        match ch {
            '1' => Some(BucketId::All),
            '2' => Some(BucketId::Error),
            '3' => Some(BucketId::Info),
            '4' => Some(BucketId::Warn),
            _ => None,
        }
    }

    /// The digit key bound to this bucket.
    pub fn digit(self) -> char {
        match self {
            BucketId::All => '1',
            BucketId::Error => '2',
            BucketId::Info => '3',
            BucketId::Warn => '4',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BucketId::All => "All",
            BucketId::Error => "Errors",
            BucketId::Info => "Info",
            BucketId::Warn => "Warnings",
        }
    }
}

impl From<Severity> for BucketId {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => BucketId::Error,
            Severity::Info => BucketId::Info,
            Severity::Warn => BucketId::Warn,
        }
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a single line, returning `None` when it carries no known marker.
pub fn severity_of(line: &str) -> Option<Severity> {
    let haystack = line.as_bytes();
    Severity::PRIORITY
        .into_iter()
        .find(|severity| memmem::find(haystack, severity.marker().as_bytes()).is_some())
}

/// An ordered, immutable sequence of lines sharing a classification outcome.
///
/// Cloning is cheap: the lines live behind an `Arc` and are shared with the ALL bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    id: BucketId,
    lines: Arc<[LogLine]>,
}

impl Bucket {
    pub fn new(id: BucketId, lines: Vec<LogLine>) -> Self {
        Self {
            id,
            lines: lines.into(),
        }
    }

    pub fn id(&self) -> BucketId {
        self.id
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_ref())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.iter().any(|candidate| candidate == line)
    }
}

/// The four buckets produced for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    pub all: Bucket,
    pub errors: Bucket,
    pub warns: Bucket,
    pub infos: Bucket,
}

impl Buckets {
    pub fn get(&self, id: BucketId) -> &Bucket {
        match id {
            BucketId::All => &self.all,
            BucketId::Error => &self.errors,
            BucketId::Info => &self.infos,
            BucketId::Warn => &self.warns,
        }
    }
}

/// Incremental classifier for streaming sources.
#[derive(Debug, Default)]
pub struct Classifier {
    all: Vec<LogLine>,
    errors: Vec<LogLine>,
    warns: Vec<LogLine>,
    infos: Vec<LogLine>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<LogLine>) {
        let line = line.into();
        match severity_of(&line) {
            Some(Severity::Error) => self.errors.push(Arc::clone(&line)),
            Some(Severity::Info) => self.infos.push(Arc::clone(&line)),
            Some(Severity::Warn) => self.warns.push(Arc::clone(&line)),
            None => {}
        }
        self.all.push(line);
    }

    pub fn finish(self) -> Buckets {
        Buckets {
            all: Bucket::new(BucketId::All, self.all),
            errors: Bucket::new(BucketId::Error, self.errors),
            warns: Bucket::new(BucketId::Warn, self.warns),
            infos: Bucket::new(BucketId::Info, self.infos),
        }
    }
}

/// Classify a finite sequence of lines.
pub fn classify<I, L>(lines: I) -> Buckets
where
    I: IntoIterator<Item = L>,
    L: Into<LogLine>,
{
    let mut classifier = Classifier::new();
    for line in lines {
        classifier.push(line);
    }
    classifier.finish()
}

/// Result of classifying a fallible line source.
#[derive(Debug)]
pub struct Classification {
    pub buckets: Buckets,
    /// Set when the source failed before end of input; `buckets` holds everything read before it.
    pub read_error: Option<LogsiftError>,
}

/// Classify lines from a fallible source, stopping at the first read error.
pub fn classify_source<I>(source: I) -> Classification
where
    I: IntoIterator<Item = crate::error::Result<LogLine>>,
{
    let mut classifier = Classifier::new();
    let mut read_error = None;
    for item in source {
        match item {
            Ok(line) => classifier.push(line),
            Err(err) => {
                read_error = Some(err);
                break;
            }
        }
    }
    Classification {
        buckets: classifier.finish(),
        read_error,
    }
}
