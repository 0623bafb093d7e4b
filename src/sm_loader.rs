//! Snapshot file loader
//!
//! Input is a Latin-1 text file. The first line is a header and is never
//! parsed. Every following line holds up to four whitespace separated
//! integers: `step messages states infected`. Missing fields stay zero, so a
//! blank line is an all-zero record, and tokens past the fourth are ignored.
//! Only ASCII whitespace separates tokens.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::Path;

use serde::Deserialize;

use crate::sm_interface::{Event, EventSink, LineNumber, Record};
use crate::sm_sinks::LoggingEventSink;

/// Field names in column order
pub const FIELDS: [&str; 4] = ["step", "message_count", "state_count", "infected_count"];

/// Per-line parse failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("field {position} ({field}) {token:?} is not an integer: {source}")]
    InvalidInteger {
        /// 1-based column
        position: usize,
        field: &'static str,
        token: String,
        source: ParseIntError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("read failed after line {line}: {source}")]
    Read { line: LineNumber, source: io::Error },

    #[error("line {line}: {source}")]
    Malformed { line: LineNumber, source: ParseError },
}

/// What to do with a line holding a non-integer token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Report the line and keep going
    #[default]
    Skip,
    /// Report the line and stop loading
    Abort,
}

/// Parse one data line into a record
pub fn parse_line(line: &str) -> Result<Record, ParseError> {
    let mut record = Record::default();

    for (index, token) in line.split_ascii_whitespace().take(FIELDS.len()).enumerate() {
        let value = token
            .parse::<i32>()
            .map_err(|source| ParseError::InvalidInteger {
                position: index + 1,
                field: FIELDS[index],
                token: token.to_string(),
                source,
            })?;

        match index {
            0 => record.step = value,
            1 => record.message_count = value,
            2 => record.state_count = value,
            _ => record.infected_count = value,
        }
    }

    Ok(record)
}

/// ISO-8859-1: each byte is the code point of the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Loads records from snapshot files, reporting problems to an event sink
pub struct RecordLoader<S: EventSink = LoggingEventSink> {
    sink: S,
    policy: MalformedLinePolicy,
}

impl RecordLoader<LoggingEventSink> {
    pub fn new() -> Self {
        Self::with_sink(LoggingEventSink::new())
    }
}

impl Default for RecordLoader<LoggingEventSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> RecordLoader<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            sink,
            policy: MalformedLinePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MalformedLinePolicy {
        self.policy
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Load every record from `path`.
    ///
    /// Failures are reported to the sink and whatever was read before the
    /// failure is returned, so a missing file yields an empty vector.
    pub fn load_records<P: AsRef<Path>>(&mut self, path: P) -> Vec<Record> {
        let mut records = Vec::new();
        // already reported to the sink
        let _ = self.load_into(path.as_ref(), &mut records);
        records
    }

    /// Like [`load_records`](Self::load_records) but surfaces the first
    /// failure instead of a partial result.
    pub fn try_load_records<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<Record>, LoadError> {
        let mut records = Vec::new();
        self.load_into(path.as_ref(), &mut records)?;
        Ok(records)
    }

    /// Load from any buffered reader, same rules as [`load_records`](Self::load_records)
    pub fn read_records<R: BufRead>(&mut self, reader: R) -> Vec<Record> {
        let mut records = Vec::new();
        let _ = self.read_into(reader, &mut records);
        records
    }

    fn load_into(&mut self, path: &Path, out: &mut Vec<Record>) -> Result<(), LoadError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => {
                self.sink.log(
                    0,
                    Event::OpenFailed {
                        path: path.display().to_string(),
                        reason: source.to_string(),
                    },
                );
                return Err(LoadError::Open {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        self.read_into(BufReader::new(file), out)
    }

    fn read_into<R: BufRead>(&mut self, mut reader: R, out: &mut Vec<Record>) -> Result<(), LoadError> {
        let mut buf = Vec::new();
        let mut line: LineNumber = 0;
        let mut skipped = 0;

        let result = loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break Ok(()),
                Ok(_) => line += 1,
                Err(source) => {
                    self.sink.log(
                        line,
                        Event::ReadFailed {
                            reason: source.to_string(),
                        },
                    );
                    break Err(LoadError::Read { line, source });
                }
            }

            // header
            if line == 1 {
                continue;
            }

            let text = decode_latin1(&buf);
            let text = text.trim_end_matches(|c: char| c == '\n' || c == '\r');

            match parse_line(text) {
                Ok(record) => out.push(record),
                Err(err) => {
                    let ParseError::InvalidInteger {
                        ref token,
                        position,
                        ref source,
                        ..
                    } = err;
                    self.sink.log(
                        line,
                        Event::MalformedLine {
                            token: token.clone(),
                            position,
                            reason: source.to_string(),
                        },
                    );

                    match self.policy {
                        MalformedLinePolicy::Skip => skipped += 1,
                        MalformedLinePolicy::Abort => {
                            break Err(LoadError::Malformed { line, source: err });
                        }
                    }
                }
            }
        };

        self.sink.log(
            0,
            Event::LoadFinished {
                records: out.len(),
                skipped,
            },
        );

        result
    }
}
