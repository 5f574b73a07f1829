//! Streaming record reader.
//!
//! Reads deal records from any `BufRead` source. `%` and `;` comment lines
//! and `{ ... }` commentary blocks are skipped, as are unknown tags.

use super::DealRecord;
use crate::error::{ParseError, Result};
use std::io::BufRead;
use tracing::trace;

/// Parse a tag pair from a line: [Name "value"]
fn parse_tag_pair(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (name, rest) = inner.split_once(' ')?;
    let value = rest.trim().strip_prefix('"')?.strip_suffix('"')?;
    Some((name.trim(), value))
}

/// Reads deal records from a text source (file, stdin, network stream, etc.).
pub struct RecordReader<R: BufRead> {
    reader: R,
    line_buf: String,
    line_number: usize,
    records_read: usize,
    in_commentary: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buf: String::new(),
            line_number: 0,
            records_read: 0,
            in_commentary: false,
        }
    }

    /// Number of records returned so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Current line number in the input.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read one line from the underlying reader. Returns false at EOF.
    fn read_line(&mut self) -> std::io::Result<bool> {
        self.line_buf.clear();
        if self.reader.read_line(&mut self.line_buf)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        Ok(true)
    }

    fn finish(&mut self, record: DealRecord) -> Option<Result<DealRecord>> {
        self.records_read += 1;
        trace!(line = record.line, "read record");
        Some(Ok(record))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<DealRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record: Option<DealRecord> = None;

        loop {
            match self.read_line() {
                Ok(true) => {}
                Ok(false) => return record.and_then(|r| self.finish(r)),
                Err(e) => return Some(Err(e.into())),
            }

            let line = self.line_buf.trim();

            if self.in_commentary {
                if line.contains('}') {
                    self.in_commentary = false;
                }
                continue;
            }

            if line.starts_with('{') {
                self.in_commentary = !line.contains('}');
                continue;
            }

            if line.is_empty() {
                match record.take() {
                    Some(r) => return self.finish(r),
                    None => continue,
                }
            }

            if line.starts_with('%') || line.starts_with(';') || !line.starts_with('[') {
                continue;
            }

            let Some((name, value)) = parse_tag_pair(line) else {
                return Some(Err(ParseError::Record {
                    line: self.line_number,
                    reason: format!("malformed tag: {line}"),
                }
                .into()));
            };
            let (name, value) = (name.to_string(), value.to_string());

            let line_number = self.line_number;
            let current = record.get_or_insert_with(|| DealRecord {
                line: line_number,
                ..Default::default()
            });
            current.apply_tag(&name, &value);
        }
    }
}

/// Read every record in `content`.
pub fn read_records(content: &str) -> Result<Vec<DealRecord>> {
    RecordReader::new(content.as_bytes()).collect()
}

/// Read every record in a file.
pub fn read_records_file(path: &std::path::Path) -> Result<Vec<DealRecord>> {
    let content = std::fs::read_to_string(path)?;
    read_records(&content)
}
