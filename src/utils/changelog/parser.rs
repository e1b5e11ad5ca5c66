// changelog release heading parser

use super::types::ReleaseHeading;
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// the heading contract; the `_ ` before the separator is part of it
pub const RELEASE_HEADING_PATTERN: &str =
    r"^(?P<version>[0-9]+\.[0-9]+\.[0-9]+)_ \|--\| (?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})$";

static RELEASE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(RELEASE_HEADING_PATTERN).expect("release heading pattern must compile")
});

impl ReleaseHeading {
    /// match a single line (without its line ending) against the heading pattern
    pub fn parse_line(line: &str, line_number: usize) -> Option<Self> {
        let captures = RELEASE_HEADING.captures(line)?;
        Some(ReleaseHeading::new(
            &captures["version"],
            &captures["date"],
            line_number,
        ))
    }
}

/// lazy scan over the release headings of a changelog
///
/// lines end at `\n`, `\r\n` or a lone `\r`. lines that do not match are
/// skipped. after a read error the iterator yields that error once and then
/// ends.
pub struct ReleaseHeadings<R> {
    reader: R,
    pending: VecDeque<String>,
    path: PathBuf,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> ReleaseHeadings<R> {
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            path: path.into(),
            line_number: 0,
            done: false,
        }
    }

    /// number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        if let Some(line) = self.pending.pop_front() {
            return Some(Ok(line));
        }

        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                let text = match String::from_utf8(buf) {
                    Ok(text) => text,
                    Err(e) => return Some(Err(io::Error::new(io::ErrorKind::InvalidData, e))),
                };

                // old mac files end lines with a bare carriage return
                let mut lines = text.split('\r').map(str::to_string);
                let first = lines.next().unwrap_or_default();
                self.pending.extend(lines);
                Some(Ok(first))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl ReleaseHeadings<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> Iterator for ReleaseHeadings<R> {
    type Item = Result<ReleaseHeading>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some(line) = self.next_line() {
            self.line_number += 1;
            match line {
                Ok(line) => {
                    if let Some(heading) = ReleaseHeading::parse_line(&line, self.line_number) {
                        return Some(Ok(heading));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::ChangelogReadError {
                        path: self.path.clone(),
                        line: self.line_number,
                        source: e,
                    }));
                }
            }
        }

        self.done = true;
        None
    }
}

/// find the first release heading in a changelog file
///
/// reading stops at the first match; the file is closed on return
pub fn find_latest_release<P: AsRef<Path>>(path: P) -> Result<Option<ReleaseHeading>> {
    let mut headings = ReleaseHeadings::open(path.as_ref())?;
    let latest = headings.next().transpose()?;

    log::trace!(
        "scanned {} line(s) of {}",
        headings.lines_read(),
        path.as_ref().display()
    );

    Ok(latest)
}
