//! Memory Trace Parsing.
//!
//! Reads valgrind `--tool=lackey` style traces, one reference per line:
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! Leading whitespace is ignored, the address is hexadecimal (an `0x` prefix is
//! tolerated), and the size is decimal. Blank lines are skipped. Any other
//! deviation is reported with its 1-based line number.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::TraceError;

/// Kind of memory reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceOp {
    /// Instruction fetch (`I`). Never reaches the data cache.
    Instruction,
    /// Data load (`L`).
    Load,
    /// Data store (`S`).
    Store,
    /// Data modify (`M`): a load followed by a store to the same address.
    Modify,
}

impl TraceOp {
    /// Parses the operation character.
    pub const fn from_char(op: char) -> Option<Self> {
        match op {
            'I' => Some(Self::Instruction),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// The operation character as it appears in a trace.
    pub const fn as_char(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of data-cache accesses this operation performs.
    pub const fn accesses(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Operation kind.
    pub op: TraceOp,
    /// Referenced address.
    pub address: u64,
    /// Access size in bytes. Carried through for display only.
    pub size: u32,
}

impl TraceRecord {
    /// Parses a single non-blank trace line.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-based line number, used in error reports.
    /// * `text` - The raw line.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Malformed`] when the shape is wrong,
    /// [`TraceError::UnknownOperation`] for an unrecognized op character, and
    /// [`TraceError::InvalidAddress`] / [`TraceError::InvalidSize`] when a field
    /// does not parse.
    pub fn parse(line: usize, text: &str) -> Result<Self, TraceError> {
        let malformed = || TraceError::Malformed {
            line,
            text: text.to_owned(),
        };

        let body = text.trim();
        let mut chars = body.chars();
        let op_char = chars.next().ok_or_else(malformed)?;
        let rest = chars.as_str();
        if !rest.starts_with(char::is_whitespace) {
            return Err(malformed());
        }
        let op = TraceOp::from_char(op_char)
            .ok_or(TraceError::UnknownOperation { line, op: op_char })?;

        let (addr_text, size_text) = rest
            .trim_start()
            .split_once(',')
            .ok_or_else(malformed)?;
        let (addr_text, size_text) = (addr_text.trim(), size_text.trim());
        if addr_text.is_empty() || size_text.is_empty() {
            return Err(malformed());
        }

        let digits = addr_text
            .strip_prefix("0x")
            .or_else(|| addr_text.strip_prefix("0X"))
            .unwrap_or(addr_text);
        // `from_str_radix` and `parse` both accept a leading '+'.
        if digits.starts_with('+') || size_text.starts_with('+') {
            return Err(malformed());
        }
        let address =
            u64::from_str_radix(digits, 16).map_err(|source| TraceError::InvalidAddress {
                line,
                text: addr_text.to_owned(),
                source,
            })?;
        let size = size_text
            .parse::<u32>()
            .map_err(|source| TraceError::InvalidSize {
                line,
                text: size_text.to_owned(),
                source,
            })?;

        Ok(Self { op, address, size })
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.op.as_char(), self.address, self.size)
    }
}

/// Iterator over the records of a trace.
///
/// Yields every record, including instruction fetches; filtering is up to the caller.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far, blank lines included.
    pub const fn line_no(&self) -> usize {
        self.line_no
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.lines.next()?;
            self.line_no += 1;
            let line = self.line_no;

            match text {
                Err(source) => return Some(Err(TraceError::Read { line, source })),
                Ok(text) if text.trim().is_empty() => {}
                Ok(text) => return Some(TraceRecord::parse(line, &text)),
            }
        }
    }
}
