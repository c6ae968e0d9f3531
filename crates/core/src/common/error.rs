//! Error definitions.
//!
//! This module defines every recoverable failure the simulator reports. It provides:
//! 1. **Geometry Errors:** Rejected cache shapes, raised before any set is allocated.
//! 2. **Trace Errors:** Unreadable trace files and malformed trace lines, with 1-based line numbers.
//! 3. **Config Errors:** Unreadable or unparsable JSON configuration files.
//! 4. **Simulation Errors:** An umbrella type for the CLI to surface as a single diagnostic.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// A cache geometry that cannot be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Every set needs at least one line.
    #[error("associativity must be at least 1")]
    ZeroAssociativity,

    /// Set-index and block-offset fields together are wider than an address.
    #[error(
        "set index bits ({set_index_bits}) + block offset bits ({block_offset_bits}) exceed the 64-bit address width"
    )]
    AddressBitsExceeded {
        /// Requested set-index bits (`s`).
        set_index_bits: u32,
        /// Requested block-offset bits (`b`).
        block_offset_bits: u32,
    },

    /// `2^s * E` lines do not fit in host memory indexing.
    #[error("2^{set_index_bits} sets x {associativity} lines is too large to allocate")]
    CapacityOverflow {
        /// Requested set-index bits (`s`).
        set_index_bits: u32,
        /// Requested associativity (`E`).
        associativity: usize,
    },
}

/// A trace that cannot be read or parsed.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("cannot open trace file {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading a line from the trace failed.
    #[error("line {line}: read failed: {source}")]
    Read {
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The line does not have the `<op> <address>,<size>` shape.
    #[error("line {line}: malformed trace record {text:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line, untrimmed.
        text: String,
    },

    /// The operation character is not one of `I`, `L`, `S`, `M`.
    #[error("line {line}: unknown operation {op:?}")]
    UnknownOperation {
        /// 1-based line number.
        line: usize,
        /// The unrecognized operation character.
        op: char,
    },

    /// The address field is not a valid hexadecimal `u64`.
    #[error("line {line}: invalid address {text:?}: {source}")]
    InvalidAddress {
        /// 1-based line number.
        line: usize,
        /// The address field as written.
        text: String,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// The size field is not a valid decimal integer.
    #[error("line {line}: invalid access size {text:?}: {source}")]
    InvalidSize {
        /// 1-based line number.
        line: usize,
        /// The size field as written.
        text: String,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },
}

/// A configuration file that cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Path of the rejected file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// In-memory JSON text is not a valid [`Config`](crate::config::Config).
    #[error("invalid inline config: {0}")]
    Inline(#[source] serde_json::Error),
}

/// Any failure of a simulation session.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache geometry was rejected.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The trace could not be read or parsed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing verbose output or a report failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}
