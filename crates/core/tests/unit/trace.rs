//! # Trace Parsing Tests
//!
//! Line grammar, operation kinds, error reporting with line numbers, and the
//! reader's handling of blank lines and files.

use std::io::{Cursor, Write};

use csim_core::common::TraceError;
use csim_core::trace::{TraceOp, TraceReader, TraceRecord};
use rstest::rstest;
use tempfile::NamedTempFile;

use crate::common::TraceBuilder;

#[rstest]
#[case("I 0400d7d4,8", TraceOp::Instruction, 0x0400d7d4, 8)]
#[case(" L 10,1", TraceOp::Load, 0x10, 1)]
#[case(" S 7ff000388,8", TraceOp::Store, 0x7ff000388, 8)]
#[case(" M 0421c7f0,4", TraceOp::Modify, 0x0421c7f0, 4)]
#[case("L 0x20,4", TraceOp::Load, 0x20, 4)]
#[case("\tS   ABCDEF , 2  ", TraceOp::Store, 0xABCDEF, 2)]
#[case("L ffffffffffffffff,8", TraceOp::Load, u64::MAX, 8)]
fn parses_records(
    #[case] text: &str,
    #[case] op: TraceOp,
    #[case] address: u64,
    #[case] size: u32,
) {
    assert_eq!(
        TraceRecord::parse(1, text).unwrap(),
        TraceRecord { op, address, size }
    );
}

#[rstest]
#[case(TraceOp::Instruction, 'I', 0)]
#[case(TraceOp::Load, 'L', 1)]
#[case(TraceOp::Store, 'S', 1)]
#[case(TraceOp::Modify, 'M', 2)]
fn op_characters_and_access_counts(
    #[case] op: TraceOp,
    #[case] ch: char,
    #[case] accesses: usize,
) {
    assert_eq!(TraceOp::from_char(ch), Some(op));
    assert_eq!(op.as_char(), ch);
    assert_eq!(op.accesses(), accesses);
}

#[test]
fn unknown_operation_is_reported() {
    let err = TraceRecord::parse(4, " X 10,1").unwrap_err();
    assert!(matches!(err, TraceError::UnknownOperation { line: 4, op: 'X' }));
    assert!(TraceOp::from_char('l').is_none());
}

#[rstest]
#[case("L")]
#[case("L 10")]
#[case("L ,4")]
#[case("L 10,")]
#[case("10,4")]
fn malformed_lines_are_reported(#[case] text: &str) {
    let err = TraceRecord::parse(9, text).unwrap_err();
    match err {
        TraceError::Malformed { line, text: got } => {
            assert_eq!(line, 9);
            assert_eq!(got, text);
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn bad_address_and_size_are_reported() {
    assert!(matches!(
        TraceRecord::parse(2, "L 10g,4"),
        Err(TraceError::InvalidAddress { line: 2, .. })
    ));
    assert!(matches!(
        TraceRecord::parse(2, "L 1ffffffffffffffff,4"),
        Err(TraceError::InvalidAddress { .. })
    ));
    assert!(matches!(
        TraceRecord::parse(3, "L 10,-1"),
        Err(TraceError::InvalidSize { line: 3, .. })
    ));
}

#[test]
fn reader_skips_blank_lines_and_counts_them() {
    let text = "\n L 10,1\n\n   \n S 20,2\n";
    let mut reader = TraceReader::new(Cursor::new(text));

    let first = reader.next().unwrap().unwrap();
    assert_eq!(first.address, 0x10);
    assert_eq!(reader.line_no(), 2);

    let second = reader.next().unwrap().unwrap();
    assert_eq!(second.op, TraceOp::Store);
    assert_eq!(reader.line_no(), 5);

    assert!(reader.next().is_none());
}

#[test]
fn reader_reports_error_line_number() {
    let text = " L 10,1\n S 20,1\n Q 30,1\n";
    let results: Vec<_> = TraceReader::new(Cursor::new(text)).collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(matches!(
        results[2],
        Err(TraceError::UnknownOperation { line: 3, op: 'Q' })
    ));
}

#[test]
fn reader_yields_instruction_fetches() {
    let text = TraceBuilder::new().fetch(0x400).load(0x10, 4).build();
    let ops: Vec<TraceOp> = TraceReader::new(Cursor::new(text))
        .map(|r| r.unwrap().op)
        .collect();
    assert_eq!(ops, vec![TraceOp::Instruction, TraceOp::Load]);
}

#[test]
fn open_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(TraceBuilder::new().modify(0x20, 1).build().as_bytes())
        .unwrap();

    let records: Vec<_> = TraceReader::open(file.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        records,
        vec![TraceRecord {
            op: TraceOp::Modify,
            address: 0x20,
            size: 1
        }]
    );
}

#[test]
fn open_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = TraceReader::open(dir.path().join("nope.trace")).unwrap_err();
    assert!(matches!(err, TraceError::Open { .. }));
}
