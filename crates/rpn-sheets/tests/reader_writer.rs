//! File-based reader and writer tests

use std::fs;
use std::io::Write;

use pretty_assertions::assert_eq;
use rpn_sheets::prelude::*;
use rpn_sheets::{GeneratorOptions, LineTerminator, SheetGenerator};
use tempfile::NamedTempFile;

fn write_input(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_roundtrip() {
    let input = write_input("3 2\nA2\n4 5 *\nA1\nA1 B2 /\n3\n1 ++\n");
    let grid = SheetReader::read_file(input.path(), &ReadOptions::default()).unwrap();
    let calculation = grid.calculate().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");
    SheetWriter::write_file(&calculation, &output, &WriteOptions::default()).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "3 2\n20.00000\n20.00000\n20.00000\n6.66667\n3.00000\n2.00000\n"
    );
}

#[test]
fn test_windows_line_endings() {
    let input = write_input("2 1\r\n5\r\nA1 --\r\n");
    let grid = SheetReader::read_file(input.path(), &ReadOptions::default()).unwrap();
    let calculation = grid.calculate().unwrap();

    let options = WriteOptions {
        line_terminator: LineTerminator::CRLF,
        ..Default::default()
    };
    assert_eq!(
        SheetWriter::write_to_string(&calculation, &options).unwrap(),
        "2 1\r\n5.00000\r\n4.00000\r\n"
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SheetReader::read_file(dir.path().join("missing.txt"), &ReadOptions::default());
    assert!(matches!(result, Err(SheetError::Io(_))));
}

#[test]
fn test_extra_lines_rejected() {
    let input = write_input("1 2\n1\n2\n3\n");
    let result = SheetReader::read_file(input.path(), &ReadOptions::default());
    assert!(matches!(result, Err(SheetError::MalformedInput(_))));
}

#[test]
fn test_invalid_formula_reports_cell() {
    let input = write_input("2 2\n1\n2\n3 4 %\n4\n");
    let err = SheetReader::read_file(input.path(), &ReadOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Error in cell B1: Invalid formula: 3 4 %");
}

#[test]
fn test_generated_file_calculates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.txt");

    let options = GeneratorOptions {
        width: 300,
        height: 26,
        seed: Some(42),
        ..Default::default()
    };
    SheetGenerator::new(&options)
        .unwrap()
        .generate_file(&path)
        .unwrap();

    let grid = SheetReader::read_file(&path, &ReadOptions::default()).unwrap();
    let sequential = grid.calculate().unwrap();

    let grid = SheetReader::read_file(&path, &ReadOptions::default()).unwrap();
    let parallel = grid
        .calculate_with_options(&CalculationOptions {
            order: CalculationOrder::Parallel { threads: 4 },
        })
        .unwrap();

    assert_eq!(sequential.stats(), parallel.stats());
    assert_eq!(
        SheetWriter::write_to_string(&sequential, &WriteOptions::default()).unwrap(),
        SheetWriter::write_to_string(&parallel, &WriteOptions::default()).unwrap()
    );
}
