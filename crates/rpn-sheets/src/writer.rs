//! Sheet writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::calculation::Calculation;
use crate::error::SheetResult;
use crate::options::WriteOptions;

/// Calculated sheet writer
///
/// Output mirrors the input layout: a `"<width> <height>"` header, then one
/// fixed-precision value per line in row-major order.
pub struct SheetWriter;

impl SheetWriter {
    /// Write calculated values to a file
    pub fn write_file<P: AsRef<Path>>(
        calculation: &Calculation,
        path: P,
        options: &WriteOptions,
    ) -> SheetResult<()> {
        let file = File::create(path)?;
        Self::write(calculation, file, options)
    }

    /// Write calculated values to a writer
    pub fn write<W: Write>(
        calculation: &Calculation,
        writer: W,
        options: &WriteOptions,
    ) -> SheetResult<()> {
        let eol = options.line_terminator.as_str();
        let size = calculation.size();
        let mut out = BufWriter::new(writer);

        write!(out, "{} {}{}", size.width(), size.height(), eol)?;
        for value in calculation.values() {
            write!(out, "{:.*}{}", options.precision, value, eol)?;
        }

        out.flush()?;
        Ok(())
    }

    /// Render calculated values as a string
    pub fn write_to_string(calculation: &Calculation, options: &WriteOptions) -> SheetResult<String> {
        let mut buf = Vec::new();
        Self::write(calculation, &mut buf, options)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::GridCalculationExt;
    use crate::options::{LineTerminator, ReadOptions};
    use crate::reader::SheetReader;
    use pretty_assertions::assert_eq;

    fn calculate(lines: &[&str]) -> Calculation {
        SheetReader::from_lines(lines.iter().copied(), &ReadOptions::default())
            .unwrap()
            .calculate()
            .unwrap()
    }

    #[test]
    fn test_write_default_precision() {
        let calculation = calculate(&["2 2", "1 3 /", "-2", "A1 A2 *", "2 3 -"]);
        let output = SheetWriter::write_to_string(&calculation, &WriteOptions::default()).unwrap();
        assert_eq!(output, "2 2\n0.33333\n-2.00000\n-0.66667\n-1.00000\n");
    }

    #[test]
    fn test_write_options() {
        let calculation = calculate(&["1 2", "10 4 /", "A1 ++"]);
        let options = WriteOptions {
            precision: 1,
            line_terminator: LineTerminator::CRLF,
        };
        let output = SheetWriter::write_to_string(&calculation, &options).unwrap();
        assert_eq!(output, "1 2\r\n2.5\r\n3.5\r\n");
    }

    #[test]
    fn test_write_division_by_zero() {
        let calculation = calculate(&["3 1", "1 0 /", "-1 0 /", "0 0 /"]);
        let output = SheetWriter::write_to_string(&calculation, &WriteOptions::default()).unwrap();
        assert_eq!(output, "3 1\ninf\n-inf\nNaN\n");
    }
}
