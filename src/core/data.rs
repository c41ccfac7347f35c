//! Named-series CSV loader with zero-allocation float parsing.
//!
//! One series per row or spread over many rows, oldest sample first:
//!
//! ```text
//! # comment
//! series,value
//! cpu,10,20
//! cpu,30
//! mem,55.5
//! ```

use std::{
    collections::BTreeMap,
    io::{BufRead, BufReader, Read},
};

use thiserror::Error;

/// Samples keyed by series name, oldest first.
pub type SeriesData = BTreeMap<String, Vec<f64>>;

// --- Error Handling ---
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseCsvError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("expected a series name and at least one value")]
    MissingValue,
    #[error("empty series name")]
    EmptyName,
    #[error("invalid value '{0}'")]
    BadFloat(String),
    #[error("no data rows")]
    NoData,
}

// --- Helpers ---
#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = b {
        if !first.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    while let [rest @ .., last] = b {
        if !last.is_ascii_whitespace() {
            break;
        }
        b = rest;
    }
    b
}

/// Rewrite U+2212 MINUS SIGN to an ASCII hyphen in place.
#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if buf[r..].starts_with(&[0xE2, 0x88, 0x92]) {
            buf[w] = b'-';
            r += 3;
        } else {
            buf[w] = buf[r];
            r += 1;
        }
        w += 1;
    }
    buf.truncate(w);
}

#[inline]
fn parse_f64(bytes: &[u8], line: usize) -> Result<f64, ParseCsvError> {
    let bad = || ParseCsvError {
        line,
        kind: ParseErrorKind::BadFloat(String::from_utf8_lossy(bytes).into_owned()),
    };
    let val = lexical_core::parse::<f64>(bytes).map_err(|_| bad())?;
    if val.is_finite() {
        Ok(val)
    } else {
        Err(bad())
    }
}

// --- Fast CSV ingest ---
const BUF_CAP: usize = 1 << 16; // 64 KiB

pub fn read_series<R: Read>(src: R) -> Result<SeriesData, ParseCsvError> {
    let mut rdr = BufReader::with_capacity(BUF_CAP, src);
    let mut buf = Vec::<u8>::with_capacity(256);
    let mut data = SeriesData::new();
    let mut saw_first = false;
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = rdr.read_until(b'\n', &mut buf).map_err(|e| ParseCsvError {
            line: line_no,
            kind: ParseErrorKind::Io(e),
        })?;
        if n == 0 {
            break;
        }
        line_no += 1;

        if buf.ends_with(b"\n") {
            buf.pop();
        }
        if buf.ends_with(b"\r") {
            buf.pop();
        }

        normalize_unicode_minus(&mut buf);
        let row = trim(&buf);
        if row.is_empty() || row[0] == b'#' {
            continue;
        }

        let mut cols = row.split(|&b| b == b',').map(trim);
        let name = cols.next().unwrap_or_default();
        let values: Vec<&[u8]> = cols.filter(|c| !c.is_empty()).collect();

        // simple header detection (non-numeric second field on the first row)
        if !saw_first {
            saw_first = true;
            if values
                .first()
                .is_some_and(|v| lexical_core::parse::<f64>(v).is_err())
            {
                continue;
            }
        }

        if name.is_empty() {
            return Err(ParseCsvError {
                line: line_no,
                kind: ParseErrorKind::EmptyName,
            });
        }
        if values.is_empty() {
            return Err(ParseCsvError {
                line: line_no,
                kind: ParseErrorKind::MissingValue,
            });
        }

        let series = data
            .entry(String::from_utf8_lossy(name).into_owned())
            .or_default();
        for v in values {
            series.push(parse_f64(v, line_no)?);
        }
    }
    if data.is_empty() {
        return Err(ParseCsvError {
            line: line_no,
            kind: ParseErrorKind::NoData,
        });
    }
    Ok(data)
}

pub fn read_series_from_path(path: &str) -> Result<SeriesData, ParseCsvError> {
    if path == "-" {
        read_series(std::io::stdin())
    } else {
        use std::fs::File;
        read_series(File::open(path).map_err(|e| ParseCsvError {
            line: 0,
            kind: ParseErrorKind::Io(e),
        })?)
    }
}
