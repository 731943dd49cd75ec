//! Row and chunk sources over delimited files
//!
//! `CsvReader` is a cheap handle (path + delimiter). Each call to `rows()` or
//! `chunks()` opens the file fresh, parses the header, and returns a lazy
//! iterator that owns the file handle — the handle is released when the
//! iterator is dropped, including on early termination. Iterators are not
//! restartable; re-reading means calling `rows()`/`chunks()` again.
//!
//! Malformed data lines degrade instead of failing: short lines are padded
//! with nulls, long lines are truncated to the header width, and cells that
//! fail their column's locked parser become null.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::row::Row;
use crate::scalar::Scalar;

use super::errors::{CsvError, CsvResult};
use super::resolver::TypeResolver;
use super::tokenizer::{strip_bom, tokenize};

/// Default streaming chunk size, matching the analytics pipelines.
pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

/// A bounded batch of rows produced by streaming.
pub type Chunk = Vec<Row>;

/// Handle on a delimited text file.
#[derive(Debug, Clone)]
pub struct CsvReader {
    path: PathBuf,
    delimiter: char,
}

impl CsvReader {
    /// Creates a reader with the default comma delimiter.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_delimiter(path, ',')
    }

    /// Creates a reader with an explicit single-character delimiter.
    pub fn with_delimiter(path: impl Into<PathBuf>, delimiter: char) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses and returns the header column names.
    ///
    /// # Errors
    /// `EmptySource` if the file has no header line.
    pub fn headers(&self) -> CsvResult<Vec<String>> {
        let (_, columns) = self.open()?;
        Ok(columns.to_vec())
    }

    /// Opens the file and returns a lazy row iterator.
    pub fn rows(&self) -> CsvResult<RowIter> {
        let (lines, columns) = self.open()?;
        let resolvers = vec![TypeResolver::default(); columns.len()];
        Ok(RowIter {
            lines,
            path: self.path.clone(),
            delimiter: self.delimiter,
            columns,
            resolvers,
            done: false,
        })
    }

    /// Opens the file and returns a lazy chunk iterator.
    ///
    /// A `chunk_size` of 0 is treated as 1.
    pub fn chunks(&self, chunk_size: usize) -> CsvResult<ChunkIter> {
        Ok(ChunkIter {
            rows: self.rows()?,
            chunk_size: chunk_size.max(1),
        })
    }

    fn open(&self) -> CsvResult<(LineSource<BufReader<File>>, Arc<[String]>)> {
        let file = File::open(&self.path).map_err(|e| CsvError::io(&self.path, e))?;
        let mut lines = LineSource::new(BufReader::new(file));

        let first = lines
            .next_line()
            .map_err(|e| CsvError::io(&self.path, e))?
            .ok_or_else(|| CsvError::EmptySource(self.path.clone()))?;

        let mut header = tokenize(&first, self.delimiter);
        if let Some(field) = header.first_mut() {
            *field = strip_bom(field).to_string();
        }

        Ok((lines, header.into()))
    }
}

/// Lazy sequence of rows; owns the open file.
pub struct RowIter {
    lines: LineSource<BufReader<File>>,
    path: PathBuf,
    delimiter: char,
    columns: Arc<[String]>,
    resolvers: Vec<TypeResolver>,
    done: bool,
}

impl RowIter {
    /// Header column names shared by every row this iterator yields.
    pub fn columns(&self) -> &Arc<[String]> {
        &self.columns
    }

    fn parse_row(&mut self, line: &str) -> Row {
        let mut fields = tokenize(line, self.delimiter);
        // Pad short lines, truncate long ones
        fields.resize(self.columns.len(), String::new());

        let values: Vec<Scalar> = fields
            .iter()
            .enumerate()
            .map(|(i, field)| self.resolvers[i].convert(field))
            .collect();

        Row::new(Arc::clone(&self.columns), values)
    }
}

impl Iterator for RowIter {
    type Item = CsvResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lines.next_line() {
            Ok(Some(line)) => Some(Ok(self.parse_row(&line))),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(CsvError::io(&self.path, e)))
            }
        }
    }
}

/// Lazy sequence of bounded chunks; owns the open file via `RowIter`.
pub struct ChunkIter {
    rows: RowIter,
    chunk_size: usize,
}

impl ChunkIter {
    /// Header column names shared by every row in every chunk.
    pub fn columns(&self) -> &Arc<[String]> {
        self.rows.columns()
    }

    /// Configured maximum rows per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Iterator for ChunkIter {
    type Item = CsvResult<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = Vec::with_capacity(self.chunk_size);
        for result in self.rows.by_ref() {
            match result {
                Ok(row) => {
                    chunk.push(row);
                    if chunk.len() >= self.chunk_size {
                        return Some(Ok(chunk));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}

/// Terminator found by the line scanner.
enum Term {
    Lf,
    Cr,
    Eof,
}

/// Reads logical lines terminated by `\n`, `\r\n`, or bare `\r`.
///
/// `BufRead::lines` only splits on `\n`, so bare-`\r` files need a manual
/// scanner.
struct LineSource<R: BufRead> {
    inner: R,
}

impl<R: BufRead> LineSource<R> {
    fn new(inner: R) -> Self {
        Self { inner }
    }

    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut buf: Vec<u8> = Vec::new();
        loop {
            let (term, used) = {
                let available = self.inner.fill_buf()?;
                if available.is_empty() {
                    (Some(Term::Eof), 0)
                } else if let Some(pos) =
                    available.iter().position(|&b| b == b'\n' || b == b'\r')
                {
                    buf.extend_from_slice(&available[..pos]);
                    let term = if available[pos] == b'\r' {
                        Term::Cr
                    } else {
                        Term::Lf
                    };
                    (Some(term), pos + 1)
                } else {
                    buf.extend_from_slice(available);
                    (None, available.len())
                }
            };
            self.inner.consume(used);

            match term {
                None => continue,
                Some(Term::Eof) => {
                    return if buf.is_empty() {
                        Ok(None)
                    } else {
                        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
                    };
                }
                Some(Term::Cr) => {
                    // Swallow the \n of a \r\n pair
                    let skip = {
                        let available = self.inner.fill_buf()?;
                        available.first() == Some(&b'\n')
                    };
                    if skip {
                        self.inner.consume(1);
                    }
                    return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
                }
                Some(Term::Lf) => {
                    return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines_of(input: &str) -> Vec<String> {
        let mut source = LineSource::new(Cursor::new(input.as_bytes().to_vec()));
        let mut out = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            out.push(line);
        }
        out
    }

    #[test]
    fn test_lf_lines() {
        assert_eq!(lines_of("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(lines_of("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_bare_cr_lines() {
        assert_eq!(lines_of("a\rb\rc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mixed_endings() {
        assert_eq!(lines_of("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(lines_of("").is_empty());
    }

    #[test]
    fn test_blank_lines_preserved() {
        assert_eq!(lines_of("a\n\nb"), vec!["a", "", "b"]);
    }
}
