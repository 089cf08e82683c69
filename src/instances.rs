//! # CNF Document Representation
//!
//! The in-memory model of a DIMACS CNF file: the header values, the comment
//! block, the clauses in file order and the frequency of every distinct
//! literal. A [`CnfDocument`] is built by a single pass over the input and is
//! immutable afterwards, so both encoders can read it independently.

use std::{
    io::{self, BufRead},
    path::Path,
    str::FromStr,
};

use rustc_hash::FxHashMap;

use crate::types::Clause;

pub mod fio;

use fio::{dimacs::CnfLine, ParsingError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Removes a trailing `\n` or `\r\n`
fn strip_line_ending(line: &[u8]) -> &[u8] {
    match line {
        [rest @ .., b'\r', b'\n'] | [rest @ .., b'\n'] => rest,
        _ => line,
    }
}

/// A parsed DIMACS CNF file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CnfDocument {
    format: String,
    n_vars: u32,
    n_clauses: u32,
    comment: String,
    clauses: Vec<Clause>,
    literal_frequency: FxHashMap<i32, usize>,
    total_byte_count: usize,
}

impl CnfDocument {
    /// Parses a DIMACS CNF document from a reader object.
    ///
    /// # File Format
    ///
    /// Lines end in `\n` or `\r\n`, a leading UTF-8 byte order mark is
    /// skipped and invalid UTF-8 is decoded lossily. Lines are classified by their first non-blank character: `c` lines are
    /// comments, the `p` line declares `p <format> <n_vars> <n_clauses>`, and
    /// every other line is a clause of blank-separated literals, optionally
    /// terminated by `0`. The header counts are stored but not validated
    /// against the clauses.
    ///
    /// # Errors
    ///
    /// [`ParsingError::IO`] if reading fails, [`ParsingError::Dimacs`] with the
    /// line number on the first malformed (or empty) line.
    pub fn from_dimacs<R: io::Read>(reader: R) -> Result<Self, ParsingError> {
        let mut reader = io::BufReader::new(reader);
        let mut doc = CnfDocument::default();
        let mut buf = Vec::new();
        let mut idx = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            idx += 1;
            let mut bytes = strip_line_ending(&buf);
            if idx == 1 {
                bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            }
            // invalid UTF-8 only survives in comments, clause lines reject the
            // replacement character as non-ASCII
            let line = String::from_utf8_lossy(bytes);
            match fio::dimacs::parse_line(&line) {
                Ok(CnfLine::Comment(text)) => {
                    if !doc.comment.is_empty() {
                        doc.comment.push('\n');
                    }
                    doc.comment.push_str(&text);
                }
                Ok(CnfLine::Header(header)) => {
                    doc.format = header.format;
                    doc.n_vars = header.n_vars;
                    doc.n_clauses = header.n_clauses;
                }
                Ok(CnfLine::Clause(clause)) => doc.add_clause(clause),
                Err(source) => {
                    return Err(ParsingError::Dimacs {
                        line: idx,
                        content: line.into_owned(),
                        source,
                    })
                }
            }
        }
        log::debug!(
            "parsed {} clauses ({} bytes, {} distinct literals)",
            doc.clauses.len(),
            doc.total_byte_count,
            doc.literal_frequency.len()
        );
        Ok(doc)
    }

    /// Parses a DIMACS CNF document from a file path. For more details see
    /// [`CnfDocument::from_dimacs`]. With feature `compression` supports
    /// bzip2, gzip and xz compression, detected by the file extension.
    ///
    /// # Errors
    ///
    /// If the file cannot be opened or parsing fails.
    pub fn from_dimacs_path<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let reader = fio::open_compressed_uncompressed_read(path)?;
        CnfDocument::from_dimacs(reader)
    }

    fn add_clause(&mut self, clause: Clause) {
        for &lit in clause.lits() {
            *self.literal_frequency.entry(lit).or_insert(0) += 1;
        }
        self.total_byte_count += clause.raw().len();
        self.clauses.push(clause);
    }

    /// The format tag of the parameter line, empty if there was none
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The number of variables declared in the parameter line
    #[must_use]
    pub fn n_vars(&self) -> u32 {
        self.n_vars
    }

    /// The number of clauses declared in the parameter line
    ///
    /// This is not necessarily the number of clauses in the document, see
    /// [`CnfDocument::clauses`].
    #[must_use]
    pub fn n_clauses(&self) -> u32 {
        self.n_clauses
    }

    /// The comment lines, joined by newlines
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// The clauses in file order
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Occurrence counts of every distinct literal over all clauses
    #[must_use]
    pub fn literal_frequency(&self) -> &FxHashMap<i32, usize> {
        &self.literal_frequency
    }

    /// The sum of the raw line lengths over all clauses
    #[must_use]
    pub fn total_byte_count(&self) -> usize {
        self.total_byte_count
    }

    /// The distinct literals of the document in ascending numeric order
    #[must_use]
    pub fn sorted_literals(&self) -> Vec<i32> {
        let mut lits: Vec<i32> = self.literal_frequency.keys().copied().collect();
        lits.sort_unstable();
        lits
    }
}

impl FromStr for CnfDocument {
    type Err = ParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CnfDocument::from_dimacs(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{fio::dimacs, CnfDocument, ParsingError};

    #[test]
    fn parse_small_document() {
        let doc: CnfDocument = "c test\np cnf 2 1\n1 -2 0\n".parse().unwrap();
        assert_eq!(doc.format(), "cnf");
        assert_eq!(doc.n_vars(), 2);
        assert_eq!(doc.n_clauses(), 1);
        assert_eq!(doc.comment(), "test");
        assert_eq!(doc.clauses().len(), 1);
        assert_eq!(doc.clauses()[0].lits(), &[1, -2]);
        assert_eq!(doc.total_byte_count(), 6);
    }

    #[test]
    fn comments_are_joined() {
        let doc: CnfDocument = "c first\n  c   second\np cnf 1 1\nc third\n1 0"
            .parse()
            .unwrap();
        assert_eq!(doc.comment(), "first\nsecond\nthird");
    }

    #[test]
    fn header_not_validated() {
        let doc: CnfDocument = "p cnf 1 5\n3 4 0\n".parse().unwrap();
        assert_eq!(doc.n_vars(), 1);
        assert_eq!(doc.n_clauses(), 5);
        assert_eq!(doc.clauses().len(), 1);
    }

    #[test]
    fn literal_frequency() {
        let doc: CnfDocument = "p cnf 3 3\n3 -3 1 0\n-3 1 0\n1 0\n".parse().unwrap();
        let freq = doc.literal_frequency();
        assert_eq!(freq.len(), 3);
        assert_eq!(freq[&1], 3);
        assert_eq!(freq[&3], 1);
        assert_eq!(freq[&-3], 2);
        assert_eq!(doc.sorted_literals(), vec![-3, 1, 3]);
    }

    #[test]
    fn error_names_line() {
        let err = "c ok\np cnf 2 2\n1 2 0\n1 x 0\n"
            .parse::<CnfDocument>()
            .unwrap_err();
        assert_eq!(err.line(), Some(4));
        match err {
            ParsingError::Dimacs {
                line,
                content,
                source,
            } => {
                assert_eq!(line, 4);
                assert_eq!(content, "1 x 0");
                assert_eq!(source, dimacs::Error::InvalidLiteral(String::from("x")));
            }
            ParsingError::IO(_) => panic!("expected a dimacs error"),
        }
    }

    #[test]
    fn empty_line_rejected() {
        let err = "p cnf 2 2\n1 2 0\n\n2 0\n"
            .parse::<CnfDocument>()
            .unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Dimacs {
                line: 3,
                source: dimacs::Error::EmptyLine,
                ..
            }
        ));
    }

    #[test]
    fn malformed_header_rejected() {
        let err = "p cnf 2\n1 2 0\n".parse::<CnfDocument>().unwrap_err();
        assert!(matches!(
            err,
            ParsingError::Dimacs {
                line: 1,
                source: dimacs::Error::InvalidHeader,
                ..
            }
        ));
    }

    #[test]
    fn empty_input() {
        let doc: CnfDocument = "".parse().unwrap();
        assert!(doc.clauses().is_empty());
        assert!(doc.sorted_literals().is_empty());
        assert_eq!(doc.total_byte_count(), 0);
    }

    #[test]
    fn crlf_line_endings() {
        let doc: CnfDocument = "p cnf 2 1\r\n1 -2 0\r\n".parse().unwrap();
        assert_eq!(doc.clauses()[0].raw(), b"1 -2 0");
    }

    #[test]
    fn non_utf8_comment_accepted() {
        let doc = CnfDocument::from_dimacs(&b"c a\xE7\xE3o\np cnf 2 1\n1 -2 0\n"[..]).unwrap();
        assert_eq!(doc.comment(), "a\u{FFFD}\u{FFFD}o");
        assert_eq!(doc.clauses()[0].lits(), &[1, -2]);
    }

    #[test]
    fn non_utf8_clause_rejected() {
        let err = CnfDocument::from_dimacs(&b"p cnf 2 2\n1 -2 0\n2 \xE7 0\n"[..]).unwrap_err();
        match err {
            ParsingError::Dimacs {
                line,
                content,
                source,
            } => {
                assert_eq!(line, 3);
                assert_eq!(content, "2 \u{FFFD} 0");
                assert_eq!(source, dimacs::Error::NonAscii);
            }
            ParsingError::IO(_) => panic!("expected a dimacs error"),
        }
    }

    #[test]
    fn leading_bom_skipped() {
        let doc: CnfDocument = "\u{FEFF}c test\np cnf 2 1\n1 -2 0\n".parse().unwrap();
        assert_eq!(doc.comment(), "test");
        assert_eq!(doc.clauses().len(), 1);

        let doc: CnfDocument = "\u{FEFF}1 -2 0\n".parse().unwrap();
        assert_eq!(doc.clauses()[0].raw(), b"1 -2 0");

        // only at the start of the input
        let err = "c test\n\u{FEFF}1 0\n".parse::<CnfDocument>().unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn line_endings_stripped() {
        let doc: CnfDocument = "p cnf 3 2\n1 -2 0\r\n3 0".parse().unwrap();
        assert_eq!(doc.clauses()[0].raw(), b"1 -2 0");
        assert_eq!(doc.clauses()[1].raw(), b"3 0");
    }

    #[test]
    fn from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "c from a file\np cnf 3 2\n1 -2 0\n-3 0\n").unwrap();
        file.flush().unwrap();
        let doc = CnfDocument::from_dimacs_path(file.path()).unwrap();
        assert_eq!(doc.comment(), "from a file");
        assert_eq!(doc.clauses().len(), 2);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = CnfDocument::from_dimacs_path(dir.path().join("nonexistent.cnf"));
        assert!(matches!(res, Err(ParsingError::IO(_))));
    }
}
