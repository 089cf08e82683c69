//! # Parsing DIMACS CNF Lines
//!
//! Internal module containing the line-level parsers for DIMACS CNF files.
//! Every line is classified by its first non-blank character: `c` starts a
//! comment, `p` starts the parameter line and anything else is a clause.
//!
//! Clause lines are split on single blanks, exactly like the raw bytes are laid
//! out, so that the literal view and the byte view of a clause stay aligned.
//!
//! ## References
//!
//! - [DIMACS CNF](http://www.satcompetition.org/2011/format-benchmarks2011.html)

use nom::{
    bytes::complete::take_till1,
    character::complete::{char, i32, space0, space1, u32},
    combinator::all_consuming,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::types::Clause;

/// Parsing errors that can occur on a single DIMACS line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The line is empty after trimming
    #[error("line has no content to classify")]
    EmptyLine,
    /// The parameter line does not have the form `p <format> <vars> <clauses>`
    #[error("invalid parameter line, expected `p <format> <n_vars> <n_clauses>`")]
    InvalidHeader,
    /// A clause token is not a signed integer
    #[error("`{0}` is not a valid literal")]
    InvalidLiteral(String),
    /// A clause line contains characters that do not fit in a single byte
    #[error("clause line contains non-ASCII characters")]
    NonAscii,
}

/// The data of a DIMACS parameter line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The format tag, typically `cnf`; stored but not interpreted
    pub format: String,
    /// The number of variables declared by the header
    pub n_vars: u32,
    /// The number of clauses declared by the header
    pub n_clauses: u32,
}

/// A classified line of a DIMACS CNF file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CnfLine {
    /// A comment, with the leading `c` and following blanks removed
    Comment(String),
    /// The parameter line
    Header(Header),
    /// A clause
    Clause(Clause),
}

/// Parses and classifies a single line (without line ending)
///
/// # Errors
///
/// If the line is empty, or the header or clause on it is malformed.
pub fn parse_line(line: &str) -> Result<CnfLine, Error> {
    let trimmed = line.trim_start();
    match trimmed.chars().next() {
        None => Err(Error::EmptyLine),
        Some('c') => Ok(CnfLine::Comment(trimmed[1..].trim_start().to_owned())),
        Some('p') => match p_line(trimmed.trim_end()) {
            Ok((_, (format, n_vars, n_clauses))) => Ok(CnfLine::Header(Header {
                format: format.to_owned(),
                n_vars,
                n_clauses,
            })),
            Err(_) => Err(Error::InvalidHeader),
        },
        Some(_) => parse_clause(line).map(CnfLine::Clause),
    }
}

/// Parses a clause line
///
/// The raw bytes are taken from the untrimmed line. Literals are read up to the
/// first `0` token, which terminates the clause; a missing terminator is
/// tolerated.
///
/// # Errors
///
/// If the line contains non-ASCII characters or a token that is not a signed
/// integer.
pub fn parse_clause(line: &str) -> Result<Clause, Error> {
    if !line.is_ascii() {
        return Err(Error::NonAscii);
    }
    let lits = line
        .split(' ')
        .take_while(|tok| tok.trim() != "0")
        .map(parse_lit)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Clause::new(line.as_bytes().to_vec(), lits))
}

/// Parses a single literal token, tolerating surrounding whitespace
fn parse_lit(token: &str) -> Result<i32, Error> {
    match all_consuming(lit)(token.trim()) {
        Ok((_, l)) => Ok(l),
        Err(_) => Err(Error::InvalidLiteral(token.to_owned())),
    }
}

/// Parses a signed integer literal
fn lit(input: &str) -> IResult<&str, i32> {
    i32(input)
}

/// Parses a trimmed parameter line into the format tag, the number of
/// variables and the number of clauses
fn p_line(input: &str) -> IResult<&str, (&str, u32, u32)> {
    all_consuming(tuple((
        preceded(
            terminated(char('p'), space1),
            terminated(take_till1(|c: char| c.is_ascii_whitespace()), space1),
        ),
        terminated(u32, space1),
        terminated(u32, space0),
    )))(input)
}
