//! # Basic Types
//!
//! The clause type shared by the parser and the encoders.

use std::fmt;

/// A single clause of a DIMACS CNF document
///
/// A clause keeps both views of its source line: the raw bytes, which the
/// grayscale encoding draws, and the signed IPASIR-style literals, which the
/// color encoding draws. Clauses are created once by the parser and never
/// modified afterwards.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Clause {
    raw: Vec<u8>,
    lits: Vec<i32>,
}

impl Clause {
    /// Creates a clause from its raw line bytes and its literals
    #[must_use]
    pub fn new(raw: Vec<u8>, lits: Vec<i32>) -> Self {
        Self { raw, lits }
    }

    /// The bytes of the untrimmed source line, including separators and the
    /// optional terminating `0`
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The literals of the clause in source order, without the terminating `0`
    #[must_use]
    pub fn lits(&self) -> &[i32] {
        &self.lits
    }

    /// Gets the number of literals in the clause
    #[must_use]
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    /// Checks if the clause has no literals
    ///
    /// This is only the case for a line consisting of just a terminator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("raw", &String::from_utf8_lossy(&self.raw))
            .field("lits", &self.lits)
            .finish()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, lit) in self.lits.iter().enumerate() {
            if idx > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{lit}")?;
        }
        write!(f, ")")
    }
}

/// Creates a [`Clause`] from a source line literal, for use in tests
///
/// # Panics
///
/// If the line is not a valid clause line.
#[cfg(test)]
macro_rules! clause {
    ($line:expr) => {
        $crate::instances::fio::dimacs::parse_clause($line).unwrap()
    };
}
