use crate::indicator::indicated_msg;
use alloc::{format, string::String};
use core::fmt::{Display, Error as FmtError, Formatter};

/// Type of the evaluator result.
pub(crate) type PResult<T> = Result<T, PError>;

/// The outcome of one evaluation step, internal to the evaluator.
#[derive(Debug)]
pub(crate) enum PError {
    /// If the expression mismatched, just choose another branch.
    Mismatch,
    /// A referenced rule is not defined, the whole match is aborted.
    Unknown(String),
}

impl PError {
    /// A "than" function for the branch handling, execute the given
    /// function when mismatched.
    pub(crate) fn or<R, F>(self, f: F) -> PResult<R>
    where
        F: FnOnce() -> PResult<R>,
    {
        match self {
            Self::Mismatch => f(),
            Self::Unknown(_) => Err(self),
        }
    }
}

/// The errors of grammar handling, returned by
/// [`parse_grammar`](super::parse_grammar) and
/// [`Grammar::parse`](crate::Grammar::parse).
///
/// A plain mismatch is not listed here; it is an ordinary
/// [`MatchResult`](crate::MatchResult) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The grammar text is not valid PEG notation, or does not cover the
    /// entire document. The payload is the furthest position reached.
    Syntax {
        /// Document position, in code points.
        furthest: usize,
    },
    /// The starting rule, or a rule reached through a reference while
    /// matching, is not defined in the grammar.
    UnknownRule {
        /// Name of the missing rule.
        name: String,
    },
}

impl Error {
    /// Render the error over the source document with a position indicator.
    ///
    /// ```
    /// use grammar_peg::parse_grammar;
    ///
    /// let doc = "S <- 'a' @";
    /// let e = parse_grammar(doc).unwrap_err();
    /// assert_eq!(e.into_msg(doc), "invalid grammar syntax:\n\n1:10\nS <- 'a' @\n         ^");
    /// ```
    pub fn into_msg(self, doc: &str) -> String {
        match self {
            Self::Syntax { furthest } => {
                format!("invalid grammar syntax:\n\n{}", indicated_msg(doc, furthest))
            }
            Self::UnknownRule { name } => format!("unknown rule: {}", name),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        match self {
            Self::Syntax { furthest } => {
                write!(f, "invalid grammar syntax at position {}", furthest)
            }
            Self::UnknownRule { name } => write!(f, "unknown rule: {}", name),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
