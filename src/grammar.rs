use crate::{
    parser::{Error, Parser},
    Expression,
};
use alloc::string::String;
use ritelinked::LinkedHashMap;

/// The result of one match attempt, see [`Grammar::parse`].
///
/// A mismatch is a normal outcome, not an error; branch on it with
/// [`is_mismatch`] without any error handling:
///
/// ```
/// use grammar_peg::{is_mismatch, parse_grammar};
///
/// let g = parse_grammar("S <- 'a'\n").unwrap();
/// assert!(!is_mismatch(&g.parse("a", "S").unwrap()));
/// assert!(is_mismatch(&g.parse("b", "S").unwrap()));
/// ```
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchResult {
    /// The grammar matched the document span `start..end`,
    /// in code point indices.
    Match {
        /// Start position, always zero for a top level match.
        start: usize,
        /// End position, the prefix `0..end` was consumed.
        end: usize,
    },
    /// The grammar does not match at position zero.
    Mismatch {
        /// The furthest position the parser probed while trying,
        /// for diagnostics only.
        furthest: usize,
    },
}

impl MatchResult {
    /// Whether this is a mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }

    /// The consumed end position, if matched.
    pub fn end(&self) -> Option<usize> {
        match self {
            Self::Match { end, .. } => Some(*end),
            Self::Mismatch { .. } => None,
        }
    }
}

/// Whether the result of [`Grammar::parse`] is a mismatch.
pub fn is_mismatch(result: &MatchResult) -> bool {
    result.is_mismatch()
}

/// A set of named rules in definition order.
///
/// The first defined rule is the default starting rule. A grammar is
/// immutable once built and can be shared between parser invocations;
/// each invocation owns its own packrat table.
///
/// ```
/// use grammar_peg::{parse_grammar, MatchResult};
///
/// let g = parse_grammar("Sum <- Value ('+' Value)*\nValue <- [0-9]+\n").unwrap();
/// assert_eq!(g.start(), Some("Sum"));
/// let r = g.parse("1+2+3", "Sum").unwrap();
/// assert_eq!(r, MatchResult::Match { start: 0, end: 5 });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: LinkedHashMap<String, Expression>,
}

impl Grammar {
    /// Create an empty grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for appending a rule.
    ///
    /// ```
    /// use grammar_peg::{lit, Grammar, MatchResult};
    ///
    /// let g = Grammar::new().with_rule("S", lit!("ab").star());
    /// assert_eq!(g.parse("abab", "S").unwrap(), MatchResult::Match { start: 0, end: 4 });
    /// ```
    pub fn with_rule(mut self, name: impl Into<String>, expr: Expression) -> Self {
        self.insert(name, expr);
        self
    }

    /// Insert a rule, returning the replaced expression if the name was taken.
    pub fn insert(&mut self, name: impl Into<String>, expr: Expression) -> Option<Expression> {
        self.rules.insert(name.into(), expr)
    }

    /// The expression of the rule `name`.
    pub fn get(&self, name: &str) -> Option<&Expression> {
        self.rules.get(name)
    }

    /// The default starting rule, the first one defined.
    pub fn start(&self) -> Option<&str> {
        self.rules.iter().next().map(|(name, _)| name.as_str())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the grammar has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate the rules in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expression)> {
        self.rules.iter().map(|(name, expr)| (name.as_str(), expr))
    }

    /// Attempt to recognize a prefix of `doc` with the rule `start`.
    ///
    /// Returns [`MatchResult::Match`] over the longest prefix the rule
    /// covers, or [`MatchResult::Mismatch`] with the furthest probed
    /// position. An undefined starting rule, or an undefined rule reached
    /// through a reference during the match, is an
    /// [`Error::UnknownRule`].
    pub fn parse(&self, doc: &str, start: &str) -> Result<MatchResult, Error> {
        Parser::new(self, doc).parse(start)
    }

    /// Same as [`Grammar::parse`], starting from the first defined rule.
    pub fn parse_default(&self, doc: &str) -> Result<MatchResult, Error> {
        match self.start() {
            Some(start) => Parser::new(self, doc).parse(start),
            None => Err(Error::UnknownRule { name: String::new() }),
        }
    }
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.rules.len() == other.rules.len()
            && self.rules.iter().zip(other.rules.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for Grammar {}

impl FromIterator<(String, Expression)> for Grammar {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, Expression)>,
    {
        Self { rules: iter.into_iter().collect() }
    }
}
