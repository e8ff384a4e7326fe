use alloc::{boxed::Box, string::String, vec::Vec};
use core::cmp::Ordering;

/// A set of code points, kept as sorted inclusive ranges.
///
/// Overlapping and adjacent ranges are merged when inserted, so the
/// membership test is a binary search over disjoint ranges.
///
/// ```
/// use grammar_peg::CharClass;
///
/// let c = CharClass::new().range('a', 'f').range('e', 'z').single('_');
/// assert!(c.contains('x'));
/// assert!(!c.contains('A'));
/// assert_eq!(c.ranges(), &[('_', '_'), ('a', 'z')]);
/// ```
#[derive(Hash, Eq, PartialEq, Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharClass {
    ranges: Vec<(char, char)>,
}

impl CharClass {
    /// Create an empty class, matching nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for inserting an inclusive range.
    ///
    /// A reversed pair is reordered before insertion.
    pub fn range(mut self, lo: char, hi: char) -> Self {
        let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let first = self.ranges.partition_point(|&(_, h)| (h as u32) + 1 < lo as u32);
        let last = first + self.ranges[first..].partition_point(|&(l, _)| (l as u32) <= hi as u32 + 1);
        if first < last {
            lo = lo.min(self.ranges[first].0);
            hi = hi.max(self.ranges[last - 1].1);
        }
        self.ranges.splice(first..last, [(lo, hi)]);
        self
    }

    /// Builder method for inserting a single code point.
    pub fn single(self, c: char) -> Self {
        self.range(c, c)
    }

    /// Whether the class contains the code point.
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if c < lo {
                    Ordering::Greater
                } else if c > hi {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// The normalized ranges, sorted and disjoint.
    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    /// Whether the class matches nothing.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// One parsing expression.
///
/// A [`Grammar`](crate::Grammar) maps rule names to expressions; the
/// [`Parser`](crate::parser::Parser) evaluates an expression at a document
/// position, consuming greedily and never backtracking into a committed
/// alternative.
///
/// Expressions can be built from PEG notation with
/// [`parse_grammar`](crate::parse_grammar), or literally with the
/// [`lit!`](crate::lit), [`class!`](crate::class), [`seq!`](crate::seq) and
/// [`alt!`](crate::alt) macros plus the builder methods here:
///
/// ```
/// use grammar_peg::{alt, lit, seq, Expression};
///
/// // !'a' ('b' / 'c')*
/// let e = seq![lit!("a").not_pred(), alt![lit!("b"), lit!("c")].star()];
/// ```
#[derive(Hash, Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expression {
    /// A fixed string, matched code point by code point.
    /// The empty literal matches everywhere and consumes nothing.
    Literal(String),
    /// One code point from a class.
    Class(CharClass),
    /// Any single code point.
    Dot,
    /// The rule with this name in the enclosing grammar.
    ///
    /// Resolved lazily while matching; an undefined name is an
    /// [`Error::UnknownRule`](crate::Error::UnknownRule) at that point.
    Reference(String),
    /// Each expression in order, atomic on failure.
    Sequence(Vec<Expression>),
    /// Ordered alternatives, committed to the first success.
    Choice(Vec<Expression>),
    /// `e?`, always succeeds.
    Optional(Box<Expression>),
    /// `e*`, greedy, always succeeds.
    Star(Box<Expression>),
    /// `e+`, greedy, at least one match.
    Plus(Box<Expression>),
    /// `&e`, succeeds iff `e` would succeed here, consumes nothing.
    And(Box<Expression>),
    /// `!e`, succeeds iff `e` would fail here, consumes nothing.
    Not(Box<Expression>),
}

impl Expression {
    /// Create a reference to the rule `name`.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Builder method for the `?` suffix.
    pub fn opt(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Builder method for the `*` suffix.
    pub fn star(self) -> Self {
        Self::Star(Box::new(self))
    }

    /// Builder method for the `+` suffix.
    pub fn plus(self) -> Self {
        Self::Plus(Box::new(self))
    }

    /// Builder method for the `&` prefix.
    pub fn and_pred(self) -> Self {
        Self::And(Box::new(self))
    }

    /// Builder method for the `!` prefix.
    pub fn not_pred(self) -> Self {
        Self::Not(Box::new(self))
    }
}
