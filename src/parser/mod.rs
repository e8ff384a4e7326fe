//! Parser components, includes the recognizer and the parser error.
//!
//! This recognizer is a greedy algorithm with ordered choice: an
//! alternative that matched successfully is committed, and a later failure
//! will not reconsider it. Syntactic predicates (`&`, `!`) probe the
//! document without consuming, and repetitions (`*`, `+`) consume
//! maximally.
//!
//! Each [`Parser`] evaluates one [`Grammar`] against one document. The
//! outcome of every rule entry is cached per position (packrat), which
//! keeps the match linear in the document length and turns left-recursive
//! re-entries into plain mismatches instead of unbounded recursion.
//!
//! # Errors
//!
//! + unknown rule: the starting rule, or a rule referenced while matching,
//!   is not defined in the grammar.
//! + grammar syntax: the text given to [`parse_grammar`] is not valid PEG
//!   notation, or does not cover the entire document.
//!
//! A plain mismatch is not an error, it is returned as
//! [`MatchResult::Mismatch`] with the furthest probed position.
pub use self::error::Error;
pub(crate) use self::error::{PError, PResult};
pub(crate) use self::kernel::Memo;
use crate::{Expression, Grammar, MatchResult};
use alloc::{rc::Rc, string::String, vec::Vec};
use ritelinked::LinkedHashMap;

mod builder;
mod error;
mod kernel;
pub(crate) mod meta;

/// One node of the concrete syntax tree: which rule matched which span.
///
/// Only rule entries are recorded; the grammar builder walks these nodes
/// to translate a meta-parse back into expressions.
#[derive(Debug)]
pub(crate) struct RuleNode {
    pub(crate) name: String,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) children: Vec<Rc<RuleNode>>,
}

impl RuleNode {
    /// First child matched by the rule `name`.
    pub(crate) fn find(&self, name: &str) -> Option<&RuleNode> {
        self.children.iter().find(|n| n.name == name).map(|n| &**n)
    }

    /// All children matched by the rule `name`, in document order.
    pub(crate) fn all<'n>(&'n self, name: &'n str) -> impl Iterator<Item = &'n RuleNode> {
        self.children.iter().filter(move |n| n.name == name).map(|n| &**n)
    }
}

/// A PEG recognizer over one grammar and one document.
///
/// The document is decoded once; every position is a code point index.
/// [`Grammar::parse`] is a shorthand for building one of these, but the
/// parser can be reused for several starting rules on the same document:
///
/// ```
/// use grammar_peg::{parse_grammar, parser::Parser, MatchResult};
///
/// let g = parse_grammar("S <- 'ab'*\n").unwrap();
/// let mut p = Parser::new(&g, "ababx");
/// assert_eq!(p.parse("S").unwrap(), MatchResult::Match { start: 0, end: 4 });
/// ```
pub struct Parser<'a> {
    doc: Vec<char>,
    /// Current position.
    pub pos: usize,
    furthest: usize,
    index: LinkedHashMap<&'a str, usize>,
    exprs: Vec<&'a Expression>,
    memo: LinkedHashMap<(usize, usize), Memo>,
}

impl<'a> Parser<'a> {
    /// Create a recognizer for the grammar over the document.
    pub fn new(grammar: &'a Grammar, doc: &str) -> Self {
        let mut index = LinkedHashMap::new();
        let mut exprs = Vec::new();
        for (name, expr) in grammar.iter() {
            index.insert(name, exprs.len());
            exprs.push(expr);
        }
        Self {
            doc: doc.chars().collect(),
            pos: 0,
            furthest: 0,
            index,
            exprs,
            memo: LinkedHashMap::new(),
        }
    }

    /// Document length in code points.
    pub fn len(&self) -> usize {
        self.doc.len()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    /// The furthest position probed by the last [`Parser::parse`] call.
    pub fn furthest(&self) -> usize {
        self.furthest
    }

    /// Get the text between two positions.
    pub fn text(&self, start: usize, end: usize) -> String {
        self.doc[start..end].iter().collect()
    }

    /// Attempt to match the rule `start` against a prefix of the document.
    ///
    /// The packrat table and the furthest counter are reset on entry, so
    /// repeated calls are independent.
    pub fn parse(&mut self, start: &str) -> Result<MatchResult, Error> {
        Ok(match self.parse_tree(start)? {
            Some(node) => MatchResult::Match { start: 0, end: node.end },
            None => MatchResult::Mismatch { furthest: self.furthest },
        })
    }

    /// Same as [`Parser::parse`], but returns the concrete syntax tree of
    /// rule entries on success.
    pub(crate) fn parse_tree(&mut self, start: &str) -> Result<Option<Rc<RuleNode>>, Error> {
        self.pos = 0;
        self.furthest = 0;
        self.memo.clear();
        let mut out = Vec::new();
        match self.reference(start, &mut out) {
            Ok(()) => Ok(out.pop()),
            Err(PError::Mismatch) => Ok(None),
            Err(PError::Unknown(name)) => Err(Error::UnknownRule { name }),
        }
    }
}

/// Parse PEG grammar text into a [`Grammar`].
///
/// The text must be covered entirely, a trailing rest is a syntax error.
/// References are not resolved here: a rule may refer to a name defined
/// later, and an undefined name only fails the
/// [`Grammar::parse`] call that reaches it.
///
/// ```
/// use grammar_peg::{parse_grammar, MatchResult};
///
/// let g = parse_grammar(
///     "
/// ## A tiny arithmetic recognizer
/// Sum   <- Value ([-+] Value)*
/// Value <- [0-9]+ / '(' Sum ')'
/// ",
/// )
/// .unwrap();
/// assert_eq!(g.parse("1+(2-3)", "Sum").unwrap(), MatchResult::Match { start: 0, end: 7 });
/// ```
pub fn parse_grammar(doc: &str) -> Result<Grammar, Error> {
    let meta = meta::meta_grammar();
    let mut p = Parser::new(&meta, doc);
    match p.parse_tree("Grammar")? {
        Some(root) if root.end == p.len() => builder::build(&p, &root),
        _ => Err(Error::Syntax { furthest: p.furthest() }),
    }
}
