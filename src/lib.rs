//! A Parsing Expression Grammar (PEG) parser and recognizer using a packrat
//! algorithm with PEG atoms.
//!
//! The major purpose of this crate is to let the user run an arbitrary PEG,
//! written in Bryan Ford's notation, against arbitrary text.
//!
//! Function [`parse_grammar`] is used to parse grammar text into a [`Grammar`]
//! data structure. To recognize an input with it, please use [`Grammar::parse`],
//! which returns a [`MatchResult`] holding the consumed span, or the furthest
//! position reached if mismatched. To get the grammar back as text, please use
//! [`dump`] function.
//!
//! ```
//! use grammar_peg::parse_grammar;
//!
//! let g = parse_grammar("Greeting <- 'hello' (' ' 'world')?\n").unwrap();
//! assert!(!g.parse("hello world", "Greeting").unwrap().is_mismatch());
//! ```
//!
//! There are also some macros for building [`Expression`] structure from Rust
//! data, so a grammar can be assembled without any PEG source. The meta-grammar
//! of this crate is bootstrapped in exactly that way, and parses itself.
//!
//! If you want to raise your own error message from a mismatch position,
//! [`indicated_msg`] might be a good choice.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use crate::dumper::dump;
pub use crate::expr::*;
pub use crate::grammar::*;
pub use crate::indicator::*;
pub use crate::parser::{parse_grammar, Error};

/// Create [`Expression::Literal`] from anything convertible to a string.
///
/// ```
/// use grammar_peg::{lit, Expression};
/// assert_eq!(lit!("ab"), Expression::Literal("ab".into()));
/// ```
#[macro_export]
macro_rules! lit {
    ($s:expr) => {
        $crate::Expression::Literal($s.into())
    };
}

/// Create [`Expression::Class`] from characters and inclusive ranges.
///
/// ```
/// use grammar_peg::{class, CharClass, Expression};
/// let c = class!['a' => 'z', '_'];
/// assert_eq!(c, Expression::Class(CharClass::new().range('a', 'z').single('_')));
/// ```
#[macro_export]
macro_rules! class {
    (@acc $c:expr, ) => { $c };
    (@acc $c:expr, $lo:literal => $hi:literal $(, $($rest:tt)*)?) => {
        $crate::class!(@acc $c.range($lo, $hi), $($($rest)*)?)
    };
    (@acc $c:expr, $one:literal $(, $($rest:tt)*)?) => {
        $crate::class!(@acc $c.single($one), $($($rest)*)?)
    };
    ($($t:tt)*) => {
        $crate::Expression::Class($crate::class!(@acc $crate::CharClass::new(), $($t)*))
    };
}

/// Create [`Expression::Sequence`] from a list of expressions.
///
/// ```
/// use grammar_peg::{lit, seq, Expression};
/// let e = seq![lit!("a"), lit!("b")];
/// assert_eq!(e, Expression::Sequence(vec![lit!("a"), lit!("b")]));
/// ```
#[macro_export]
macro_rules! seq {
    ($($e:expr),+ $(,)?) => {
        $crate::Expression::Sequence(vec![$($e),+])
    };
}

/// Create [`Expression::Choice`] from a list of ordered alternatives.
///
/// ```
/// use grammar_peg::{alt, lit, Expression};
/// let e = alt![lit!("a"), lit!("b")];
/// assert_eq!(e, Expression::Choice(vec![lit!("a"), lit!("b")]));
/// ```
#[macro_export]
macro_rules! alt {
    ($($e:expr),+ $(,)?) => {
        $crate::Expression::Choice(vec![$($e),+])
    };
}

pub mod dumper;
mod expr;
mod grammar;
mod indicator;
pub mod parser;
#[cfg(test)]
mod tests;
