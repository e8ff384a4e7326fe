use super::*;
use crate::CharClass;
use alloc::string::ToString;

/// One packrat table entry, keyed on rule ordinal and position.
#[derive(Debug)]
pub(crate) enum Memo {
    /// The rule failed here, or is still being evaluated here.
    Fail,
    /// The rule matched here, ending at [`RuleNode::end`].
    Done(Rc<RuleNode>),
}

/// The expression evaluator.
///
/// Every method restores the cursor and the recorded nodes on mismatch,
/// so the caller can try another branch from the same position.
impl<'a> Parser<'a> {
    /// Evaluate one expression at the current position.
    pub(crate) fn eval(&mut self, e: &'a Expression, out: &mut Vec<Rc<RuleNode>>) -> PResult<()> {
        match e {
            Expression::Literal(s) => self.literal(s),
            Expression::Class(c) => self.class(c),
            Expression::Dot => self.any(),
            Expression::Reference(name) => self.reference(name, out),
            Expression::Sequence(seq) => {
                let (pos, mark) = (self.pos, out.len());
                for e in seq {
                    if let Err(e) = self.eval(e, out) {
                        self.pos = pos;
                        out.truncate(mark);
                        return Err(e);
                    }
                }
                Ok(())
            }
            Expression::Choice(alt) => {
                for e in alt {
                    match self.eval(e, out) {
                        Err(PError::Mismatch) => (),
                        ret => return ret,
                    }
                }
                Err(PError::Mismatch)
            }
            Expression::Optional(e) => match self.eval(e, out) {
                Err(e) => e.or(|| Ok(())),
                ret => ret,
            },
            Expression::Star(e) => self.repeat(e, out, 0),
            Expression::Plus(e) => self.repeat(e, out, 1),
            Expression::And(e) => self.lookahead(e, true),
            Expression::Not(e) => self.lookahead(e, false),
        }
    }

    /// Look at the current code point, tracking the furthest probe.
    fn probe(&mut self) -> Option<char> {
        if self.pos > self.furthest {
            self.furthest = self.pos;
        }
        self.doc.get(self.pos).copied()
    }

    /// Match a fixed string, code point by code point.
    fn literal(&mut self, s: &str) -> PResult<()> {
        let pos = self.pos;
        for c in s.chars() {
            if self.probe() != Some(c) {
                self.pos = pos;
                return Err(PError::Mismatch);
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// Match one code point from a class.
    fn class(&mut self, class: &CharClass) -> PResult<()> {
        match self.probe() {
            Some(c) if class.contains(c) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(PError::Mismatch),
        }
    }

    /// Match any single code point.
    fn any(&mut self) -> PResult<()> {
        match self.probe() {
            Some(_) => {
                self.pos += 1;
                Ok(())
            }
            None => Err(PError::Mismatch),
        }
    }

    /// Enter the rule `name`, consulting the packrat table first.
    ///
    /// The entry is seeded with [`Memo::Fail`] before the rule body runs:
    /// a left-recursive re-entry at the same position reads the seed and
    /// mismatches instead of recursing.
    pub(crate) fn reference(&mut self, name: &str, out: &mut Vec<Rc<RuleNode>>) -> PResult<()> {
        let idx = match self.index.get(name) {
            Some(idx) => *idx,
            None => return Err(PError::Unknown(name.to_string())),
        };
        if self.pos > self.furthest {
            self.furthest = self.pos;
        }
        let start = self.pos;
        match self.memo.get(&(idx, start)) {
            Some(Memo::Fail) => return Err(PError::Mismatch),
            Some(Memo::Done(node)) => {
                self.pos = node.end;
                out.push(node.clone());
                return Ok(());
            }
            None => (),
        }
        self.memo.insert((idx, start), Memo::Fail);
        let expr = self.exprs[idx];
        let mut children = Vec::new();
        match self.eval(expr, &mut children) {
            Ok(()) => {
                let node = Rc::new(RuleNode {
                    name: name.to_string(),
                    start,
                    end: self.pos,
                    children,
                });
                self.memo.insert((idx, start), Memo::Done(node.clone()));
                out.push(node);
                Ok(())
            }
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    /// Match `e` greedily, at least `least` times.
    ///
    /// A successful round that does not advance the cursor ends the
    /// repetition, so an empty match cannot loop.
    fn repeat(&mut self, e: &'a Expression, out: &mut Vec<Rc<RuleNode>>, least: usize) -> PResult<()> {
        let mut round = 0;
        loop {
            let pos = self.pos;
            match self.eval(e, out) {
                Ok(()) => {
                    round += 1;
                    if self.pos == pos {
                        break;
                    }
                }
                Err(PError::Mismatch) => break,
                Err(e) => return Err(e),
            }
        }
        if round < least {
            Err(PError::Mismatch)
        } else {
            Ok(())
        }
    }

    /// Evaluate `e` as a predicate, then restore the cursor.
    ///
    /// Nodes recorded under the probe are discarded; the furthest counter
    /// is kept, it never rolls back.
    fn lookahead(&mut self, e: &'a Expression, expect: bool) -> PResult<()> {
        let pos = self.pos;
        let mut scratch = Vec::new();
        let ret = self.eval(e, &mut scratch);
        self.pos = pos;
        match ret {
            Ok(()) if expect => Ok(()),
            Ok(()) => Err(PError::Mismatch),
            Err(PError::Mismatch) if expect => Err(PError::Mismatch),
            Err(PError::Mismatch) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
