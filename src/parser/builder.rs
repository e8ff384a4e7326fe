use super::{Error, Parser, RuleNode};
use crate::{CharClass, Expression, Grammar};
use alloc::{string::String, vec::Vec};

/// Translate the syntax tree of a meta-parse into a [`Grammar`].
///
/// The tree shapes below are fixed by the hard-coded meta-grammar, so the
/// walk dispatches on child rule names and counts only.
pub(crate) fn build(p: &Parser, root: &RuleNode) -> Result<Grammar, Error> {
    let mut g = Grammar::new();
    for def in root.all("Definition") {
        let (name, expr) = definition(p, def);
        if g.insert(name, expr).is_some() {
            // Redefinition, point at the second occurrence.
            return Err(Error::Syntax { furthest: def.start });
        }
    }
    Ok(g)
}

fn definition(p: &Parser, node: &RuleNode) -> (String, Expression) {
    match &node.children[..] {
        [id, _arrow, expr] => (identifier(p, id), expression(p, expr)),
        _ => unreachable!(),
    }
}

fn expression(p: &Parser, node: &RuleNode) -> Expression {
    let mut alt: Vec<_> = node.all("Sequence").map(|n| sequence(p, n)).collect();
    if alt.len() == 1 {
        alt.remove(0)
    } else {
        Expression::Choice(alt)
    }
}

fn sequence(p: &Parser, node: &RuleNode) -> Expression {
    let mut seq: Vec<_> = node.all("Prefix").map(|n| prefix(p, n)).collect();
    match seq.len() {
        // An empty alternative matches the empty string.
        0 => Expression::Literal(String::new()),
        1 => seq.remove(0),
        _ => Expression::Sequence(seq),
    }
}

fn prefix(p: &Parser, node: &RuleNode) -> Expression {
    match &node.children[..] {
        [op, suf] if op.name == "AND" => suffix(p, suf).and_pred(),
        [op, suf] if op.name == "NOT" => suffix(p, suf).not_pred(),
        [suf] => suffix(p, suf),
        _ => unreachable!(),
    }
}

fn suffix(p: &Parser, node: &RuleNode) -> Expression {
    match &node.children[..] {
        [prim] => primary(p, prim),
        [prim, op] => {
            let e = primary(p, prim);
            match op.name.as_str() {
                "QUESTION" => e.opt(),
                "STAR" => e.star(),
                _ => e.plus(),
            }
        }
        _ => unreachable!(),
    }
}

fn primary(p: &Parser, node: &RuleNode) -> Expression {
    match &node.children[..] {
        [id] if id.name == "Identifier" => Expression::reference(identifier(p, id)),
        [_open, expr, _close] => expression(p, expr),
        [lit] if lit.name == "Literal" => literal(p, lit),
        [class] if class.name == "Class" => class_of(p, class),
        [_dot] => Expression::Dot,
        _ => unreachable!(),
    }
}

fn identifier(p: &Parser, node: &RuleNode) -> String {
    // The trailing spacing is part of the Identifier rule, cut it off.
    let end = match node.find("Spacing") {
        Some(sp) => sp.start,
        None => node.end,
    };
    p.text(node.start, end)
}

fn literal(p: &Parser, node: &RuleNode) -> Expression {
    Expression::Literal(node.all("Char").map(|n| decode(p, n)).collect())
}

fn class_of(p: &Parser, node: &RuleNode) -> Expression {
    let mut class = CharClass::new();
    for range in node.all("Range") {
        class = match &range.children[..] {
            [lo, hi] => class.range(decode(p, lo), decode(p, hi)),
            [c] => class.single(decode(p, c)),
            _ => unreachable!(),
        };
    }
    Expression::Class(class)
}

/// Decode one `Char` node, resolving backslash escapes.
fn decode(p: &Parser, node: &RuleNode) -> char {
    let text = p.text(node.start, node.end);
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('\\'), Some(c)) => match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0'..='7' => {
                let mut value = c as u32 - '0' as u32;
                for c in chars {
                    value = value * 8 + (c as u32 - '0' as u32);
                }
                // Three octal digits top out at 0o277, always a valid point.
                char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            c => c,
        },
        (Some(c), _) => c,
        _ => unreachable!(),
    }
}
