use crate::{parser::Parser, *};
use alloc::{string::ToString, vec};

const PEG: &str = include_str!("peg.peg");

#[test]
fn test_literal() {
    let g = parse_grammar("S <- \"ab\"\n").unwrap();
    assert_eq!(g.parse("ab", "S").unwrap(), MatchResult::Match { start: 0, end: 2 });
    assert_eq!(g.parse("abc", "S").unwrap(), MatchResult::Match { start: 0, end: 2 });
    assert_eq!(g.parse("ac", "S").unwrap(), MatchResult::Mismatch { furthest: 1 });
    assert_eq!(g.parse("", "S").unwrap(), MatchResult::Mismatch { furthest: 0 });
}

#[test]
fn test_repetition() {
    let g = parse_grammar("S <- \"a\"*\n").unwrap();
    assert_eq!(g.parse("aaa", "S").unwrap(), MatchResult::Match { start: 0, end: 3 });
    assert_eq!(g.parse("", "S").unwrap(), MatchResult::Match { start: 0, end: 0 });
    assert_eq!(g.parse("baa", "S").unwrap(), MatchResult::Match { start: 0, end: 0 });
    let g = parse_grammar("S <- 'a'+\n").unwrap();
    assert_eq!(g.parse("aab", "S").unwrap(), MatchResult::Match { start: 0, end: 2 });
    assert!(g.parse("b", "S").unwrap().is_mismatch());
    // Greedy repetition never gives characters back.
    let g = parse_grammar("S <- 'a'* 'a'\n").unwrap();
    assert_eq!(g.parse("aaa", "S").unwrap(), MatchResult::Mismatch { furthest: 3 });
}

#[test]
fn test_choice() {
    let g = parse_grammar("S <- 'a' / 'b'\n").unwrap();
    assert_eq!(g.parse("b", "S").unwrap(), MatchResult::Match { start: 0, end: 1 });
    assert_eq!(g.parse("c", "S").unwrap(), MatchResult::Mismatch { furthest: 0 });
    // Determinism: repeated calls yield equal results.
    assert_eq!(g.parse("c", "S").unwrap(), g.parse("c", "S").unwrap());
}

#[test]
fn test_commitment() {
    // Once an alternative succeeds the choice is committed, a failure
    // behind it will not try the longer alternative.
    let g = parse_grammar("S <- ('a' / 'ab') 'c'\n").unwrap();
    assert_eq!(g.parse("ac", "S").unwrap(), MatchResult::Match { start: 0, end: 2 });
    assert_eq!(g.parse("abc", "S").unwrap(), MatchResult::Mismatch { furthest: 1 });
}

#[test]
fn test_predicate() {
    let g = parse_grammar("S <- !'a' .\n").unwrap();
    assert_eq!(g.parse("b", "S").unwrap(), MatchResult::Match { start: 0, end: 1 });
    assert!(g.parse("a", "S").unwrap().is_mismatch());
    let g = parse_grammar("S <- &[0-9] . .\n").unwrap();
    assert_eq!(g.parse("42", "S").unwrap(), MatchResult::Match { start: 0, end: 2 });
    assert!(g.parse("x1", "S").unwrap().is_mismatch());
    assert!(g.parse("4", "S").unwrap().is_mismatch());
}

#[test]
fn test_recursion() {
    let g = parse_grammar("S <- A\nA <- \"x\" A / \"x\"\n").unwrap();
    assert_eq!(g.parse("xxx", "S").unwrap(), MatchResult::Match { start: 0, end: 3 });
    assert!(g.parse("", "S").unwrap().is_mismatch());
}

#[test]
fn test_left_recursion() {
    // A left-recursive rule re-enters itself at the same position and
    // reads its own seeded failure, so it cannot match through itself.
    let g = parse_grammar("S <- S 'a' / 'b'\n").unwrap();
    assert_eq!(g.parse("b", "S").unwrap(), MatchResult::Match { start: 0, end: 1 });
    assert_eq!(g.parse("ba", "S").unwrap(), MatchResult::Match { start: 0, end: 1 });
    let g = parse_grammar("S <- S 'a'\n").unwrap();
    assert_eq!(g.parse("aaa", "S").unwrap(), MatchResult::Mismatch { furthest: 0 });
}

#[test]
fn test_empty_loop() {
    // A repetition body that matches without consuming ends the loop.
    let g = parse_grammar("S <- ('a'?)*\n").unwrap();
    assert_eq!(g.parse("b", "S").unwrap(), MatchResult::Match { start: 0, end: 0 });
    assert_eq!(g.parse("aa", "S").unwrap(), MatchResult::Match { start: 0, end: 2 });
    let g = parse_grammar("S <- ('a'?)+\n").unwrap();
    assert_eq!(g.parse("b", "S").unwrap(), MatchResult::Match { start: 0, end: 0 });
    let g = parse_grammar("S <- ('' / 'a')*\n").unwrap();
    assert_eq!(g.parse("aaa", "S").unwrap(), MatchResult::Match { start: 0, end: 0 });
}

#[test]
fn test_unknown_rule() {
    let g = parse_grammar("S <- 'a'\n").unwrap();
    assert_eq!(
        g.parse("a", "T").unwrap_err(),
        Error::UnknownRule { name: "T".to_string() }
    );
    // References resolve lazily, only the parse that reaches one fails.
    let g = parse_grammar("S <- 'a' T / 'b'\nU <- 'u'\n").unwrap();
    assert_eq!(g.parse("b", "S").unwrap(), MatchResult::Match { start: 0, end: 1 });
    assert_eq!(
        g.parse("at", "S").unwrap_err(),
        Error::UnknownRule { name: "T".to_string() }
    );
}

#[test]
fn test_default_start() {
    let g = parse_grammar("A <- 'a' B\nB <- 'b'\n").unwrap();
    assert_eq!(g.start(), Some("A"));
    assert_eq!(g.parse_default("ab").unwrap(), MatchResult::Match { start: 0, end: 2 });
    assert!(Grammar::new().parse_default("x").is_err());
}

#[test]
fn test_escape() {
    let g = parse_grammar("S <- '\\n\\t\\'' '\\101' '\\60'\n").unwrap();
    assert_eq!(
        g.get("S"),
        Some(&seq![lit!("\n\t'"), lit!("A"), lit!("0")])
    );
    assert_eq!(g.parse("\n\t'A0", "S").unwrap(), MatchResult::Match { start: 0, end: 5 });
    let g = parse_grammar("S <- [\\055\\101-\\132]+\n").unwrap();
    assert_eq!(
        g.get("S"),
        Some(&class!['-', 'A' => 'Z'].plus())
    );
    assert_eq!(g.parse("A-Z", "S").unwrap(), MatchResult::Match { start: 0, end: 3 });
}

#[test]
fn test_class() {
    let c = CharClass::new().range('a', 'm').range('h', 'z');
    assert_eq!(c.ranges(), &[('a', 'z')]);
    let c = CharClass::new().range('a', 'c').range('d', 'f');
    assert_eq!(c.ranges(), &[('a', 'f')]);
    let c = CharClass::new().range('z', 'a');
    assert_eq!(c.ranges(), &[('a', 'z')]);
    let c = CharClass::new().single('b').single('d').range('c', 'c');
    assert_eq!(c.ranges(), &[('b', 'd')]);
    assert!(c.contains('c'));
    assert!(!c.contains('a'));
    assert!(CharClass::new().is_empty());
    // A dash is a plain character when a range cannot be formed.
    let g = parse_grammar("S <- [-+]\n").unwrap();
    assert_eq!(g.get("S"), Some(&class!['+', '-']));
}

#[test]
fn test_syntax_error() {
    assert_eq!(parse_grammar(""), Err(Error::Syntax { furthest: 0 }));
    assert_eq!(parse_grammar("123"), Err(Error::Syntax { furthest: 0 }));
    assert_eq!(parse_grammar("S <- 'a' @"), Err(Error::Syntax { furthest: 9 }));
    assert!(matches!(parse_grammar("S <- 'a"), Err(Error::Syntax { .. })));
    // Redefinition points at the second occurrence.
    assert_eq!(
        parse_grammar("S <- 'a'\nS <- 'b'\n"),
        Err(Error::Syntax { furthest: 9 })
    );
}

#[test]
fn test_empty_alternative() {
    let g = parse_grammar("S <- 'a' /\n").unwrap();
    assert_eq!(g.get("S"), Some(&alt![lit!("a"), lit!("")]));
    assert_eq!(g.parse("b", "S").unwrap(), MatchResult::Match { start: 0, end: 0 });
}

#[test]
fn test_builder() {
    let g = parse_grammar("S <- !'a' ('b' / 'c')* 'd'?\n").unwrap();
    assert_eq!(
        g.get("S"),
        Some(&seq![
            lit!("a").not_pred(),
            alt![lit!("b"), lit!("c")].star(),
            lit!("d").opt(),
        ])
    );
    // Groups and single-element wrappers collapse.
    let g = parse_grammar("S <- ((('a')))\n").unwrap();
    assert_eq!(g.get("S"), Some(&lit!("a")));
    let g = parse_grammar("S <- X Y\nX <- 'x'\nY <- .\n").unwrap();
    assert_eq!(g.len(), 3);
    assert_eq!(
        g.get("S"),
        Some(&seq![Expression::reference("X"), Expression::reference("Y")])
    );
    assert_eq!(g.get("Y"), Some(&Expression::Dot));
}

#[test]
fn test_bootstrap() {
    // The notation fixture builds the exact grammar hard-coded in the engine.
    assert_eq!(parse_grammar(PEG).unwrap(), crate::parser::meta::meta_grammar());
}

#[test]
fn test_self_hosting() {
    let g = parse_grammar(PEG).unwrap();
    let len = PEG.chars().count();
    assert_eq!(g.parse(PEG, "Grammar").unwrap(), MatchResult::Match { start: 0, end: len });
    // The bootstrapped grammar accepts other grammar sources in full.
    for src in [
        "S <- \"ab\"\n",
        "S <- \"a\"*\n",
        "S <- 'a' / 'b'\n",
        "S <- !'a' .\n",
        "S <- A\nA <- \"x\" A / \"x\"\n",
    ] {
        let len = src.chars().count();
        assert_eq!(g.parse(src, "Grammar").unwrap(), MatchResult::Match { start: 0, end: len });
    }
}

#[test]
fn test_dump() {
    let g = parse_grammar("S <- 'a' ('b' / [c-e])+ !.\n").unwrap();
    assert_eq!(dump(&g), "S <- 'a' ('b' / [c-e])+ !.\n");
    let g = Grammar::new().with_rule("S", lit!("a'b\\c\n"));
    assert_eq!(dump(&g), "S <- 'a\\'b\\\\c\\n'\n");
    assert_eq!(parse_grammar(&dump(&g)).unwrap(), g);
}

#[test]
fn test_round_trip() {
    for src in [
        PEG,
        "S <- \"ab\"\n",
        "S <- 'a' / 'b' / ''\n",
        "S <- !'a' ('b' / [c-e\\]])* &.\n",
        "S <- A\nA <- \"x\" A / \"x\"\n",
    ] {
        let g = parse_grammar(src).unwrap();
        assert_eq!(parse_grammar(&dump(&g)).unwrap(), g);
    }
}

#[test]
fn test_comment() {
    let g = parse_grammar("# heading\r\nS <- 'a' # trailing\r\n / 'b'\n").unwrap();
    assert_eq!(g.get("S"), Some(&alt![lit!("a"), lit!("b")]));
    let g = parse_grammar("S <- 'a'\r").unwrap();
    assert_eq!(g.parse("a", "S").unwrap(), MatchResult::Match { start: 0, end: 1 });
}

#[test]
fn test_unicode() {
    // Positions are code point indices, independent of UTF-8 widths.
    let g = parse_grammar("S <- '中' .\n").unwrap();
    assert_eq!(g.parse("中文!", "S").unwrap(), MatchResult::Match { start: 0, end: 2 });
    assert_eq!(g.parse("中", "S").unwrap(), MatchResult::Mismatch { furthest: 1 });
}

#[test]
fn test_indicator() {
    let g = parse_grammar("S <- 'ab'\n").unwrap();
    match g.parse("ax", "S").unwrap() {
        MatchResult::Mismatch { furthest } => {
            assert_eq!(indicated_msg("ax", furthest), "1:2\nax\n ^");
        }
        r => panic!("unexpected match: {:?}", r),
    }
}

#[test]
fn test_parser_reuse() {
    let g = parse_grammar("A <- 'a'+\nB <- 'b'+\n").unwrap();
    let mut p = Parser::new(&g, "aab");
    assert_eq!(p.parse("A").unwrap(), MatchResult::Match { start: 0, end: 2 });
    assert_eq!(p.parse("B").unwrap(), MatchResult::Mismatch { furthest: 0 });
    assert_eq!(p.furthest(), 0);
    assert_eq!(p.text(1, 3), "ab");
    assert_eq!(p.len(), 3);
}
