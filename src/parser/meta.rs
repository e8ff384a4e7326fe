use crate::{Expression, Grammar};
use alloc::vec;

fn r(name: &str) -> Expression {
    Expression::reference(name)
}

/// The hard-coded meta-grammar: a PEG whose language is PEG notation
/// itself, after Ford's original formulation.
///
/// [`parse_grammar`](super::parse_grammar) runs this grammar from the
/// `Grammar` rule over the user's text, then translates the resulting
/// syntax tree. Parsing its own notation back through itself is the
/// self-hosting check of the whole engine.
pub(crate) fn meta_grammar() -> Grammar {
    Grammar::new()
        // Hierarchical syntax
        .with_rule("Grammar", seq![r("Spacing"), r("Definition").plus(), r("EndOfFile")])
        .with_rule("Definition", seq![r("Identifier"), r("LEFTARROW"), r("Expression")])
        .with_rule("Expression", seq![r("Sequence"), seq![r("SLASH"), r("Sequence")].star()])
        .with_rule("Sequence", r("Prefix").star())
        .with_rule("Prefix", seq![alt![r("AND"), r("NOT")].opt(), r("Suffix")])
        .with_rule(
            "Suffix",
            seq![r("Primary"), alt![r("QUESTION"), r("STAR"), r("PLUS")].opt()],
        )
        .with_rule(
            "Primary",
            alt![
                seq![r("Identifier"), r("LEFTARROW").not_pred()],
                seq![r("OPEN"), r("Expression"), r("CLOSE")],
                r("Literal"),
                r("Class"),
                r("DOT"),
            ],
        )
        // Lexical syntax
        .with_rule("Identifier", seq![r("IdentStart"), r("IdentCont").star(), r("Spacing")])
        .with_rule("IdentStart", class!['a' => 'z', 'A' => 'Z', '_'])
        .with_rule("IdentCont", alt![r("IdentStart"), class!['0' => '9']])
        .with_rule(
            "Literal",
            alt![
                seq![
                    class!['\''],
                    seq![class!['\''].not_pred(), r("Char")].star(),
                    class!['\''],
                    r("Spacing"),
                ],
                seq![
                    class!['"'],
                    seq![class!['"'].not_pred(), r("Char")].star(),
                    class!['"'],
                    r("Spacing"),
                ],
            ],
        )
        .with_rule(
            "Class",
            seq![
                lit!("["),
                seq![lit!("]").not_pred(), r("Range")].star(),
                lit!("]"),
                r("Spacing"),
            ],
        )
        .with_rule("Range", alt![seq![r("Char"), lit!("-"), r("Char")], r("Char")])
        .with_rule(
            "Char",
            alt![
                seq![lit!("\\"), class!['n', 'r', 't', '\'', '"', '[', ']', '\\']],
                seq![lit!("\\"), class!['0' => '2'], class!['0' => '7'], class!['0' => '7']],
                seq![lit!("\\"), class!['0' => '7'], class!['0' => '7'].opt()],
                seq![lit!("\\").not_pred(), Expression::Dot],
            ],
        )
        .with_rule("LEFTARROW", seq![lit!("<-"), r("Spacing")])
        .with_rule("SLASH", seq![lit!("/"), r("Spacing")])
        .with_rule("AND", seq![lit!("&"), r("Spacing")])
        .with_rule("NOT", seq![lit!("!"), r("Spacing")])
        .with_rule("QUESTION", seq![lit!("?"), r("Spacing")])
        .with_rule("STAR", seq![lit!("*"), r("Spacing")])
        .with_rule("PLUS", seq![lit!("+"), r("Spacing")])
        .with_rule("OPEN", seq![lit!("("), r("Spacing")])
        .with_rule("CLOSE", seq![lit!(")"), r("Spacing")])
        .with_rule("DOT", seq![lit!("."), r("Spacing")])
        .with_rule("Spacing", alt![r("Space"), r("Comment")].star())
        .with_rule(
            "Comment",
            seq![lit!("#"), seq![r("EndOfLine").not_pred(), Expression::Dot].star(), r("EndOfLine")],
        )
        .with_rule("Space", alt![lit!(" "), lit!("\t"), r("EndOfLine")])
        .with_rule("EndOfLine", alt![lit!("\r\n"), lit!("\n"), lit!("\r")])
        .with_rule("EndOfFile", Expression::Dot.not_pred())
}
