use alloc::{format, string::String};

/// Indicate the position of the document.
/// This function will show the line number and column number of the position.
///
/// ```
/// use grammar_peg::indicated_msg;
///
/// let doc = indicated_msg("A <- 'x'\nB <- 'y'", 11);
/// assert_eq!(doc, "2:3\nB <- 'y'\n  ^")
/// ```
///
/// If print the string, it would be like:
///
/// ```bash
/// 2:3
/// B <- 'y'
///   ^
/// ```
///
/// The position is counted in code points, as in
/// [`MatchResult::Mismatch`](crate::MatchResult::Mismatch) and
/// [`Error::Syntax`](crate::Error::Syntax). This may be what you need if
/// you want to indicate an error on the mismatched document.
pub fn indicated_msg(doc: &str, mut pos: usize) -> String {
    for (line, str_line) in doc.split('\n').enumerate() {
        let full_line = str_line.chars().count() + 1;
        if full_line > pos {
            return format!(
                "{}:{}\n{}\n{}^",
                line + 1,
                pos + 1,
                str_line,
                " ".repeat(pos)
            );
        } else {
            pos -= full_line;
        }
    }
    unreachable!()
}

/// Same as [`indicated_msg`], but join the path before message.
///
/// ```
/// use grammar_peg::indicated_msg_file;
///
/// let doc = indicated_msg_file("my/grammar.peg", "A <- 'x'\nB <- 'y'", 11);
/// assert_eq!(doc, "my/grammar.peg:2:3\nB <- 'y'\n  ^")
/// ```
pub fn indicated_msg_file(path: &str, doc: &str, pos: usize) -> String {
    format!("{}:{}", path, indicated_msg(doc, pos))
}
