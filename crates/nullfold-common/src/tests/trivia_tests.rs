use super::*;

fn kinds(list: &[Trivia]) -> Vec<TriviaKind> {
    list.iter().map(|t| t.kind).collect()
}

#[test]
fn leading_trivia_spans_multiple_lines() {
    let source = "  // one\n\n  /* two */ x";
    let (pieces, end) = scan_leading_trivia(source, 0);
    assert_eq!(
        kinds(&pieces),
        vec![
            TriviaKind::Whitespace,
            TriviaKind::SingleLineComment,
            TriviaKind::EndOfLine,
            TriviaKind::EndOfLine,
            TriviaKind::Whitespace,
            TriviaKind::MultiLineComment,
            TriviaKind::Whitespace,
        ]
    );
    assert_eq!(&source[end..], "x");
    assert_eq!(trivia_text(&pieces), &source[..end]);
}

#[test]
fn trailing_trivia_stops_after_first_line_break() {
    let source = " // note\n    next";
    let (pieces, end) = scan_trailing_trivia(source, 0);
    assert_eq!(
        kinds(&pieces),
        vec![
            TriviaKind::Whitespace,
            TriviaKind::SingleLineComment,
            TriviaKind::EndOfLine
        ]
    );
    assert_eq!(&source[end..], "    next");
}

#[test]
fn crlf_is_a_single_line_break() {
    let (pieces, end) = scan_trailing_trivia("\r\nx", 0);
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].text, "\r\n");
    assert_eq!(end, 2);
}

#[test]
fn unclosed_multi_line_comment_runs_to_end() {
    let source = "/* open";
    let (pieces, end) = scan_leading_trivia(source, 0);
    assert_eq!(kinds(&pieces), vec![TriviaKind::MultiLineComment]);
    assert_eq!(end, source.len());
}

#[test]
fn slash_that_is_not_a_comment_is_not_trivia() {
    let (pieces, end) = scan_leading_trivia(" / 2", 0);
    assert_eq!(kinds(&pieces), vec![TriviaKind::Whitespace]);
    assert_eq!(end, 1);
}

#[test]
fn indentation_is_whitespace_that_begins_a_line() {
    let (leading, _) = scan_leading_trivia("// c\n    x", 0);
    assert_eq!(indentation(&leading), "    ");

    let (leading, _) = scan_leading_trivia("\t\tx", 0);
    assert_eq!(indentation(&leading), "\t\t");

    let (leading, _) = scan_leading_trivia("/* c */ x", 0);
    assert_eq!(indentation(&leading), "");

    assert_eq!(indentation(&[]), "");
}

#[test]
fn trivia_len_matches_text() {
    let (pieces, end) = scan_leading_trivia("  /* a */\n\t", 0);
    assert_eq!(trivia_len(&pieces), end);
}
