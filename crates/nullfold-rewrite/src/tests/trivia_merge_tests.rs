use super::*;
use nullfold_common::trivia::{scan_leading_trivia, trivia_text};

/// Trivia pieces of a string made only of trivia.
fn pieces(text: &str) -> Vec<Trivia> {
    let (list, end) = scan_leading_trivia(text, 0);
    assert_eq!(end, text.len(), "not pure trivia: {text:?}");
    list.into_vec()
}

#[test]
fn leading_tail_is_reindented_to_the_guard() {
    let guard = pieces("        //comment1\n        ");
    let tail = pieces("            //comment2\n            ");
    let merged = format_leading(&guard, &tail);
    assert_eq!(
        trivia_text(&merged),
        "        //comment1\n        //comment2\n        "
    );
}

#[test]
fn leading_tail_without_indentation() {
    let merged = format_leading(&pieces("//comment1\n"), &pieces("    //comment2\n    "));
    assert_eq!(trivia_text(&merged), "//comment1\n//comment2\n");
}

#[test]
fn block_comments_inside_a_line_are_spaced_once() {
    let tail = vec![
        Trivia::new(TriviaKind::MultiLineComment, "/* a */"),
        Trivia::whitespace(" "),
        Trivia::new(TriviaKind::MultiLineComment, "/* b */"),
        Trivia::whitespace(" "),
    ];
    let merged = format_leading(&pieces("  "), &tail);
    assert_eq!(trivia_text(&merged), "  /* a */ /* b */ ");
}

#[test]
fn blank_lines_survive_without_trailing_spaces() {
    let merged = format_leading(&pieces("    "), &pieces("\n        "));
    assert_eq!(trivia_text(&merged), "\n    ");

    let merged = format_leading(&pieces("    "), &pieces("// x\n\n        "));
    assert_eq!(trivia_text(&merged), "    // x\n\n    ");
}

#[test]
fn trailing_whitespace_before_line_breaks_is_dropped() {
    let merged = format_trailing(&pieces("\n        \n"), "    ");
    assert_eq!(trivia_text(&merged), "\n\n");

    let merged = format_trailing(&pieces("   "), "");
    assert!(merged.is_empty());
}

#[test]
fn trailing_comment_on_a_new_line_is_reindented() {
    let merged = format_trailing(&pieces("\n            // bye\n\n"), "    ");
    assert_eq!(trivia_text(&merged), "\n    // bye\n\n");

    let merged = format_trailing(&pieces("\n/* end */"), "  ");
    assert_eq!(trivia_text(&merged), "\n  /* end */");
}

#[test]
fn trailing_comment_on_the_same_line_keeps_its_spacing() {
    let mut list = pieces(" ");
    list.extend(pieces(" // e\n"));
    let merged = format_trailing(&list, "");
    assert_eq!(trivia_text(&merged), " // e\n");
}

#[test]
fn comments_and_line_breaks_are_conserved() {
    let guard = pieces("  /* g */\n  ");
    let tail = pieces("   // h\n \n\t/* i */   \n   ");
    let merged = format_leading(&guard, &tail);
    let significant = |list: &[Trivia]| -> Vec<String> {
        list.iter()
            .filter(|t| !t.is_whitespace())
            .map(|t| t.text.clone())
            .collect()
    };
    let mut expected = significant(&guard);
    expected.extend(significant(&tail));
    assert_eq!(significant(&merged), expected);
}
