#[macro_use]
mod common;

#[test]
fn a_line_comment_at_end_of_file_is_ignored() {
    assert_prints!("print \"ok\"; // trailing, no newline", "ok\n");
}

#[test]
fn a_file_containing_only_a_comment_produces_no_output() {
    assert_prints!("// just a comment", "");
}

#[test]
fn a_comment_followed_by_a_blank_line_produces_no_output() {
    assert_prints!("// just a comment\n\n", "");
}

#[test]
fn a_comment_may_contain_unicode() {
    assert_prints!("// \u{00b6}\u{00de}\u{0950}\u{0b83}\nprint \"ok\";", "ok\n");
}

#[test]
fn a_slash_not_followed_by_a_slash_is_the_division_operator_not_a_comment() {
    assert_prints!("print 6 / 2;", "3\n");
}
