#[macro_use]
mod common;

#[test]
fn a_string_literal_prints_its_contents_unquoted() {
    assert_prints!(r#"print "a string";"#, "a string\n");
}

#[test]
fn an_empty_string_literal_prints_nothing() {
    assert_prints!(r#"print "";"#, "\n");
}

#[test]
fn unicode_content_passes_through_unchanged() {
    assert_prints!("print \"A~\u{00b6}\u{00de}\u{0950}\u{0b83}\";", "A~\u{00b6}\u{00de}\u{0950}\u{0b83}\n");
}

#[test]
fn a_string_literal_may_span_multiple_source_lines() {
    assert_prints!(
        "print \"1\n2\n3\";",
        "1\n2\n3\n"
    );
}

#[test]
fn an_unterminated_string_is_a_compile_error() {
    assert_compile_error!("\"unterminated", "Unterminated string");
}

#[test]
fn string_concatenation_builds_a_new_string() {
    assert_prints!(r#"print "foo" + "bar" + "baz";"#, "foobarbaz\n");
}
