#[macro_use]
mod common;

#[test]
fn global_assignment_returns_the_value() {
    assert_prints!("var a = 1; print a = 2;", "2\n");
}

#[test]
fn local_assignment_is_visible_after() {
    assert_prints!("{ var a = 1; a = 2; print a; }", "2\n");
}

#[test]
fn assignment_is_right_associative() {
    assert_prints!("var a; var b; var c; a = b = c = 1; print a; print b; print c;", "1\n1\n1\n");
}

#[test]
fn assigning_to_an_undefined_global_is_a_runtime_error() {
    assert_runtime_error!("a = 1;", "Undefined variable 'a'");
}

#[test]
fn invalid_assignment_target_is_a_compile_error() {
    assert_compile_error!("1 = 2;", "Invalid assignment target");
}

#[test]
fn invalid_assignment_target_does_not_abort_the_parse() {
    // Parsing keeps going and a second, unrelated error on the next line is
    // still collected rather than the parser bailing out after the first.
    let (_output, reporter) = common::run("1 = 2;\n+ 3;");
    assert!(reporter.compile_errors.len() >= 2);
}

#[test]
fn assignment_to_a_field_evaluates_to_the_value() {
    assert_prints!("class C {} var c = C(); print c.x = 5;", "5\n");
}
