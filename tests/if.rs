#[macro_use]
mod common;

#[test]
fn dangling_else_binds_to_the_nearest_if() {
    assert_prints!(
        r#"
        if (true) if (false) print "inner"; else print "dangling";
        "#,
        "dangling\n"
    );
}

#[test]
fn then_branch_runs_when_condition_is_truthy() {
    assert_prints!(r#"if (true) print "then"; else print "else";"#, "then\n");
}

#[test]
fn else_branch_runs_when_condition_is_falsy() {
    assert_prints!(r#"if (false) print "then"; else print "else";"#, "else\n");
}

#[test]
fn a_missing_else_is_allowed_and_simply_skipped() {
    assert_prints!(r#"if (false) print "then"; print "after";"#, "after\n");
}

#[test]
fn only_false_and_nil_are_falsy() {
    assert_prints!(
        r#"
        if (0) print "zero is truthy"; else print "zero is falsy";
        if ("") print "empty string is truthy"; else print "empty string is falsy";
        if (nil) print "nil is truthy"; else print "nil is falsy";
        if (false) print "false is truthy"; else print "false is falsy";
        "#,
        "zero is truthy\nempty string is truthy\nnil is falsy\nfalse is falsy\n"
    );
}

#[test]
fn a_class_declaration_is_not_a_valid_then_branch() {
    assert_compile_error!("if (true) class C {}", "Expect expression.");
}

#[test]
fn a_class_declaration_is_not_a_valid_else_branch() {
    assert_compile_error!("if (true) 1; else class C {}", "Expect expression.");
}

#[test]
fn a_var_declaration_is_not_a_valid_then_branch() {
    assert_compile_error!("if (true) var x = 1;", "Expect expression.");
}
