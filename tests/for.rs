#[macro_use]
mod common;

#[test]
fn counts_up() {
    assert_prints!("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
}

#[test]
fn condition_only_runs_while_false_is_never_reached() {
    assert_prints!("for (;false;) print \"never\";", "");
}

#[test]
fn missing_clauses_desugar_to_an_infinite_loop_guarded_by_a_return() {
    assert_prints!(
        r#"
        fun find() {
            var i = 0;
            for (;;) {
                if (i == 3) return i;
                i = i + 1;
            }
        }
        print find();
        "#,
        "3\n"
    );
}

#[test]
fn each_iteration_gets_a_fresh_binding_for_a_closure_created_in_the_body() {
    assert_prints!(
        r#"
        var fns = nil;
        fun collect() {
            var funs = nil;
            for (var i = 1; i < 4; i = i + 1) {
                fun show() { print i; }
                show();
            }
        }
        collect();
        "#,
        "1\n2\n3\n"
    );
}

#[test]
fn a_class_declaration_is_not_a_valid_statement_directly_in_a_for_body() {
    assert_compile_error!("for (;;) class C {}", "Expect expression.");
}

#[test]
fn initializer_and_increment_are_both_optional() {
    assert_prints!(
        r#"
        var i = 0;
        for (; i < 2;) { print i; i = i + 1; }
        "#,
        "0\n1\n"
    );
}
